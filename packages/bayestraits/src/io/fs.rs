use crate::io::file::open_file_or_stdin;
use eyre::{eyre, Report, WrapErr};
use std::ffi::OsStr;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, fs};

pub fn absolute_path(path: impl AsRef<Path>) -> Result<PathBuf, Report> {
  let path = path.as_ref();

  let absolute_path = if path.is_absolute() {
    path.to_path_buf()
  } else {
    env::current_dir()?.join(path)
  };

  Ok(absolute_path)
}

pub fn ensure_dir(filepath: impl AsRef<Path>) -> Result<(), Report> {
  let filepath = filepath.as_ref();
  {
    let parent_dir = filepath
      .parent()
      .ok_or_else(|| eyre!("Unable to get parent path for '{}'", filepath.display()))?;

    let parent_path = absolute_path(parent_dir)?;

    fs::create_dir_all(&parent_path).wrap_err_with(|| format!("When creating directory '{}'", parent_path.display()))
  }
  .wrap_err_with(|| format!("When ensuring parent directory for '{}'", filepath.display()))
}

pub fn filename_maybe(filepath: impl AsRef<Path>) -> Option<String> {
  filepath.as_ref().file_name()?.to_str()?.to_owned().into()
}

pub fn add_extension(filepath: impl AsRef<Path>, extension: impl AsRef<OsStr>) -> PathBuf {
  let filepath = filepath.as_ref();
  let extension = extension.as_ref();

  let mut stem = match filepath.file_name() {
    Some(stem) => stem.to_os_string(),
    None => return filepath.to_owned(),
  };

  if !extension.is_empty() {
    stem.push(".");
    stem.push(extension);
  }

  filepath.to_owned().with_file_name(&stem)
}

/// Reads entire file into a string.
/// Compared to `std::fs::read_to_string` uses buffered reader
pub fn read_file_to_string(filepath: impl AsRef<Path>) -> Result<String, Report> {
  let filepath = filepath.as_ref();
  let mut file = open_file_or_stdin(&Some(filepath))?;
  let mut data = String::new();
  file
    .read_to_string(&mut data)
    .wrap_err_with(|| format!("When reading file: '{}'", filepath.display()))?;
  Ok(data)
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use rstest::rstest;

  #[rstest]
  #[case("traits.tab", "log.txt", "traits.tab.log.txt")]
  #[case("data/traits.tab", "log.txt", "data/traits.tab.log.txt")]
  #[case("data/traits", "", "data/traits")]
  fn test_add_extension(#[case] path: &str, #[case] ext: &str, #[case] expected: &str) {
    assert_eq!(PathBuf::from(expected), add_extension(path, ext));
  }

  #[rstest]
  fn test_filename_maybe() {
    assert_eq!(Some("tree.nwk".to_owned()), filename_maybe("/data/run/tree.nwk"));
  }
}
