use crate::io::file::write_lines;
use crate::output::reduce::TreeReconstruction;
use eyre::{Report, WrapErr};
use itertools::Itertools;
use std::path::Path;

/// Render the reconstruction as a trait table: a `#Trait` header listing the characters, then one line per
/// node with a `state|probability` call per character. Lines are newline-terminated.
pub fn reconstruction_table_lines(reconstruction: &TreeReconstruction) -> Vec<String> {
  let header = format!(
    "#{}\n",
    std::iter::once("Trait".to_owned())
      .chain(reconstruction.characters.iter().map(ToString::to_string))
      .join("\t")
  );

  let rows = reconstruction.calls.iter().map(|(node, calls)| {
    let fields = reconstruction
      .characters
      .iter()
      .map(|character| calls.get(character).map(ToString::to_string).unwrap_or_default());
    format!("{}\n", std::iter::once(node.clone()).chain(fields).join("\t"))
  });

  std::iter::once(header).chain(rows).collect_vec()
}

pub fn write_reconstruction_table(
  filepath: impl AsRef<Path>,
  reconstruction: &TreeReconstruction,
) -> Result<(), Report> {
  let filepath = filepath.as_ref();
  write_lines(filepath, &reconstruction_table_lines(reconstruction))
    .wrap_err_with(|| format!("When writing reconstruction table '{filepath:#?}'"))
}
