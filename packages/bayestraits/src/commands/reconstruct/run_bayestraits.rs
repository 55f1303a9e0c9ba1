use crate::io::fs::{absolute_path, add_extension};
use crate::make_error;
use eyre::{Report, WrapErr};
use log::{debug, info};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// BayesTraits writes its log next to the trait table, with this extension appended
pub const BAYESTRAITS_LOG_EXTENSION: &str = "log.txt";

/// Where BayesTraits will write its log for a given trait table
pub fn predict_bayestraits_log_file(trait_data: impl AsRef<Path>) -> PathBuf {
  add_extension(trait_data, BAYESTRAITS_LOG_EXTENSION)
}

/// Run BayesTraits on a tree and a trait table, answering its prompts from the script file.
/// Returns everything BayesTraits printed to standard output.
pub fn run_bayestraits(
  executable: impl AsRef<Path>,
  tree: impl AsRef<Path>,
  trait_data: impl AsRef<Path>,
  script: impl AsRef<Path>,
) -> Result<String, Report> {
  let executable = executable.as_ref();
  let script = script.as_ref();
  let tree = absolute_path(tree)?;
  let trait_data = absolute_path(trait_data)?;

  let script_file = File::open(script).wrap_err_with(|| format!("When opening BayesTraits script {script:#?}"))?;

  info!("Running {executable:#?} {tree:#?} {trait_data:#?} < {script:#?}");

  let output = Command::new(executable)
    .arg(&tree)
    .arg(&trait_data)
    .stdin(Stdio::from(script_file))
    .output()
    .wrap_err_with(|| format!("When starting BayesTraits executable {executable:#?}"))?;

  let stderr = String::from_utf8_lossy(&output.stderr);
  if !stderr.trim().is_empty() {
    debug!("BayesTraits standard error:\n{stderr}");
  }

  if !output.status.success() {
    return make_error!(
      "BayesTraits executable {executable:#?} failed ({}): {}",
      output.status,
      stderr.trim()
    );
  }

  String::from_utf8(output.stdout).wrap_err("When reading BayesTraits standard output")
}
