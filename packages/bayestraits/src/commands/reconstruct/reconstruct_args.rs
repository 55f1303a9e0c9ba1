use crate::commands::script::script_args::BayesTraitsScriptOptionsArgs;
use clap::{Parser, ValueHint};
use std::fmt::Debug;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct BayesTraitsReconstructArgs {
  /// Newick file with the tree to reconstruct ancestors on
  #[clap(long, short = 't')]
  #[clap(value_hint = ValueHint::FilePath)]
  pub input_tree: PathBuf,

  /// Tab-separated trait table in BayesTraits format: tip name followed by one column per character
  #[clap(long, short = 'd')]
  #[clap(value_hint = ValueHint::FilePath)]
  pub input_trait_data: PathBuf,

  /// Path to write the reconstruction table of the parents of all tips. Use '-' to write to standard output.
  #[clap(long, short = 'o')]
  #[clap(value_hint = ValueHint::AnyPath)]
  pub output: PathBuf,

  /// Directory for the intermediate NEXUS tree and BayesTraits script
  #[clap(long, short = 'O', default_value = ".")]
  #[clap(value_hint = ValueHint::DirPath)]
  pub outdir: PathBuf,

  /// BayesTraits executable. Looked up in PATH unless a path is given.
  #[clap(long, default_value = "BayesTraits")]
  #[clap(value_hint = ValueHint::ExecutablePath)]
  pub bayestraits: PathBuf,

  /// Write a table for every tree in the BayesTraits output, to '<output>.tree<N>', instead of only the first tree
  #[clap(long)]
  pub all_trees: bool,

  #[clap(flatten)]
  pub script: BayesTraitsScriptOptionsArgs,
}
