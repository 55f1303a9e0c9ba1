use clap::{Parser, ValueHint};
use std::fmt::Debug;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct BayesTraitsParseArgs {
  /// BayesTraits output (standard output of a maximum likelihood run). Use '-' to read from standard input.
  #[clap(long, short = 'i', default_value = "-")]
  #[clap(value_hint = ValueHint::FilePath)]
  pub input_log: PathBuf,

  /// Path to write the reconstruction table to. Use '-' to write to standard output.
  #[clap(long, short = 'o', default_value = "-")]
  #[clap(value_hint = ValueHint::AnyPath)]
  pub output: PathBuf,

  /// Write a table for every tree in the log, to '<output>.tree<N>', instead of only the first tree
  #[clap(long)]
  pub all_trees: bool,
}
