use crate::script::method::{AnalysisMethod, ReconstructionMethod};
use crate::script::script::ScriptOptions;
use clap::{Args, Parser, ValueHint};
use std::fmt::Debug;
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct BayesTraitsScriptOptionsArgs {
  /// Model to select in the first BayesTraits menu
  #[clap(long, value_enum, default_value_t = ReconstructionMethod::Multistate)]
  pub method: ReconstructionMethod,

  /// Analysis to select in the second BayesTraits menu. Only maximum likelihood output can be parsed.
  #[clap(long, value_enum, default_value_t = AnalysisMethod::Ml)]
  pub analysis_method: AnalysisMethod,

  /// Restrict all transition rates to the single rate parameter q01
  #[clap(long)]
  pub single_rate: bool,

  /// Annotate the script with the prompts BayesTraits would print
  #[clap(long)]
  pub script_comments: bool,
}

impl From<&BayesTraitsScriptOptionsArgs> for ScriptOptions {
  fn from(args: &BayesTraitsScriptOptionsArgs) -> Self {
    Self {
      method: args.method,
      analysis_method: args.analysis_method,
      include_comments: args.script_comments,
      single_rate: args.single_rate,
    }
  }
}

#[derive(Parser, Debug)]
pub struct BayesTraitsScriptArgs {
  /// Newick file with the tree to reconstruct ancestors on
  #[clap(long, short = 't')]
  #[clap(value_hint = ValueHint::FilePath)]
  pub input_tree: PathBuf,

  /// Path to write the BayesTraits script to. Use '-' to write to standard output.
  #[clap(long, short = 'o', default_value = "-")]
  #[clap(value_hint = ValueHint::AnyPath)]
  pub output: PathBuf,

  /// Also write the tree as a NEXUS file whose translate block numbers the tips, and refer to tips by
  /// these numbers in the script
  #[clap(long)]
  #[clap(value_hint = ValueHint::AnyPath)]
  pub nexus: Option<PathBuf>,

  #[clap(flatten)]
  pub options: BayesTraitsScriptOptionsArgs,
}
