#![allow(clippy::large_enum_variant)]

use crate::cli::verbosity::Verbosity;
use bayestraits::commands::parse::parse_args::BayesTraitsParseArgs;
use bayestraits::commands::reconstruct::reconstruct_args::BayesTraitsReconstructArgs;
use bayestraits::commands::script::script_args::BayesTraitsScriptArgs;
use bayestraits::utils::global_init::setup_logger;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use eyre::Report;
use std::fmt::Debug;
use std::io;

#[derive(Parser, Debug)]
#[clap(name = "bayestraits-asr")]
#[clap(author, version)]
#[clap(verbatim_doc_comment)]
/// Ancestral state reconstruction of discrete traits with BayesTraits
///
/// Drives the interactive BayesTraits program: writes the tree as NEXUS, generates a script which
/// reconstructs the parent node of every tip, runs BayesTraits and tabulates the most likely state
/// of every reconstructed node.
pub struct BayesTraitsAsrArgs {
  #[clap(subcommand)]
  pub command: BayesTraitsAsrCommands,

  #[clap(flatten)]
  pub verbosity: Verbosity,
}

#[derive(Subcommand, Debug)]
#[clap(verbatim_doc_comment)]
pub enum BayesTraitsAsrCommands {
  /// Generate shell completions.
  ///
  /// This will print the completions file contents to the console. Refer to your shell's documentation on how
  /// to install the completions.
  ///
  /// Example for Ubuntu Linux:
  ///
  ///    bayestraits-asr completions bash > ~/.local/share/bash-completion/bayestraits-asr
  ///
  Completions {
    /// Name of the shell to generate appropriate completions
    #[clap(value_name = "SHELL", default_value_t = Shell::Bash, value_enum)]
    shell: Shell,
  },

  /// Reconstructs the parent of every tip with BayesTraits and writes a table of the most likely state of each
  /// character at each reconstructed node.
  Reconstruct(BayesTraitsReconstructArgs),

  /// Writes the BayesTraits script which reconstructs the parent of every tip, without running BayesTraits.
  Script(BayesTraitsScriptArgs),

  /// Reads the output of a finished maximum likelihood BayesTraits run and writes the reconstruction table.
  Parse(BayesTraitsParseArgs),
}

pub fn generate_shell_completions(shell: Shell) -> Result<(), Report> {
  let mut command = BayesTraitsAsrArgs::command();
  let bin_name = command.get_name().to_owned();
  generate(shell, &mut command, bin_name, &mut io::stdout());
  Ok(())
}

pub fn bayestraits_parse_cli_args() -> Result<BayesTraitsAsrArgs, Report> {
  let args = BayesTraitsAsrArgs::parse();
  setup_logger(args.verbosity.filter_level());
  Ok(args)
}
