use bayestraits::commands::parse::run_parse::run_parse;
use bayestraits::commands::reconstruct::run_reconstruct::run_reconstruct;
use bayestraits::commands::script::run_script::run_script;
use bayestraits::utils::global_init::global_init;
use bayestraits_cli::cli::bayestraits_cli::{
  bayestraits_parse_cli_args, generate_shell_completions, BayesTraitsAsrCommands,
};
use ctor::ctor;
use eyre::Report;
use log::debug;

#[ctor]
fn init() {
  global_init();
}

fn main() -> Result<(), Report> {
  let args = bayestraits_parse_cli_args()?;

  debug!("{:#?}", &args);

  match args.command {
    BayesTraitsAsrCommands::Completions { shell } => {
      generate_shell_completions(shell)?;
    }
    BayesTraitsAsrCommands::Reconstruct(reconstruct_args) => {
      run_reconstruct(&reconstruct_args)?;
    }
    BayesTraitsAsrCommands::Script(script_args) => {
      run_script(&script_args)?;
    }
    BayesTraitsAsrCommands::Parse(parse_args) => {
      run_parse(&parse_args)?;
    }
  }

  Ok(())
}
