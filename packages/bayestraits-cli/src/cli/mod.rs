pub mod bayestraits_cli;
pub mod verbosity;
