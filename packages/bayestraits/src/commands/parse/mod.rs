pub mod parse_args;
pub mod run_parse;
