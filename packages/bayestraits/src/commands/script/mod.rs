pub mod run_script;
pub mod script_args;
