pub mod reconstruct_args;
pub mod run_bayestraits;
pub mod run_reconstruct;
