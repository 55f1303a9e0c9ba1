pub mod parse;
pub mod reconstruct;
pub mod script;
