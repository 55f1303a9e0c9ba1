//! Drives the BayesTraits ancestral state reconstruction program.
//!
//! Two text transformations make up the core: [script::script::generate_script] turns a tree topology into
//! a BayesTraits control script, and [output::parse::parse_reconstruction_output] turns the tab-separated
//! BayesTraits log back into maximum-likelihood state calls per node and character.

pub mod commands;
pub mod error;
pub mod io;
pub mod output;
pub mod script;
pub mod tree;
pub mod utils;
