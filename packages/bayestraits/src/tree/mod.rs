pub mod create_tree_from_nwk;
pub mod translation;
#[allow(clippy::module_inception)]
pub mod tree;
