pub mod directive;
pub mod method;
#[allow(clippy::module_inception)]
pub mod script;
pub mod siblings;
