pub mod parse;
pub mod reduce;
pub mod schema;
pub mod table;
