pub mod file;
pub mod fs;
pub mod nex;
pub mod nwk;
