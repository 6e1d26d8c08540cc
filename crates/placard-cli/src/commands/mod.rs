pub mod chem;
pub mod generate;
pub mod map;
pub mod sync;
