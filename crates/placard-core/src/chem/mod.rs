pub mod database;
pub mod schema;

pub use database::ChemicalDatabase;
pub use schema::ChemicalRecord;
