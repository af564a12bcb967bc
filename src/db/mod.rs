pub mod filtres;
pub mod insert;
pub mod queries;
pub mod setup;
