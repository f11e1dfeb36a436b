pub mod dataset;
pub mod observability;
pub mod persistence;
