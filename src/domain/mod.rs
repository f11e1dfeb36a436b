// Customer records as they arrive at the API and in training data
pub mod customer;

// Domain-specific error types
pub mod errors;

// Feature schema, scaling and prediction value types
pub mod ml;
