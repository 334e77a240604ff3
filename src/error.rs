use thiserror::Error;

// Error types for the rental ledger
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RentalError {
    #[error("Duplicate id: {0}")]
    DuplicateId(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid rental duration: {0} day(s), must be at least 1")]
    InvalidDuration(i64),

    #[error("Vehicle {0} is not available for rent")]
    VehicleUnavailable(String),

    #[error("Vehicle {0} is not rented")]
    NotRented(String),

    #[error("Daily rate for vehicle {0} cannot be negative")]
    NegativeRate(String),
}
