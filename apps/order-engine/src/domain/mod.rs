//! Domain layer - records and business validation.
//!
//! Records are plain data aggregates with no behavior; all persistence
//! knowledge lives in the infrastructure layer.

/// Record types (Client, Product, Order, Bill).
pub mod records;

/// Field-level validators and the validation error taxonomy.
pub mod validation;

pub use records::{Bill, Client, Order, Product};
pub use validation::{
    ClientAgeValidator, EmailValidator, ProductPriceValidator, ProductQuantityValidator,
    ValidationError, Validator,
};
