//! Business validation for records.
//!
//! Validators are pure: they inspect one record and either pass or
//! return a [`ValidationError`]. The store performs no validation;
//! services run their validator chain before any write. Stock
//! sufficiency is checked by the order workflow instead, because it
//! needs the transactional product read.

use rust_decimal::Decimal;
use thiserror::Error;

use super::records::{Client, Product};

/// A business-invariant violation, raised before any write occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Client age outside the allowed range.
    #[error("client age {age} outside allowed range [{min}, {max}]")]
    AgeOutOfRange {
        /// Offending age.
        age: i64,
        /// Lower bound (inclusive).
        min: i64,
        /// Upper bound (inclusive).
        max: i64,
    },

    /// Email address fails the structural check.
    #[error("email address '{0}' is not structurally valid")]
    InvalidEmail(String),

    /// Product price outside the allowed range.
    #[error("price {price} outside allowed range (0, {max}]")]
    PriceOutOfRange {
        /// Offending price.
        price: Decimal,
        /// Upper bound (inclusive).
        max: Decimal,
    },

    /// Product quantity outside the allowed range.
    #[error("quantity {quantity} outside allowed range (0, {max}]")]
    QuantityOutOfRange {
        /// Offending quantity.
        quantity: i64,
        /// Upper bound (inclusive).
        max: i64,
    },

    /// Order quantity must be at least one.
    #[error("order quantity must be positive, got {0}")]
    NonPositiveOrderQuantity(i64),

    /// Requested quantity exceeds current stock.
    #[error("requested quantity {requested} exceeds available stock {available}")]
    InsufficientStock {
        /// Quantity requested by the order.
        requested: i64,
        /// Stock available at validation time.
        available: i64,
    },

    /// The referenced product does not exist.
    #[error("no product with id {0}")]
    UnknownProduct(i64),

    /// The referenced client does not exist.
    #[error("no client with id {0}")]
    UnknownClient(i64),
}

/// A pure field-level validator for one record type.
pub trait Validator<T>: Send + Sync {
    /// Check one record against a single business invariant.
    fn validate(&self, record: &T) -> Result<(), ValidationError>;
}

/// Enforces the client age bounds.
#[derive(Debug, Clone, Copy)]
pub struct ClientAgeValidator {
    min: i64,
    max: i64,
}

impl Default for ClientAgeValidator {
    fn default() -> Self {
        Self { min: 7, max: 99 }
    }
}

impl Validator<Client> for ClientAgeValidator {
    fn validate(&self, record: &Client) -> Result<(), ValidationError> {
        if record.age < self.min || record.age > self.max {
            return Err(ValidationError::AgeOutOfRange {
                age: record.age,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Structural email check: one `@`, non-empty local part, dotted domain.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailValidator;

impl Validator<Client> for EmailValidator {
    fn validate(&self, record: &Client) -> Result<(), ValidationError> {
        let Some((local, domain)) = record.email.split_once('@') else {
            return Err(ValidationError::InvalidEmail(record.email.clone()));
        };
        let dotted = domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.');
        if local.is_empty() || domain.is_empty() || !dotted {
            return Err(ValidationError::InvalidEmail(record.email.clone()));
        }
        Ok(())
    }
}

/// Enforces the product price bounds.
#[derive(Debug, Clone, Copy)]
pub struct ProductPriceValidator {
    max_price: Decimal,
}

impl Default for ProductPriceValidator {
    fn default() -> Self {
        Self {
            max_price: Decimal::from(10_000),
        }
    }
}

impl Validator<Product> for ProductPriceValidator {
    fn validate(&self, record: &Product) -> Result<(), ValidationError> {
        if record.price <= Decimal::ZERO || record.price > self.max_price {
            return Err(ValidationError::PriceOutOfRange {
                price: record.price,
                max: self.max_price,
            });
        }
        Ok(())
    }
}

/// Enforces the product quantity bounds at create/update time.
#[derive(Debug, Clone, Copy)]
pub struct ProductQuantityValidator {
    max_quantity: i64,
}

impl Default for ProductQuantityValidator {
    fn default() -> Self {
        Self { max_quantity: 1_000 }
    }
}

impl Validator<Product> for ProductQuantityValidator {
    fn validate(&self, record: &Product) -> Result<(), ValidationError> {
        if record.quantity <= 0 || record.quantity > self.max_quantity {
            return Err(ValidationError::QuantityOutOfRange {
                quantity: record.quantity,
                max: self.max_quantity,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn client_aged(age: i64) -> Client {
        Client {
            id: 0,
            name: "Ana".to_string(),
            address: "1 Main St".to_string(),
            email: "ana@example.com".to_string(),
            age,
        }
    }

    fn product_with(price: Decimal, quantity: i64) -> Product {
        Product {
            id: 0,
            name: "Widget".to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn age_bounds_are_inclusive() {
        let v = ClientAgeValidator::default();
        assert!(v.validate(&client_aged(7)).is_ok());
        assert!(v.validate(&client_aged(99)).is_ok());
        assert!(v.validate(&client_aged(6)).is_err());
        assert!(v.validate(&client_aged(100)).is_err());
    }

    #[test]
    fn email_structural_check() {
        let v = EmailValidator;
        let ok = |email: &str| {
            let mut c = client_aged(30);
            c.email = email.to_string();
            v.validate(&c)
        };
        assert!(ok("ana@example.com").is_ok());
        assert!(ok("a.b@mail.example.org").is_ok());
        assert!(ok("no-at-sign").is_err());
        assert!(ok("@example.com").is_err());
        assert!(ok("ana@").is_err());
        assert!(ok("ana@nodot").is_err());
        assert!(ok("ana@.example.com").is_err());
    }

    #[test]
    fn price_must_be_positive_and_bounded() {
        let v = ProductPriceValidator::default();
        assert!(v.validate(&product_with(dec!(0.01), 1)).is_ok());
        assert!(v.validate(&product_with(dec!(10000), 1)).is_ok());
        assert!(v.validate(&product_with(Decimal::ZERO, 1)).is_err());
        assert!(v.validate(&product_with(dec!(-5), 1)).is_err());
        assert!(v.validate(&product_with(dec!(10000.01), 1)).is_err());
    }

    #[test]
    fn quantity_must_be_positive_and_bounded() {
        let v = ProductQuantityValidator::default();
        assert!(v.validate(&product_with(dec!(1), 1)).is_ok());
        assert!(v.validate(&product_with(dec!(1), 1000)).is_ok());
        assert!(v.validate(&product_with(dec!(1), 0)).is_err());
        assert!(v.validate(&product_with(dec!(1), 1001)).is_err());
    }
}
