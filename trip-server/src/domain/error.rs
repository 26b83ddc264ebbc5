//! Domain error types.
//!
//! These errors represent validation failures when building catalogue
//! values. They are distinct from seed source and HTTP errors.

/// Domain-level errors for validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Trip identifier was empty or blank
    #[error("trip id must not be empty")]
    EmptyId,

    /// Price must be a positive amount
    #[error("price must be positive")]
    ZeroPrice,

    /// Rating outside the 0-5 scale (or NaN)
    #[error("rating {0} is outside the 0-5 range")]
    RatingOutOfRange(f32),

    /// Pre-discount price lower than the current price
    #[error("original price {original} is below current price {price}")]
    DiscountAbovePrice { price: u32, original: u32 },

    /// Unknown difficulty level
    #[error("unknown level: {0}")]
    UnknownLevel(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(DomainError::EmptyId.to_string(), "trip id must not be empty");
        assert_eq!(DomainError::ZeroPrice.to_string(), "price must be positive");
        assert_eq!(
            DomainError::RatingOutOfRange(7.5).to_string(),
            "rating 7.5 is outside the 0-5 range"
        );
        assert_eq!(
            DomainError::DiscountAbovePrice {
                price: 2000,
                original: 1500
            }
            .to_string(),
            "original price 1500 is below current price 2000"
        );
        assert_eq!(
            DomainError::UnknownLevel("expert".into()).to_string(),
            "unknown level: expert"
        );
    }
}
