//! Trip records and their value types.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::DomainError;

/// Stable identifier of a trip within the in-memory catalogue.
///
/// Base records from the seed source carry their source id (e.g. `"1"`).
/// Records materialised into the store carry a derived id of the form
/// `"{base}-{serial}"`, where `serial` is unique per store.
///
/// # Examples
///
/// ```
/// use trip_server::domain::TripId;
///
/// let id = TripId::parse("1").unwrap();
/// assert_eq!(id.derive(7).as_str(), "1-7");
///
/// assert!(TripId::parse("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    /// Parse an identifier. Blank strings are rejected.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        if s.trim().is_empty() {
            return Err(DomainError::EmptyId);
        }
        Ok(TripId(s.to_string()))
    }

    /// Derive the id of a store copy of this base record.
    ///
    /// The serial is all digits, so two derived ids can only collide if
    /// both the base id and the serial are equal.
    pub fn derive(&self, serial: u64) -> TripId {
        TripId(format!("{}-{}", self.0, serial))
    }

    /// The base id a derived id was made from.
    ///
    /// Ids without a numeric serial suffix are returned unchanged.
    pub fn base(&self) -> &str {
        match self.0.rsplit_once('-') {
            Some((base, serial))
                if !base.is_empty()
                    && !serial.is_empty()
                    && serial.bytes().all(|b| b.is_ascii_digit()) =>
            {
                base
            }
            _ => &self.0,
        }
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A positive price in whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Price(u32);

impl Price {
    /// Create a price, rejecting zero.
    pub fn new(amount: u32) -> Result<Self, DomainError> {
        if amount == 0 {
            return Err(DomainError::ZeroPrice);
        }
        Ok(Price(amount))
    }

    pub fn amount(&self) -> u32 {
        self.0
    }
}

/// A review score on the closed 0-5 scale.
///
/// NaN is unrepresentable, so ratings have a total order.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Rating(f32);

impl Rating {
    /// Highest possible score.
    pub const MAX: f32 = 5.0;

    /// Create a rating, rejecting NaN and values outside 0-5.
    pub fn new(score: f32) -> Result<Self, DomainError> {
        if !(0.0..=Self::MAX).contains(&score) {
            return Err(DomainError::RatingOutOfRange(score));
        }
        Ok(Rating(score))
    }

    pub fn score(&self) -> f32 {
        self.0
    }

    /// Total ordering between two ratings.
    pub fn total_cmp(&self, other: &Rating) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Difficulty level of a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    /// Parse a level name (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => Err(DomainError::UnknownLevel(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

/// One bookable adventure offering.
///
/// Records are immutable once built. Interaction state such as a liked
/// flag belongs to the presentation layer, not here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    id: TripId,
    title: String,
    location: String,
    price: Price,
    original_price: Option<Price>,
    rating: Rating,
    review_count: u32,
    level: Option<Level>,
}

impl TripRecord {
    /// Create a record without a discount or level.
    pub fn new(
        id: TripId,
        title: impl Into<String>,
        location: impl Into<String>,
        price: Price,
        rating: Rating,
        review_count: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            location: location.into(),
            price,
            original_price: None,
            rating,
            review_count,
            level: None,
        }
    }

    /// Attach a pre-discount price. It must not be below the current price.
    pub fn with_original_price(mut self, original: Price) -> Result<Self, DomainError> {
        if original < self.price {
            return Err(DomainError::DiscountAbovePrice {
                price: self.price.amount(),
                original: original.amount(),
            });
        }
        self.original_price = Some(original);
        Ok(self)
    }

    /// Attach a difficulty level.
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Copy of this record under a store-unique derived id.
    pub(crate) fn page_copy(&self, serial: u64) -> TripRecord {
        TripRecord {
            id: self.id.derive(serial),
            ..self.clone()
        }
    }

    pub fn id(&self) -> &TripId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn original_price(&self) -> Option<Price> {
        self.original_price
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn review_count(&self) -> u32 {
        self.review_count
    }

    pub fn level(&self) -> Option<Level> {
        self.level
    }

    /// Percentage saved against the original price, rounded down.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = u64::from(self.original_price?.amount());
        let saved = original.saturating_sub(u64::from(self.price.amount()));
        Some((saved * 100 / original) as u32)
    }
}

impl AsRef<TripRecord> for TripRecord {
    fn as_ref(&self) -> &TripRecord {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(price: u32) -> TripRecord {
        TripRecord::new(
            TripId::parse("1").unwrap(),
            "Lofoten viaje autoguiado",
            "Lofoten, Noruega",
            Price::new(price).unwrap(),
            Rating::new(4.7).unwrap(),
            156,
        )
    }

    #[test]
    fn blank_id_rejected() {
        assert_eq!(TripId::parse(""), Err(DomainError::EmptyId));
        assert_eq!(TripId::parse("   "), Err(DomainError::EmptyId));
        assert!(TripId::parse("a").is_ok());
    }

    #[test]
    fn derived_ids_include_serial() {
        let id = TripId::parse("4").unwrap();
        assert_eq!(id.derive(0).as_str(), "4-0");
        assert_eq!(id.derive(31).as_str(), "4-31");
    }

    #[test]
    fn base_strips_serial() {
        assert_eq!(TripId::parse("4").unwrap().derive(31).base(), "4");
        assert_eq!(TripId::parse("1-1").unwrap().derive(5).base(), "1-1");
        assert_eq!(TripId::parse("tromso").unwrap().base(), "tromso");
        assert_eq!(TripId::parse("ski-x").unwrap().base(), "ski-x");
    }

    #[test]
    fn zero_price_rejected() {
        assert_eq!(Price::new(0), Err(DomainError::ZeroPrice));
        assert_eq!(Price::new(950).unwrap().amount(), 950);
    }

    #[test]
    fn rating_bounds() {
        assert!(Rating::new(0.0).is_ok());
        assert!(Rating::new(5.0).is_ok());
        assert!(Rating::new(-0.1).is_err());
        assert!(Rating::new(5.1).is_err());
        assert!(Rating::new(f32::NAN).is_err());
    }

    #[test]
    fn level_parse() {
        assert_eq!(Level::parse("Advanced").unwrap(), Level::Advanced);
        assert_eq!(Level::parse("beginner").unwrap().as_str(), "beginner");
        assert!(Level::parse("expert").is_err());
    }

    #[test]
    fn original_price_must_not_be_below_price() {
        let err = record(2000)
            .with_original_price(Price::new(1500).unwrap())
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::DiscountAbovePrice {
                price: 2000,
                original: 1500
            }
        );

        let ok = record(1850)
            .with_original_price(Price::new(2100).unwrap())
            .unwrap();
        assert_eq!(ok.original_price().unwrap().amount(), 2100);
    }

    #[test]
    fn discount_percent() {
        assert_eq!(record(950).discount_percent(), None);
        let discounted = record(1850)
            .with_original_price(Price::new(2100).unwrap())
            .unwrap();
        assert_eq!(discounted.discount_percent(), Some(11));
    }

    #[test]
    fn discount_percent_large_prices() {
        let discounted = record(1)
            .with_original_price(Price::new(50_000_000).unwrap())
            .unwrap();
        assert_eq!(discounted.discount_percent(), Some(99));

        let top = record(u32::MAX - 1)
            .with_original_price(Price::new(u32::MAX).unwrap())
            .unwrap();
        assert_eq!(top.discount_percent(), Some(0));
    }

    #[test]
    fn page_copy_changes_only_id() {
        let base = record(950).with_level(Level::Beginner);
        let copy = base.page_copy(12);
        assert_eq!(copy.id().as_str(), "1-12");
        assert_eq!(copy.title(), base.title());
        assert_eq!(copy.price(), base.price());
        assert_eq!(copy.level(), Some(Level::Beginner));
    }
}
