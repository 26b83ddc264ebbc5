//! Seed tables held in memory: compiled in or loaded from a JSON file.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, Level, Price, Rating, TripId, TripRecord};

use super::{SeedSource, SourceError};

/// One row of a seed table as it appears in JSON.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedTrip {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: u32,
    #[serde(default)]
    pub original_price: Option<u32>,
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub is_liked: bool,
}

impl SeedTrip {
    pub fn popularity(&self) -> Popularity {
        Popularity {
            likes: self.likes,
            liked: self.is_liked,
        }
    }

    /// Validate the row into a trip record.
    pub fn into_record(self) -> Result<TripRecord, DomainError> {
        let mut record = TripRecord::new(
            TripId::parse(&self.id)?,
            self.title,
            self.location,
            Price::new(self.price)?,
            Rating::new(self.rating)?,
            self.review_count,
        );
        if let Some(original) = self.original_price {
            record = record.with_original_price(Price::new(original)?)?;
        }
        if let Some(level) = self.level {
            record = record.with_level(level);
        }
        Ok(record)
    }
}

/// Like count and liked flag a trip ships with.
///
/// Kept beside the records rather than in them: readers change these, and
/// records never change once loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Popularity {
    pub likes: u32,
    pub liked: bool,
}

impl Popularity {
    /// Flip the liked flag, moving the count with it.
    pub fn toggle(&mut self) {
        if self.liked {
            self.likes = self.likes.saturating_sub(1);
        } else {
            self.likes = self.likes.saturating_add(1);
        }
        self.liked = !self.liked;
    }
}

/// A validated base table: records in source order plus their popularity.
#[derive(Debug, Clone, Default)]
pub struct SeedTable {
    records: Vec<TripRecord>,
    /// Keyed by base id.
    popularity: HashMap<String, Popularity>,
}

impl SeedTable {
    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    /// Popularity of the base record a store record was copied from.
    ///
    /// Unknown ids have no likes.
    pub fn popularity(&self, id: &TripId) -> Popularity {
        self.popularity.get(id.base()).copied().unwrap_or_default()
    }
}

impl From<Vec<TripRecord>> for SeedTable {
    fn from(records: Vec<TripRecord>) -> Self {
        Self {
            records,
            popularity: HashMap::new(),
        }
    }
}

/// Validate a whole table: every row valid, ids unique, at least one row.
pub fn convert_table(rows: Vec<SeedTrip>) -> Result<SeedTable, SourceError> {
    if rows.is_empty() {
        return Err(SourceError::EmptySeed);
    }

    let mut table = SeedTable::default();
    for (index, row) in rows.into_iter().enumerate() {
        let popularity = row.popularity();
        let record = row
            .into_record()
            .map_err(|source| SourceError::InvalidRecord { index, source })?;
        let id = record.id().as_str();
        if table.popularity.insert(id.to_string(), popularity).is_some() {
            return Err(SourceError::DuplicateId(id.to_string()));
        }
        table.records.push(record);
    }
    Ok(table)
}

/// The four trips the catalogue ships with.
pub fn builtin_trips() -> Vec<SeedTrip> {
    let row = |id: &str,
               title: &str,
               location: &str,
               price: u32,
               original_price: Option<u32>,
               rating: f32,
               review_count: u32,
               level: Level,
               (likes, is_liked): (u32, bool)| SeedTrip {
        id: id.to_string(),
        title: title.to_string(),
        location: location.to_string(),
        price,
        original_price,
        rating,
        review_count,
        level: Some(level),
        likes,
        is_liked,
    };

    vec![
        row(
            "1",
            "Esquí de travesía en Lofoten – cabaña junto al mar",
            "Islas Lofoten, Noruega",
            1850,
            Some(2100),
            4.9,
            127,
            Level::Intermediate,
            (234, false),
        ),
        row(
            "2",
            "Islas Lofoten esquí en velero",
            "Lofoten, Noruega",
            2400,
            Some(2800),
            4.8,
            89,
            Level::Advanced,
            (189, true),
        ),
        row(
            "3",
            "Lofoten viaje autoguiado",
            "Lofoten, Noruega",
            950,
            None,
            4.7,
            156,
            Level::Beginner,
            (167, false),
        ),
        row(
            "4",
            "Tromsø & Lyngen ski on a sailboat",
            "Tromsø, Noruega",
            2200,
            Some(2600),
            4.9,
            203,
            Level::Advanced,
            (298, false),
        ),
    ]
}

/// A fixed, validated table held in memory.
#[derive(Debug, Clone)]
pub struct StaticSeed {
    table: Arc<SeedTable>,
}

impl StaticSeed {
    /// The compiled-in table.
    pub fn builtin() -> Result<Self, SourceError> {
        Self::from_rows(builtin_trips())
    }

    /// A table from already-parsed rows.
    pub fn from_rows(rows: Vec<SeedTrip>) -> Result<Self, SourceError> {
        Ok(Self {
            table: Arc::new(convert_table(rows)?),
        })
    }

    /// Load a table from a JSON array of trips.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let rows: Vec<SeedTrip> = serde_json::from_str(&json).map_err(|e| SourceError::Json {
            message: format!("{}: {}", path.display(), e),
            body: None,
        })?;

        Self::from_rows(rows)
    }

    pub fn records(&self) -> &[TripRecord] {
        self.table.records()
    }

    pub fn table(&self) -> &SeedTable {
        &self.table
    }
}

impl SeedSource for StaticSeed {
    async fn base_records(&self) -> Result<Arc<SeedTable>, SourceError> {
        Ok(Arc::clone(&self.table))
    }
}
