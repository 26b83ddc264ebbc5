//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::catalogue::GrowthOutcome;
use crate::seed::Popularity;
use crate::domain::{
    FacetCategory, FacetSelection, FacetSet, Level, TripId, TripRecord, category_label,
    facet_options,
};

/// Card heights used by the masonry grid.
const CARD_HEIGHTS: [u16; 4] = [250, 300, 350, 400];

/// Pick a card height from the trip id, so a card keeps its height across
/// reloads.
pub fn card_height(id: &TripId) -> u16 {
    let hash = id
        .as_str()
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    CARD_HEIGHTS[(hash % CARD_HEIGHTS.len() as u32) as usize]
}

/// A trip as shown on a card or in the detail view.
#[derive(Debug, Serialize, Deserialize)]
pub struct TripCard {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: u32,
    pub original_price: Option<u32>,
    pub discount_percent: Option<u32>,
    pub rating: f32,
    pub review_count: u32,
    pub level: Option<Level>,
    pub likes: u32,
    pub liked: bool,
    pub card_height: u16,
}

impl TripCard {
    pub fn from_record(record: &TripRecord, popularity: Popularity) -> Self {
        Self {
            id: record.id().to_string(),
            title: record.title().to_string(),
            location: record.location().to_string(),
            price: record.price().amount(),
            original_price: record.original_price().map(|p| p.amount()),
            discount_percent: record.discount_percent(),
            rating: record.rating().score(),
            review_count: record.review_count(),
            level: record.level(),
            likes: popularity.likes,
            liked: popularity.liked,
            card_height: card_height(record.id()),
        }
    }
}

/// The current projection of the catalogue.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogueResponse {
    pub query: String,
    pub active_facets: Vec<FacetSelection>,
    pub trips: Vec<TripCard>,
    /// Number of records loaded in the store.
    pub loaded: usize,
    /// Whether a page request is outstanding.
    pub growing: bool,
}

/// Request to change the search text.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

/// Result of a growth request.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GrowthResponse {
    Appended { added: usize, total: usize },
    Coalesced,
}

impl From<GrowthOutcome> for GrowthResponse {
    fn from(outcome: GrowthOutcome) -> Self {
        match outcome {
            GrowthOutcome::Appended { added, total } => GrowthResponse::Appended { added, total },
            GrowthOutcome::Coalesced => GrowthResponse::Coalesced,
        }
    }
}

/// Result of toggling a like.
#[derive(Debug, Serialize, Deserialize)]
pub struct LikeResponse {
    pub id: String,
    pub likes: u32,
    pub liked: bool,
}

/// One selectable option in the filter picker.
#[derive(Debug, Serialize, Deserialize)]
pub struct FacetOptionView {
    pub id: String,
    pub label: String,
    pub active: bool,
}

/// Options of one category in the filter picker.
#[derive(Debug, Serialize, Deserialize)]
pub struct FacetGroup {
    pub category: FacetCategory,
    pub label: String,
    pub options: Vec<FacetOptionView>,
}

/// The filter picker contents.
#[derive(Debug, Serialize, Deserialize)]
pub struct FacetsResponse {
    pub groups: Vec<FacetGroup>,
    /// Total number of active selections.
    pub active: usize,
}

impl FacetsResponse {
    /// Group the offered options by category, marking those in `active`.
    pub fn build(active: &FacetSet) -> Self {
        let groups = FacetCategory::KNOWN
            .into_iter()
            .map(|category| {
                let options = facet_options()
                    .iter()
                    .filter(|o| o.category == category)
                    .map(|o| FacetOptionView {
                        id: o.id.clone(),
                        label: o.label.clone(),
                        active: active.contains(&o.id),
                    })
                    .collect();
                FacetGroup {
                    label: category_label(&category).to_string(),
                    category,
                    options,
                }
            })
            .collect();

        Self {
            groups,
            active: active.len(),
        }
    }
}

/// Search shortcuts offered under the search box.
pub const POPULAR_SEARCHES: [&str; 5] = ["Lofoten", "Esquí", "Velero", "Autoguiado", "Tromsø"];

/// The popular search shortcuts.
#[derive(Debug, Serialize, Deserialize)]
pub struct PopularSearches {
    pub tags: Vec<String>,
}

impl Default for PopularSearches {
    fn default() -> Self {
        Self {
            tags: POPULAR_SEARCHES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Error response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
