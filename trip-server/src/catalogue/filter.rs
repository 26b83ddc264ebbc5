//! Facet and free-text filtering of trip records.
//!
//! Matching is case-insensitive substring containment on plain text; facet
//! labels are never interpreted as patterns.

use tracing::trace;

use crate::domain::{FacetCategory, FacetSet, TripRecord};

/// Categories that constrain which records match. `Sort` only orders.
const FILTER_CATEGORIES: [FacetCategory; 4] = [
    FacetCategory::Activity,
    FacetCategory::Location,
    FacetCategory::Duration,
    FacetCategory::GroupSize,
];

/// The record field a facet category is matched against.
fn searchable_field<'r>(record: &'r TripRecord, category: &FacetCategory) -> &'r str {
    match category {
        FacetCategory::Location => record.location(),
        _ => record.title(),
    }
}

/// A query and facet set compiled for repeated matching.
///
/// Lower-cases the query and every label once, so filtering a whole page
/// doesn't redo that work per record.
#[derive(Debug, Clone)]
pub struct FacetFilter {
    query: Option<String>,
    /// Lower-cased labels for each non-empty filter category.
    groups: Vec<(FacetCategory, Vec<String>)>,
}

impl FacetFilter {
    pub fn new(query: &str, facets: &FacetSet) -> Self {
        let query = (!query.is_empty()).then(|| query.to_lowercase());

        let groups = FILTER_CATEGORIES
            .iter()
            .filter_map(|category| {
                let labels: Vec<String> = facets
                    .in_category(category)
                    .map(|f| f.label.to_lowercase())
                    .collect();
                (!labels.is_empty()).then(|| (category.clone(), labels))
            })
            .collect();

        for ignored in facets.iter().filter(|f| !f.category.is_recognized()) {
            trace!(id = %ignored.id, category = %ignored.category, "ignoring unrecognized facet");
        }

        Self { query, groups }
    }

    /// Whether a record passes the text query and every active category.
    ///
    /// Within a category any one label may match; across categories all
    /// must. Categories with no active selection impose nothing.
    pub fn matches(&self, record: &TripRecord) -> bool {
        if let Some(query) = &self.query {
            let title = record.title().to_lowercase();
            let location = record.location().to_lowercase();
            if !title.contains(query.as_str()) && !location.contains(query.as_str()) {
                return false;
            }
        }

        self.groups.iter().all(|(category, labels)| {
            let field = searchable_field(record, category).to_lowercase();
            labels.iter().any(|label| field.contains(label.as_str()))
        })
    }

    /// True if this filter accepts every record, so callers can skip it.
    pub fn is_pass_through(&self) -> bool {
        self.query.is_none() && self.groups.is_empty()
    }
}

/// Whether `record` matches the text `query` and the active `facets`.
pub fn matches(record: &TripRecord, query: &str, facets: &FacetSet) -> bool {
    FacetFilter::new(query, facets).matches(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FacetSelection, facet_option};
    use crate::test_fixtures::{lofoten_pair, trip};

    fn facets(ids: &[&str]) -> FacetSet {
        ids.iter()
            .map(|id| facet_option(id).cloned().unwrap())
            .collect()
    }

    #[test]
    fn empty_query_matches_everything() {
        for record in lofoten_pair() {
            assert!(matches(&record, "", &FacetSet::new()));
        }
        assert!(FacetFilter::new("", &FacetSet::new()).is_pass_through());
        assert!(!FacetFilter::new("x", &FacetSet::new()).is_pass_through());
        assert!(!FacetFilter::new("", &facets(&["sailing"])).is_pass_through());
    }

    #[test]
    fn query_matches_title_or_location_ignoring_case() {
        let [lofoten, tromso] = lofoten_pair().try_into().unwrap();

        assert!(matches(&lofoten, "lofoten", &FacetSet::new()));
        assert!(!matches(&tromso, "lofoten", &FacetSet::new()));
        assert!(matches(&tromso, "SAILBOAT", &FacetSet::new()));
        // Location only
        assert!(matches(&tromso, "noruega", &FacetSet::new()));
        assert!(matches(&tromso, "TROMSØ", &FacetSet::new()));
    }

    #[test]
    fn or_within_category() {
        let record = trip("1", "Esquí de travesía", "Lofoten", 1850, 4.9);
        assert!(matches(&record, "", &facets(&["skiing", "hiking"])));
        assert!(!matches(&record, "", &facets(&["hiking", "cycling"])));
    }

    #[test]
    fn and_across_categories() {
        let record = trip("1", "Esquí de travesía", "Lofoten, Noruega", 1850, 4.9);
        assert!(matches(&record, "", &facets(&["skiing", "lofoten"])));
        assert!(!matches(&record, "", &facets(&["skiing", "tromso"])));
        assert!(!matches(&record, "", &facets(&["sailing", "lofoten"])));
    }

    #[test]
    fn location_facets_search_location_only() {
        let record = trip("1", "Lofoten viaje autoguiado", "Noruega", 950, 4.7);
        assert!(!matches(&record, "", &facets(&["lofoten"])));
        assert!(matches(&record, "", &facets(&["norway"])));
    }

    #[test]
    fn duration_and_group_facets_search_title() {
        let record = trip("1", "Travesía 6-8 días, grupo pequeño (2-6)", "Suecia", 900, 4.0);
        assert!(matches(&record, "", &facets(&["6-8-days"])));
        assert!(matches(&record, "", &facets(&["small-group"])));
        assert!(!matches(&record, "", &facets(&["3-5-days"])));
    }

    #[test]
    fn query_failure_overrides_facets() {
        let record = trip("1", "Esquí de travesía", "Lofoten", 1850, 4.9);
        assert!(!matches(&record, "velero", &facets(&["skiing"])));
    }

    #[test]
    fn sort_does_not_filter() {
        for record in lofoten_pair() {
            assert!(matches(&record, "", &facets(&["price-high"])));
        }
    }

    #[test]
    fn unrecognized_category_fails_open() {
        let set: FacetSet = [FacetSelection::new(
            "winter",
            "nothing matches this",
            FacetCategory::parse("season"),
        )]
        .into_iter()
        .collect();

        for record in lofoten_pair() {
            assert!(matches(&record, "", &set));
        }
    }

    #[test]
    fn labels_are_literal_text() {
        let record = trip("1", "Grupo pequeño (2-6) en Lofoten", "Lofoten", 900, 4.0);
        let literal: FacetSet = [FacetSelection::new("x", "(2-6)", FacetCategory::GroupSize)]
            .into_iter()
            .collect();
        let pattern: FacetSet = [FacetSelection::new("y", ".*", FacetCategory::Activity)]
            .into_iter()
            .collect();

        assert!(matches(&record, "", &literal));
        assert!(!matches(&record, "", &pattern));
        assert!(!matches(&record, "[a-z]+", &FacetSet::new()));
    }
}
