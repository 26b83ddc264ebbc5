//! Sort order resolution for projected trips.

use std::cmp::Ordering;

use tracing::debug;

use crate::domain::{FacetSet, TripRecord};

/// Ordering applied to a projection.
///
/// Ties are never broken further; sorting is stable, so equal keys keep
/// their load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Keep load order.
    #[default]
    Unsorted,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Best rated first.
    Rating,
}

impl SortOrder {
    /// Resolve a sort option id.
    ///
    /// Ids without a defined ordering (such as `duration`) fall back to
    /// load order.
    pub fn from_id(id: &str) -> Self {
        match id {
            "price-low" => SortOrder::PriceLow,
            "price-high" => SortOrder::PriceHigh,
            "rating" => SortOrder::Rating,
            other => {
                debug!(id = other, "no ordering for sort option; keeping load order");
                SortOrder::Unsorted
            }
        }
    }

    /// Resolve the order selected by the active facets, if any.
    pub fn from_facets(facets: &FacetSet) -> Self {
        facets
            .sort()
            .map(|f| Self::from_id(&f.id))
            .unwrap_or_default()
    }

    /// Compare two records under this order.
    pub fn compare(&self, a: &TripRecord, b: &TripRecord) -> Ordering {
        match self {
            SortOrder::Unsorted => Ordering::Equal,
            SortOrder::PriceLow => a.price().cmp(&b.price()),
            SortOrder::PriceHigh => b.price().cmp(&a.price()),
            SortOrder::Rating => b.rating().total_cmp(&a.rating()),
        }
    }

    /// Stable-sort `records` in place.
    pub fn apply<R: AsRef<TripRecord>>(&self, records: &mut [R]) {
        if *self == SortOrder::Unsorted {
            return;
        }
        records.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_fixtures::trip;
    use proptest::prelude::*;

    fn records_strategy() -> impl Strategy<Value = Vec<TripRecord>> {
        prop::collection::vec((1u32..50, 0u8..=10), 0..25).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (price, half_stars))| {
                    trip(&i.to_string(), "T", "L", price, half_stars as f32 / 2.0)
                })
                .collect()
        })
    }

    fn order_strategy() -> impl Strategy<Value = SortOrder> {
        prop_oneof![
            Just(SortOrder::PriceLow),
            Just(SortOrder::PriceHigh),
            Just(SortOrder::Rating),
        ]
    }

    proptest! {
        #[test]
        fn adjacent_pairs_ordered(mut records in records_strategy(), order in order_strategy()) {
            order.apply(&mut records);

            for pair in records.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                match order {
                    SortOrder::PriceLow => prop_assert!(a.price() <= b.price()),
                    SortOrder::PriceHigh => prop_assert!(a.price() >= b.price()),
                    SortOrder::Rating => prop_assert!(a.rating() >= b.rating()),
                    SortOrder::Unsorted => unreachable!(),
                }
            }
        }

        /// Equal keys keep their original relative order.
        #[test]
        fn stable_for_equal_keys(mut records in records_strategy(), order in order_strategy()) {
            order.apply(&mut records);

            for pair in records.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                if order.compare(a, b) == Ordering::Equal {
                    let ia: usize = a.id().as_str().parse().unwrap();
                    let ib: usize = b.id().as_str().parse().unwrap();
                    prop_assert!(ia < ib);
                }
            }
        }
    }
}
