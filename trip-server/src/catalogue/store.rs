//! Append-only store of loaded trip records.

use crate::domain::{TripId, TripRecord};

use super::CatalogueError;

/// Deterministic page generator.
///
/// Pages are built by walking the seed table cyclically. The seed only
/// rotates the starting offset, so the same seed and serial always produce
/// the same record.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageGenerator {
    seed: u64,
}

impl PageGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Build `len` records starting at `first_serial`.
    ///
    /// Each record is a copy of a base record under the id
    /// `"{base}-{serial}"`. Returns an empty page if `base` is empty.
    pub fn generate(
        &self,
        base: &[TripRecord],
        first_serial: u64,
        len: usize,
    ) -> Vec<TripRecord> {
        if base.is_empty() {
            return Vec::new();
        }
        let cycle = base.len() as u64;

        (0..len as u64)
            .map(|offset| {
                let serial = first_serial + offset;
                let idx = (self.seed.wrapping_add(serial) % cycle) as usize;
                base[idx].page_copy(serial)
            })
            .collect()
    }
}

/// The ordered sequence of trip records currently loaded.
///
/// Records are only ever appended. The only way to drop records is a full
/// `reset`, which also restarts id serials.
#[derive(Debug, Clone, Default)]
pub struct CatalogueStore {
    records: Vec<TripRecord>,
    next_serial: u64,
    generator: PageGenerator,
}

impl CatalogueStore {
    pub fn new(generator: PageGenerator) -> Self {
        Self {
            records: Vec::new(),
            next_serial: 0,
            generator,
        }
    }

    /// Replace the contents with a first page of `len` records.
    pub fn initialize(
        &mut self,
        base: &[TripRecord],
        len: usize,
    ) -> Result<usize, CatalogueError> {
        self.reset();
        self.append_page(base, len)
    }

    /// Append a page of `len` records derived from `base`.
    ///
    /// Returns the number of records added, which is always `len`. If the
    /// page would be empty the store is left untouched.
    pub fn append_page(
        &mut self,
        base: &[TripRecord],
        len: usize,
    ) -> Result<usize, CatalogueError> {
        let page = self.generator.generate(base, self.next_serial, len);
        if page.is_empty() {
            return Err(CatalogueError::EmptyPage);
        }

        let added = page.len();
        self.next_serial += added as u64;
        self.records.extend(page);
        Ok(added)
    }

    /// Drop every record.
    pub fn reset(&mut self) {
        self.records.clear();
        self.next_serial = 0;
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn get(&self, id: &TripId) -> Option<&TripRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{lofoten_pair, trip};
    use std::collections::HashSet;

    #[test]
    fn generate_cycles_through_base() {
        let base = lofoten_pair();
        let page = PageGenerator::default().generate(&base, 0, 5);

        let ids: Vec<&str> = page.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["1-0", "2-1", "1-2", "2-3", "1-4"]);
        assert_eq!(page[2].title(), base[0].title());
    }

    #[test]
    fn seed_rotates_start() {
        let base = lofoten_pair();
        let page = PageGenerator::new(1).generate(&base, 0, 2);
        assert_eq!(page[0].title(), base[1].title());
        assert_eq!(page[0].id().as_str(), "2-0");
    }

    #[test]
    fn generate_is_deterministic() {
        let base = lofoten_pair();
        let generator = PageGenerator::new(7);
        assert_eq!(
            generator.generate(&base, 40, 8),
            generator.generate(&base, 40, 8)
        );
    }

    #[test]
    fn empty_base_gives_empty_page() {
        assert!(PageGenerator::default().generate(&[], 0, 8).is_empty());
    }

    #[test]
    fn initialize_fills_first_page() {
        let mut store = CatalogueStore::default();
        assert!(store.is_empty());

        let added = store.initialize(&lofoten_pair(), 20).unwrap();
        assert_eq!(added, 20);
        assert_eq!(store.len(), 20);
    }

    #[test]
    fn initialize_twice_resets() {
        let mut store = CatalogueStore::default();
        store.initialize(&lofoten_pair(), 20).unwrap();
        store.append_page(&lofoten_pair(), 8).unwrap();
        store.initialize(&lofoten_pair(), 20).unwrap();
        assert_eq!(store.len(), 20);
        assert_eq!(store.records()[0].id().as_str(), "1-0");
    }

    #[test]
    fn append_keeps_existing_records() {
        let base = lofoten_pair();
        let mut store = CatalogueStore::default();
        store.initialize(&base, 20).unwrap();
        let before = store.records().to_vec();

        store.append_page(&base, 8).unwrap();

        assert_eq!(store.len(), 28);
        assert_eq!(&store.records()[..20], before.as_slice());
    }

    #[test]
    fn ids_unique_across_pages() {
        let base = vec![trip("1", "A", "X", 100, 4.0), trip("1-1", "B", "Y", 200, 3.0)];
        let mut store = CatalogueStore::default();
        store.initialize(&base, 20).unwrap();
        for _ in 0..5 {
            store.append_page(&base, 8).unwrap();
        }

        let ids: HashSet<&TripId> = store.records().iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn empty_page_leaves_store_untouched() {
        let mut store = CatalogueStore::default();
        store.initialize(&lofoten_pair(), 4).unwrap();

        assert!(matches!(
            store.append_page(&[], 8),
            Err(CatalogueError::EmptyPage)
        ));
        assert!(matches!(
            store.append_page(&lofoten_pair(), 0),
            Err(CatalogueError::EmptyPage)
        ));
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn get_by_id() {
        let mut store = CatalogueStore::default();
        store.initialize(&lofoten_pair(), 4).unwrap();

        let id = TripId::parse("2-3").unwrap();
        assert_eq!(store.get(&id).unwrap().title(), "Tromsø ski on a sailboat");
        assert!(store.get(&TripId::parse("2").unwrap()).is_none());
    }
}
