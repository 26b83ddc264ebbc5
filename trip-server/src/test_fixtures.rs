//! Record builders shared by unit tests.

use crate::domain::{Price, Rating, TripId, TripRecord};

pub(crate) fn trip(id: &str, title: &str, location: &str, price: u32, rating: f32) -> TripRecord {
    TripRecord::new(
        TripId::parse(id).unwrap(),
        title,
        location,
        Price::new(price).unwrap(),
        Rating::new(rating).unwrap(),
        0,
    )
}

/// The two-record seed used in the catalogue walkthrough.
pub(crate) fn lofoten_pair() -> Vec<TripRecord> {
    vec![
        trip(
            "1",
            "Esquí de travesía en Lofoten",
            "Islas Lofoten, Noruega",
            1850,
            4.9,
        ),
        trip("2", "Tromsø ski on a sailboat", "Tromsø, Noruega", 2200, 4.8),
    ]
}
