use crate::models::*;
use crate::store::InMemoryStore;

use chrono::NaiveDate;

/// Create the three measurements used throughout the tests.
///
/// S1 has two rows and S2 has one row with no precipitation recorded.
pub(crate) fn get_test_measurements() -> Vec<Measurement> {
    vec![
        Measurement::new(
            "S1",
            NaiveDate::from_ymd_opt(2017, 8, 20).unwrap(),
            Some(1.0),
            80.0,
        ),
        Measurement::new(
            "S1",
            NaiveDate::from_ymd_opt(2017, 8, 23).unwrap(),
            Some(0.5),
            79.0,
        ),
        Measurement::new(
            "S2",
            NaiveDate::from_ymd_opt(2017, 8, 23).unwrap(),
            None,
            77.0,
        ),
    ]
}

/// Create a roster for the test measurements.
pub(crate) fn get_test_stations() -> Vec<Station> {
    vec![
        Station {
            station_id: "S1".to_string(),
            name: "ONE, HI US".to_string(),
            latitude: 21.27,
            longitude: -157.82,
            elevation: 3.0,
        },
        Station {
            station_id: "S2".to_string(),
            name: "TWO".to_string(),
            latitude: 21.42,
            longitude: -157.8,
            elevation: 14.6,
        },
    ]
}

/// Create a store holding the test stations and measurements.
pub(crate) fn get_test_store() -> InMemoryStore {
    InMemoryStore::new(get_test_stations(), get_test_measurements())
}
