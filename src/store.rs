//! Observation store
//!
//! Read-only access to the station roster and the measurement collection. Both are loaded once
//! at startup and never modified afterwards, so a store can be shared between concurrent requests
//! without locking.

use crate::error::ClimateError;
use crate::models::{Measurement, Station};

use chrono::NaiveDate;
use hashbrown::{HashMap, HashSet};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Observation store trait.
///
/// Defines the primitives the query engine composes over. Implementations must be pure: no
/// method may modify the store.
pub trait ObservationStore: Send + Sync {
    /// All stations, in load order.
    fn all_stations(&self) -> &[Station];

    /// The station with identifier `id`, if it is in the roster.
    fn station(&self, id: &str) -> Option<&Station>;

    /// All measurements, in load order.
    fn all_measurements(&self) -> &[Measurement];

    /// Most recent measurement date across the whole collection.
    ///
    /// Returns [ClimateError::EmptyDataset] if there are no measurements.
    fn max_date(&self) -> Result<NaiveDate, ClimateError>;

    /// Measurements matching every supplied filter, in load order.
    ///
    /// # Arguments
    ///
    /// * `station_id`: Only return measurements of this station
    /// * `start_date`: Only return measurements on or after this date
    /// * `end_date`: Only return measurements on or before this date
    fn measurements_in_range(
        &self,
        station_id: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Vec<&Measurement>;

    /// Number of measurement rows per distinct station id. The map has no defined order.
    fn counts_by_station(&self) -> HashMap<&str, usize>;
}

/// [ObservationStore] backed by two in-memory collections.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    stations: Vec<Station>,
    measurements: Vec<Measurement>,
}

impl InMemoryStore {
    /// Return a store holding the given stations and measurements.
    pub fn new(stations: Vec<Station>, measurements: Vec<Measurement>) -> Self {
        Self {
            stations,
            measurements,
        }
    }

    /// Load a store from a station CSV file and a measurement CSV file.
    ///
    /// Both files must have a header row. Station columns are
    /// `station,name,latitude,longitude,elevation`; measurement columns are
    /// `station,date,prcp,tobs`. Other columns are ignored and an empty `prcp` field loads as
    /// not recorded.
    ///
    /// # Arguments
    ///
    /// * `stations_path`: Path to the station CSV file
    /// * `measurements_path`: Path to the measurement CSV file
    pub fn from_csv(stations_path: &Path, measurements_path: &Path) -> Result<Self, ClimateError> {
        let stations: Vec<Station> = read_csv(stations_path)?;
        let measurements: Vec<Measurement> = read_csv(measurements_path)?;
        tracing::info!(
            stations = stations.len(),
            measurements = measurements.len(),
            "loaded observation data"
        );

        let orphans = {
            let known: HashSet<&str> = stations.iter().map(|s| s.station_id.as_str()).collect();
            measurements
                .iter()
                .filter(|m| !known.contains(m.station_id.as_str()))
                .count()
        };
        if orphans > 0 {
            tracing::debug!(orphans, "measurements reference stations missing from roster");
        }

        Ok(Self::new(stations, measurements))
    }
}

/// Deserialise every row of a CSV file with a header row.
fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, ClimateError> {
    let load_error = |source| ClimateError::DataLoad {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(load_error)?;
    reader
        .deserialize()
        .collect::<Result<Vec<T>, csv::Error>>()
        .map_err(load_error)
}

impl ObservationStore for InMemoryStore {
    fn all_stations(&self) -> &[Station] {
        &self.stations
    }

    fn station(&self, id: &str) -> Option<&Station> {
        self.stations.iter().find(|s| s.station_id == id)
    }

    fn all_measurements(&self) -> &[Measurement] {
        &self.measurements
    }

    fn max_date(&self) -> Result<NaiveDate, ClimateError> {
        self.measurements
            .iter()
            .map(|m| m.date)
            .max()
            .ok_or(ClimateError::EmptyDataset)
    }

    fn measurements_in_range(
        &self,
        station_id: Option<&str>,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Vec<&Measurement> {
        self.measurements
            .iter()
            .filter(|m| station_id.map_or(true, |id| m.station_id == id))
            .filter(|m| start_date.map_or(true, |start| m.date >= start))
            .filter(|m| end_date.map_or(true, |end| m.date <= end))
            .collect()
    }

    fn counts_by_station(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for measurement in &self.measurements {
            *counts.entry(measurement.station_id.as_str()).or_insert(0) += 1;
        }
        counts
    }
}
