//! Data types and associated functions and methods

use chrono::NaiveDate;
use serde::Deserialize;
use strum_macros::Display;

/// A fixed weather observation site.
///
/// Field names on the wire follow the columns of the `station` table.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Station {
    /// Unique station identifier
    #[serde(rename = "station")]
    pub station_id: String,
    /// Human readable name of the site
    pub name: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Elevation of the site
    pub elevation: f64,
}

/// One day's observations for one station.
///
/// The station is referenced by value only. Measurements for a station that is absent from the
/// roster are valid.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Measurement {
    /// Identifier of the observing station
    #[serde(rename = "station")]
    pub station_id: String,
    /// Calendar date of the observation
    pub date: NaiveDate,
    /// Precipitation amount. `None` means not recorded, which is distinct from zero.
    #[serde(rename = "prcp")]
    pub precipitation: Option<f64>,
    /// Observed temperature (tobs)
    #[serde(rename = "tobs")]
    pub temperature: f64,
}

impl Measurement {
    /// Return a Measurement object.
    pub fn new(
        station_id: impl Into<String>,
        date: NaiveDate,
        precipitation: Option<f64>,
        temperature: f64,
    ) -> Self {
        Measurement {
            station_id: station_id.into(),
            date,
            precipitation,
            temperature,
        }
    }
}

/// Queries served by the engine. Used to label logs and metrics.
#[derive(Clone, Copy, Debug, Display, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum QueryKind {
    PrecipitationSeries,
    StationActivity,
    StationRoster,
    RecentTemperatures,
    TemperatureAggregate,
}

/// One row of the precipitation series.
#[derive(Clone, Debug, PartialEq)]
pub struct PrecipitationReading {
    pub date: NaiveDate,
    pub precipitation: Option<f64>,
}

/// Number of measurement rows recorded by a station.
#[derive(Clone, Debug, PartialEq)]
pub struct StationActivity {
    pub station_id: String,
    pub count: usize,
}

/// A single temperature observation of a station.
#[derive(Clone, Debug, PartialEq)]
pub struct TemperatureObservation {
    pub station_id: String,
    pub date: NaiveDate,
    pub temperature: f64,
}

/// Minimum, average and maximum temperature over a date range.
///
/// The statistics are all `None` when no measurement falls within the range.
#[derive(Clone, Debug, PartialEq)]
pub struct TemperatureAggregate {
    /// Inclusive lower bound of the range
    pub start_date: NaiveDate,
    /// Inclusive upper bound of the range, if one applies
    pub end_date: Option<NaiveDate>,
    pub min_temp: Option<f64>,
    pub avg_temp: Option<f64>,
    pub max_temp: Option<f64>,
}

/// Inclusive date range requested by a client.
///
/// No upper bound means the range is open-ended through the latest available date.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Return a DateRange object
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        DateRange { start, end }
    }
}
