//! Result shaping
//!
//! Converts query engine results into the payload records returned to clients. No business
//! logic happens here; the engine's result types stay independent of the wire format.

use crate::models::{
    PrecipitationReading, Station, StationActivity, TemperatureAggregate, TemperatureObservation,
};

use chrono::NaiveDate;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single `{date: precipitation}` entry of the precipitation series.
#[derive(Debug, PartialEq)]
pub struct PrecipitationEntry {
    pub date: String,
    pub precipitation: Option<f64>,
}

impl Serialize for PrecipitationEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.precipitation)?;
        map.end()
    }
}

/// `{station, count}` entry of the activity ranking.
#[derive(Debug, PartialEq, serde::Serialize)]
pub struct StationCount {
    pub station: String,
    pub count: usize,
}

/// Roster entry describing one station.
#[derive(Debug, PartialEq, serde::Serialize)]
pub struct StationEntry {
    pub station: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: f64,
}

/// `{station, date, temperature}` entry of a temperature series.
#[derive(Debug, PartialEq, serde::Serialize)]
pub struct TemperatureEntry {
    pub station: String,
    pub date: String,
    pub temperature: f64,
}

/// Flat temperature summary over a date range.
#[derive(Debug, PartialEq, serde::Serialize)]
pub struct TemperatureSummary {
    pub start_date: String,
    pub end_date: Option<String>,
    pub min_temp: Option<f64>,
    pub avg_temp: Option<f64>,
    pub max_temp: Option<f64>,
}

fn format_date(date: NaiveDate) -> String {
    date.format(crate::validation::DATE_FORMAT).to_string()
}

pub fn precipitation(series: Vec<PrecipitationReading>) -> Vec<PrecipitationEntry> {
    series
        .into_iter()
        .map(|reading| PrecipitationEntry {
            date: format_date(reading.date),
            precipitation: reading.precipitation,
        })
        .collect()
}

pub fn station_activity(ranking: Vec<StationActivity>) -> Vec<StationCount> {
    ranking
        .into_iter()
        .map(|activity| StationCount {
            station: activity.station_id,
            count: activity.count,
        })
        .collect()
}

pub fn station_roster(stations: &[Station]) -> Vec<StationEntry> {
    stations
        .iter()
        .map(|station| StationEntry {
            station: station.station_id.clone(),
            name: station.name.clone(),
            latitude: station.latitude,
            longitude: station.longitude,
            elevation: station.elevation,
        })
        .collect()
}

pub fn temperatures(series: Vec<TemperatureObservation>) -> Vec<TemperatureEntry> {
    series
        .into_iter()
        .map(|observation| TemperatureEntry {
            station: observation.station_id,
            date: format_date(observation.date),
            temperature: observation.temperature,
        })
        .collect()
}

pub fn temperature_summary(aggregate: TemperatureAggregate) -> TemperatureSummary {
    TemperatureSummary {
        start_date: format_date(aggregate.start_date),
        end_date: aggregate.end_date.map(format_date),
        min_temp: aggregate.min_temp,
        avg_temp: aggregate.avg_temp,
        max_temp: aggregate.max_temp,
    }
}
