//! Query engine.
//!
//! Implements the domain queries on top of the [ObservationStore] primitives. The engine holds no
//! mutable state, so a single instance may serve any number of concurrent requests.
//!
//! The "last year" window and the "most active station" are each defined once here and shared
//! by every query that needs them:
//!
//! * The window covers dates on or after the most recent measurement date minus 365 days.
//! * Stations are ranked by measurement count, descending, with ties broken by station id
//!   ascending. The most active station is the head of that ranking.

use crate::error::ClimateError;
use crate::models::{
    DateRange, PrecipitationReading, Station, StationActivity, TemperatureAggregate,
    TemperatureObservation,
};
use crate::store::ObservationStore;
use crate::validation;

use chrono::{Days, NaiveDate};

/// Length in days of the trailing window used by the "last year" queries.
pub const YEAR_WINDOW_DAYS: u64 = 365;

/// Query engine over an [ObservationStore].
#[derive(Debug)]
pub struct QueryEngine<S> {
    store: S,
}

impl<S: ObservationStore> QueryEngine<S> {
    /// Return a query engine over `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// First date of the trailing year window ending at the most recent measurement.
    fn year_window_start(&self) -> Result<NaiveDate, ClimateError> {
        let last_date = self.store.max_date()?;
        Ok(last_date
            .checked_sub_days(Days::new(YEAR_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN))
    }

    /// Precipitation of every measurement in the trailing year window, ordered by date.
    ///
    /// Rows without recorded precipitation are kept. Rows sharing a date stay in load order.
    pub fn precipitation_series(&self) -> Result<Vec<PrecipitationReading>, ClimateError> {
        let window_start = self.year_window_start()?;
        let mut measurements = self
            .store
            .measurements_in_range(None, Some(window_start), None);
        measurements.sort_by_key(|m| m.date);
        let series: Vec<PrecipitationReading> = measurements
            .into_iter()
            .map(|m| PrecipitationReading {
                date: m.date,
                precipitation: m.precipitation,
            })
            .collect();
        tracing::debug!(%window_start, rows = series.len(), "precipitation series");
        Ok(series)
    }

    /// Stations ranked by number of measurement rows.
    ///
    /// Ordered by count descending, then station id ascending, so the order is total and
    /// reproducible.
    pub fn station_activity_ranking(&self) -> Vec<StationActivity> {
        let mut ranking: Vec<StationActivity> = self
            .store
            .counts_by_station()
            .into_iter()
            .map(|(station_id, count)| StationActivity {
                station_id: station_id.to_string(),
                count,
            })
            .collect();
        ranking.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.station_id.cmp(&b.station_id))
        });
        tracing::debug!(stations = ranking.len(), "station activity ranking");
        ranking
    }

    /// All stations in load order.
    pub fn station_roster(&self) -> &[Station] {
        self.store.all_stations()
    }

    /// Identifier of the station with the most measurement rows.
    pub fn most_active_station(&self) -> Result<String, ClimateError> {
        self.station_activity_ranking()
            .into_iter()
            .next()
            .map(|activity| activity.station_id)
            .ok_or(ClimateError::EmptyDataset)
    }

    /// Temperatures of the most active station over the trailing year window, ordered by date.
    pub fn most_active_station_recent_temperatures(
        &self,
    ) -> Result<Vec<TemperatureObservation>, ClimateError> {
        let station_id = self.most_active_station()?;
        let window_start = self.year_window_start()?;
        let mut measurements =
            self.store
                .measurements_in_range(Some(&station_id), Some(window_start), None);
        measurements.sort_by_key(|m| m.date);
        let series: Vec<TemperatureObservation> = measurements
            .into_iter()
            .map(|m| TemperatureObservation {
                station_id: m.station_id.clone(),
                date: m.date,
                temperature: m.temperature,
            })
            .collect();
        tracing::debug!(%station_id, %window_start, rows = series.len(), "recent temperatures");
        Ok(series)
    }

    /// Minimum, average and maximum temperature between two raw `YYYY-MM-DD` dates.
    ///
    /// Both dates are validated before the store is read. See [Self::aggregate_temperatures].
    ///
    /// # Arguments
    ///
    /// * `start`: Inclusive first date
    /// * `end`: Optional inclusive last date
    pub fn temperature_range_aggregate(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureAggregate, ClimateError> {
        let range = validation::parse_date_range(start, end)?;
        Ok(self.aggregate_temperatures(range))
    }

    /// Minimum, average and maximum temperature over a validated date range.
    ///
    /// An empty selection is a valid answer with all statistics `None`. When the range is
    /// open-ended the reported end date is the most recent measurement date, if there is one.
    pub fn aggregate_temperatures(&self, range: DateRange) -> TemperatureAggregate {
        let measurements = self
            .store
            .measurements_in_range(None, Some(range.start), range.end);
        let temperatures: Vec<f64> = measurements.iter().map(|m| m.temperature).collect();
        let (min_temp, avg_temp, max_temp) = match summarise(&temperatures) {
            Some((min, avg, max)) => (Some(min), Some(avg), Some(max)),
            None => (None, None, None),
        };
        let end_date = range.end.or_else(|| self.store.max_date().ok());
        tracing::debug!(
            start = %range.start,
            end = ?range.end,
            rows = temperatures.len(),
            "temperature aggregate"
        );
        TemperatureAggregate {
            start_date: range.start,
            end_date,
            min_temp,
            avg_temp,
            max_temp,
        }
    }
}

/// Returns `(min, mean, max)` of `values`, or `None` if there are none.
///
/// The mean is kept within `[min, max]` despite rounding in the sum.
fn summarise(values: &[f64]) -> Option<(f64, f64, f64)> {
    let (first, rest) = values.split_first()?;
    let (min, max, sum) = rest
        .iter()
        .fold((*first, *first, *first), |(min, max, sum), v| {
            (min.min(*v), max.max(*v), sum + v)
        });
    let mean = sum / values.len() as f64;
    Some((min, mean.max(min).min(max), max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Measurement;
    use crate::store::InMemoryStore;
    use crate::test_utils;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_engine() -> QueryEngine<InMemoryStore> {
        QueryEngine::new(test_utils::get_test_store())
    }

    fn empty_engine() -> QueryEngine<InMemoryStore> {
        QueryEngine::new(InMemoryStore::default())
    }

    /// Measurements spread over two years for three stations, all tied on count.
    fn spread_engine() -> QueryEngine<InMemoryStore> {
        let mut measurements = vec![];
        for (station, days) in [("S3", 0..5), ("S2", 0..5), ("S1", 0..3)] {
            for day in days {
                measurements.push(Measurement::new(
                    station,
                    date(2017, 8, 23) - Days::new(day * 200),
                    Some(day as f64),
                    60.0 + day as f64,
                ));
            }
        }
        measurements.push(Measurement::new("S1", date(2016, 8, 23), Some(9.0), 50.0));
        measurements.push(Measurement::new("S1", date(2016, 8, 22), None, 51.0));
        QueryEngine::new(InMemoryStore::new(vec![], measurements))
    }

    #[test]
    fn precipitation_series_example() {
        let series = test_engine().precipitation_series().unwrap();
        assert_eq!(
            vec![
                PrecipitationReading {
                    date: date(2017, 8, 20),
                    precipitation: Some(1.0)
                },
                PrecipitationReading {
                    date: date(2017, 8, 23),
                    precipitation: Some(0.5)
                },
                PrecipitationReading {
                    date: date(2017, 8, 23),
                    precipitation: None
                },
            ],
            series
        );
    }

    #[test]
    fn precipitation_series_same_date_keeps_load_order() {
        let engine = QueryEngine::new(InMemoryStore::new(
            vec![],
            vec![
                Measurement::new("S9", date(2017, 8, 23), Some(9.0), 70.0),
                Measurement::new("S1", date(2017, 8, 22), Some(2.0), 71.0),
                Measurement::new("S1", date(2017, 8, 23), Some(1.0), 72.0),
                Measurement::new("S5", date(2017, 8, 23), None, 73.0),
            ],
        ));
        let series = engine.precipitation_series().unwrap();
        assert_eq!(
            vec![Some(2.0), Some(9.0), Some(1.0), None],
            series.iter().map(|r| r.precipitation).collect::<Vec<_>>()
        );
    }

    #[test]
    fn recent_temperatures_same_date_keeps_load_order() {
        let engine = QueryEngine::new(InMemoryStore::new(
            vec![],
            vec![
                Measurement::new("S1", date(2017, 8, 23), None, 75.0),
                Measurement::new("S1", date(2017, 8, 21), None, 90.0),
                Measurement::new("S1", date(2017, 8, 23), None, 61.0),
                Measurement::new("S1", date(2017, 8, 23), None, 68.0),
            ],
        ));
        let series = engine.most_active_station_recent_temperatures().unwrap();
        assert_eq!(
            vec![90.0, 75.0, 61.0, 68.0],
            series.iter().map(|o| o.temperature).collect::<Vec<_>>()
        );
    }

    #[test]
    fn precipitation_series_window() {
        let engine = spread_engine();
        let window_start = date(2016, 8, 23);
        let series = engine.precipitation_series().unwrap();
        assert!(!series.is_empty());
        assert!(series.iter().all(|r| r.date >= window_start));
        assert!(series.windows(2).all(|w| w[0].date <= w[1].date));
        // 2016-08-23 is exactly 365 days before the last date and is included; the day before
        // is not.
        assert_eq!(window_start, series[0].date);
        assert_eq!(Some(9.0), series[0].precipitation);
    }

    #[test]
    fn precipitation_series_empty_dataset() {
        assert!(matches!(
            empty_engine().precipitation_series(),
            Err(ClimateError::EmptyDataset)
        ));
    }

    #[test]
    fn station_activity_example() {
        assert_eq!(
            vec![
                StationActivity {
                    station_id: "S1".to_string(),
                    count: 2
                },
                StationActivity {
                    station_id: "S2".to_string(),
                    count: 1
                },
            ],
            test_engine().station_activity_ranking()
        );
    }

    #[test]
    fn station_activity_total_order() {
        let ranking = spread_engine().station_activity_ranking();
        let ids: Vec<&str> = ranking.iter().map(|a| a.station_id.as_str()).collect();
        // Every station has 5 rows, so the order falls back to station id.
        assert_eq!(vec!["S1", "S2", "S3"], ids);
        for pair in ranking.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.count > b.count || (a.count == b.count && a.station_id < b.station_id));
        }
    }

    #[test]
    fn station_activity_empty_dataset() {
        assert!(empty_engine().station_activity_ranking().is_empty());
    }

    #[test]
    fn station_roster() {
        let engine = test_engine();
        assert_eq!(test_utils::get_test_stations(), engine.station_roster());
    }

    #[test]
    fn recent_temperatures_example() {
        let series = test_engine()
            .most_active_station_recent_temperatures()
            .unwrap();
        assert_eq!(
            vec![
                TemperatureObservation {
                    station_id: "S1".to_string(),
                    date: date(2017, 8, 20),
                    temperature: 80.0
                },
                TemperatureObservation {
                    station_id: "S1".to_string(),
                    date: date(2017, 8, 23),
                    temperature: 79.0
                },
            ],
            series
        );
    }

    #[test]
    fn recent_temperatures_uses_ranking_head() {
        let engine = spread_engine();
        let head = engine.station_activity_ranking()[0].station_id.clone();
        let series = engine.most_active_station_recent_temperatures().unwrap();
        assert!(series.iter().all(|o| o.station_id == head));
        assert!(series.iter().all(|o| o.date >= date(2016, 8, 23)));
        assert!(series.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(
            vec![date(2016, 8, 23), date(2017, 2, 4), date(2017, 8, 23)],
            series.iter().map(|o| o.date).collect::<Vec<_>>()
        );
    }

    #[test]
    fn recent_temperatures_empty_dataset() {
        assert!(matches!(
            empty_engine().most_active_station_recent_temperatures(),
            Err(ClimateError::EmptyDataset)
        ));
    }

    #[test]
    fn aggregate_single_day() {
        let aggregate = test_engine()
            .temperature_range_aggregate("2017-08-23", Some("2017-08-23"))
            .unwrap();
        assert_eq!(
            TemperatureAggregate {
                start_date: date(2017, 8, 23),
                end_date: Some(date(2017, 8, 23)),
                min_temp: Some(77.0),
                avg_temp: Some(78.0),
                max_temp: Some(79.0),
            },
            aggregate
        );
    }

    #[test]
    fn aggregate_open_ended_reports_last_date() {
        let aggregate = test_engine()
            .temperature_range_aggregate("2017-01-01", None)
            .unwrap();
        assert_eq!(Some(date(2017, 8, 23)), aggregate.end_date);
        assert_eq!(Some(77.0), aggregate.min_temp);
        assert_eq!(Some(80.0), aggregate.max_temp);
    }

    #[test]
    fn aggregate_future_is_empty_not_error() {
        let aggregate = test_engine()
            .temperature_range_aggregate("2099-01-01", None)
            .unwrap();
        assert_eq!(date(2099, 1, 1), aggregate.start_date);
        assert_eq!(None, aggregate.min_temp);
        assert_eq!(None, aggregate.avg_temp);
        assert_eq!(None, aggregate.max_temp);
    }

    #[test]
    fn aggregate_start_after_end() {
        let aggregate = test_engine()
            .temperature_range_aggregate("2017-08-23", Some("2017-08-01"))
            .unwrap();
        assert_eq!(None, aggregate.avg_temp);
        assert_eq!(Some(date(2017, 8, 1)), aggregate.end_date);
    }

    #[test]
    fn aggregate_empty_dataset() {
        let aggregate = empty_engine()
            .temperature_range_aggregate("2017-08-23", None)
            .unwrap();
        assert_eq!(None, aggregate.end_date);
        assert_eq!(None, aggregate.min_temp);
    }

    #[test]
    fn aggregate_invalid_dates() {
        let engine = test_engine();
        for (start, end) in [
            ("2017/08/23", None),
            ("2017-13-01", None),
            ("not-a-date", None),
            ("2017-08-01", Some("2017-02-30")),
        ] {
            match engine.temperature_range_aggregate(start, end) {
                Err(err @ ClimateError::InvalidDate { .. }) => {
                    assert_eq!("Date format must be YYYY-MM-DD", err.to_string())
                }
                other => panic!("expected invalid date for {start} {end:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn aggregate_ordering() {
        let engine = spread_engine();
        for (start, end) in [
            ("2014-01-01", None),
            ("2016-08-22", Some("2016-08-23")),
            ("2017-03-06", Some("2017-08-23")),
        ] {
            let aggregate = engine.temperature_range_aggregate(start, end).unwrap();
            let (min, avg, max) = (
                aggregate.min_temp.unwrap(),
                aggregate.avg_temp.unwrap(),
                aggregate.max_temp.unwrap(),
            );
            assert!(min <= avg && avg <= max, "{min} {avg} {max}");
        }
    }

    #[test]
    fn summarise_rounding() {
        let (min, avg, max) = summarise(&[0.1, 0.1, 0.1]).unwrap();
        assert_eq!(0.1, min);
        assert_eq!(0.1, max);
        assert!(min <= avg && avg <= max);
        assert_eq!(None, summarise(&[]));
    }

    #[test]
    fn queries_are_idempotent() {
        let engine = spread_engine();
        assert_eq!(
            engine.precipitation_series().unwrap(),
            engine.precipitation_series().unwrap()
        );
        assert_eq!(
            engine.station_activity_ranking(),
            engine.station_activity_ranking()
        );
        assert_eq!(
            engine.most_active_station_recent_temperatures().unwrap(),
            engine.most_active_station_recent_temperatures().unwrap()
        );
        assert_eq!(
            engine.temperature_range_aggregate("2016-01-01", None).unwrap(),
            engine.temperature_range_aggregate("2016-01-01", None).unwrap()
        );
    }
}
