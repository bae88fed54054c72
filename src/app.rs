use crate::app_state::SharedAppState;
use crate::error::ClimateError;
use crate::metrics;
use crate::models::QueryKind;
use crate::shaper;
use crate::validation::DateRangePath;

use axum::{
    body::BoxBody,
    extract::{Json, State},
    routing::get,
    Router,
};

use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

/// Routes listed by the index page.
const WELCOME: &str = "Welcome to the Climate API!
Available Routes:
/api/v1.0/precipitation
/api/v1.0/stations
/api/v1.0/roster
/api/v1.0/tobs
/api/v1.0/<start>
/api/v1.0/<start>/<end>
Dates must be given as YYYY-MM-DD.
";

/// The service served by [crate::server::serve].
pub type Service = NormalizePath<Router>;

/// Returns the router with all routes, bound to `state`.
pub fn router(state: SharedAppState) -> Router {
    fn v1() -> Router<SharedAppState> {
        Router::new()
            .route("/precipitation", get(precipitation))
            .route("/stations", get(stations))
            .route("/roster", get(roster))
            .route("/tobs", get(tobs))
            .route("/:start", get(temperature_range))
            .route("/:start/:end", get(temperature_range))
    }

    Router::new()
        .route("/", get(welcome))
        .route("/metrics", get(metrics::metrics_handler))
        .nest("/api/v1.0", v1())
        .layer(
            TraceLayer::new_for_http()
                .on_request(metrics::request_counter)
                .on_response(metrics::record_response_metrics::<BoxBody>),
        )
        .with_state(state)
}

/// Returns the router wrapped in middleware that applies before routing.
///
/// Trailing slashes are trimmed so that `/api/v1.0/tobs/` reaches the same handler as
/// `/api/v1.0/tobs`.
pub fn service(state: SharedAppState) -> Service {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}

async fn welcome() -> &'static str {
    WELCOME
}

async fn precipitation(
    State(state): State<SharedAppState>,
) -> Result<Json<Vec<shaper::PrecipitationEntry>>, ClimateError> {
    metrics::record_query(QueryKind::PrecipitationSeries);
    let series = state.engine.precipitation_series()?;
    Ok(Json(shaper::precipitation(series)))
}

async fn stations(State(state): State<SharedAppState>) -> Json<Vec<shaper::StationCount>> {
    metrics::record_query(QueryKind::StationActivity);
    Json(shaper::station_activity(
        state.engine.station_activity_ranking(),
    ))
}

async fn roster(State(state): State<SharedAppState>) -> Json<Vec<shaper::StationEntry>> {
    metrics::record_query(QueryKind::StationRoster);
    Json(shaper::station_roster(state.engine.station_roster()))
}

async fn tobs(
    State(state): State<SharedAppState>,
) -> Result<Json<Vec<shaper::TemperatureEntry>>, ClimateError> {
    metrics::record_query(QueryKind::RecentTemperatures);
    let series = state.engine.most_active_station_recent_temperatures()?;
    Ok(Json(shaper::temperatures(series)))
}

async fn temperature_range(
    State(state): State<SharedAppState>,
    DateRangePath(range): DateRangePath,
) -> Json<shaper::TemperatureSummary> {
    metrics::record_query(QueryKind::TemperatureAggregate);
    Json(shaper::temperature_summary(
        state.engine.aggregate_temperatures(range),
    ))
}
