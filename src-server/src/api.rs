use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use satview_core::bitcoin::{HistoricalPoint, PriceSnapshot};

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn readyz() -> &'static str {
    "ok"
}

async fn get_bitcoin_price(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PriceSnapshot>> {
    let snapshot = state
        .price_service
        .get_price()
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch Bitcoin price data", e))?;
    Ok(Json(snapshot))
}

#[derive(serde::Deserialize)]
struct HistoryQuery {
    days: Option<String>,
}

/// Lenient day-count parsing: anything that is not an integer behaves
/// like a missing parameter and gets the default range.
fn parse_days(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
}

async fn get_bitcoin_history(
    State(state): State<Arc<AppState>>,
    Query(q): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<HistoricalPoint>>> {
    let points = state
        .price_service
        .get_history(parse_days(q.days.as_deref()))
        .await
        .map_err(|e| ApiError::upstream("Failed to fetch historical data", e))?;
    Ok(Json(points))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| o.parse().unwrap())
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/bitcoin/price", get(get_bitcoin_price))
        .route("/bitcoin/history", get(get_bitcoin_history));

    Router::new()
        .nest("/api", api)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::parse_days;

    #[test]
    fn test_parse_days_accepts_integers() {
        assert_eq!(parse_days(Some("30")), Some(30));
        assert_eq!(parse_days(Some(" 365 ")), Some(365));
        assert_eq!(parse_days(Some("-5")), Some(-5));
    }

    #[test]
    fn test_parse_days_treats_garbage_as_missing() {
        assert_eq!(parse_days(Some("abc")), None);
        assert_eq!(parse_days(Some("3.5")), None);
        assert_eq!(parse_days(Some("")), None);
        assert_eq!(parse_days(None), None);
    }
}
