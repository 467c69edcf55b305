use crate::core::lookup::LookupEngine;
use crate::core::{LookupRequest, LookupResult, Storage};
use crate::utils::error::Result;
use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use std::sync::Arc;

/// Returns home data for non-registered users.
///
/// Query parameters: `zip`, `address`, and `fields` (comma separated or repeated).
pub async fn unregistered_home_data<S: Storage + 'static>(
    State(engine): State<Arc<LookupEngine<S>>>,
    RawQuery(query): RawQuery,
) -> Result<Json<LookupResult>> {
    let request = LookupRequest::from_query(query.as_deref().unwrap_or_default())?;
    let result = engine.run(&request).await?;
    Ok(Json(result))
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
