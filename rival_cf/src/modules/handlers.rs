use crate::modules::models::{
    request::{CompareParameters, ValidatedCompareParameters},
    response::CompareResponse,
};
use axum::{extract::Extension, http::StatusCode, Json};
use rival_cf_libs::{
    aggregate, pagination::total_pages, refresh, PageState, ProblemCatalog, SubmissionSource,
    UserRegistry, DEFAULT_RATING_FILTER, RATINGS,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::time::Instant;

type CompareResult = (StatusCode, Json<CompareResponse>);

pub async fn compare(
    ValidatedCompareParameters(params): ValidatedCompareParameters<CompareParameters>,
    Extension(catalog): Extension<Arc<ProblemCatalog>>,
    Extension(source): Extension<Arc<dyn SubmissionSource>>,
) -> CompareResult {
    let start_process = Instant::now();

    let mut registry = match UserRegistry::new(&params.handles) {
        Ok(registry) => registry,
        Err(e) => {
            tracing::error!("couldn't build user list: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(CompareResponse::error(&params, e)),
            );
        }
    };

    let report = refresh(source.as_ref(), &mut registry).await;
    for failure in report.failures.iter() {
        tracing::warn!("couldn't refresh {}", failure);
    }

    let mut state = PageState::new(params.rating.unwrap_or(DEFAULT_RATING_FILTER));
    let result = aggregate(&catalog, registry.users(), state.filter());
    state.go_to(
        params.page.unwrap_or(1) as usize,
        total_pages(result.total_problems(), state.page_size()),
    );
    let page = match state.page(&result.rows) {
        Ok(page) => page,
        Err(e) => {
            tracing::error!("pagination failed cause: {:?}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CompareResponse::error(&params, "unexpected error")),
            );
        }
    };

    let time: u32 = Instant::now().duration_since(start_process).as_millis() as u32;
    tracing::info!(
        target: "querylog",
        "elapsed_time={} hits={} failures={} params={}",
        time,
        result.total_problems(),
        report.failures.len(),
        serde_json::to_string(&params).unwrap_or(String::from(""))
    );

    (
        StatusCode::OK,
        Json(CompareResponse::new(
            time,
            &params,
            &result,
            &page,
            &report.failures,
        )),
    )
}

#[derive(Debug, Serialize)]
pub struct RatingsResponse {
    pub ratings: &'static [i32],
    pub default: String,
}

pub async fn ratings() -> Json<RatingsResponse> {
    Json(RatingsResponse {
        ratings: &RATINGS,
        default: DEFAULT_RATING_FILTER.to_string(),
    })
}

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}
