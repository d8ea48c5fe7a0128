use crate::modules::models::response::CompareResponse;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::Json;
use http::request::Parts;
use once_cell::sync::Lazy;
use regex::Regex;
use rival_cf_libs::{RatingFilter, PALETTE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationError};

static VALID_HANDLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]{1,24}$").unwrap());

fn deserialize_comma_separated<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value
        .split(',')
        .map(|handle| handle.trim())
        .filter(|handle| !handle.is_empty())
        .map(String::from)
        .collect())
}

fn validate_handles(handles: &[String]) -> Result<(), ValidationError> {
    if handles.is_empty() || handles.len() > PALETTE.len() {
        return Err(ValidationError::new("handle count out of range"));
    }

    if handles.iter().all(|handle| VALID_HANDLE.is_match(handle)) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid handle"))
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, PartialEq, Eq)]
pub struct CompareParameters {
    #[serde(default, deserialize_with = "deserialize_comma_separated")]
    #[validate(custom = "validate_handles")]
    pub handles: Vec<String>,
    pub rating: Option<RatingFilter>,
    #[validate(range(min = 1))]
    pub page: Option<u32>,
}

pub struct ValidatedCompareParameters<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedCompareParameters<T>
where
    T: DeserializeOwned + Validate + Serialize,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<CompareResponse>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let value: T = serde_urlencoded::from_str(query).map_err(|rejection| {
            tracing::error!("Parsing error: {}", rejection);
            (
                StatusCode::BAD_REQUEST,
                Json(CompareResponse::error(
                    &Value::Null,
                    format!("invalid format query string: [{}]", rejection),
                )),
            )
        })?;

        value.validate().map_err(|rejection| {
            tracing::error!("Validation error: {}", rejection);
            (
                StatusCode::BAD_REQUEST,
                Json(CompareResponse::error(
                    &value,
                    format!("Validation error: [{}]", rejection).replace('\n', ", "),
                )),
            )
        })?;

        Ok(ValidatedCompareParameters(value))
    }
}
