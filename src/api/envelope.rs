//! Response-envelope normalization.
//!
//! Every endpoint answers `{ success, data, message, errors }`. This module
//! folds that shape into `Result` values the rest of the crate consumes:
//! `success: false` becomes a recoverable [`ApiError`], and a successful
//! lookup with `data: null` stays an `Ok(None)` — absence is valid control
//! flow (creation mode), never an error.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default = "none")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    /// Field-level validation errors, keyed by field name.
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

// `#[serde(default)]` alone requires `T: Default`; this does not.
fn none<T>() -> Option<T> {
    None
}

impl<T> Envelope<T> {
    /// Normalize to `Ok(data)` / `Err`. `data` may legitimately be absent
    /// on success (not-found lookups, delete acknowledgements).
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.success {
            return Ok(self.data);
        }
        if let Some(errors) = self.errors.filter(|e| !e.is_empty()) {
            let errors = errors
                .into_iter()
                .flat_map(|(field, messages)| {
                    messages.into_iter().map(move |m| format!("{field}: {m}"))
                })
                .collect();
            return Err(ApiError::Validation { errors });
        }
        Err(ApiError::Application(
            self.message
                .unwrap_or_else(|| "The server rejected the operation".into()),
        ))
    }

    /// Like [`into_result`](Self::into_result) but for endpoints whose
    /// success contract includes a body.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.into_result()?
            .ok_or_else(|| ApiError::Decode("missing data in successful response".into()))
    }
}
