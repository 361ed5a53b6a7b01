//! Turning [`docvault_core::Error`] into HTTP responses.
//!
//! | Core error | Status |
//! |------------|--------|
//! | `*NotFound` | 404 |
//! | `EmptyField`, `TooMany` | 400 |
//! | `Store` | 500, details logged and withheld from the client |
//!
//! Every error body is `{"error": "<message>"}`. Blank-field errors also
//! carry `"field"`, spelled the way the JSON body spells it.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use docvault_core::Error;
use serde::Serialize;

/// A core error on its way out of a handler.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub Error);

#[derive(Debug, Serialize)]
struct ErrorBody {
  error: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  field: Option<String>,
}

impl ApiError {
  pub fn status(&self) -> StatusCode {
    match &self.0 {
      Error::ContractNotFound(_)
      | Error::InsuranceNotFound(_)
      | Error::ArtifactNotFound(_)
      | Error::SignerNotFound(_)
      | Error::DocumentNotFound(_) => StatusCode::NOT_FOUND,
      Error::EmptyField { .. } | Error::TooMany { .. } => StatusCode::BAD_REQUEST,
      Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = match self.0 {
      Error::EmptyField { field } => {
        let field = camel_case(field);
        ErrorBody {
          error: format!("field `{field}` must not be empty"),
          field: Some(field),
        }
      }
      Error::Store(e) => {
        tracing::error!(error = %e, "store failure");
        ErrorBody { error: "internal storage error".into(), field: None }
      }
      other => ErrorBody { error: other.to_string(), field: None },
    };
    (status, Json(body)).into_response()
  }
}

/// `contract_text` → `contractText`, matching the DTOs' `rename_all`.
fn camel_case(field: &str) -> String {
  let mut out = String::with_capacity(field.len());
  let mut upper = false;
  for c in field.chars() {
    if c == '_' {
      upper = true;
    } else if upper {
      out.extend(c.to_uppercase());
      upper = false;
    } else {
      out.push(c);
    }
  }
  out
}
