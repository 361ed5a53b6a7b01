//! Handlers for `/api/v2/insurance` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/v2/insurance/new` | Body: [`InsuranceDto`]; 200, empty body |
//! | `POST` | `/api/v2/insurance/link` | Body: [`LinkToArtifactRequest`]; 404 if either end is missing |

use axum::{
  Json,
  extract::State,
  http::StatusCode,
};
use docvault_core::store::DocumentStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// JSON body accepted by `POST /api/v2/insurance/new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceDto {
  pub name:         String,
  pub surname:      String,
  pub vehicle_type: String,
}

/// `POST /api/v2/insurance/new` — 200 with an empty body.
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<InsuranceDto>,
) -> Result<StatusCode, ApiError>
where
  S: DocumentStore + 'static,
{
  state
    .insurance
    .new_insurance(body.name, body.surname, body.vehicle_type)
    .await?;
  Ok(StatusCode::OK)
}

/// JSON body accepted by `POST /api/v2/insurance/link`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkToArtifactRequest {
  pub document_id: Uuid,
  pub artifact_id: Uuid,
}

/// `POST /api/v2/insurance/link` — 200 with an empty body. Linking again
/// replaces the earlier artifact.
pub async fn link<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LinkToArtifactRequest>,
) -> Result<StatusCode, ApiError>
where
  S: DocumentStore + 'static,
{
  state
    .insurance
    .link_to_artifact(body.document_id, body.artifact_id)
    .await?;
  Ok(StatusCode::OK)
}
