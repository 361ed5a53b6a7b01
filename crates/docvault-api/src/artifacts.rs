//! Handler for `POST /api/v2/artifact/new`.

use axum::{Json, extract::State};
use docvault_core::store::DocumentStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// JSON body accepted by `POST /api/v2/artifact/new`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArtifactDto {
  pub name:    String,
  pub surname: String,
  #[serde(default)]
  pub payload: Map<String, Value>,
}

/// Identifier of the stored artifact, for use in link requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedDto {
  pub id: Uuid,
}

/// `POST /api/v2/artifact/new`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<ArtifactDto>,
) -> Result<Json<CreatedDto>, ApiError>
where
  S: DocumentStore + 'static,
{
  let artifact = state
    .artifacts
    .add_artifact(body.name, body.surname, body.payload)
    .await?;
  Ok(Json(CreatedDto { id: artifact.id }))
}
