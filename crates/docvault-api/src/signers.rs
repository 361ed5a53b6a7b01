//! Handlers for `/api/v2/signer` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/v2/signer` | Body: [`NewSignerDto`]; returns [`SignerDto`] with no documents |
//! | `POST` | `/api/v2/signer/link` | Body: [`LinkToSignerRequest`]; returns the updated [`SignerDto`] |

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use docvault_core::{
  relation::{DocumentKind, DocumentSummary, SignerView},
  store::DocumentStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSignerDto {
  pub full_name: String,
  #[serde(default)]
  pub is_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkToSignerRequest {
  pub signer_id:   Uuid,
  pub document_id: Uuid,
}

/// Base fields of a linked document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDto {
  pub id:               Uuid,
  #[serde(rename = "type")]
  pub kind:             DocumentKind,
  pub name:             String,
  pub surname:          String,
  pub create_date_time: DateTime<Utc>,
}

impl From<DocumentSummary> for DocumentDto {
  fn from(s: DocumentSummary) -> Self {
    DocumentDto {
      id:               s.id,
      kind:             s.kind,
      name:             s.document.name,
      surname:          s.document.surname,
      create_date_time: s.document.created_at,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignerDto {
  pub id:        Uuid,
  pub full_name: String,
  pub is_active: bool,
  pub documents: Vec<DocumentDto>,
}

impl From<SignerView> for SignerDto {
  fn from(v: SignerView) -> Self {
    SignerDto {
      id:        v.signer.id,
      full_name: v.signer.full_name,
      is_active: v.signer.is_active,
      documents: v.documents.into_iter().map(DocumentDto::from).collect(),
    }
  }
}

/// `POST /api/v2/signer`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<NewSignerDto>,
) -> Result<Json<SignerDto>, ApiError>
where
  S: DocumentStore + 'static,
{
  let view = state
    .signers
    .create_signer(body.full_name, body.is_active)
    .await?;
  Ok(Json(SignerDto::from(view)))
}

/// `POST /api/v2/signer/link`
pub async fn link<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LinkToSignerRequest>,
) -> Result<Json<SignerDto>, ApiError>
where
  S: DocumentStore + 'static,
{
  let view = state
    .signers
    .add_document_to_signer(body.signer_id, body.document_id)
    .await?;
  Ok(Json(SignerDto::from(view)))
}
