//! Handlers for `/api/v2/contract` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/api/v2/contract/new` | Body: [`ContractDto`]; 200, empty body |
//! | `GET`  | `/api/v2/contract?name=<name>` | 404 if no contract has that name |
//! | `POST` | `/api/v2/contract/{count}/generate` | `count <= 0` is a no-op |

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
};
use docvault_core::{document::ContractView, store::DocumentStore};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

/// Wire shape of a contract, both accepted and returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDto {
  pub name:          String,
  pub surname:       String,
  pub contract_text: String,
}

impl From<ContractView> for ContractDto {
  fn from(v: ContractView) -> Self {
    ContractDto {
      name:          v.name,
      surname:       v.surname,
      contract_text: v.contract_text,
    }
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /api/v2/contract/new`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<ContractDto>,
) -> Result<StatusCode, ApiError>
where
  S: DocumentStore + 'static,
{
  state
    .contracts
    .add_new_contract(body.name, body.surname, body.contract_text)
    .await?;
  Ok(StatusCode::OK)
}

// ─── Get by name ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NameParams {
  pub name: String,
}

/// `GET /api/v2/contract?name=<name>`
pub async fn get_by_name<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<NameParams>,
) -> Result<Json<ContractDto>, ApiError>
where
  S: DocumentStore + 'static,
{
  let view = state.contracts.find_by_name(&params.name).await?;
  Ok(Json(ContractDto::from(view)))
}

// ─── Generate ─────────────────────────────────────────────────────────────────

/// `POST /api/v2/contract/{count}/generate`
pub async fn generate<S>(
  State(state): State<AppState<S>>,
  Path(count): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: DocumentStore + 'static,
{
  state.contracts.generate_contracts(count).await?;
  Ok(StatusCode::OK)
}
