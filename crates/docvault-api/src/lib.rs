//! JSON REST API for docvault.
//!
//! Exposes an axum [`Router`] backed by any
//! [`docvault_core::store::DocumentStore`]. Handlers speak DTOs only. The
//! contract and insurance routes never expose identifiers or timestamps;
//! the artifact and signer routes do, since links are made by id.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = docvault_api::router(Arc::new(store));
//! ```

pub mod artifacts;
pub mod contracts;
pub mod error;
pub mod insurance;
pub mod signers;

use std::sync::Arc;

use axum::{
  Router,
  http::StatusCode,
  routing::{get, post},
};
use docvault_core::{
  service::{ArtifactService, ContractService, InsuranceService, SignerService},
  store::DocumentStore,
};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S> {
  pub contracts: ContractService<S>,
  pub insurance: InsuranceService<S>,
  pub artifacts: ArtifactService<S>,
  pub signers:   SignerService<S>,
}

impl<S: DocumentStore> AppState<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      contracts: ContractService::new(Arc::clone(&store)),
      insurance: InsuranceService::new(Arc::clone(&store)),
      artifacts: ArtifactService::new(Arc::clone(&store)),
      signers:   SignerService::new(store),
    }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      contracts: self.contracts.clone(),
      insurance: self.insurance.clone(),
      artifacts: self.artifacts.clone(),
      signers:   self.signers.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
///
/// The returned `Router<()>` can be nested or layered by the caller.
pub fn router<S>(store: Arc<S>) -> Router<()>
where
  S: DocumentStore + 'static,
{
  Router::new()
    // Liveness
    .route("/", get(root))
    // Contracts
    .route("/api/v2/contract", get(contracts::get_by_name::<S>))
    .route("/api/v2/contract/new", post(contracts::create::<S>))
    .route("/api/v2/contract/{count}/generate", post(contracts::generate::<S>))
    // Insurance
    .route("/api/v2/insurance/new", post(insurance::create::<S>))
    .route("/api/v2/insurance/link", post(insurance::link::<S>))
    // Artifacts
    .route("/api/v2/artifact/new", post(artifacts::create::<S>))
    // Signers
    .route("/api/v2/signer", post(signers::create::<S>))
    .route("/api/v2/signer/link", post(signers::link::<S>))
    .with_state(AppState::new(store))
}

/// `GET /` — liveness check, 200 with an empty body.
async fn root() -> StatusCode { StatusCode::OK }

// ─── Integration tests ────────────────────────────────────────────────────────
