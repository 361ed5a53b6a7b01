//! Domain services — per-operation rules on top of a [`DocumentStore`].
//!
//! Services validate input, translate between the boundary's plain values
//! and stored records, and surface missing records as distinguishable
//! not-found errors. Every other failure is passed through as an opaque
//! [`Error::Store`].
//!
//! Link operations check that both ends exist before writing the link.
//! Nothing is ever deleted, so a record seen by the check is still there
//! when the link is written.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  document::{
    Contract, ContractView, DocumentId, Insurance, NewContract, NewInsurance,
  },
  generate::{MAX_GENERATE, synthetic_contracts},
  relation::{Artifact, Link, NewArtifact, NewSigner, SignerView},
  store::DocumentStore,
};

/// Reject empty or whitespace-only values for a required field.
pub fn require_text(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::EmptyField { field });
  }
  Ok(())
}

/// Number of contracts to generate for a requested `count`.
///
/// Zero or negative counts yield `0`; counts above [`MAX_GENERATE`] are
/// refused.
pub fn generation_size(count: i64) -> Result<usize> {
  if count <= 0 {
    return Ok(0);
  }
  match usize::try_from(count) {
    Ok(n) if n <= MAX_GENERATE => Ok(n),
    _ => Err(Error::TooMany { requested: count, max: MAX_GENERATE }),
  }
}

// ─── Contracts ───────────────────────────────────────────────────────────────

/// Contract operations. Cloning is cheap — the store is reference-counted.
pub struct ContractService<S> {
  store: Arc<S>,
}

impl<S> Clone for ContractService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: DocumentStore> ContractService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Validate and persist one contract.
  pub async fn add_new_contract(
    &self,
    name: String,
    surname: String,
    contract_text: String,
  ) -> Result<Contract> {
    require_text("name", &name)?;
    require_text("surname", &surname)?;
    require_text("contract_text", &contract_text)?;

    let contract = self
      .store
      .save_contract(NewContract::new(name, surname, contract_text))
      .await
      .map_err(Error::store)?;

    tracing::info!(id = %contract.id, "contract stored");
    Ok(contract)
  }

  /// Look a contract up by exact name.
  pub async fn find_by_name(&self, name: &str) -> Result<ContractView> {
    let contract = self
      .store
      .find_contract_by_name(name)
      .await
      .map_err(Error::store)?;

    match contract {
      Some(c) => Ok(ContractView::from(c)),
      None => {
        tracing::debug!(name, "no contract with this name");
        Err(Error::ContractNotFound(name.to_owned()))
      }
    }
  }

  /// Persist `count` synthetic contracts as one batch.
  ///
  /// A zero or negative `count` returns without touching the store.
  pub async fn generate_contracts(&self, count: i64) -> Result<Vec<Contract>> {
    let count = generation_size(count)?;
    if count == 0 {
      return Ok(Vec::new());
    }

    let batch = synthetic_contracts(count);
    let stored = self
      .store
      .save_contracts(batch)
      .await
      .map_err(Error::store)?;

    tracing::info!(count = stored.len(), "synthetic contracts stored");
    Ok(stored)
  }
}

// ─── Insurance ───────────────────────────────────────────────────────────────

/// Insurance operations: creation and artifact links.
pub struct InsuranceService<S> {
  store: Arc<S>,
}

impl<S> Clone for InsuranceService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: DocumentStore> InsuranceService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Validate and persist one insurance record.
  pub async fn new_insurance(
    &self,
    name: String,
    surname: String,
    vehicle_type: String,
  ) -> Result<Insurance> {
    require_text("name", &name)?;
    require_text("surname", &surname)?;
    require_text("vehicle_type", &vehicle_type)?;

    let insurance = self
      .store
      .save_insurance(NewInsurance::new(name, surname, vehicle_type))
      .await
      .map_err(Error::store)?;

    tracing::info!(id = %insurance.id, "insurance stored");
    Ok(insurance)
  }

  /// Attach an existing artifact to an existing insurance record.
  pub async fn link_to_artifact(
    &self,
    insurance_id: DocumentId,
    artifact_id: Uuid,
  ) -> Result<Link> {
    if self.store.get_insurance(insurance_id).await.map_err(Error::store)?.is_none() {
      return Err(Error::InsuranceNotFound(insurance_id));
    }
    if self.store.get_artifact(artifact_id).await.map_err(Error::store)?.is_none() {
      return Err(Error::ArtifactNotFound(artifact_id));
    }

    let link = self
      .store
      .link_insurance_artifact(insurance_id, artifact_id)
      .await
      .map_err(Error::store)?;

    tracing::info!(%insurance_id, %artifact_id, "insurance linked to artifact");
    Ok(link)
  }
}

// ─── Artifacts ───────────────────────────────────────────────────────────────

/// Artifact operations. Creation only; artifacts are link targets.
pub struct ArtifactService<S> {
  store: Arc<S>,
}

impl<S> Clone for ArtifactService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: DocumentStore> ArtifactService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub async fn add_artifact(
    &self,
    name: String,
    surname: String,
    payload: serde_json::Map<String, serde_json::Value>,
  ) -> Result<Artifact> {
    require_text("name", &name)?;
    require_text("surname", &surname)?;

    let artifact = self
      .store
      .save_artifact(NewArtifact { name, surname, payload })
      .await
      .map_err(Error::store)?;

    tracing::info!(id = %artifact.id, "artifact stored");
    Ok(artifact)
  }
}

// ─── Signers ─────────────────────────────────────────────────────────────────

/// Signer operations.
pub struct SignerService<S> {
  store: Arc<S>,
}

impl<S> Clone for SignerService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: DocumentStore> SignerService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Persist a signer. A fresh signer has no documents.
  pub async fn create_signer(
    &self,
    full_name: String,
    is_active: bool,
  ) -> Result<SignerView> {
    require_text("full_name", &full_name)?;

    let signer = self
      .store
      .save_signer(NewSigner { full_name, is_active })
      .await
      .map_err(Error::store)?;

    tracing::info!(id = %signer.id, "signer stored");
    Ok(SignerView { signer, documents: Vec::new() })
  }

  /// Link a contract or insurance record to a signer and return the signer
  /// with all of its documents.
  pub async fn add_document_to_signer(
    &self,
    signer_id: Uuid,
    document_id: DocumentId,
  ) -> Result<SignerView> {
    let signer = self
      .store
      .get_signer(signer_id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::SignerNotFound(signer_id))?;
    if self.store.find_document(document_id).await.map_err(Error::store)?.is_none() {
      return Err(Error::DocumentNotFound(document_id));
    }

    self
      .store
      .link_document_signer(signer_id, document_id)
      .await
      .map_err(Error::store)?;
    tracing::info!(%signer_id, %document_id, "document linked to signer");

    let documents = self
      .store
      .signer_documents(signer_id)
      .await
      .map_err(Error::store)?;
    Ok(SignerView { signer, documents })
  }
}
