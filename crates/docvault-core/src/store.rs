//! The `DocumentStore` trait — the persistence gateway.
//!
//! The trait is implemented by storage backends (e.g.
//! `docvault-store-sqlite`). The domain services depend on this abstraction,
//! not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  document::{Contract, DocumentId, Insurance, NewContract, NewInsurance},
  relation::{
    Artifact, DocumentSummary, Link, NewArtifact, NewSigner, Signer,
  },
};

/// Abstraction over a docvault storage backend.
///
/// Documents are append-only: there are no update or delete operations.
/// Links to artifacts and signers live in their own tables.
/// Identifiers are always generated here, never by calling code, and every
/// write runs in its own transaction.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Contracts ─────────────────────────────────────────────────────────

  /// Persist one contract, assigning it a fresh identifier.
  fn save_contract(
    &self,
    input: NewContract,
  ) -> impl Future<Output = Result<Contract, Self::Error>> + Send + '_;

  /// Persist a batch of contracts in a single transaction.
  ///
  /// Either every contract is stored or none is. An empty batch is a no-op.
  fn save_contracts(
    &self,
    inputs: Vec<NewContract>,
  ) -> impl Future<Output = Result<Vec<Contract>, Self::Error>> + Send + '_;

  /// Exact, case-sensitive lookup on `name`.
  ///
  /// Names are not unique. When several contracts share a name the earliest
  /// stored one is returned.
  fn find_contract_by_name<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Option<Contract>, Self::Error>> + Send + 'a;

  /// Retrieve a contract by identifier. Returns `None` if not found.
  fn get_contract(
    &self,
    id: DocumentId,
  ) -> impl Future<Output = Result<Option<Contract>, Self::Error>> + Send + '_;

  /// Number of stored contracts.
  fn count_contracts(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Insurance ─────────────────────────────────────────────────────────

  /// Persist one insurance record, assigning it a fresh identifier.
  fn save_insurance(
    &self,
    input: NewInsurance,
  ) -> impl Future<Output = Result<Insurance, Self::Error>> + Send + '_;

  /// Retrieve an insurance record by identifier. Returns `None` if not found.
  fn get_insurance(
    &self,
    id: DocumentId,
  ) -> impl Future<Output = Result<Option<Insurance>, Self::Error>> + Send + '_;

  // ── Artifacts ─────────────────────────────────────────────────────────

  /// Persist one artifact, assigning it a fresh identifier.
  fn save_artifact(
    &self,
    input: NewArtifact,
  ) -> impl Future<Output = Result<Artifact, Self::Error>> + Send + '_;

  /// Retrieve an artifact by identifier. Returns `None` if not found.
  fn get_artifact(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Artifact>, Self::Error>> + Send + '_;

  /// Attach an artifact to an insurance record, replacing any earlier link.
  ///
  /// Both ids must exist; the backend rejects dangling references.
  fn link_insurance_artifact(
    &self,
    insurance_id: DocumentId,
    artifact_id: Uuid,
  ) -> impl Future<Output = Result<Link, Self::Error>> + Send + '_;

  /// The artifact currently linked to an insurance record, if any.
  fn insurance_artifact(
    &self,
    insurance_id: DocumentId,
  ) -> impl Future<Output = Result<Option<Artifact>, Self::Error>> + Send + '_;

  // ── Signers ───────────────────────────────────────────────────────────

  /// Persist one signer, assigning it a fresh identifier.
  fn save_signer(
    &self,
    input: NewSigner,
  ) -> impl Future<Output = Result<Signer, Self::Error>> + Send + '_;

  /// Retrieve a signer by identifier. Returns `None` if not found.
  fn get_signer(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Signer>, Self::Error>> + Send + '_;

  /// Look a document up by id across every document table.
  fn find_document(
    &self,
    id: DocumentId,
  ) -> impl Future<Output = Result<Option<DocumentSummary>, Self::Error>> + Send + '_;

  /// Attach a document (contract or insurance) to a signer, replacing any
  /// earlier signer of that document.
  fn link_document_signer(
    &self,
    signer_id: Uuid,
    document_id: DocumentId,
  ) -> impl Future<Output = Result<Link, Self::Error>> + Send + '_;

  /// Every document linked to `signer_id`, oldest link first.
  fn signer_documents(
    &self,
    signer_id: Uuid,
  ) -> impl Future<Output = Result<Vec<DocumentSummary>, Self::Error>> + Send + '_;
}
