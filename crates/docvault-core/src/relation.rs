//! Artifacts, signers, and the links that attach them to documents.
//!
//! Documents never change after they are written. A link is a separate
//! record in its own table, like a join row. A document has at most one
//! signer, and an insurance record has at most one artifact. Linking again
//! replaces the earlier target.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::document::{Document, DocumentId};

// ─── Artifact ────────────────────────────────────────────────────────────────

/// An artifact that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewArtifact {
  pub name:    String,
  pub surname: String,
  /// Free-form JSON object attached to the artifact.
  pub payload: serde_json::Map<String, serde_json::Value>,
}

/// A persisted artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
  pub id:      Uuid,
  pub name:    String,
  pub surname: String,
  pub payload: serde_json::Map<String, serde_json::Value>,
}

impl Artifact {
  pub fn from_new(id: Uuid, input: NewArtifact) -> Self {
    Self {
      id,
      name: input.name,
      surname: input.surname,
      payload: input.payload,
    }
  }
}

// ─── Signer ──────────────────────────────────────────────────────────────────

/// A signer that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewSigner {
  pub full_name: String,
  pub is_active: bool,
}

/// A persisted signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signer {
  pub id:        Uuid,
  pub full_name: String,
  pub is_active: bool,
}

impl Signer {
  pub fn from_new(id: Uuid, input: NewSigner) -> Self {
    Self { id, full_name: input.full_name, is_active: input.is_active }
  }
}

// ─── Document summaries ──────────────────────────────────────────────────────

/// Which table a document lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
  Contract,
  Insurance,
}

/// The base fields of any document, independent of its concrete type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
  pub id:       DocumentId,
  pub kind:     DocumentKind,
  pub document: Document,
}

/// A signer together with every document linked to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerView {
  pub signer:    Signer,
  /// Ordered by the time each link was recorded.
  pub documents: Vec<DocumentSummary>,
}

/// When a link was recorded. Returned by the store's link operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
  pub document_id: DocumentId,
  pub target_id:   Uuid,
  pub linked_at:   DateTime<Utc>,
}
