//! Document types — the stored shape of contracts and insurance records.
//!
//! Every concrete record embeds a [`Document`] holding the shared base
//! fields. Unsaved records (`New*`) carry no identifier; only a
//! [`DocumentStore`](crate::store::DocumentStore) turns them into persisted
//! records, assigning a fresh [`DocumentId`] on the way. Nothing is ever
//! updated after it is written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier assigned by the store at insertion time.
pub type DocumentId = Uuid;

// ─── Shared base ─────────────────────────────────────────────────────────────

/// The fields every document type shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
  pub name:       String,
  pub surname:    String,
  /// Captured when the document value was constructed; never caller-supplied.
  pub created_at: DateTime<Utc>,
}

impl Document {
  /// Build the base fields, stamping `created_at` with the current time.
  pub fn new(name: impl Into<String>, surname: impl Into<String>) -> Self {
    Self {
      name:       name.into(),
      surname:    surname.into(),
      created_at: Utc::now(),
    }
  }
}

// ─── Contract ────────────────────────────────────────────────────────────────

/// A contract that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewContract {
  pub document:      Document,
  pub contract_text: String,
}

impl NewContract {
  pub fn new(
    name: impl Into<String>,
    surname: impl Into<String>,
    contract_text: impl Into<String>,
  ) -> Self {
    Self {
      document:      Document::new(name, surname),
      contract_text: contract_text.into(),
    }
  }
}

/// A persisted contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
  pub id:            DocumentId,
  pub document:      Document,
  pub contract_text: String,
}

impl Contract {
  /// Attach a store-generated identifier to an unsaved contract.
  pub fn from_new(id: DocumentId, input: NewContract) -> Self {
    Self {
      id,
      document: input.document,
      contract_text: input.contract_text,
    }
  }
}

// ─── Insurance ───────────────────────────────────────────────────────────────

/// An insurance record that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewInsurance {
  pub document:     Document,
  pub vehicle_type: String,
}

impl NewInsurance {
  pub fn new(
    name: impl Into<String>,
    surname: impl Into<String>,
    vehicle_type: impl Into<String>,
  ) -> Self {
    Self {
      document:     Document::new(name, surname),
      vehicle_type: vehicle_type.into(),
    }
  }
}

/// A persisted insurance record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insurance {
  pub id:           DocumentId,
  pub document:     Document,
  pub vehicle_type: String,
}

impl Insurance {
  /// Attach a store-generated identifier to an unsaved insurance record.
  pub fn from_new(id: DocumentId, input: NewInsurance) -> Self {
    Self {
      id,
      document: input.document,
      vehicle_type: input.vehicle_type,
    }
  }
}

// ─── Views ───────────────────────────────────────────────────────────────────

/// Read-only projection of a contract handed to callers. Identity and
/// timestamp stay inside the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractView {
  pub name:          String,
  pub surname:       String,
  pub contract_text: String,
}

impl From<Contract> for ContractView {
  fn from(c: Contract) -> Self {
    ContractView {
      name:          c.document.name,
      surname:       c.document.surname,
      contract_text: c.contract_text,
    }
  }
}
