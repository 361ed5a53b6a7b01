//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and UUIDs as hyphenated
//! lowercase strings.

use chrono::{DateTime, SecondsFormat, Utc};
use docvault_core::{
  document::{Contract, Document, Insurance},
  relation::{Artifact, DocumentKind, DocumentSummary, Signer},
};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

/// Fixed-width RFC 3339 so stored timestamps sort as text.
pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── DocumentKind ─────────────────────────────────────────────────────────────

pub fn encode_kind(k: DocumentKind) -> &'static str {
  match k {
    DocumentKind::Contract => "contract",
    DocumentKind::Insurance => "insurance",
  }
}

pub fn decode_kind(s: &str) -> Result<DocumentKind> {
  match s {
    "contract" => Ok(DocumentKind::Contract),
    "insurance" => Ok(DocumentKind::Insurance),
    other => Err(Error::UnknownKind(other.to_owned())),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column values for one insert, owned so they can move onto the database
/// thread.
pub struct EncodedRow {
  pub id:         String,
  pub name:       String,
  pub surname:    String,
  pub created_at: String,
  /// `contract_text` or `vehicle_type`, depending on the table.
  pub detail:     String,
}

impl EncodedRow {
  pub fn from_contract(c: &Contract) -> Self {
    Self::new(c.id, &c.document, &c.contract_text)
  }

  pub fn from_insurance(i: &Insurance) -> Self {
    Self::new(i.id, &i.document, &i.vehicle_type)
  }

  fn new(id: Uuid, doc: &Document, detail: &str) -> Self {
    Self {
      id:         encode_uuid(id),
      name:       doc.name.clone(),
      surname:    doc.surname.clone(),
      created_at: encode_dt(doc.created_at),
      detail:     detail.to_owned(),
    }
  }
}

/// Raw strings read directly from a `contracts` or `insurances` row.
pub struct RawRow {
  pub id:         String,
  pub name:       String,
  pub surname:    String,
  pub created_at: String,
  pub detail:     String,
}

impl RawRow {
  /// Map a row selected as `id, name, surname, created_at, <detail>`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      surname:    row.get(2)?,
      created_at: row.get(3)?,
      detail:     row.get(4)?,
    })
  }

  fn into_parts(self) -> Result<(Uuid, Document, String)> {
    let document = Document {
      name:       self.name,
      surname:    self.surname,
      created_at: decode_dt(&self.created_at)?,
    };
    Ok((decode_uuid(&self.id)?, document, self.detail))
  }

  pub fn into_contract(self) -> Result<Contract> {
    let (id, document, contract_text) = self.into_parts()?;
    Ok(Contract { id, document, contract_text })
  }

  pub fn into_insurance(self) -> Result<Insurance> {
    let (id, document, vehicle_type) = self.into_parts()?;
    Ok(Insurance { id, document, vehicle_type })
  }
}

/// Raw strings read from a document table, tagged with its kind.
pub struct RawSummary {
  pub id:         String,
  pub kind:       String,
  pub name:       String,
  pub surname:    String,
  pub created_at: String,
}

impl RawSummary {
  /// Map a row selected as `id, kind, name, surname, created_at`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      kind:       row.get(1)?,
      name:       row.get(2)?,
      surname:    row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_summary(self) -> Result<DocumentSummary> {
    Ok(DocumentSummary {
      id:       decode_uuid(&self.id)?,
      kind:     decode_kind(&self.kind)?,
      document: Document {
        name:       self.name,
        surname:    self.surname,
        created_at: decode_dt(&self.created_at)?,
      },
    })
  }
}

/// Raw values read from an `artifacts` row.
pub struct RawArtifact {
  pub id:      String,
  pub name:    String,
  pub surname: String,
  pub payload: String,
}

impl RawArtifact {
  /// Map a row selected as `id, name, surname, payload`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:      row.get(0)?,
      name:    row.get(1)?,
      surname: row.get(2)?,
      payload: row.get(3)?,
    })
  }

  pub fn into_artifact(self) -> Result<Artifact> {
    Ok(Artifact {
      id:      decode_uuid(&self.id)?,
      name:    self.name,
      surname: self.surname,
      payload: serde_json::from_str(&self.payload)?,
    })
  }
}

/// Raw values read from a `signers` row.
pub struct RawSigner {
  pub id:        String,
  pub full_name: String,
  pub is_active: bool,
}

impl RawSigner {
  /// Map a row selected as `id, full_name, is_active`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:        row.get(0)?,
      full_name: row.get(1)?,
      is_active: row.get(2)?,
    })
  }

  pub fn into_signer(self) -> Result<Signer> {
    Ok(Signer {
      id:        decode_uuid(&self.id)?,
      full_name: self.full_name,
      is_active: self.is_active,
    })
  }
}
