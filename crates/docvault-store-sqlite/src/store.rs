//! [`SqliteStore`] — the SQLite implementation of [`DocumentStore`].

use std::path::Path;

use chrono::Utc;
use docvault_core::{
  document::{Contract, DocumentId, Insurance, NewContract, NewInsurance},
  relation::{
    Artifact, DocumentKind, DocumentSummary, Link, NewArtifact, NewSigner,
    Signer,
  },
  store::DocumentStore,
};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use crate::{
  Result,
  encode::{
    EncodedRow, RawArtifact, RawRow, RawSigner, RawSummary, encode_dt,
    encode_kind, encode_uuid,
  },
  schema::SCHEMA,
};

const INSERT_CONTRACT: &str =
  "INSERT INTO contracts (id, name, surname, created_at, contract_text)
   VALUES (?1, ?2, ?3, ?4, ?5)";

const INSERT_INSURANCE: &str =
  "INSERT INTO insurances (id, name, surname, created_at, vehicle_type)
   VALUES (?1, ?2, ?3, ?4, ?5)";

const SELECT_CONTRACT: &str =
  "SELECT id, name, surname, created_at, contract_text FROM contracts";

const SELECT_INSURANCE: &str =
  "SELECT id, name, surname, created_at, vehicle_type FROM insurances";

const SELECT_ARTIFACT: &str =
  "SELECT a.id, a.name, a.surname, a.payload FROM artifacts a";

const SELECT_SIGNER: &str = "SELECT id, full_name, is_active FROM signers";

const UPSERT_INSURANCE_ARTIFACT: &str =
  "INSERT INTO insurance_artifacts (insurance_id, artifact_id, linked_at)
   VALUES (?1, ?2, ?3)
   ON CONFLICT (insurance_id)
   DO UPDATE SET artifact_id = excluded.artifact_id, linked_at = excluded.linked_at";

const UPSERT_DOCUMENT_SIGNER: &str =
  "INSERT INTO document_signers (document_id, signer_id, linked_at)
   VALUES (?1, ?2, ?3)
   ON CONFLICT (document_id)
   DO UPDATE SET signer_id = excluded.signer_id, linked_at = excluded.linked_at";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A docvault store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert `rows` into the table behind `sql` inside one transaction.
  ///
  /// The transaction is rolled back when it is dropped without a commit, so
  /// a failure on any row leaves the table untouched.
  async fn insert_all(&self, sql: &'static str, rows: Vec<EncodedRow>) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare_cached(sql)?;
          for row in &rows {
            stmt.execute(rusqlite::params![
              row.id,
              row.name,
              row.surname,
              row.created_at,
              row.detail,
            ])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a single-parameter query expecting at most one row.
  async fn query_opt<T, F>(&self, sql: String, param: String, map: F) -> Result<Option<T>>
  where
    T: Send + 'static,
    F: FnOnce(&rusqlite::Row<'_>) -> rusqlite::Result<T> + Send + 'static,
  {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&sql, rusqlite::params![param], map).optional()?)
      })
      .await?;
    Ok(raw)
  }

  /// Write one link row, replacing any previous link for the same document.
  async fn upsert_link(
    &self,
    sql: &'static str,
    document_id: DocumentId,
    target_id: Uuid,
  ) -> Result<Link> {
    let link = Link { document_id, target_id, linked_at: Utc::now() };

    let doc_str    = encode_uuid(document_id);
    let target_str = encode_uuid(target_id);
    let at_str     = encode_dt(link.linked_at);

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(sql, rusqlite::params![doc_str, target_str, at_str])?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(link)
  }
}

// ─── DocumentStore impl ──────────────────────────────────────────────────────

impl DocumentStore for SqliteStore {
  type Error = crate::Error;

  // ── Contracts ─────────────────────────────────────────────────────────────

  async fn save_contract(&self, input: NewContract) -> Result<Contract> {
    let contract = Contract::from_new(Uuid::new_v4(), input);
    self
      .insert_all(INSERT_CONTRACT, vec![EncodedRow::from_contract(&contract)])
      .await?;
    Ok(contract)
  }

  async fn save_contracts(&self, inputs: Vec<NewContract>) -> Result<Vec<Contract>> {
    if inputs.is_empty() {
      return Ok(Vec::new());
    }

    let contracts: Vec<Contract> = inputs
      .into_iter()
      .map(|input| Contract::from_new(Uuid::new_v4(), input))
      .collect();
    let rows = contracts.iter().map(EncodedRow::from_contract).collect();

    self.insert_all(INSERT_CONTRACT, rows).await?;
    tracing::debug!(count = contracts.len(), "contract batch committed");
    Ok(contracts)
  }

  async fn find_contract_by_name(&self, name: &str) -> Result<Option<Contract>> {
    // rowid order makes the pick among duplicate names the first inserted.
    let sql = format!("{SELECT_CONTRACT} WHERE name = ?1 ORDER BY rowid LIMIT 1");
    self
      .query_opt(sql, name.to_owned(), RawRow::from_row)
      .await?
      .map(RawRow::into_contract)
      .transpose()
  }

  async fn get_contract(&self, id: DocumentId) -> Result<Option<Contract>> {
    let sql = format!("{SELECT_CONTRACT} WHERE id = ?1");
    self
      .query_opt(sql, encode_uuid(id), RawRow::from_row)
      .await?
      .map(RawRow::into_contract)
      .transpose()
  }

  async fn count_contracts(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM contracts", [], |r| r.get(0))?)
      })
      .await?;
    Ok(count as u64)
  }

  // ── Insurance ─────────────────────────────────────────────────────────────

  async fn save_insurance(&self, input: NewInsurance) -> Result<Insurance> {
    let insurance = Insurance::from_new(Uuid::new_v4(), input);
    self
      .insert_all(INSERT_INSURANCE, vec![EncodedRow::from_insurance(&insurance)])
      .await?;
    Ok(insurance)
  }

  async fn get_insurance(&self, id: DocumentId) -> Result<Option<Insurance>> {
    let sql = format!("{SELECT_INSURANCE} WHERE id = ?1");
    self
      .query_opt(sql, encode_uuid(id), RawRow::from_row)
      .await?
      .map(RawRow::into_insurance)
      .transpose()
  }

  // ── Artifacts ─────────────────────────────────────────────────────────────

  async fn save_artifact(&self, input: NewArtifact) -> Result<Artifact> {
    let artifact = Artifact::from_new(Uuid::new_v4(), input);

    let id_str      = encode_uuid(artifact.id);
    let name        = artifact.name.clone();
    let surname     = artifact.surname.clone();
    let payload_str = serde_json::to_string(&artifact.payload)?;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO artifacts (id, name, surname, payload) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, surname, payload_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(artifact)
  }

  async fn get_artifact(&self, id: Uuid) -> Result<Option<Artifact>> {
    let sql = format!("{SELECT_ARTIFACT} WHERE a.id = ?1");
    self
      .query_opt(sql, encode_uuid(id), RawArtifact::from_row)
      .await?
      .map(RawArtifact::into_artifact)
      .transpose()
  }

  async fn link_insurance_artifact(
    &self,
    insurance_id: DocumentId,
    artifact_id:  Uuid,
  ) -> Result<Link> {
    self
      .upsert_link(UPSERT_INSURANCE_ARTIFACT, insurance_id, artifact_id)
      .await
  }

  async fn insurance_artifact(&self, insurance_id: DocumentId) -> Result<Option<Artifact>> {
    let sql = format!(
      "{SELECT_ARTIFACT}
       JOIN insurance_artifacts l ON l.artifact_id = a.id
       WHERE l.insurance_id = ?1"
    );
    self
      .query_opt(sql, encode_uuid(insurance_id), RawArtifact::from_row)
      .await?
      .map(RawArtifact::into_artifact)
      .transpose()
  }

  // ── Signers ───────────────────────────────────────────────────────────────

  async fn save_signer(&self, input: NewSigner) -> Result<Signer> {
    let signer = Signer::from_new(Uuid::new_v4(), input);

    let id_str    = encode_uuid(signer.id);
    let full_name = signer.full_name.clone();
    let is_active = signer.is_active;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO signers (id, full_name, is_active) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, full_name, is_active],
        )?;
        Ok(())
      })
      .await?;
    Ok(signer)
  }

  async fn get_signer(&self, id: Uuid) -> Result<Option<Signer>> {
    let sql = format!("{SELECT_SIGNER} WHERE id = ?1");
    self
      .query_opt(sql, encode_uuid(id), RawSigner::from_row)
      .await?
      .map(RawSigner::into_signer)
      .transpose()
  }

  async fn find_document(&self, id: DocumentId) -> Result<Option<DocumentSummary>> {
    let contract  = encode_kind(DocumentKind::Contract);
    let insurance = encode_kind(DocumentKind::Insurance);
    let sql = format!(
      "SELECT id, '{contract}', name, surname, created_at FROM contracts WHERE id = ?1
       UNION ALL
       SELECT id, '{insurance}', name, surname, created_at FROM insurances WHERE id = ?1
       LIMIT 1"
    );
    self
      .query_opt(sql, encode_uuid(id), RawSummary::from_row)
      .await?
      .map(RawSummary::into_summary)
      .transpose()
  }

  async fn link_document_signer(
    &self,
    signer_id:   Uuid,
    document_id: DocumentId,
  ) -> Result<Link> {
    self
      .upsert_link(UPSERT_DOCUMENT_SIGNER, document_id, signer_id)
      .await
  }

  async fn signer_documents(&self, signer_id: Uuid) -> Result<Vec<DocumentSummary>> {
    let contract  = encode_kind(DocumentKind::Contract);
    let insurance = encode_kind(DocumentKind::Insurance);
    let sql = format!(
      "SELECT c.id, '{contract}', c.name, c.surname, c.created_at, l.linked_at
       FROM document_signers l JOIN contracts c ON c.id = l.document_id
       WHERE l.signer_id = ?1
       UNION ALL
       SELECT i.id, '{insurance}', i.name, i.surname, i.created_at, l.linked_at
       FROM document_signers l JOIN insurances i ON i.id = l.document_id
       WHERE l.signer_id = ?1
       ORDER BY 6, 1"
    );
    let signer_str = encode_uuid(signer_id);

    let raws: Vec<RawSummary> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![signer_str], RawSummary::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSummary::into_summary).collect()
  }
}
