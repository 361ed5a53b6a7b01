//! SQL schema for the docvault SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One table per concrete document type; both share the base columns.
-- Rows are strictly append-only: no UPDATE or DELETE is ever issued.
CREATE TABLE IF NOT EXISTS contracts (
    id            TEXT PRIMARY KEY,   -- store-generated UUID
    name          TEXT NOT NULL,
    surname       TEXT NOT NULL,
    created_at    TEXT NOT NULL,      -- ISO 8601 UTC
    contract_text TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS insurances (
    id            TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    surname       TEXT NOT NULL,
    created_at    TEXT NOT NULL,
    vehicle_type  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS artifacts (
    id            TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    surname       TEXT NOT NULL,
    payload       TEXT NOT NULL DEFAULT '{}'   -- JSON object
);

CREATE TABLE IF NOT EXISTS signers (
    id            TEXT PRIMARY KEY,
    full_name     TEXT NOT NULL,
    is_active     INTEGER NOT NULL DEFAULT 1
);

-- Links never touch the document rows. One artifact per insurance record;
-- relinking overwrites the row.
CREATE TABLE IF NOT EXISTS insurance_artifacts (
    insurance_id  TEXT PRIMARY KEY REFERENCES insurances(id),
    artifact_id   TEXT NOT NULL REFERENCES artifacts(id),
    linked_at     TEXT NOT NULL
);

-- One signer per document. `document_id` points into either contracts or
-- insurances, so it cannot carry a foreign key.
CREATE TABLE IF NOT EXISTS document_signers (
    document_id   TEXT PRIMARY KEY,
    signer_id     TEXT NOT NULL REFERENCES signers(id),
    linked_at     TEXT NOT NULL
);

-- Lookup-by-name; deliberately not UNIQUE.
CREATE INDEX IF NOT EXISTS contracts_name_idx ON contracts(name);
CREATE INDEX IF NOT EXISTS document_signers_signer_idx ON document_signers(signer_id);

PRAGMA user_version = 1;
";
