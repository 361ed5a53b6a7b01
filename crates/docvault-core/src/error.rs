//! Error types for `docvault-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// No contract carries the requested name.
  #[error("contract not found: {0:?}")]
  ContractNotFound(String),

  #[error("insurance not found: {0}")]
  InsuranceNotFound(Uuid),

  #[error("artifact not found: {0}")]
  ArtifactNotFound(Uuid),

  #[error("signer not found: {0}")]
  SignerNotFound(Uuid),

  /// Neither a contract nor an insurance record has this id.
  #[error("document not found: {0}")]
  DocumentNotFound(Uuid),

  /// A required text field was empty or whitespace-only.
  #[error("field `{field}` must not be empty")]
  EmptyField { field: &'static str },

  #[error("cannot generate {requested} contracts at once (max {max})")]
  TooMany { requested: i64, max: usize },

  /// Opaque failure from the storage backend. Never retried.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box a backend error into [`Error::Store`].
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
