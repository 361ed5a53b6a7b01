//! Integration tests for `SqliteStore` and the domain services against an
//! in-memory database.

use std::{collections::HashSet, sync::Arc};

use docvault_core::{
  Error as CoreError,
  document::{NewContract, NewInsurance},
  generate::{CONTRACT_TEXT_LEN, MAX_GENERATE, NAME_LEN, SURNAME_LEN},
  relation::{DocumentKind, NewArtifact, NewSigner},
  service::{ArtifactService, ContractService, InsuranceService, SignerService},
  store::DocumentStore,
};
use serde_json::json;
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn services() -> (
  Arc<SqliteStore>,
  ContractService<SqliteStore>,
  InsuranceService<SqliteStore>,
) {
  let s = Arc::new(store().await);
  (
    s.clone(),
    ContractService::new(s.clone()),
    InsuranceService::new(s),
  )
}

fn is_lowercase_ascii(s: &str) -> bool {
  s.bytes().all(|b| b.is_ascii_lowercase())
}

// ─── Contracts ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_and_get_contract() {
  let s = store().await;

  let input = NewContract::new("Ada", "Lovelace", "analytical engine lease");
  let created_at = input.document.created_at;
  let saved = s.save_contract(input).await.unwrap();
  assert_eq!(saved.document.created_at, created_at);

  let fetched = s.get_contract(saved.id).await.unwrap();
  assert_eq!(fetched, Some(saved));
}

#[tokio::test]
async fn get_contract_missing_returns_none() {
  let s = store().await;
  assert!(s.get_contract(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn find_by_name_is_exact_match() {
  let s = store().await;
  s.save_contract(NewContract::new("Ada", "Lovelace", "text"))
    .await
    .unwrap();

  assert!(s.find_contract_by_name("Ada").await.unwrap().is_some());
  assert!(s.find_contract_by_name("ada").await.unwrap().is_none());
  assert!(s.find_contract_by_name("Ad").await.unwrap().is_none());
  assert!(s.find_contract_by_name("Ada ").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_names_are_accepted() {
  let s = store().await;
  let first = s
    .save_contract(NewContract::new("Ada", "Lovelace", "first"))
    .await
    .unwrap();
  let second = s
    .save_contract(NewContract::new("Ada", "Byron", "second"))
    .await
    .unwrap();
  assert_ne!(first.id, second.id);
  assert_eq!(s.count_contracts().await.unwrap(), 2);

  let found = s.find_contract_by_name("Ada").await.unwrap().unwrap();
  assert!(found.id == first.id || found.id == second.id);
}

#[tokio::test]
async fn save_contracts_persists_whole_batch() {
  let s = store().await;
  let batch = (0..25)
    .map(|i| NewContract::new(format!("name-{i}"), "batch", "text"))
    .collect();

  let saved = s.save_contracts(batch).await.unwrap();
  assert_eq!(saved.len(), 25);
  assert_eq!(s.count_contracts().await.unwrap(), 25);

  let ids: HashSet<_> = saved.iter().map(|c| c.id).collect();
  assert_eq!(ids.len(), 25, "identifiers must be distinct");
}

#[tokio::test]
async fn save_contracts_empty_batch_is_noop() {
  let s = store().await;
  let saved = s.save_contracts(Vec::new()).await.unwrap();
  assert!(saved.is_empty());
  assert_eq!(s.count_contracts().await.unwrap(), 0);
}

#[tokio::test]
async fn failing_insert_rolls_back_batch() {
  let s = store().await;
  s.conn
    .call(|conn| {
      conn.execute_batch(
        "CREATE TRIGGER reject_poison BEFORE INSERT ON contracts
         WHEN NEW.name = 'poison'
         BEGIN SELECT RAISE(ABORT, 'poisoned row'); END;",
      )?;
      Ok(())
    })
    .await
    .unwrap();

  let batch = vec![
    NewContract::new("good-1", "x", "text"),
    NewContract::new("good-2", "x", "text"),
    NewContract::new("poison", "x", "text"),
    NewContract::new("good-3", "x", "text"),
  ];

  assert!(s.save_contracts(batch).await.is_err());
  assert_eq!(s.count_contracts().await.unwrap(), 0);
  assert!(s.find_contract_by_name("good-1").await.unwrap().is_none());
}

// ─── Insurance ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_and_get_insurance() {
  let s = store().await;
  let saved = s
    .save_insurance(NewInsurance::new("Grace", "Hopper", "motorcycle"))
    .await
    .unwrap();

  let fetched = s.get_insurance(saved.id).await.unwrap().unwrap();
  assert_eq!(fetched.vehicle_type, "motorcycle");
  assert_eq!(fetched.document.name, "Grace");
  assert_eq!(fetched.document.surname, "Hopper");
  assert_eq!(fetched, saved);
}

#[tokio::test]
async fn insurance_and_contracts_are_separate_tables() {
  let s = store().await;
  let insurance = s
    .save_insurance(NewInsurance::new("Grace", "Hopper", "truck"))
    .await
    .unwrap();

  assert_eq!(s.count_contracts().await.unwrap(), 0);
  assert!(s.get_contract(insurance.id).await.unwrap().is_none());
  assert!(s.find_contract_by_name("Grace").await.unwrap().is_none());
}

// ─── Contract service ────────────────────────────────────────────────────────

#[tokio::test]
async fn add_then_find_returns_same_values() {
  let (_, contracts, _) = services().await;
  contracts
    .add_new_contract("Ada".into(), "Lovelace".into(), "terms".into())
    .await
    .unwrap();

  let view = contracts.find_by_name("Ada").await.unwrap();
  assert_eq!(view.name, "Ada");
  assert_eq!(view.surname, "Lovelace");
  assert_eq!(view.contract_text, "terms");
}

#[tokio::test]
async fn find_unknown_name_is_not_found() {
  let (_, contracts, _) = services().await;
  match contracts.find_by_name("nobody").await {
    Err(CoreError::ContractNotFound(name)) => assert_eq!(name, "nobody"),
    other => panic!("expected ContractNotFound, got {other:?}"),
  }
}

#[tokio::test]
async fn names_round_trip_byte_for_byte() {
  let cases = [
    ("Иван", "Петров", "Договор аренды"),
    ("Анна Мария", "фон Штайн", "two  spaces  inside"),
    ("a&b=c%d", "50% off", "?name=x&y=z"),
    ("Zoë", "O'Brien", "line one\nline two"),
    ("  padded  ", "tab\there", "trailing "),
  ];

  for (name, surname, text) in cases {
    let (_, contracts, _) = services().await;
    contracts
      .add_new_contract(name.into(), surname.into(), text.into())
      .await
      .unwrap();

    let view = contracts.find_by_name(name).await.unwrap();
    assert_eq!(view.name, name);
    assert_eq!(view.surname, surname);
    assert_eq!(view.contract_text, text);
  }
}

#[tokio::test]
async fn add_rejects_blank_fields() {
  let (s, contracts, _) = services().await;
  let err = contracts
    .add_new_contract("Ada".into(), " ".into(), "terms".into())
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::EmptyField { field: "surname" }));
  assert_eq!(s.count_contracts().await.unwrap(), 0);
}

#[tokio::test]
async fn same_name_twice_both_succeed() {
  let (_, contracts, _) = services().await;
  contracts
    .add_new_contract("Ada".into(), "Lovelace".into(), "one".into())
    .await
    .unwrap();
  contracts
    .add_new_contract("Ada".into(), "Lovelace".into(), "two".into())
    .await
    .unwrap();

  let view = contracts.find_by_name("Ada").await.unwrap();
  assert!(view.contract_text == "one" || view.contract_text == "two");
}

#[tokio::test]
async fn generate_persists_exactly_n_lowercase_contracts() {
  let (s, contracts, _) = services().await;
  let generated = contracts.generate_contracts(12).await.unwrap();
  assert_eq!(generated.len(), 12);
  assert_eq!(s.count_contracts().await.unwrap(), 12);

  for c in &generated {
    let stored = s.get_contract(c.id).await.unwrap().unwrap();
    assert_eq!(stored.document.name.len(), NAME_LEN);
    assert_eq!(stored.document.surname.len(), SURNAME_LEN);
    assert_eq!(stored.contract_text.len(), CONTRACT_TEXT_LEN);
    assert!(is_lowercase_ascii(&stored.document.name));
    assert!(is_lowercase_ascii(&stored.document.surname));
    assert!(is_lowercase_ascii(&stored.contract_text));
  }
}

#[tokio::test]
async fn generate_zero_or_negative_is_noop() {
  let (s, contracts, _) = services().await;
  assert!(contracts.generate_contracts(0).await.unwrap().is_empty());
  assert!(contracts.generate_contracts(-3).await.unwrap().is_empty());
  assert_eq!(s.count_contracts().await.unwrap(), 0);
}

#[tokio::test]
async fn generate_over_the_limit_is_refused_before_storing() {
  let (s, contracts, _) = services().await;
  for count in [MAX_GENERATE as i64 + 1, i64::MAX] {
    match contracts.generate_contracts(count).await {
      Err(CoreError::TooMany { requested, max }) => {
        assert_eq!(requested, count);
        assert_eq!(max, MAX_GENERATE);
      }
      other => panic!("expected TooMany, got {other:?}"),
    }
  }
  assert_eq!(s.count_contracts().await.unwrap(), 0);
}

// ─── Insurance service ───────────────────────────────────────────────────────

#[tokio::test]
async fn new_insurance_is_retrievable_from_store() {
  let (s, _, insurance) = services().await;
  let saved = insurance
    .new_insurance("Grace".into(), "Hopper".into(), "sedan".into())
    .await
    .unwrap();

  let fetched = s.get_insurance(saved.id).await.unwrap().unwrap();
  assert_eq!(fetched.vehicle_type, "sedan");
}

#[tokio::test]
async fn new_insurance_rejects_blank_vehicle_type() {
  let (_, _, insurance) = services().await;
  let err = insurance
    .new_insurance("Grace".into(), "Hopper".into(), "".into())
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::EmptyField { field: "vehicle_type" }));
}

#[tokio::test]
async fn identifiers_never_collide_across_operations() {
  let (_, contracts, insurance) = services().await;
  let mut ids = HashSet::new();
  for c in contracts.generate_contracts(50).await.unwrap() {
    assert!(ids.insert(c.id));
  }
  let one = contracts
    .add_new_contract("a".into(), "b".into(), "c".into())
    .await
    .unwrap();
  assert!(ids.insert(one.id));
  let ins = insurance
    .new_insurance("a".into(), "b".into(), "c".into())
    .await
    .unwrap();
  assert!(ids.insert(ins.id));
}

// ─── Artifacts ───────────────────────────────────────────────────────────────

fn artifact(name: &str) -> NewArtifact {
  let payload = json!({ "colour": "red", "doors": 4, "tags": ["a", "b"] });
  NewArtifact {
    name:    name.into(),
    surname: "Artifact".into(),
    payload: payload.as_object().cloned().unwrap(),
  }
}

#[tokio::test]
async fn save_and_get_artifact_keeps_payload() {
  let s = store().await;
  let saved = s.save_artifact(artifact("photo")).await.unwrap();

  let fetched = s.get_artifact(saved.id).await.unwrap().unwrap();
  assert_eq!(fetched, saved);
  assert_eq!(fetched.payload["doors"], json!(4));
  assert!(s.get_artifact(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn add_artifact_rejects_blank_name() {
  let s = Arc::new(store().await);
  let err = ArtifactService::new(s)
    .add_artifact(" ".into(), "x".into(), Default::default())
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::EmptyField { field: "name" }));
}

#[tokio::test]
async fn link_to_artifact_attaches_and_relinking_replaces() {
  let (s, _, insurance) = services().await;
  let ins = insurance
    .new_insurance("Grace".into(), "Hopper".into(), "sedan".into())
    .await
    .unwrap();
  let first = s.save_artifact(artifact("first")).await.unwrap();
  let second = s.save_artifact(artifact("second")).await.unwrap();

  assert!(s.insurance_artifact(ins.id).await.unwrap().is_none());

  let link = insurance.link_to_artifact(ins.id, first.id).await.unwrap();
  assert_eq!(link.document_id, ins.id);
  assert_eq!(link.target_id, first.id);
  assert_eq!(s.insurance_artifact(ins.id).await.unwrap(), Some(first));

  insurance.link_to_artifact(ins.id, second.id).await.unwrap();
  assert_eq!(s.insurance_artifact(ins.id).await.unwrap(), Some(second));

  // The insurance record itself is untouched by linking.
  assert_eq!(s.get_insurance(ins.id).await.unwrap(), Some(ins));
}

#[tokio::test]
async fn link_to_artifact_reports_missing_ends() {
  let (s, contracts, insurance) = services().await;
  let ins = insurance
    .new_insurance("Grace".into(), "Hopper".into(), "sedan".into())
    .await
    .unwrap();
  let art = s.save_artifact(artifact("a")).await.unwrap();
  let contract = contracts
    .add_new_contract("Ada".into(), "Lovelace".into(), "t".into())
    .await
    .unwrap();

  let missing = Uuid::new_v4();
  assert!(matches!(
    insurance.link_to_artifact(missing, art.id).await,
    Err(CoreError::InsuranceNotFound(id)) if id == missing
  ));
  assert!(matches!(
    insurance.link_to_artifact(ins.id, missing).await,
    Err(CoreError::ArtifactNotFound(id)) if id == missing
  ));
  // A contract id is not an insurance id.
  assert!(matches!(
    insurance.link_to_artifact(contract.id, art.id).await,
    Err(CoreError::InsuranceNotFound(_))
  ));
  assert!(s.insurance_artifact(ins.id).await.unwrap().is_none());
}

// ─── Signers ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_and_get_signer() {
  let s = store().await;
  let saved = s
    .save_signer(NewSigner { full_name: "Ada Lovelace".into(), is_active: false })
    .await
    .unwrap();
  assert_eq!(s.get_signer(saved.id).await.unwrap(), Some(saved));
  assert!(s.get_signer(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn find_document_looks_in_both_tables() {
  let (s, contracts, insurance) = services().await;
  let c = contracts
    .add_new_contract("Ada".into(), "Lovelace".into(), "t".into())
    .await
    .unwrap();
  let i = insurance
    .new_insurance("Grace".into(), "Hopper".into(), "van".into())
    .await
    .unwrap();

  let found = s.find_document(c.id).await.unwrap().unwrap();
  assert_eq!(found.kind, DocumentKind::Contract);
  assert_eq!(found.document, c.document);

  let found = s.find_document(i.id).await.unwrap().unwrap();
  assert_eq!(found.kind, DocumentKind::Insurance);
  assert_eq!(found.document, i.document);

  assert!(s.find_document(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn signer_collects_documents_in_link_order() {
  let (s, contracts, insurance) = services().await;
  let signers = SignerService::new(s.clone());

  let view = signers.create_signer("Ada Lovelace".into(), true).await.unwrap();
  assert!(view.documents.is_empty());
  assert!(view.signer.is_active);
  let signer_id = view.signer.id;

  let c = contracts
    .add_new_contract("Ada".into(), "Lovelace".into(), "t".into())
    .await
    .unwrap();
  let i = insurance
    .new_insurance("Grace".into(), "Hopper".into(), "van".into())
    .await
    .unwrap();

  let view = signers.add_document_to_signer(signer_id, c.id).await.unwrap();
  assert_eq!(view.documents.len(), 1);
  assert_eq!(view.documents[0].kind, DocumentKind::Contract);

  let view = signers.add_document_to_signer(signer_id, i.id).await.unwrap();
  let ids: Vec<_> = view.documents.iter().map(|d| d.id).collect();
  assert_eq!(ids, vec![c.id, i.id]);
  assert_eq!(view.documents[1].kind, DocumentKind::Insurance);
  assert_eq!(view.documents[1].document, i.document);

  // Linking the same document again does not duplicate it.
  let view = signers.add_document_to_signer(signer_id, c.id).await.unwrap();
  assert_eq!(view.documents.len(), 2);
}

#[tokio::test]
async fn relinking_a_document_moves_it_to_the_new_signer() {
  let (s, contracts, _) = services().await;
  let signers = SignerService::new(s.clone());
  let first = signers.create_signer("First".into(), true).await.unwrap();
  let second = signers.create_signer("Second".into(), true).await.unwrap();
  let c = contracts
    .add_new_contract("Ada".into(), "Lovelace".into(), "t".into())
    .await
    .unwrap();

  signers.add_document_to_signer(first.signer.id, c.id).await.unwrap();
  let view = signers
    .add_document_to_signer(second.signer.id, c.id)
    .await
    .unwrap();
  assert_eq!(view.documents.len(), 1);
  assert!(s.signer_documents(first.signer.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn add_document_to_signer_reports_missing_ends() {
  let (s, contracts, _) = services().await;
  let signers = SignerService::new(s.clone());
  let signer = signers.create_signer("Ada".into(), true).await.unwrap();
  let c = contracts
    .add_new_contract("Ada".into(), "Lovelace".into(), "t".into())
    .await
    .unwrap();

  let missing = Uuid::new_v4();
  assert!(matches!(
    signers.add_document_to_signer(missing, c.id).await,
    Err(CoreError::SignerNotFound(id)) if id == missing
  ));
  assert!(matches!(
    signers.add_document_to_signer(signer.signer.id, missing).await,
    Err(CoreError::DocumentNotFound(id)) if id == missing
  ));
  assert!(s.signer_documents(signer.signer.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_signer_rejects_blank_full_name() {
  let s = Arc::new(store().await);
  let err = SignerService::new(s)
    .create_signer("".into(), true)
    .await
    .unwrap_err();
  assert!(matches!(err, CoreError::EmptyField { field: "full_name" }));
}
