//! Synthetic contract generation for load and test-data seeding.

use rand::Rng;

use crate::document::NewContract;

pub const NAME_LEN: usize = 40;
pub const SURNAME_LEN: usize = 40;
pub const CONTRACT_TEXT_LEN: usize = 100;

/// Upper bound on one generation batch. The whole batch is built in memory
/// and committed in a single transaction.
pub const MAX_GENERATE: usize = 100_000;

/// A string of `len` characters drawn uniformly from `a..=z`.
pub fn lowercase_string<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
  (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

/// An unsaved contract filled with random lowercase text.
pub fn synthetic_contract<R: Rng + ?Sized>(rng: &mut R) -> NewContract {
  NewContract::new(
    lowercase_string(rng, NAME_LEN),
    lowercase_string(rng, SURNAME_LEN),
    lowercase_string(rng, CONTRACT_TEXT_LEN),
  )
}

/// `count` synthetic contracts, using the thread-local RNG.
pub fn synthetic_contracts(count: usize) -> Vec<NewContract> {
  let mut rng = rand::thread_rng();
  (0..count).map(|_| synthetic_contract(&mut rng)).collect()
}
