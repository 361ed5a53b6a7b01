//! Core types and trait definitions for the docvault document store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends implement [`store::DocumentStore`]; the boundary layer
//! talks only to the services in [`service`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod document;
pub mod error;
pub mod generate;
pub mod relation;
pub mod service;
pub mod store;

pub use error::{Error, Result};
