//! # privgate-contracts
//!
//! Shared types, schemas, and contracts for the privgate approval gate.
//!
//! All crates in the workspace import from here. No decision logic lives in
//! this crate, only data definitions and error types.

pub mod error;
pub mod evaluation;
pub mod policy;
pub mod pull_request;
