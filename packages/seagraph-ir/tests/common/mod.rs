//! Common test utilities for seagraph-ir
//!
//! Shared fixtures (hand-built programs) and invariant assertions for the
//! integration tests.

#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::*;
pub use fixtures::*;
