//! Shared helpers for stagecraft integration tests.

pub mod builders;

pub use builders::*;
