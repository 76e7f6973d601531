// In: src/error.rs

//! This module defines the single, unified error type for the entire relinq library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.
//!
//! Every variant is a data-dependent failure raised synchronously at a terminal
//! call. Argument-shape errors have no runtime representation: the
//! `IntoSequence` bound and the closure parameter types reject them at compile
//! time.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Raised by `first`, `last`, `min`, `max` and `average` when the
    /// materialized sequence contains no elements.
    #[error("the source sequence is empty")]
    EmptySequence,

    /// Raised by `element_at` when the index is past the end of the
    /// materialized sequence.
    #[error("no element at index {0}")]
    NoElementAt(usize),

    /// Raised by `to_dictionary` when the key selector produces the same key
    /// for two elements. `to_lookup` never raises this; it accumulates.
    #[error("key selector produced duplicate key {0} for two elements")]
    DuplicateKey(String),
}
