//! # ma-core
//!
//! Core types and error definitions for markov-approx.
//!
//! This crate provides the building blocks shared by every other crate in
//! the workspace: the scalar type aliases and the error hierarchy with its
//! early-return macros.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `ensure_domain!` / `ensure_config!` /
/// `degenerate!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// A probability in `[0, 1]`.
pub type Probability = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
