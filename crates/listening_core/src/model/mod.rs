//! Report document model.
//!
//! # Responsibility
//! - Define the theme → summary → point → quotation hierarchy consumed by
//!   ranking and display.
//! - Absorb malformed input at the model boundary so downstream code only
//!   sees well-formed (possibly empty) sequences.
//!
//! # Invariants
//! - Theme order is the input key order.
//! - The loaded document is never reordered in place; ranking derives copies.

pub mod document;
