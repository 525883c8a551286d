//! Core use-case services.
//!
//! # Responsibility
//! - Aggregate quotation volume and rank themes and summaries.
//! - Track transient expand/collapse state.
//! - Keep UI/FFI layers decoupled from ranking details through one session.

pub mod expansion;
pub mod rank;
pub mod report;
