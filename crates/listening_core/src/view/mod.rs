//! Display layer over ranked reports.
//!
//! # Responsibility
//! - Derive navigation anchors from labels.
//! - Project ranked data plus expansion flags into display-ready views.
//! - Render those views as static HTML or a text outline.
//!
//! # Invariants
//! - Rendering never reads the source document directly; it only walks
//!   projections built from one ranking.

pub mod anchor;
pub mod html;
pub mod projection;
pub mod text;
