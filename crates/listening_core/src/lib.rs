//! Core logic for the social-listening report.
//! This crate is the single source of truth for ranking and display invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod service;
pub mod source;
pub mod view;

pub use config::{ReportConfig, ThemeOrder, DEFAULT_REPORT_TITLE};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget};
pub use model::document::{Document, Point, Summary, Theme};
pub use service::expansion::{ExpansionState, PointKey};
pub use service::rank::{
    discussion_share, point_count, rank_document, rank_theme, share_of, summary_count,
    theme_total_count, RankedReport, RankedSummary, RankedTheme, TocEntry,
};
pub use service::report::ReportSession;
pub use source::{
    load_document, load_document_from_str, load_document_or_empty, LoadError, LoadResult,
};
pub use view::anchor::{display_theme_name, summary_anchor, theme_anchor};
pub use view::projection::{
    badge_label, format_share_percent, quotation_display, ExpandControl, PointView,
    QuotationDisplay, ReportView, SummaryView, ThemeView, COLLAPSED_QUOTE_LIMIT, NO_DATA_NOTICE,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
