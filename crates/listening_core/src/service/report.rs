//! Report session use-case service.
//!
//! # Responsibility
//! - Own the loaded document, its cached ranking and the expansion flags.
//! - Recompute ranking only when the document identity changes.
//! - Hand display projections and navigation entries to rendering layers.
//!
//! # Invariants
//! - Identity is `Arc` pointer equality; equal content behind a new `Arc`
//!   still counts as a replacement.
//! - Replacing the document clears every expansion flag.

use crate::config::{ReportConfig, ThemeOrder};
use crate::model::document::Document;
use crate::service::expansion::{ExpansionState, PointKey};
use crate::service::rank::{rank_document, RankedReport, TocEntry};
use crate::view::html::render_html;
use crate::view::projection::{project_report, ReportView};
use crate::view::text::render_text;
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

/// One interactive viewing session over a loaded document.
pub struct ReportSession {
    document: Arc<Document>,
    ranked: RankedReport,
    expansion: ExpansionState,
    config: ReportConfig,
}

impl ReportSession {
    /// Creates a session and ranks the document once.
    pub fn new(document: Arc<Document>, config: ReportConfig) -> Self {
        let ranked = rank_logged(document.as_ref(), config.theme_order);
        Self {
            document,
            ranked,
            expansion: ExpansionState::new(),
            config,
        }
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    pub fn ranked(&self) -> &RankedReport {
        &self.ranked
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Swaps the session document.
    ///
    /// Returns `true` when ranking was recomputed, `false` when `document` is
    /// the same allocation already held.
    pub fn replace_document(&mut self, document: Arc<Document>) -> bool {
        if Arc::ptr_eq(&self.document, &document) {
            debug!("event=report_rank module=service status=skipped reason=same_document");
            return false;
        }
        self.ranked = rank_logged(document.as_ref(), self.config.theme_order);
        self.document = document;
        self.expansion.clear();
        true
    }

    /// Changes theme ordering; re-ranks only when it actually differs.
    pub fn set_theme_order(&mut self, order: ThemeOrder) -> bool {
        if self.config.theme_order == order {
            return false;
        }
        self.config.theme_order = order;
        self.ranked = rank_logged(self.document.as_ref(), order);
        true
    }

    pub fn is_expanded(&self, key: PointKey) -> bool {
        self.expansion.is_expanded(key)
    }

    /// Flips one point's flag and returns its new value.
    ///
    /// Keys outside the document are stored anyway; they simply never match
    /// a rendered point.
    pub fn toggle_point(&mut self, key: PointKey) -> bool {
        if !self.contains_point(key) {
            debug!(
                "event=point_toggle module=service status=unknown_key theme={} summary={} point={}",
                key.theme, key.summary, key.point
            );
        }
        self.expansion.toggle(key)
    }

    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Display projection for the current ranking and flags.
    pub fn view(&self) -> ReportView {
        project_report(&self.ranked, &self.expansion)
    }

    pub fn toc(&self) -> Vec<TocEntry> {
        self.ranked.toc()
    }

    /// Full static HTML page.
    pub fn render_html(&self) -> String {
        render_html(&self.view(), &self.toc(), &self.config)
    }

    /// Plain-text outline for terminals.
    pub fn render_text(&self) -> String {
        render_text(&self.view(), &self.config)
    }

    fn contains_point(&self, key: PointKey) -> bool {
        self.document
            .themes
            .get(key.theme)
            .and_then(|theme| theme.summary_list.get(key.summary))
            .is_some_and(|summary| key.point < summary.points.len())
    }
}

fn rank_logged(document: &Document, order: ThemeOrder) -> RankedReport {
    let started_at = Instant::now();
    let ranked = rank_document(document, order);
    info!(
        "event=report_rank module=service status=ok order={} themes={} duration_ms={}",
        order.as_str(),
        ranked.themes.len(),
        started_at.elapsed().as_millis()
    );
    ranked
}
