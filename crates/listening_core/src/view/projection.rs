//! Display projection of a ranked report.
//!
//! # Responsibility
//! - Apply the quotation truncation policy driven by expansion flags.
//! - Format discussion-share badges.
//! - Substitute placeholders for empty data at every level.
//!
//! # Invariants
//! - Collapsed points show at most `COLLAPSED_QUOTE_LIMIT` quotations.
//! - Points with no more than `COLLAPSED_QUOTE_LIMIT` quotations have no
//!   expand control.
//! - Badges are absent when the theme total is zero, never `NaN%`.

use crate::model::document::Point;
use crate::service::expansion::{ExpansionState, PointKey};
use crate::service::rank::{RankedReport, RankedSummary, RankedTheme};
use crate::view::anchor::{display_theme_name, summary_anchor, theme_anchor};
use serde::Serialize;

/// Quotations shown for a collapsed point.
pub const COLLAPSED_QUOTE_LIMIT: usize = 2;

pub const NO_DATA_NOTICE: &str = "暂无数据可展示。";
pub const NO_SUMMARY_NOTICE: &str = "该主题下无总结内容。";
pub const NO_POINT_NOTICE: &str = "该总结下无具体要点。";
pub const COLLAPSE_LABEL: &str = "收起";

/// Control offered under a truncatable quotation list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExpandControl {
    /// Collapsed; `remaining` quotations are hidden.
    ShowMore { remaining: usize },
    /// Expanded; offers to collapse back.
    Collapse,
}

impl ExpandControl {
    pub fn label(&self) -> String {
        match self {
            Self::ShowMore { remaining } => format!("...等 {remaining} 条更多"),
            Self::Collapse => COLLAPSE_LABEL.to_string(),
        }
    }
}

/// Visible slice of one point's quotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotationDisplay {
    pub total: usize,
    pub visible: Vec<String>,
    /// Quotations held back while collapsed, for surfaces that reveal them
    /// without a round trip.
    pub hidden: Vec<String>,
    pub control: Option<ExpandControl>,
}

/// Applies the truncation policy to one quotation list.
pub fn quotation_display(quotations: &[String], expanded: bool) -> QuotationDisplay {
    let total = quotations.len();
    if total <= COLLAPSED_QUOTE_LIMIT {
        return QuotationDisplay {
            total,
            visible: quotations.to_vec(),
            hidden: Vec::new(),
            control: None,
        };
    }

    if expanded {
        QuotationDisplay {
            total,
            visible: quotations.to_vec(),
            hidden: Vec::new(),
            control: Some(ExpandControl::Collapse),
        }
    } else {
        let (visible, hidden) = quotations.split_at(COLLAPSED_QUOTE_LIMIT);
        QuotationDisplay {
            total,
            visible: visible.to_vec(),
            hidden: hidden.to_vec(),
            control: Some(ExpandControl::ShowMore {
                remaining: total - COLLAPSED_QUOTE_LIMIT,
            }),
        }
    }
}

/// Percentage of `count` over `total` with two decimals, rounded half up.
///
/// Returns `None` when `total` is zero so callers suppress the badge.
/// Integer arithmetic keeps the rounding exact for every count pair.
pub fn format_share_percent(count: usize, total: usize) -> Option<String> {
    if total == 0 {
        return None;
    }
    let count = count as u128;
    let total = total as u128;
    let hundredths = (count * 10_000 * 2 + total) / (total * 2);
    Some(format!("{}.{:02}", hundredths / 100, hundredths % 100))
}

/// Badge text for a formatted percentage.
pub fn badge_label(percent: &str) -> String {
    format!("讨论度: {percent}%")
}

/// Whole page projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportView {
    /// No themes at all.
    Empty { notice: String },
    Sections { themes: Vec<ThemeView> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeView {
    pub heading: String,
    pub anchor: String,
    pub total_count: usize,
    pub summaries: Vec<SummaryView>,
    /// Set when the theme has no summaries.
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    pub label: String,
    pub anchor: String,
    pub count: usize,
    pub badge: Option<String>,
    pub points: Vec<PointView>,
    /// Set when the summary has no points.
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PointView {
    /// Identity to pass back when toggling this point.
    pub key: PointKey,
    pub label: String,
    pub quotations: QuotationDisplay,
}

impl ReportView {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    pub fn themes(&self) -> &[ThemeView] {
        match self {
            Self::Empty { .. } => &[],
            Self::Sections { themes } => themes,
        }
    }
}

/// Projects a ranked report under the current expansion flags.
pub fn project_report(ranked: &RankedReport, expansion: &ExpansionState) -> ReportView {
    if ranked.is_empty() {
        return ReportView::Empty {
            notice: NO_DATA_NOTICE.to_string(),
        };
    }
    ReportView::Sections {
        themes: ranked
            .themes
            .iter()
            .map(|theme| project_theme(theme, expansion))
            .collect(),
    }
}

fn project_theme(theme: &RankedTheme, expansion: &ExpansionState) -> ThemeView {
    let summaries = theme
        .summaries
        .iter()
        .map(|ranked| project_summary(theme, ranked, expansion))
        .collect::<Vec<_>>();
    ThemeView {
        heading: display_theme_name(theme.name.as_str()),
        anchor: theme_anchor(theme.source_index, theme.name.as_str()),
        total_count: theme.total_count,
        placeholder: summaries
            .is_empty()
            .then(|| NO_SUMMARY_NOTICE.to_string()),
        summaries,
    }
}

fn project_summary(
    theme: &RankedTheme,
    ranked: &RankedSummary,
    expansion: &ExpansionState,
) -> SummaryView {
    let points = ranked
        .summary
        .points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let key = PointKey::new(theme.source_index, ranked.source_index, index);
            project_point(key, point, expansion.is_expanded(key))
        })
        .collect::<Vec<_>>();
    SummaryView {
        label: ranked.summary.summary.clone(),
        anchor: summary_anchor(
            (theme.source_index, theme.name.as_str()),
            (ranked.source_index, ranked.summary.summary.as_str()),
        ),
        count: ranked.count,
        badge: format_share_percent(ranked.count, theme.total_count)
            .map(|percent| badge_label(percent.as_str())),
        placeholder: points.is_empty().then(|| NO_POINT_NOTICE.to_string()),
        points,
    }
}

fn project_point(key: PointKey, point: &Point, expanded: bool) -> PointView {
    PointView {
        key,
        label: point.point.clone(),
        quotations: quotation_display(point.original_content.as_slice(), expanded),
    }
}
