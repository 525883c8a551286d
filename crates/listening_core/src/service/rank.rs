//! Quotation-volume aggregation and ranking.
//!
//! # Responsibility
//! - Count quotations per point, summary and theme.
//! - Derive discussion shares and a display order from those counts.
//! - Build the navigation entries from the same ranked structure.
//!
//! # Invariants
//! - Pure: the source document is never mutated or reordered.
//! - Stable: equal keys keep their input relative order.
//! - Idempotent: ranking ranked output changes nothing.
//! - A zero theme total yields share `0.0` for every summary.

use crate::config::ThemeOrder;
use crate::model::document::{Document, Point, Summary, Theme};
use crate::view::anchor::{display_theme_name, summary_anchor, theme_anchor};
use serde::Serialize;

/// Quotations attached to one point.
pub fn point_count(point: &Point) -> usize {
    point.original_content.len()
}

/// Quotations across every point of a summary.
pub fn summary_count(summary: &Summary) -> usize {
    summary.points.iter().map(point_count).sum()
}

/// Quotations across every summary of a theme.
pub fn theme_total_count(theme: &Theme) -> usize {
    theme.summary_list.iter().map(summary_count).sum()
}

/// Ratio of `count` over `total`, defined as `0.0` when `total` is zero.
pub fn share_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Proportion of the theme's quotation volume held by one summary.
pub fn discussion_share(summary: &Summary, theme: &Theme) -> f64 {
    share_of(summary_count(summary), theme_total_count(theme))
}

/// Summary with its derived metrics, in ranked position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSummary {
    /// Position inside the source theme's `summary_list`.
    pub source_index: usize,
    pub count: usize,
    pub share: f64,
    pub summary: Summary,
}

/// Theme with its ranked summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTheme {
    /// Position inside the source document.
    pub source_index: usize,
    pub name: String,
    pub total_count: usize,
    pub summaries: Vec<RankedSummary>,
}

impl RankedTheme {
    /// Rebuilds a plain theme with summaries in ranked order.
    pub fn to_theme(&self) -> Theme {
        Theme {
            name: self.name.clone(),
            summary_list: self
                .summaries
                .iter()
                .map(|ranked| ranked.summary.clone())
                .collect(),
        }
    }
}

/// Display-ready ordering of a whole document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedReport {
    pub order: ThemeOrder,
    pub themes: Vec<RankedTheme>,
}

/// One navigation link. Themes carry their summaries as children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub label: String,
    pub anchor: String,
    pub children: Vec<TocEntry>,
}

/// Ranks summaries within one theme by descending discussion share.
///
/// All shares of a theme share one denominator, so the integer counts are
/// compared directly.
pub fn rank_theme(source_index: usize, theme: &Theme) -> RankedTheme {
    let total_count = theme_total_count(theme);
    let mut summaries = theme
        .summary_list
        .iter()
        .enumerate()
        .map(|(index, summary)| {
            let count = summary_count(summary);
            RankedSummary {
                source_index: index,
                count,
                share: share_of(count, total_count),
                summary: summary.clone(),
            }
        })
        .collect::<Vec<_>>();
    // `sort_by` is stable, so equal counts keep input order.
    summaries.sort_by(|a, b| b.count.cmp(&a.count));

    RankedTheme {
        source_index,
        name: theme.name.clone(),
        total_count,
        summaries,
    }
}

/// Ranks every theme of a document.
pub fn rank_document(document: &Document, order: ThemeOrder) -> RankedReport {
    let mut themes = document
        .themes
        .iter()
        .enumerate()
        .map(|(index, theme)| rank_theme(index, theme))
        .collect::<Vec<_>>();
    if order == ThemeOrder::ByVolume {
        themes.sort_by(|a, b| b.total_count.cmp(&a.total_count));
    }
    RankedReport { order, themes }
}

impl RankedReport {
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Navigation entries in exactly the displayed order.
    pub fn toc(&self) -> Vec<TocEntry> {
        self.themes
            .iter()
            .map(|theme| TocEntry {
                label: display_theme_name(theme.name.as_str()),
                anchor: theme_anchor(theme.source_index, theme.name.as_str()),
                children: theme
                    .summaries
                    .iter()
                    .map(|ranked| TocEntry {
                        label: ranked.summary.summary.clone(),
                        anchor: summary_anchor(
                            (theme.source_index, theme.name.as_str()),
                            (ranked.source_index, ranked.summary.summary.as_str()),
                        ),
                        children: Vec::new(),
                    })
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{rank_theme, share_of};
    use crate::model::document::{Point, Summary, Theme};

    fn summary(label: &str, quotes: usize) -> Summary {
        Summary {
            summary: label.to_string(),
            points: vec![Point {
                point: format!("{label}-p"),
                original_content: (0..quotes).map(|i| format!("q{i}")).collect(),
            }],
        }
    }

    #[test]
    fn share_of_zero_total_is_zero() {
        assert_eq!(share_of(0, 0), 0.0);
        assert_eq!(share_of(3, 0), 0.0);
    }

    #[test]
    fn rank_theme_orders_descending_and_records_source_index() {
        let theme = Theme {
            name: "t".to_string(),
            summary_list: vec![summary("a", 1), summary("b", 4), summary("c", 2)],
        };
        let ranked = rank_theme(3, &theme);
        let order = ranked
            .summaries
            .iter()
            .map(|s| (s.summary.summary.as_str(), s.source_index))
            .collect::<Vec<_>>();
        assert_eq!(order, vec![("b", 1), ("c", 2), ("a", 0)]);
        assert_eq!(ranked.source_index, 3);
        assert_eq!(ranked.total_count, 7);
        assert_eq!(theme.summary_list[0].summary, "a");
    }
}
