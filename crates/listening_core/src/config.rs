//! Report presentation settings.
//!
//! # Invariants
//! - Defaults are usable without any external configuration.
//! - `ThemeOrder` is shared by the content and navigation panels.

use serde::{Deserialize, Serialize};

/// Page heading used when the caller does not provide one.
pub const DEFAULT_REPORT_TITLE: &str = "社媒聆听分析报告";

/// Ordering applied to themes before display.
///
/// Summaries are always ranked by discussion share; this only controls the
/// top level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeOrder {
    /// Descending total quotation count, ties in input order.
    #[default]
    ByVolume,
    /// Input key order.
    Input,
}

impl ThemeOrder {
    /// Parses `by_volume|input` (case-insensitive, `-` accepted for `_`).
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "by_volume" | "volume" => Ok(Self::ByVolume),
            "input" => Ok(Self::Input),
            other => Err(format!(
                "unsupported theme order `{other}`; expected by_volume|input"
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ByVolume => "by_volume",
            Self::Input => "input",
        }
    }
}

/// Settings for one report session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Page heading.
    pub title: String,
    pub theme_order: ThemeOrder,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_REPORT_TITLE.to_string(),
            theme_order: ThemeOrder::default(),
        }
    }
}

impl ReportConfig {
    /// Creates a config with a custom title; blank titles fall back to the
    /// default heading.
    pub fn with_title(title: impl Into<String>) -> Self {
        let title = title.into();
        let trimmed = title.trim();
        Self {
            title: if trimmed.is_empty() {
                DEFAULT_REPORT_TITLE.to_string()
            } else {
                trimmed.to_string()
            },
            ..Self::default()
        }
    }

    pub fn theme_order(mut self, order: ThemeOrder) -> Self {
        self.theme_order = order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ReportConfig, ThemeOrder, DEFAULT_REPORT_TITLE};

    #[test]
    fn theme_order_parse_accepts_known_values() {
        assert_eq!(ThemeOrder::parse(" By-Volume ").unwrap(), ThemeOrder::ByVolume);
        assert_eq!(ThemeOrder::parse("input").unwrap(), ThemeOrder::Input);
        assert!(ThemeOrder::parse("random").is_err());
    }

    #[test]
    fn blank_title_falls_back_to_default() {
        assert_eq!(ReportConfig::with_title("  ").title, DEFAULT_REPORT_TITLE);
        assert_eq!(ReportConfig::with_title(" 报告 ").title, "报告");
    }
}
