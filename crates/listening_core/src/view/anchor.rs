//! Navigation anchor derivation.
//!
//! # Responsibility
//! - Turn theme and summary labels into stable in-page anchor ids.
//!
//! # Invariants
//! - Pure functions of the label: content and navigation panels compute the
//!   same id independently.
//! - Output contains only letters, numbers, `_` and `-`.
//! - Never empty: labels with nothing left after stripping fall back to the
//!   source position, so sibling sections keep distinct ids.

use once_cell::sync::Lazy;
use regex::Regex;

static ANCHOR_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}\s_-]+").expect("valid anchor strip regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

const DECORATION_MARKER: char = '*';

/// Anchor fragment for one label.
///
/// Rules:
/// - Characters other than letters, numbers, whitespace, `_`, `-` are removed.
/// - Surrounding whitespace is trimmed; inner whitespace runs become `-`.
pub fn anchor_fragment(label: &str) -> String {
    let stripped = ANCHOR_STRIP_RE.replace_all(label, "");
    WHITESPACE_RE
        .replace_all(stripped.trim(), "-")
        .into_owned()
}

fn fragment_or_position(label: &str, kind: &str, source_index: usize) -> String {
    let fragment = anchor_fragment(label);
    if fragment.is_empty() {
        format!("{kind}-{source_index}")
    } else {
        fragment
    }
}

/// Anchor id of a theme section at `source_index` in the document.
pub fn theme_anchor(source_index: usize, theme_name: &str) -> String {
    fragment_or_position(theme_name, "theme", source_index)
}

/// Anchor id of a summary block, namespaced by its theme.
///
/// Both arguments pair a source position with its label.
pub fn summary_anchor(theme: (usize, &str), summary: (usize, &str)) -> String {
    format!(
        "{}-{}",
        theme_anchor(theme.0, theme.1),
        fragment_or_position(summary.1, "summary", summary.0)
    )
}

/// Theme heading with decorative `*` markers removed.
pub fn display_theme_name(theme_name: &str) -> String {
    theme_name.replace(DECORATION_MARKER, "")
}

#[cfg(test)]
mod tests {
    use super::{anchor_fragment, display_theme_name, summary_anchor, theme_anchor};

    #[test]
    fn theme_anchor_strips_markers_and_punctuation() {
        assert_eq!(
            theme_anchor(0, "用户**决定**下定、购买**领克900**的原因、理由；"),
            "用户决定下定购买领克900的原因理由"
        );
    }

    #[test]
    fn spaces_become_dashes() {
        assert_eq!(anchor_fragment("  price  and value "), "price-and-value");
        assert_eq!(theme_anchor(4, "**Drive Feel**"), "Drive-Feel");
    }

    #[test]
    fn summary_anchor_is_namespaced_by_theme() {
        assert_eq!(summary_anchor((0, "主题 A"), (2, "S 1!")), "主题-A-S-1");
    }

    #[test]
    fn punctuation_only_labels_fall_back_to_position() {
        assert_eq!(theme_anchor(0, "***"), "theme-0");
        assert_eq!(theme_anchor(3, "、；!"), "theme-3");
        assert_eq!(summary_anchor((1, "***"), (0, "S1")), "theme-1-S1");
        assert_eq!(summary_anchor((1, "T"), (2, "??")), "T-summary-2");
        assert_ne!(theme_anchor(0, "**"), theme_anchor(1, "**"));
    }

    #[test]
    fn display_name_only_drops_markers() {
        assert_eq!(display_theme_name("**领克900** 体验"), "领克900 体验");
    }
}
