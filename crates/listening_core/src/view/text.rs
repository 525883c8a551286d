//! Plain-text outline rendering for terminals.

use crate::config::ReportConfig;
use crate::view::projection::{ReportView, SummaryView};
use std::fmt::Write;

const INDENT: &str = "  ";

/// Renders the report as an indented outline.
///
/// Collapsed points list their visible quotations followed by the control
/// label, mirroring what an interactive surface shows.
pub fn render_text(view: &ReportView, config: &ReportConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", config.title);

    match view {
        ReportView::Empty { notice } => {
            let _ = writeln!(out, "{notice}");
        }
        ReportView::Sections { themes } => {
            for theme in themes {
                let _ = writeln!(out, "\n# {} ({})", theme.heading, theme.total_count);
                if let Some(placeholder) = &theme.placeholder {
                    let _ = writeln!(out, "{INDENT}{placeholder}");
                }
                for summary in &theme.summaries {
                    write_summary(&mut out, summary);
                }
            }
        }
    }
    out
}

fn write_summary(out: &mut String, summary: &SummaryView) {
    match &summary.badge {
        Some(badge) => {
            let _ = writeln!(out, "{INDENT}- {} [{badge}]", summary.label);
        }
        None => {
            let _ = writeln!(out, "{INDENT}- {}", summary.label);
        }
    }
    if let Some(placeholder) = &summary.placeholder {
        let _ = writeln!(out, "{INDENT}{INDENT}{placeholder}");
        return;
    }
    for point in &summary.points {
        let _ = writeln!(out, "{INDENT}{INDENT}要点：{}", point.label);
        for quote in &point.quotations.visible {
            let _ = writeln!(out, "{INDENT}{INDENT}{INDENT}> {quote}");
        }
        if let Some(control) = &point.quotations.control {
            let _ = writeln!(out, "{INDENT}{INDENT}{INDENT}{}", control.label());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::render_text;
    use crate::config::ReportConfig;
    use crate::view::projection::{ReportView, NO_DATA_NOTICE};

    #[test]
    fn empty_view_renders_notice_only() {
        let view = ReportView::Empty {
            notice: NO_DATA_NOTICE.to_string(),
        };
        let text = render_text(&view, &ReportConfig::with_title("T"));
        assert_eq!(text, format!("T\n{NO_DATA_NOTICE}\n"));
    }
}
