//! Static HTML page rendering.
//!
//! # Responsibility
//! - Render the navigation panel and theme sections into one
//!   self-contained page.
//!
//! # Invariants
//! - Every piece of document text is HTML-escaped.
//! - Anchor ids in the navigation panel and the sections come from the same
//!   projection, so every link resolves.
//! - Expand controls are `<details>` elements holding the quotations past
//!   the collapsed limit; `open` mirrors the session flag. No script needed.

use crate::config::ReportConfig;
use crate::service::rank::TocEntry;
use crate::view::projection::{
    ExpandControl, PointView, ReportView, SummaryView, ThemeView, COLLAPSED_QUOTE_LIMIT,
    COLLAPSE_LABEL,
};
use std::fmt::Write;

const TOC_HEADING: &str = "目录";
const POINT_PREFIX: &str = "要点：";

const PAGE_STYLE: &str = r#"
body { margin: 0; background: #f3f4f6; color: #1f2937; font-family: -apple-system, "PingFang SC", "Microsoft YaHei", sans-serif; }
header h1 { text-align: center; font-size: 2rem; margin: 2rem 0; }
.layout { display: flex; gap: 1.5rem; padding: 0 1.5rem 2rem; }
nav.toc { position: sticky; top: 1rem; align-self: flex-start; width: 16rem; flex-shrink: 0; max-height: calc(100vh - 2rem); overflow-y: auto; background: #fff; border-radius: 8px; padding: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
nav.toc h3 { color: #4338ca; margin-top: 0; border-bottom: 1px solid #c7d2fe; padding-bottom: .5rem; }
nav.toc ul { list-style: none; padding-left: 0; margin: 0; }
nav.toc ul ul { padding-left: 1rem; font-size: .85rem; }
nav.toc a { display: block; padding: .3rem .5rem; color: #374151; text-decoration: none; border-radius: 4px; }
nav.toc a:hover { background: #eef2ff; color: #4338ca; }
main { display: grid; grid-template-columns: repeat(auto-fit, minmax(28rem, 1fr)); gap: 1.5rem; flex: 1; }
section.theme { background: #fff; border: 1px solid #e5e7eb; border-radius: 6px; padding: 1.5rem; }
section.theme h2 { color: #4338ca; border-bottom: 2px solid #6366f1; padding-bottom: .75rem; }
.summary { background: #eef2ff; border-left: 4px solid #6366f1; padding: 1rem; margin-bottom: 1.5rem; }
.summary-head { display: flex; justify-content: space-between; align-items: flex-start; }
.summary-head h3 { color: #4f46e5; margin: 0 0 .75rem; flex: 1; }
.badge { margin-left: 1rem; padding: .2rem .5rem; font-size: .75rem; font-weight: 600; color: #4338ca; background: #c7d2fe; border-radius: 999px; white-space: nowrap; }
ul.points { list-style: none; padding-left: 0; }
li.point { background: #fff; border: 1px solid #d1d5db; border-radius: 6px; padding: .75rem; margin-bottom: 1rem; }
.quotes { border-left: 2px solid #d1d5db; padding-left: 1rem; font-size: .875rem; color: #4b5563; }
details summary { cursor: pointer; color: #4f46e5; font-size: .75rem; margin-top: .5rem; list-style: none; }
details[open] > summary .more, details:not([open]) > summary .less { display: none; }
.placeholder { color: #6b7280; font-style: italic; }
"#;

/// Renders a complete HTML document.
pub fn render_html(view: &ReportView, toc: &[TocEntry], config: &ReportConfig) -> String {
    let mut html = String::with_capacity(16_384);
    let title = escape_html(config.title.as_str());

    html.push_str("<!DOCTYPE html>\n<html lang=\"zh-CN\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = writeln!(html, "<title>{title}</title>");
    let _ = writeln!(html, "<style>{PAGE_STYLE}</style>");
    html.push_str("</head>\n<body>\n");
    let _ = writeln!(html, "<header><h1>{title}</h1></header>");

    match view {
        ReportView::Empty { notice } => {
            let _ = writeln!(
                html,
                "<p class=\"placeholder\">{}</p>",
                escape_html(notice.as_str())
            );
        }
        ReportView::Sections { themes } => {
            html.push_str("<div class=\"layout\">\n");
            write_toc(&mut html, toc);
            html.push_str("<main>\n");
            for theme in themes {
                write_theme(&mut html, theme);
            }
            html.push_str("</main>\n</div>\n");
        }
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn write_toc(html: &mut String, toc: &[TocEntry]) {
    let _ = writeln!(html, "<nav class=\"toc\">\n<h3>{TOC_HEADING}</h3>\n<ul>");
    for entry in toc {
        let _ = write!(
            html,
            "<li><a href=\"#{}\">{}</a>",
            escape_html(entry.anchor.as_str()),
            escape_html(entry.label.as_str())
        );
        if !entry.children.is_empty() {
            html.push_str("<ul>");
            for child in &entry.children {
                let _ = write!(
                    html,
                    "<li><a href=\"#{}\">{}</a></li>",
                    escape_html(child.anchor.as_str()),
                    escape_html(child.label.as_str())
                );
            }
            html.push_str("</ul>");
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ul>\n</nav>\n");
}

fn write_theme(html: &mut String, theme: &ThemeView) {
    let _ = writeln!(
        html,
        "<section class=\"theme\" id=\"{}\">\n<h2>{}</h2>",
        escape_html(theme.anchor.as_str()),
        escape_html(theme.heading.as_str())
    );
    if let Some(placeholder) = &theme.placeholder {
        write_placeholder(html, placeholder);
    }
    for summary in &theme.summaries {
        write_summary(html, summary);
    }
    html.push_str("</section>\n");
}

fn write_summary(html: &mut String, summary: &SummaryView) {
    let _ = write!(
        html,
        "<div class=\"summary\" id=\"{}\">\n<div class=\"summary-head\"><h3>{}</h3>",
        escape_html(summary.anchor.as_str()),
        escape_html(summary.label.as_str())
    );
    if let Some(badge) = &summary.badge {
        let _ = write!(html, "<span class=\"badge\">{}</span>", escape_html(badge));
    }
    html.push_str("</div>\n");

    if let Some(placeholder) = &summary.placeholder {
        write_placeholder(html, placeholder);
    } else {
        html.push_str("<ul class=\"points\">\n");
        for point in &summary.points {
            write_point(html, point);
        }
        html.push_str("</ul>\n");
    }
    html.push_str("</div>\n");
}

fn write_point(html: &mut String, point: &PointView) {
    let _ = write!(
        html,
        "<li class=\"point\" data-key=\"{}-{}-{}\"><p><strong>{POINT_PREFIX}</strong> {}</p>",
        point.key.theme,
        point.key.summary,
        point.key.point,
        escape_html(point.label.as_str())
    );

    let quotations = &point.quotations;
    if quotations.total > 0 {
        let _ = write!(
            html,
            "<div class=\"quotes\"><p><strong>典型用户原声 ({})：</strong></p>",
            quotations.total
        );
        let all = quotations
            .visible
            .iter()
            .chain(quotations.hidden.iter())
            .collect::<Vec<_>>();
        let (shown, rest) = all.split_at(all.len().min(COLLAPSED_QUOTE_LIMIT));
        write_quote_list(html, shown);
        if let Some(control) = &quotations.control {
            let open = if *control == ExpandControl::Collapse {
                " open"
            } else {
                ""
            };
            let more = ExpandControl::ShowMore {
                remaining: rest.len(),
            };
            let _ = write!(
                html,
                "<details{open}><summary><span class=\"more\">{}</span><span class=\"less\">{}</span></summary>",
                escape_html(more.label().as_str()),
                COLLAPSE_LABEL
            );
            write_quote_list(html, rest);
            html.push_str("</details>");
        }
        html.push_str("</div>");
    }
    html.push_str("</li>\n");
}

fn write_quote_list(html: &mut String, quotes: &[&String]) {
    if quotes.is_empty() {
        return;
    }
    html.push_str("<ul>");
    for quote in quotes {
        let _ = write!(html, "<li>{}</li>", escape_html(quote.as_str()));
    }
    html.push_str("</ul>");
}

fn write_placeholder(html: &mut String, text: &str) {
    let _ = writeln!(html, "<p class=\"placeholder\">{}</p>", escape_html(text));
}

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_html;

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html("<b>\"a\" & 'b'</b>"),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }
}
