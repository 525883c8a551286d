//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level report functions to Dart via FRB.
//! - Hold the single report session that owns ranking and expansion state.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Load failures degrade to an empty report, never to a missing session.
//! - Point identities crossing the boundary are source positions.

use listening_core::{
    core_version as core_version_inner, init_logging as init_logging_inner,
    load_document_or_empty, ping as ping_inner, Document, ExpandControl, PointKey, PointView,
    ReportConfig, ReportSession, ReportView, SummaryView, ThemeOrder, ThemeView,
    NO_DATA_NOTICE,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock};

const REPORT_DATA_ENV: &str = "LISTENING_REPORT_DATA";
const REPORT_DATA_FILE_NAME: &str = "merged_summarized.json";
static REPORT_SESSION: OnceLock<Mutex<Option<ReportSession>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Result of loading the report document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLoadResponse {
    /// Whether the document had any theme to display.
    pub ok: bool,
    pub theme_count: u32,
    pub quotation_count: u32,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// One point with its currently visible quotations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PointItem {
    pub theme_index: u32,
    pub summary_index: u32,
    pub point_index: u32,
    pub label: String,
    /// Total quotation count (`典型用户原声 (N)`).
    pub total_quotations: u32,
    pub quotations: Vec<String>,
    /// `...等 N 条更多` or `收起`; `None` when nothing is truncatable.
    pub control_label: Option<String>,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarySection {
    pub label: String,
    pub anchor: String,
    pub badge: Option<String>,
    pub placeholder: Option<String>,
    pub points: Vec<PointItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSection {
    pub heading: String,
    pub anchor: String,
    pub total_quotations: u32,
    pub placeholder: Option<String>,
    pub summaries: Vec<SummarySection>,
}

/// Display envelope for the whole report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportViewResponse {
    pub title: String,
    /// Set instead of sections when there is no data.
    pub notice: Option<String>,
    pub sections: Vec<ThemeSection>,
}

/// Flattened navigation entry; `depth` 0 is a theme, 1 a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocItem {
    pub label: String,
    pub anchor: String,
    pub depth: u32,
}

/// Result of flipping one point's expansion flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleResponse {
    pub ok: bool,
    pub expanded: bool,
    pub message: String,
}

/// Loads the report document and starts a fresh session.
///
/// Input semantics:
/// - `path`: document path; `None`/blank falls back to `LISTENING_REPORT_DATA`,
///   then `merged_summarized.json` in the working directory.
/// - `title`: page heading; blank uses the default heading.
/// - `theme_order`: `by_volume|input`; `None` uses `by_volume`.
///
/// # FFI contract
/// - Sync call, file-backed execution.
/// - Never panics. Unreadable or invalid files, and an unknown
///   `theme_order`, still install an empty session so later view calls
///   render the "no data" notice instead of the previous document.
#[flutter_rust_bridge::frb(sync)]
pub fn report_load(
    path: Option<String>,
    title: Option<String>,
    theme_order: Option<String>,
) -> ReportLoadResponse {
    let title = title.unwrap_or_default();
    let order = match theme_order.as_deref().map(ThemeOrder::parse).transpose() {
        Ok(order) => order.unwrap_or_default(),
        Err(err) => {
            warn!("event=report_load module=ffi status=error reason=theme_order");
            *lock_session() = Some(ReportSession::new(
                Arc::new(Document::default()),
                ReportConfig::with_title(title),
            ));
            return ReportLoadResponse {
                ok: false,
                theme_count: 0,
                quotation_count: 0,
                message: format!("report_load failed: {err}"),
            };
        }
    };
    let config = ReportConfig::with_title(title).theme_order(order);
    let data_path = resolve_report_data_path(path);
    let document = load_document_or_empty(&data_path);
    let theme_count = to_u32(document.themes.len());
    let quotation_count = to_u32(document.quotation_count());
    let ok = !document.is_empty();

    let mut guard = lock_session();
    *guard = Some(ReportSession::new(Arc::new(document), config));

    ReportLoadResponse {
        ok,
        theme_count,
        quotation_count,
        message: if ok {
            format!("Loaded {theme_count} theme(s).")
        } else {
            format!("No report data at `{}`.", data_path.display())
        },
    }
}

/// Returns the ranked, display-ready report.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Before any `report_load`, returns the "no data" notice.
#[flutter_rust_bridge::frb(sync)]
pub fn report_view() -> ReportViewResponse {
    let guard = lock_session();
    let Some(session) = guard.as_ref() else {
        let config = ReportConfig::default();
        return ReportViewResponse {
            title: config.title,
            notice: Some(NO_DATA_NOTICE.to_string()),
            sections: Vec::new(),
        };
    };

    let title = session.config().title.clone();
    match session.view() {
        ReportView::Empty { notice } => ReportViewResponse {
            title,
            notice: Some(notice),
            sections: Vec::new(),
        },
        ReportView::Sections { themes } => ReportViewResponse {
            title,
            notice: None,
            sections: themes.into_iter().map(to_theme_section).collect(),
        },
    }
}

/// Returns navigation entries in the same order as `report_view`.
#[flutter_rust_bridge::frb(sync)]
pub fn report_toc() -> Vec<TocItem> {
    let guard = lock_session();
    let Some(session) = guard.as_ref() else {
        return Vec::new();
    };
    let mut items = Vec::new();
    for theme in session.toc() {
        items.push(TocItem {
            label: theme.label,
            anchor: theme.anchor,
            depth: 0,
        });
        items.extend(theme.children.into_iter().map(|child| TocItem {
            label: child.label,
            anchor: child.anchor,
            depth: 1,
        }));
    }
    items
}

/// Flips one point's expansion flag.
///
/// Indices are the ones carried by `PointItem`, i.e. source positions.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Unknown positions are accepted and stored; `ok` is false only when no
///   report is loaded.
#[flutter_rust_bridge::frb(sync)]
pub fn report_toggle_point(theme_index: u32, summary_index: u32, point_index: u32) -> ToggleResponse {
    let mut guard = lock_session();
    let Some(session) = guard.as_mut() else {
        return ToggleResponse {
            ok: false,
            expanded: false,
            message: "report_toggle_point failed: no report loaded".to_string(),
        };
    };
    let key = PointKey::new(
        theme_index as usize,
        summary_index as usize,
        point_index as usize,
    );
    let expanded = session.toggle_point(key);
    let message = if expanded { "Expanded." } else { "Collapsed." };
    ToggleResponse {
        ok: true,
        expanded,
        message: message.to_string(),
    }
}

/// Returns whether one point is expanded; `false` when unknown.
#[flutter_rust_bridge::frb(sync)]
pub fn report_is_expanded(theme_index: u32, summary_index: u32, point_index: u32) -> bool {
    let guard = lock_session();
    guard.as_ref().is_some_and(|session| {
        session.is_expanded(PointKey::new(
            theme_index as usize,
            summary_index as usize,
            point_index as usize,
        ))
    })
}

/// Renders the current session as a static HTML page.
///
/// Returns an empty string when no report is loaded.
#[flutter_rust_bridge::frb(sync)]
pub fn report_render_html() -> String {
    let guard = lock_session();
    guard
        .as_ref()
        .map(ReportSession::render_html)
        .unwrap_or_default()
}

fn lock_session() -> MutexGuard<'static, Option<ReportSession>> {
    let mutex = REPORT_SESSION.get_or_init(|| Mutex::new(None));
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("event=session_lock module=ffi status=recovered reason=poisoned");
            poisoned.into_inner()
        }
    }
}

fn resolve_report_data_path(path: Option<String>) -> PathBuf {
    if let Some(raw) = path {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    if let Ok(raw) = std::env::var(REPORT_DATA_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    PathBuf::from(REPORT_DATA_FILE_NAME)
}

fn to_theme_section(theme: ThemeView) -> ThemeSection {
    ThemeSection {
        heading: theme.heading,
        anchor: theme.anchor,
        total_quotations: to_u32(theme.total_count),
        placeholder: theme.placeholder,
        summaries: theme.summaries.into_iter().map(to_summary_section).collect(),
    }
}

fn to_summary_section(summary: SummaryView) -> SummarySection {
    SummarySection {
        label: summary.label,
        anchor: summary.anchor,
        badge: summary.badge,
        placeholder: summary.placeholder,
        points: summary.points.into_iter().map(to_point_item).collect(),
    }
}

fn to_point_item(point: PointView) -> PointItem {
    let control = point.quotations.control;
    PointItem {
        theme_index: to_u32(point.key.theme),
        summary_index: to_u32(point.key.summary),
        point_index: to_u32(point.key.point),
        label: point.label,
        total_quotations: to_u32(point.quotations.total),
        quotations: point.quotations.visible,
        control_label: control.map(|control| control.label()),
        expanded: matches!(control, Some(ExpandControl::Collapse)),
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, init_logging, ping, report_is_expanded, report_load, report_render_html,
        report_toc, report_toggle_point, report_view,
    };
    use std::sync::Mutex;

    // Tests share the process-wide session.
    static SESSION_TEST_LOCK: Mutex<()> = Mutex::new(());

    const EXAMPLE: &str = r#"{"主题A": {"summary_list": [{"summary":"S1","points":[{"point":"P1","original_content":["q1","q2","q3"]}]}]}}"#;

    fn write_example(dir: &tempfile::TempDir, body: &str) -> String {
        let path = dir.path().join("report.json");
        std::fs::write(&path, body).expect("write report fixture");
        path.to_str().expect("utf-8 temp path").to_string()
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn report_load_view_and_toggle_round_trip() {
        let _guard = SESSION_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_example(&dir, EXAMPLE);

        let loaded = report_load(Some(path), None, None);
        assert!(loaded.ok, "{}", loaded.message);
        assert_eq!(loaded.theme_count, 1);
        assert_eq!(loaded.quotation_count, 3);

        let view = report_view();
        assert_eq!(view.notice, None);
        let point = &view.sections[0].summaries[0].points[0];
        assert_eq!(view.sections[0].summaries[0].badge.as_deref(), Some("讨论度: 100.00%"));
        assert_eq!(point.quotations, vec!["q1", "q2"]);
        assert_eq!(point.control_label.as_deref(), Some("...等 1 条更多"));
        assert!(!point.expanded);

        let toggled = report_toggle_point(point.theme_index, point.summary_index, point.point_index);
        assert!(toggled.ok && toggled.expanded);
        assert!(report_is_expanded(0, 0, 0));

        let view = report_view();
        let point = &view.sections[0].summaries[0].points[0];
        assert_eq!(point.quotations.len(), 3);
        assert_eq!(point.control_label.as_deref(), Some("收起"));

        let toc = report_toc();
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[0].depth, 0);
        assert_eq!(toc[1].anchor, "主题A-S1");

        assert!(report_render_html().contains("<details open>"));
    }

    #[test]
    fn report_load_degrades_invalid_file_to_notice() {
        let _guard = SESSION_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_example(&dir, "{broken");

        let loaded = report_load(Some(path), Some("T".to_string()), None);
        assert!(!loaded.ok);

        let view = report_view();
        assert_eq!(view.title, "T");
        assert_eq!(view.notice.as_deref(), Some("暂无数据可展示。"));
        assert!(view.sections.is_empty());
        assert!(report_toc().is_empty());
    }

    #[test]
    fn report_load_rejects_unknown_theme_order() {
        let _guard = SESSION_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_example(&dir, EXAMPLE);
        assert!(report_load(Some(path.clone()), None, None).ok);
        assert_eq!(report_view().sections.len(), 1);

        let response = report_load(Some(path), None, Some("sideways".to_string()));
        assert!(!response.ok);
        assert!(response.message.contains("theme order"));

        let view = report_view();
        assert!(view.sections.is_empty());
        assert_eq!(view.notice.as_deref(), Some("暂无数据可展示。"));
        assert!(report_toc().is_empty());
    }
}
