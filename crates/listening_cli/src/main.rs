//! Command-line entry point for the social-listening report.
//!
//! # Responsibility
//! - Load one analysis document and render it as HTML, a text outline, or a
//!   navigation listing.
//! - Keep output deterministic: the same document always renders the same
//!   bytes.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use listening_core::{
    default_log_level, init_stderr_logging, load_document, load_document_or_empty, PointKey,
    ReportConfig, ReportSession, ThemeOrder, DEFAULT_REPORT_TITLE,
};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "listening_cli")]
#[command(version)]
#[command(about = "Render ranked social-listening reports.", long_about = None)]
struct Cli {
    /// Analysis document (theme → summary_list → points → original_content)
    #[arg(long, short, env = "LISTENING_REPORT_DATA", global = true)]
    input: Option<PathBuf>,

    /// Theme ordering: by_volume or input
    #[arg(long, default_value = "by_volume", global = true)]
    theme_order: String,

    /// Log level written to stderr (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Fail instead of rendering the "no data" notice when the document
    /// cannot be read
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the full HTML page
    Render {
        /// Output file; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Page heading
        #[arg(long, default_value = DEFAULT_REPORT_TITLE)]
        title: String,

        /// Points to render expanded, as `theme:summary:point` source positions
        #[arg(long = "expand", value_parser = parse_point_key)]
        expand: Vec<PointKey>,
    },
    /// Print a plain-text outline
    Outline {
        #[arg(long = "expand", value_parser = parse_point_key)]
        expand: Vec<PointKey>,
    },
    /// Print navigation entries with their anchors
    Toc,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    init_stderr_logging(level.as_str()).map_err(|err| anyhow!(err))?;

    let session = open_session(&cli)?;
    match &cli.command {
        Commands::Render { output, .. } => {
            let html = session.render_html();
            match output {
                Some(path) => {
                    std::fs::write(path, html.as_bytes())
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(
                        "event=report_write module=cli status=ok bytes={}",
                        html.len()
                    );
                }
                None => print!("{html}"),
            }
        }
        Commands::Outline { .. } => print!("{}", session.render_text()),
        Commands::Toc => {
            for theme in session.toc() {
                println!("{}\t#{}", theme.label, theme.anchor);
                for summary in theme.children {
                    println!("  {}\t#{}", summary.label, summary.anchor);
                }
            }
        }
    }
    Ok(())
}

/// Loads the input document and prepares the session a command renders.
fn open_session(cli: &Cli) -> Result<ReportSession> {
    let order = ThemeOrder::parse(cli.theme_order.as_str()).map_err(|err| anyhow!(err))?;
    let input = cli
        .input
        .as_ref()
        .context("no input document; pass --input or set LISTENING_REPORT_DATA")?;
    let document = if cli.strict {
        load_document(input).with_context(|| format!("loading {}", input.display()))?
    } else {
        load_document_or_empty(input)
    };

    let (config, expand) = match &cli.command {
        Commands::Render { title, expand, .. } => {
            (ReportConfig::with_title(title.as_str()), expand.as_slice())
        }
        Commands::Outline { expand } => (ReportConfig::default(), expand.as_slice()),
        Commands::Toc => (ReportConfig::default(), &[][..]),
    };
    let mut session = ReportSession::new(Arc::new(document), config.theme_order(order));
    expand_points(&mut session, expand);
    Ok(session)
}

fn expand_points(session: &mut ReportSession, keys: &[PointKey]) {
    for key in keys {
        if !session.is_expanded(*key) {
            session.toggle_point(*key);
        }
    }
}

fn parse_point_key(raw: &str) -> Result<PointKey, String> {
    let parts = raw
        .split(':')
        .map(|part| part.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid point key `{raw}`: {err}"))?;
    match parts.as_slice() {
        [theme, summary, point] => Ok(PointKey::new(*theme, *summary, *point)),
        _ => Err(format!(
            "invalid point key `{raw}`; expected theme:summary:point"
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::{open_session, parse_point_key, Cli};
    use clap::{CommandFactory, Parser};
    use listening_core::PointKey;

    const EXAMPLE: &str = r#"{"主题A": {"summary_list": [{"summary":"S1","points":[{"point":"P1","original_content":["q1","q2","q3"]}]}]}}"#;

    fn write_example(dir: &tempfile::TempDir) -> String {
        let path = dir.path().join("report.json");
        std::fs::write(&path, EXAMPLE).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_point_key_accepts_triples() {
        assert_eq!(parse_point_key("0:2:1").unwrap(), PointKey::new(0, 2, 1));
        assert_eq!(parse_point_key(" 3 : 0 : 4 ").unwrap(), PointKey::new(3, 0, 4));
    }

    #[test]
    fn parse_point_key_rejects_bad_input() {
        assert!(parse_point_key("0:1").is_err());
        assert!(parse_point_key("a:b:c").is_err());
        assert!(parse_point_key("1:2:3:4").is_err());
    }

    #[test]
    fn render_expand_flag_opens_point() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_example(&dir);
        let cli = Cli::try_parse_from([
            "listening_cli",
            "--input",
            input.as_str(),
            "render",
            "--expand",
            "0:0:0",
            "--expand",
            "0:0:0",
        ])
        .unwrap();

        let session = open_session(&cli).unwrap();
        assert!(session.is_expanded(PointKey::new(0, 0, 0)));
        assert_eq!(session.expansion().expanded_count(), 1);
        assert!(session.render_html().contains("<details open>"));
    }

    #[test]
    fn outline_without_expand_stays_collapsed() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_example(&dir);
        let cli = Cli::try_parse_from(["listening_cli", "-i", input.as_str(), "outline"]).unwrap();

        let session = open_session(&cli).unwrap();
        assert!(!session.is_expanded(PointKey::new(0, 0, 0)));
        assert!(session.render_text().contains("...等 1 条更多"));
    }

    #[test]
    fn strict_fails_on_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        let missing = missing.to_str().unwrap();

        let strict =
            Cli::try_parse_from(["listening_cli", "--strict", "--input", missing, "toc"]).unwrap();
        assert!(open_session(&strict).is_err());

        let lenient = Cli::try_parse_from(["listening_cli", "--input", missing, "toc"]).unwrap();
        let session = open_session(&lenient).unwrap();
        assert!(session.view().is_empty());
    }

    #[test]
    fn unknown_theme_order_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_example(&dir);
        let cli = Cli::try_parse_from([
            "listening_cli",
            "--input",
            input.as_str(),
            "--theme-order",
            "sideways",
            "toc",
        ])
        .unwrap();
        assert!(open_session(&cli).is_err());
    }
}
