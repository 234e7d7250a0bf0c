//! # pyedit CLI
//!
//! Runs the editor's highlighting engine over files from the command line.

mod render;

use clap::{Args, Parser, Subcommand, ValueEnum};
use pyedit_lexer::config::runtime::{parse_log_level, RuntimeConfig};
use pyedit_lexer::highlight::LanguageProfile;
use pyedit_lexer::logging::codes;
use pyedit_lexer::theme::ThemeLoadReport;
use pyedit_lexer::{
    log_info, log_success, logging, Classifier, DocumentRegistry, StyleTable, ThemeLoader,
};
use render::StyledRanges;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pyedit", author, version, about = "Python syntax highlighting from the command line")]
struct Cli {
    /// Minimum log level: error, warn, info or debug
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Emit log events as JSON lines
    #[arg(long, global = true)]
    structured_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Highlight a file or a byte range of it
    Highlight(HighlightArgs),
    /// Load a theme file and print the resulting style table
    Theme {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// List the style identifiers and the built-in palette
    Styles,
}

#[derive(Args)]
struct HighlightArgs {
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Theme file applied on top of the built-in palette
    #[arg(long, value_name = "FILE")]
    theme: Option<PathBuf>,

    /// First byte to restyle
    #[arg(long)]
    start: Option<usize>,

    /// End of the restyled range (exclusive)
    #[arg(long)]
    end: Option<usize>,

    /// Restyle in pieces of this many bytes, like an editor repainting on scroll
    #[arg(long, value_name = "BYTES")]
    chunk: Option<usize>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Ansi)]
    format: OutputFormat,

    /// Paint `def` as a keyword in every position
    #[arg(long)]
    consistent_def: bool,

    /// Carry an open string from one chunk into the next
    #[arg(long)]
    carry_state: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Spans,
    Json,
    Ansi,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = RuntimeConfig::default();
    if let Some(level) = &cli.log_level {
        config.logging.min_log_level =
            parse_log_level(level).ok_or_else(|| format!("Unknown log level '{}'", level))?;
    }
    if cli.structured_logs {
        config.logging.use_structured_logging = true;
    }

    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;

    match cli.command {
        Command::Highlight(args) => highlight(&config, args),
        Command::Theme { path } => theme(&config, &path),
        Command::Styles => {
            print!("{}", render::render_table(&StyleTable::one_dark(), true));
            Ok(())
        }
    }
}

fn highlight(config: &RuntimeConfig, args: HighlightArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut preferences = config.highlight.clone();
    preferences.consistent_def_style |= args.consistent_def;
    preferences.carry_string_state |= args.carry_state;

    let table = resolve_theme(config, args.theme.as_deref())?;
    let classifier = Classifier::from_preferences(LanguageProfile::python(), table, &preferences);

    let mut registry = DocumentRegistry::from_preferences(&preferences);
    let id = registry.open(&args.file)?;
    let document = registry
        .get_mut(id)
        .ok_or_else(|| format!("Document {} vanished from the registry", id))?;

    let len = document.text().len();
    let start = args.start.unwrap_or(0);
    let end = args.end.unwrap_or(len);
    let step = args.chunk.filter(|&n| n > 0).unwrap_or(usize::MAX);

    let mut sink = StyledRanges::default();
    let mut from = start;
    loop {
        let to = chunk_end(document.text(), from, step, end);
        document.restyle(&classifier, from, to, &mut sink)?;
        if to >= end {
            break;
        }
        from = to;
    }

    let text = document.text();
    match args.format {
        OutputFormat::Spans => print!("{}", render::render_spans(text, &sink.ranges)),
        OutputFormat::Json => println!("{}", render::render_json(text, &sink.ranges)?),
        OutputFormat::Ansi => print!("{}", render::render_ansi(text, &sink.ranges, classifier.styles())),
    }

    log_success!(codes::success::HIGHLIGHT_COMPLETE, "Highlight complete",
        "file" => args.file.display(),
        "spans" => sink.ranges.len()
    );
    Ok(())
}

/// End of the chunk starting at `from`, moved forward onto a char boundary
fn chunk_end(text: &str, from: usize, step: usize, end: usize) -> usize {
    let mut to = from.saturating_add(step).min(end);
    while to < end && !text.is_char_boundary(to) {
        to += 1;
    }
    to
}

/// Explicit theme file, else the configured one if present, else the built-in palette
fn resolve_theme(
    config: &RuntimeConfig,
    explicit: Option<&Path>,
) -> Result<StyleTable, Box<dyn std::error::Error>> {
    let loader = ThemeLoader::from_preferences(&config.theme).with_base(StyleTable::one_dark());

    if let Some(path) = explicit {
        return Ok(loader.load_file(path)?.table);
    }

    if config.theme.theme_path.is_file() {
        return Ok(loader.load_file(&config.theme.theme_path)?.table);
    }

    log_info!("No theme file found, using the built-in palette",
        "path" => config.theme.theme_path.display()
    );
    Ok(StyleTable::one_dark())
}

fn theme(config: &RuntimeConfig, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let loader = ThemeLoader::from_preferences(&config.theme).with_warning_logging(false);

    match loader.load_file(path) {
        Ok(report) => {
            print_theme_report(&report);
            Ok(())
        }
        Err(error) => {
            eprintln!("FAILED: {} [{}]", error, error.error_code());
            std::process::exit(1);
        }
    }
}

fn print_theme_report(report: &ThemeLoadReport) {
    println!("{} rule(s) applied", report.rules.len());
    print!("{}", render::render_table(&report.table, false));

    if report.has_warnings() {
        println!();
        println!("{} warning(s):", report.warnings.len());
        for warning in &report.warnings {
            println!("  {}", warning);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_highlight_options() {
        let cli = Cli::try_parse_from([
            "pyedit",
            "highlight",
            "main.py",
            "--start",
            "4",
            "--chunk",
            "16",
            "--format",
            "json",
            "--carry-state",
        ])
        .unwrap();

        match cli.command {
            Command::Highlight(args) => {
                assert_eq!(args.file, PathBuf::from("main.py"));
                assert_eq!(args.start, Some(4));
                assert_eq!(args.end, None);
                assert_eq!(args.chunk, Some(16));
                assert!(matches!(args.format, OutputFormat::Json));
                assert!(args.carry_state);
                assert!(!args.consistent_def);
            }
            _ => panic!("expected highlight command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["pyedit", "styles", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::Styles));
    }

    #[test]
    fn test_chunk_end_snaps_to_char_boundary() {
        let text = "aé b";
        assert_eq!(chunk_end(text, 0, 2, text.len()), 3);
        assert_eq!(chunk_end(text, 0, 100, text.len()), text.len());
        assert_eq!(chunk_end(text, 3, usize::MAX, text.len()), text.len());
    }

    #[test]
    fn test_explicit_theme_is_applied() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        std::fs::write(&path, r##"{"theme": {"syntax": [{"keyword": {"color": "#ff0000"}}]}}"##).unwrap();

        let table = resolve_theme(&RuntimeConfig::default(), Some(&path)).unwrap();
        let keyword = table.resolve(pyedit_lexer::StyleId::Keyword);
        assert_eq!(keyword.color.to_string(), "#ff0000");
    }

    #[test]
    fn test_missing_explicit_theme_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = resolve_theme(&RuntimeConfig::default(), Some(&dir.path().join("none.json")));
        assert!(result.is_err());
    }
}
