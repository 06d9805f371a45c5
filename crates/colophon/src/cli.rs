//! The `colophon` command line.
//!
//! Every subcommand produces its whole output as a string, so [`execute`]
//! can be driven from tests without capturing stdout.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colophon_diagnostics::{ComponentInfo, EnvironmentSnapshot, HostProbe, ProcessHost};
use colophon_markup::{split_names, CreditsFormatter, MarkupParser, RenderMode, Renderer};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::about::{AboutFacts, AboutPage};
use crate::config::{read_yaml_file, Config};

/// Render about screens, developer credits and installation-details reports.
#[derive(Debug, Parser)]
#[command(name = "colophon", version)]
pub struct Cli {
    /// Raise the log level (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse link markup and print it
    Render(RenderArgs),

    /// Print developer credits
    Credits(CreditsArgs),

    /// Print the assembled about page
    About(AboutArgs),

    /// Print the installation-details report
    Report(ReportArgs),
}

/// Output format shared by all subcommands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Styled when the terminal supports it
    #[default]
    Auto,
    Term,
    Plain,
    Json,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Auto)]
    pub format: Format,

    /// Make links clickable in terminals that support OSC 8
    #[arg(long)]
    pub hyperlinks: bool,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Markup file (reads stdin when omitted)
    pub file: Option<PathBuf>,

    /// Do not bold the first line
    #[arg(long)]
    pub no_bold: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct CreditsArgs {
    /// Comma-separated developer names (overrides the config)
    #[arg(long)]
    pub names: Option<String>,

    /// Configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct AboutArgs {
    /// Configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Version shown in the about text
    #[arg(long, value_name = "VERSION")]
    pub app_version: Option<String>,

    /// Build time, e.g. 2024-03-14T12:00:00
    #[arg(long, value_name = "TIME")]
    pub build_time: Option<NaiveDateTime>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct ReportArgs {
    /// YAML or JSON snapshot to report on (probes this process when omitted)
    #[arg(long, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// YAML or JSON list of components for a live report
    #[arg(long, value_name = "FILE", conflicts_with = "snapshot")]
    pub components: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl OutputArgs {
    fn renderer(&self) -> Renderer {
        let mode = match self.format {
            Format::Term => RenderMode::Term,
            Format::Plain | Format::Json => RenderMode::Plain,
            Format::Auto => RenderMode::Auto,
        };
        Renderer::new(mode).hyperlinks(self.hyperlinks)
    }

    fn is_json(&self) -> bool {
        self.format == Format::Json
    }
}

/// Runs the parsed command and returns what it prints.
pub fn execute(cli: &Cli) -> Result<String> {
    match &cli.command {
        Command::Render(args) => render(args),
        Command::Credits(args) => credits(args),
        Command::About(args) => about(args),
        Command::Report(args) => report(args),
    }
}

fn render(args: &RenderArgs) -> Result<String> {
    let markup = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read markup from stdin")?;
            buf
        }
    };

    let doc = MarkupParser::new()
        .bold_first_line(!args.no_bold)
        .parse(&markup);
    tracing::info!(styles = doc.styles.len(), "parsed markup");

    if args.output.is_json() {
        return to_json(&doc);
    }
    Ok(args.output.renderer().render(&doc))
}

fn credits(args: &CreditsArgs) -> Result<String> {
    let config = load_config(args.config.as_deref())?;
    let names = match &args.names {
        Some(list) => split_names(list),
        None => config.developers.names(),
    };

    let markup = CreditsFormatter::new(config.credits).format(&names);
    let doc = MarkupParser::new().bold_first_line(false).parse(&markup);

    if args.output.is_json() {
        return to_json(&doc);
    }
    Ok(args.output.renderer().render(&doc))
}

fn about(args: &AboutArgs) -> Result<String> {
    let config = load_config(args.config.as_deref())?;
    let mut facts = AboutFacts::current(config.name.clone());
    if let Some(version) = &args.app_version {
        facts.version = version.clone();
    }
    if let Some(build_time) = args.build_time {
        facts.build_time = build_time;
    }

    let page = AboutPage::assemble(&config, &facts)?;
    if args.output.is_json() {
        return to_json(&page);
    }
    Ok(page.render(&args.output.renderer()))
}

fn report(args: &ReportArgs) -> Result<String> {
    let snapshot: EnvironmentSnapshot = match &args.snapshot {
        Some(path) => read_yaml_file(path)?,
        None => {
            let components: Vec<ComponentInfo> = match &args.components {
                Some(path) => read_yaml_file(path)?,
                None => Vec::new(),
            };
            ProcessHost::new().with_components(components).snapshot()
        }
    };
    tracing::info!(
        properties = snapshot.properties.len(),
        components = snapshot.components.len(),
        "building report"
    );

    let text = snapshot.report();
    if args.output.is_json() {
        return to_json(&ReportOutput {
            generated_at: snapshot.generated_at,
            report: &text,
        });
    }
    Ok(text)
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    generated_at: NaiveDateTime,
    report: &'a str,
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Ok(Config::from_file(path)?),
        None => Ok(Config::default()),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    json.push('\n');
    Ok(json)
}

/// Installs the stderr log subscriber.
///
/// `verbose` raises the default level from `warn`; `RUST_LOG` wins when set.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Entry point for the `colophon` binary.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    tracing::debug!(started_at = %Local::now().naive_local(), "colophon starting");

    let output = execute(&cli)?;
    print!("{}", output);
    Ok(())
}
