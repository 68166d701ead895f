//! CLI entry point for `emlmetrics`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};

use emlmetrics::config::{AttachmentMode, Config, DirectoryFilter, OutputFormat, SizeMode};
use emlmetrics::{export, EmailAnalyzer};

#[derive(Parser)]
#[command(
    name = "emlmetrics",
    version,
    about = "Report subject, sender, size and attachment metadata for .eml files"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// .eml file or directory of .eml files to analyze
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    #[command(flatten)]
    analyze: AnalyzeArgs,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a .eml file or a directory of them
    Analyze {
        path: PathBuf,
        #[command(flatten)]
        args: AnalyzeArgs,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

/// Flags that override the `[analysis]` and `[output]` config sections.
#[derive(Args, Clone, Default)]
struct AnalyzeArgs {
    /// Output format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Source of "Total Message Size"
    #[arg(long, value_enum)]
    size_mode: Option<SizeMode>,

    /// Classify every attachment, not just the first
    #[arg(long)]
    all_attachments: bool,

    /// Read every directory entry, not only *.eml files
    #[arg(long)]
    all_entries: bool,

    /// Text encoding of the message files (e.g. utf-8, latin1)
    #[arg(long, value_name = "LABEL")]
    encoding: Option<String>,
}

impl AnalyzeArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(mode) = self.size_mode {
            config.analysis.size_mode = mode;
        }
        if self.all_attachments {
            config.analysis.attachment_mode = AttachmentMode::All;
        }
        if self.all_entries {
            config.analysis.directory_filter = DirectoryFilter::AllEntries;
        }
        if let Some(ref encoding) = self.encoding {
            config.analysis.encoding = encoding.clone();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = emlmetrics::config::load_config();

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Some(Commands::Analyze { path, args }) => cmd_analyze(&path, &args, config),
        Some(Commands::Completions { shell }) => cmd_completions(shell),
        Some(Commands::Manpage) => cmd_manpage(),
        None => match cli.path {
            Some(path) => cmd_analyze(&path, &cli.analyze, config),
            None => {
                Cli::command().print_help()?;
                Ok(())
            }
        },
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    if let Some(file_appender) = emlmetrics::logging::file_appender(config) {
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
        tracing::debug!(
            log_file = %emlmetrics::config::log_file_path(config).display(),
            "File logging enabled"
        );
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Run the analysis pipeline and print or write the report.
fn cmd_analyze(path: &Path, args: &AnalyzeArgs, mut config: Config) -> anyhow::Result<()> {
    args.apply(&mut config);

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Analyzing [{bar:40.cyan/blue}] {pos}/{len} messages")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let analyzer = EmailAnalyzer::new(config.analysis.clone());
    let collection = analyzer.analyze_with_progress(
        path,
        Some(&|current, total| {
            pb.set_length(total as u64);
            pb.set_position(current as u64);
        }),
    )?;
    pb.finish_and_clear();

    tracing::info!(
        messages = collection.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Finished"
    );

    match &args.output {
        Some(output) => export::export_to_file(
            &collection,
            config.output.format,
            config.output.csv_separator,
            output,
        ),
        None => {
            let rendered =
                export::render(&collection, config.output.format, config.output.csv_separator)?;
            print!("{rendered}");
            if !rendered.ends_with('\n') {
                println!();
            }
            Ok(())
        }
    }
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "emlmetrics", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}
