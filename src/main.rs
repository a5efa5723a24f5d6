use anyhow::Context;
use clap::Parser;
use is_terminal::IsTerminal;
use litediff::artifacts::core::PagerWriter;
use litediff::artifacts::results::status_filter::StatusFilter;
use litediff::commands::report::{OutputFormat, Reporter};
use litediff::{CompareOptions, Comparison, DiffMode};
use minus::{Pager, page_all};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

const LOG_ENV: &str = "LITEDIFF_LOG";
const EXIT_UNEXPECTED: u8 = 1;
const EXIT_CLIENT_ERROR: u8 = 2;

#[derive(Parser)]
#[command(
    name = "litediff",
    version,
    about = "Compare two files or two directories",
    long_about = "Compares two files, or every file of two directory trees, and prints \
    the differences as unified diffs or side-by-side HTML tables.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(long, help = "The left file or directory")]
    path1: Option<PathBuf>,
    #[arg(long, help = "The right file or directory")]
    path2: Option<PathBuf>,
    #[arg(long, value_enum, default_value = "unified", help = "How each difference is rendered")]
    mode: DiffMode,
    #[arg(long, help = "Also report files that exist on one side only")]
    include_unique: bool,
    #[arg(long, value_enum, default_value = "text", help = "How results are printed")]
    format: OutputFormat,
    #[arg(
        long,
        help = "Only print results with these statuses: (M)odified, only (L)eft, only (R)ight, (E)rror"
    )]
    filter: Option<String>,
    #[arg(long, help = "Skip paths matching this glob, relative to each root (repeatable)")]
    exclude: Vec<String>,
    #[arg(long, default_value_t = litediff::artifacts::core::options::DEFAULT_CONTEXT_LINES, help = "Unchanged lines around each change")]
    context: usize,
    #[arg(long, default_value_t = litediff::artifacts::core::options::WRAP_COLUMN, help = "Wrap side-by-side cells after this many characters")]
    wrap_column: usize,
    #[arg(long, help = "Compare lines without leading and trailing whitespace")]
    ignore_trim_whitespace: bool,
    #[arg(long, help = "Compare files by size only")]
    ignore_contents: bool,
    #[arg(long, value_name = "BYTES", default_value_t = litediff::artifacts::core::options::MAX_FILE_SIZE, help = "Compare larger files by size only")]
    max_file_size: u64,
    #[arg(long, help = "Print directly instead of through the pager")]
    no_pager: bool,
}

/// Everything a run needs, resolved from the command line.
#[derive(Debug)]
struct LaunchConfig {
    left: PathBuf,
    right: PathBuf,
    mode: DiffMode,
    include_unique: bool,
    format: OutputFormat,
    filter: StatusFilter,
    options: CompareOptions,
    paging: bool,
}

impl TryFrom<Cli> for LaunchConfig {
    type Error = anyhow::Error;

    fn try_from(cli: Cli) -> anyhow::Result<Self> {
        let filter = match cli.filter.as_deref() {
            Some(letters) => StatusFilter::try_parse(letters)
                .with_context(|| format!("invalid status filter '{letters}'"))?,
            None => StatusFilter::default(),
        };

        let mut options = CompareOptions::default().with_exclude_patterns(&cli.exclude)?;
        options.context = cli.context;
        options.wrap_column = cli.wrap_column.max(1);
        options.ignore_trim_whitespace = cli.ignore_trim_whitespace;
        options.ignore_contents = cli.ignore_contents;
        options.max_file_size = cli.max_file_size;

        let paging = !cli.no_pager
            && cli.format == OutputFormat::Text
            && std::io::stdout().is_terminal();

        Ok(LaunchConfig {
            // a missing path is rejected by the dispatcher like an empty one
            left: cli.path1.unwrap_or_default(),
            right: cli.path2.unwrap_or_default(),
            mode: cli.mode,
            include_unique: cli.include_unique,
            format: cli.format,
            filter,
            options,
            paging,
        })
    }
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Err(e) = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
    {
        eprintln!("warning: logging is disabled: {e}");
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let config = match LaunchConfig::try_from(Cli::parse()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e:#}");
            return ExitCode::from(EXIT_CLIENT_ERROR);
        }
    };
    debug!(?config, "launching");

    match run(config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_UNEXPECTED)
        }
    }
}

async fn run(config: LaunchConfig) -> anyhow::Result<ExitCode> {
    let colour = config.format == OutputFormat::Text && std::io::stdout().is_terminal();
    colored::control::set_override(colour);

    let comparison = Comparison::new(config.options);
    let outcome = comparison
        .dispatch_concurrent(&config.left, &config.right, config.mode, config.include_unique)
        .await;

    let results = match outcome {
        Ok(results) => results,
        Err(error) => {
            let code = if error.is_client_error() {
                EXIT_CLIENT_ERROR
            } else {
                EXIT_UNEXPECTED
            };
            if config.format == OutputFormat::Json {
                Reporter::new(&mut std::io::stdout(), config.format, config.filter)
                    .write_error(&error)?;
            } else {
                Reporter::new(&mut std::io::stderr(), config.format, config.filter)
                    .write_error(&error)?;
            }
            return Ok(ExitCode::from(code));
        }
    };

    if config.paging {
        let pager = Pager::new();
        let mut writer = PagerWriter::new(pager.clone());
        Reporter::new(&mut writer, config.format, config.filter).write_results(&results)?;
        page_all(pager).context("failed to run the pager")?;
    } else {
        let mut stdout = std::io::stdout().lock();
        Reporter::new(&mut stdout, config.format, config.filter).write_results(&results)?;
    }

    Ok(ExitCode::SUCCESS)
}
