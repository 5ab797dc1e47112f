mod exit_code;
mod progress;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use colored::Colorize;
use exit_code::ExitCode;
use graphql_field_finder::{render, FieldFinder, FinderOptions, OutputFormat};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "graphql-field-finder")]
#[command(
    about = "List the GraphQL queries in a TypeScript/JavaScript codebase that select a schema field",
    long_about = None
)]
#[command(override_usage = "graphql-field-finder [OPTIONS] <REPO> <PROJECT> <Type.field>\n       \
                            graphql-field-finder [OPTIONS] <Type.field>")]
#[command(version)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Repository path, graphql-config project and `Type.field`, or only `Type.field`
    #[arg(value_name = "ARGS")]
    args: Vec<String>,

    /// Path to GraphQL config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "line")]
    format: Format,

    /// Candidate file extensions, comma separated (default: ts,tsx)
    #[arg(short, long, value_name = "LIST", value_delimiter = ',')]
    extensions: Vec<String>,

    /// Write debug logs to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Force colored output even when not a TTY
    #[arg(long, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, conflicts_with = "color")]
    no_color: bool,

    /// Suppress progress indicators (spinners)
    #[arg(long)]
    no_progress: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    /// `path:line operationName`
    Line,
    /// `path#Lline`
    Anchor,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Line => Self::Line,
            Format::Anchor => Self::Anchor,
        }
    }
}

/// The two accepted shapes of positional arguments.
#[derive(Debug, PartialEq, Eq)]
enum Invocation {
    /// `<REPO> <PROJECT> <Type.field>`
    Full {
        repository: PathBuf,
        project: String,
        target: String,
    },
    /// `<Type.field>`, searching the current directory with its default project.
    /// No argument at all still runs so that the missing target is reported
    /// as a validation failure.
    Legacy { target: Option<String> },
}

impl Invocation {
    fn from_args(args: &[String], home: Option<&Path>) -> Result<Self, String> {
        match args {
            [] => Ok(Self::Legacy { target: None }),
            [target] => Ok(Self::Legacy {
                target: Some(target.clone()),
            }),
            [repository, project, target] => Ok(Self::Full {
                repository: expand_home(repository, home),
                project: project.clone(),
                target: target.clone(),
            }),
            [_, _] => Err(
                "expected <REPO> <PROJECT> <Type.field> or a single <Type.field>, got two arguments"
                    .to_string(),
            ),
            _ => Err(format!(
                "expected at most three arguments, got {}",
                args.len()
            )),
        }
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(raw: &str, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return PathBuf::from(raw);
    };
    if raw == "~" {
        return home.to_path_buf();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(raw),
    }
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);
    configure_colors(cli.color, cli.no_color);

    let home = dirs::home_dir();
    let invocation = match Invocation::from_args(&cli.args, home.as_deref()) {
        Ok(invocation) => invocation,
        Err(message) => Cli::command()
            .error(ErrorKind::WrongNumberOfValues, message)
            .exit(),
    };

    match run(&cli, invocation) {
        Ok(()) => ExitCode::Success.exit(),
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            let code = ExitCode::for_error(&err);
            tracing::debug!(exit_code = %code, "Search failed");
            code.exit()
        }
    }
}

fn run(cli: &Cli, invocation: Invocation) -> anyhow::Result<()> {
    let (repository, project, target) = match invocation {
        Invocation::Full {
            repository,
            project,
            target,
        } => (repository, Some(project), Some(target)),
        Invocation::Legacy { target } => (std::env::current_dir()?, None, target),
    };
    tracing::debug!(
        repository = %repository.display(),
        project = ?project,
        target = ?target,
        "Starting search"
    );

    let options = FinderOptions {
        config_path: cli.config.clone(),
        project,
        extensions: cli.extensions.clone(),
    };

    let spinner = (!cli.verbose && !cli.no_progress)
        .then(|| progress::spinner("Searching for field usages..."));
    let result = FieldFinder::from_config(&repository, &options)
        .and_then(|finder| finder.run(target.as_deref()));
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let records = result?;

    // Nothing reaches stdout unless the whole run succeeded
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(render(&records, cli.format.into()).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Initialize tracing on stderr, filtered by `RUST_LOG`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "off" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output based on flags and environment variables.
///
/// Priority order (highest to lowest):
/// 1. `--color` flag (force colors on)
/// 2. `--no-color` flag (force colors off)
/// 3. `NO_COLOR` environment variable (if set to any value, disable colors)
/// 4. `CLICOLOR_FORCE` environment variable (if set to non-zero, force colors)
/// 5. `CLICOLOR` environment variable (if set to "0", disable colors)
/// 6. Default: colors enabled if stderr is a TTY (handled by `colored` crate)
///
/// See: <https://no-color.org/> and <https://bixense.com/clicolors/>
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}
