// sheetgraph CLI - cross-sheet formula dependency analysis

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use sheetgraph_cli::exit_codes::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};
use sheetgraph_cli::settings::Settings;
use sheetgraph_cli::{analyze, existing, prompt};

#[derive(Parser)]
#[command(name = "sheetgraph")]
#[command(about = "Find formula dependencies between the sheets of an Excel workbook")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a workbook, persist the dependency tables, draw the graph
    #[command(after_help = "\
Examples:
  sheetgraph analyze --defaults
  sheetgraph analyze --input data/input/budget.xlsx --rows 20 --layout spring
  sheetgraph analyze --input plan.xlsx --out-dir reports --per-formula --no-view
  sheetgraph analyze            (interactive prompts)")]
    Analyze {
        /// Workbook to analyze (omit all flags to be prompted)
        #[arg(long)]
        input: Option<PathBuf>,

        /// How many rows down to expect formulas
        #[arg(long)]
        rows: Option<usize>,

        /// Formula-table width (702 columns = going out to ZZ)
        #[arg(long)]
        cols: Option<usize>,

        /// Graph layout: spring, circular, shell, planar, or kamada_kawai
        #[arg(long)]
        layout: Option<String>,

        /// Directory for the CSV tables and the rendered graph
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Skip the prompts and use the built-in defaults
        #[arg(long)]
        defaults: bool,

        /// Also draw the per-formula dependency graph
        #[arg(long)]
        per_formula: bool,

        /// Also write the graph in Graphviz DOT form
        #[arg(long)]
        dot: bool,

        /// Do not open the rendered graph in the system viewer
        #[arg(long)]
        no_view: bool,
    },

    /// Draw the graph from a dependency table written by a previous run
    Render {
        /// Dependency table (CSV) from a previous analyze run
        table: PathBuf,

        /// Graph layout: spring, circular, shell, planar, or kamada_kawai
        #[arg(long, default_value = "circular")]
        layout: String,

        /// Output SVG path (defaults next to the table)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also write the graph in Graphviz DOT form
        #[arg(long)]
        dot: bool,

        /// Do not open the rendered graph in the system viewer
        #[arg(long)]
        no_view: bool,
    },
}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\ntarget:  ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Default to INFO so the pipeline's progress reporting is visible;
    // RUST_LOG still takes precedence
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(RunError::Usage(message)) => {
            eprintln!("error: {}", message);
            ExitCode::from(EXIT_USAGE)
        }
        Err(RunError::Pipeline(message)) => {
            eprintln!("error: {}", message);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

enum RunError {
    Usage(String),
    Pipeline(String),
}

fn run(command: Commands) -> Result<(), RunError> {
    match command {
        Commands::Analyze {
            input,
            rows,
            cols,
            layout,
            out_dir,
            defaults,
            per_formula,
            dot,
            no_view,
        } => {
            let settings = resolve_settings(input, rows, cols, layout, out_dir, defaults)?;
            let opts = analyze::Options {
                per_formula,
                dot,
                no_view,
            };
            analyze::run(&settings, &opts).map_err(RunError::Pipeline)
        }
        Commands::Render {
            table,
            layout,
            out,
            dot,
            no_view,
        } => {
            let opts = existing::Options { dot, no_view };
            existing::run(&table, &layout, out, &opts).map_err(RunError::Pipeline)
        }
    }
}

/// DEFAULT vs CUSTOM, chosen once at startup: `--defaults` or any flag
/// skips the prompts; a bare `analyze` walks the interactive flow.
fn resolve_settings(
    input: Option<PathBuf>,
    rows: Option<usize>,
    cols: Option<usize>,
    layout: Option<String>,
    out_dir: Option<PathBuf>,
    defaults: bool,
) -> Result<Settings, RunError> {
    let mut settings = Settings::load_or_default();

    let any_flag = input.is_some()
        || rows.is_some()
        || cols.is_some()
        || layout.is_some()
        || out_dir.is_some();

    if !defaults && !any_flag {
        return prompt::resolve(settings).map_err(RunError::Usage);
    }

    if let Some(input) = input {
        settings.input = input;
        // A custom workbook gets prefix-derived output names, like the
        // interactive CUSTOM path
        let dir = out_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("data/output"));
        settings.derive_outputs(&dir);
    } else if let Some(dir) = &out_dir {
        settings.set_out_dir(dir);
    }
    if let Some(rows) = rows {
        settings.rows = rows;
    }
    if let Some(cols) = cols {
        settings.cols = cols;
    }
    if let Some(layout) = layout {
        settings.layout = layout;
    }
    Ok(settings)
}
