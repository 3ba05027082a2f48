//! Basescape - Development Tools

use std::path::{Path, PathBuf};

use basescape_core::base::Base;
use basescape_tools::error::{Result, ToolError};
use basescape_tools::loader::{load_base, load_config, load_data_directory, load_ruleset};
use basescape_tools::probe::{probe, to_json, ProbeRequest};
use basescape_tools::render::{render_all, RenderOptions};
use basescape_tools::validate::validate_data_directory;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "basescape-tools")]
#[command(about = "Development tools for the base layout grid engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate data files
    Validate {
        /// Path to data directory
        #[arg(default_value = "assets/data")]
        path: PathBuf,
    },
    /// Render every base of a data directory to PNG
    Render {
        /// Path to data directory
        #[arg(default_value = "assets/data")]
        path: PathBuf,
        /// Output directory
        #[arg(short, long, default_value = "renders")]
        output: PathBuf,
        /// Selection overlay size to draw (0 = none)
        #[arg(long, default_value_t = 0)]
        select: u32,
        /// Overlay cell as X,Y
        #[arg(long, value_parser = parse_cell)]
        hover: Option<(u32, u32)>,
        /// Worker threads (0 = rayon default)
        #[arg(short, long, default_value_t = 0)]
        jobs: usize,
    },
    /// Report what a pointer position selects, as JSON
    Probe {
        /// Base file
        base: PathBuf,
        /// Ruleset file
        #[arg(long, default_value = "assets/data/ruleset.ron")]
        ruleset: PathBuf,
        /// View configuration file (defaults when missing)
        #[arg(long, default_value = "assets/data/view.ron")]
        config: PathBuf,
        /// Pointer X in physical pixels
        #[arg(allow_hyphen_values = true)]
        x: i32,
        /// Pointer Y in physical pixels
        #[arg(allow_hyphen_values = true)]
        y: i32,
        /// View origin as X,Y in logical pixels
        #[arg(long, value_parser = parse_origin, default_value = "0,0")]
        origin: (i32, i32),
        /// Display scale
        #[arg(long, default_value_t = 1.0)]
        scale: f64,
        /// Footprint sizes to test
        #[arg(long, value_delimiter = ',', default_value = "1,2,3")]
        sizes: Vec<u32>,
    },
}

fn parse_pair<T: std::str::FromStr>(text: &str) -> std::result::Result<(T, T), String> {
    let (x, y) = text
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{text}'"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<T>()
            .map_err(|_| format!("invalid coordinate '{part}'"))
    };
    Ok((parse(x)?, parse(y)?))
}

fn parse_cell(text: &str) -> std::result::Result<(u32, u32), String> {
    parse_pair(text)
}

fn parse_origin(text: &str) -> std::result::Result<(i32, i32), String> {
    parse_pair(text)
}

fn run_validate(path: &Path) -> Result<()> {
    tracing::info!("Validating data files in: {}", path.display());
    let report = validate_data_directory(path)?;
    if report.is_ok() {
        tracing::info!(
            "Validation passed ({} bases, {} warnings)",
            report.bases_checked,
            report.warning_count()
        );
        Ok(())
    } else {
        Err(ToolError::ValidationFailed(report.error_count()))
    }
}

fn run_render(path: &Path, output: &Path, options: RenderOptions) -> Result<()> {
    let data = load_data_directory(path)?;
    let outcomes = render_all(&data, output, options);
    let failed = outcomes.iter().filter(|o| o.error.is_some()).count();
    for outcome in outcomes.iter().filter_map(|o| o.output.as_ref()) {
        tracing::info!("Wrote {}", outcome.display());
    }
    if failed > 0 {
        return Err(ToolError::RenderFailed(failed));
    }
    Ok(())
}

fn run_probe(base: &Path, ruleset: &Path, config: &Path, request: &ProbeRequest) -> Result<()> {
    let ruleset = load_ruleset(ruleset)?;
    let config = load_config(config)?;
    let file = load_base(base)?;
    let base = Base::from_data(&file.data, &ruleset)?;
    let report = probe(base, &config, request)?;
    println!("{}", to_json(&report)?);
    Ok(())
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { path } => run_validate(&path),
        Commands::Render {
            path,
            output,
            select,
            hover,
            jobs,
        } => run_render(
            &path,
            &output,
            RenderOptions {
                select,
                hover,
                jobs,
            },
        ),
        Commands::Probe {
            base,
            ruleset,
            config,
            x,
            y,
            origin,
            scale,
            sizes,
        } => run_probe(
            &base,
            &ruleset,
            &config,
            &ProbeRequest {
                origin,
                pointer: (x, y),
                scale,
                sizes,
            },
        ),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
