use crate::{
    config::Config,
    engine::Extractor,
    pipeline::Pipeline,
    registry::Registry,
    source,
    util::ensure_dir,
};
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "soil-extract")]
#[command(about = "Extract soil test parameters from pre-extracted report text and tables")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./soil-extract.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the active parameter catalogue.
    Registry {},
    /// Extract parameters from one or more documents (.json or .txt).
    Extract {
        #[arg(long, required = true)]
        input: Vec<PathBuf>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Print the normalized text the pattern matcher sees.
    Normalize {
        #[arg(long)]
        input: PathBuf,
    },
}

pub fn dispatch(args: Args) -> Result<()> {
    let cfg = match resolve_config_path(args.config.as_deref()) {
        Some(p) => Config::load(&p)?,
        None => Config::default(),
    };
    let _guard = init_logging(&args, &cfg)?;

    let registry = Arc::new(
        Registry::from_config(&cfg.parameters).with_context(|| "loading parameter catalogue")?,
    );
    let extractor = Extractor::new(&cfg.extraction, registry)?;

    match &args.cmd {
        Command::Registry {} => {
            println!(
                "{}",
                serde_json::to_string_pretty(extractor.registry().definitions())?
            );
            Ok(())
        }
        Command::Extract { input, out_dir } => extract(&cfg, extractor, input, out_dir.as_deref()),
        Command::Normalize { input } => {
            let loaded = source::load_document(&cfg, input)?;
            println!("{}", extractor.normalize(&loaded.input.text));
            Ok(())
        }
    }
}

fn resolve_config_path(user: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = user {
        return Some(p.to_path_buf());
    }
    ["soil-extract.toml", "soil-extract.example.toml"]
        .into_iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

fn init_logging(args: &Args, cfg: &Config) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = if args.log_level.is_some() {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };

    // Logs go to stderr so stdout stays machine-readable JSON.
    let stderr_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if cfg.logging.write_to_file && !cfg.logging.file_path.is_empty() {
        let path = Path::new(&cfg.logging.file_path);
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn extract(
    cfg: &Config,
    extractor: Extractor,
    inputs: &[PathBuf],
    out_dir: Option<&Path>,
) -> Result<()> {
    let pipeline = Pipeline::new(cfg, extractor);
    let batch = pipeline.run_batch(inputs, out_dir)?;

    if cfg.output.print_summary {
        for summary in &batch.summaries {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
    }

    if batch.failed > 0 {
        bail!("{} of {} documents failed", batch.failed, inputs.len());
    }
    Ok(())
}
