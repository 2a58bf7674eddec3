use anyhow::{bail, Context, Result};
use cairn_parser::Parser as SourceParser;
use cairn_runtime::{EvalConfig, Evaluator};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cairn")]
#[command(about = "Evaluate expressions with the cairn rewriting kernel")]
#[command(version)]
struct Cli {
    /// Expression source to evaluate
    #[arg(long, conflicts_with = "file")]
    eval: Option<String>,
    /// File of `;`-separated expressions
    #[arg(long)]
    file: Option<PathBuf>,
    /// TOML evaluator configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Maximum fixed-point steps per top-level expression
    #[arg(long)]
    step_limit: Option<usize>,
    /// Print recorded evaluation steps to stderr
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let src = match (&cli.eval, &cli.file) {
        (Some(src), _) => src.clone(),
        (None, Some(path)) => fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
        (None, None) => bail!("no input provided; use --eval or --file"),
    };
    let mut ev = Evaluator::with_config(config);
    for line in run_src(&mut ev, &src)? {
        println!("{}", line);
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<EvalConfig> {
    let mut config = match &cli.config {
        Some(path) => EvalConfig::load(path).with_context(|| format!("loading config {}", path.display()))?,
        None => {
            let mut c = EvalConfig::default();
            c.apply_env_overrides();
            c
        }
    };
    if let Some(n) = cli.step_limit {
        config.step_limit = Some(n);
    }
    config.trace |= cli.trace;
    config.validate()?;
    debug!(?config, "evaluator configured");
    Ok(config)
}

/// Evaluates every statement of `src` in order and renders each result.
fn run_src(ev: &mut Evaluator, src: &str) -> Result<Vec<String>> {
    let exprs = SourceParser::from_source(src).parse_all()?;
    let mut out = Vec::with_capacity(exprs.len());
    for e in exprs {
        let v = ev.try_eval(e)?;
        for step in ev.take_trace() {
            eprintln!("  {:?}", step);
        }
        out.push(ev.format(&v));
    }
    Ok(out)
}
