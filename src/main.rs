use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use anyhow::Context;
use clap::Parser;
use convaneo::{compile, render_error, CompileOptions, TARGET_EXTENSION};
use tracing::{debug, info};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer, Registry};

#[derive(Parser, Debug)]
#[command(name = "convaneo")]
#[command(version)]
#[command(about = "Compiles Convaneo source files to JavaScript", long_about = None)]
struct Args {
    /// Source file to compile
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Skip constant folding and other optimizations
    #[arg(long)]
    no_optimize: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn init_logger(verbose: bool) {
    let filter = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };

    let layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_target(false)
        .with_level(true)
        .with_ansi(false)
        .compact()
        .with_filter(filter);

    Registry::default().with(layer).init();
}

/// `prog.con` compiles to `prog.con.js`.
fn output_path(file: &Path) -> PathBuf {
    let mut output = file.as_os_str().to_owned();
    output.push(".");
    output.push(TARGET_EXTENSION);
    PathBuf::from(output)
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_logger(args.verbose);

    let start = Instant::now();

    let source = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.display().to_string());

    let options = CompileOptions {
        optimize: !args.no_optimize,
        file_name,
    };
    debug!("Compiling {} with {:?}", args.file.display(), options);

    let output = match compile(&source, &options) {
        Ok(output) => output,
        Err(error) => {
            eprintln!("{}", render_error(&error, &source));
            return Ok(ExitCode::FAILURE);
        }
    };

    let output_path = output_path(&args.file);
    fs::write(&output_path, output)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    info!("Wrote {} in {:?}", output_path.display(), start.elapsed());

    Ok(ExitCode::SUCCESS)
}
