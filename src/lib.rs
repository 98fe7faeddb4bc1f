pub mod cli;
pub mod error;
pub mod literal;
pub mod model;
pub mod parser;
pub mod processor;
pub mod writer;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::info;

use crate::cli::Command;
use crate::model::BuildConfig;
use crate::processor::GeneratedProgram;

pub fn run() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // 1. ── Load config ────────────────────────────────────────────────
    let config = load_config(&args.config, |project| args.apply(project))?;

    // 2. ── Translate & write ──────────────────────────────────────────
    match args.command.unwrap_or_default() {
        Command::Build => {
            let path = build_autonomous(&config)?;
            println!("Successfully built autonomous program to {}", path.display());
        }
        Command::Creator => {
            let path = build_creator(&config)?;
            println!("Successfully built compiler program to {}", path.display());
        }
        Command::All => {
            let (program, creator) = build_all(&config)?;
            println!("Successfully built autonomous program to {}", program.display());
            println!("Successfully built compiler program to {}", creator.display());
        }
    }

    Ok(())
}

/// Read and resolve a config file, letting the caller adjust the raw
/// project (command-line overrides) before it is frozen.
pub fn load_config(
    path: &Path,
    adjust: impl FnOnce(&mut model::ProjectConfig),
) -> anyhow::Result<BuildConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Reading {}", path.display()))?;
    let mut project = parser::load_project(&json)
        .with_context(|| format!("Parsing config {}", path.display()))?;
    adjust(&mut project);
    parser::build_config(project).with_context(|| "Resolving build configuration")
}

/// Read the configured action list and translate it. Writes nothing.
pub fn generate(config: &BuildConfig) -> anyhow::Result<GeneratedProgram> {
    let input = &config.input_file;
    let src = std::fs::read_to_string(input)
        .with_context(|| format!("Reading {}", input.display()))?;
    let list = parser::load_actions(&src)
        .with_context(|| format!("Parsing action list {}", input.display()))?;

    processor::run(config, &list.code, processor::template::AUTONOMOUS_TEMPLATE)
        .with_context(|| format!("Translating {}", input.display()))
}

pub fn build_autonomous(config: &BuildConfig) -> anyhow::Result<PathBuf> {
    let program = generate(config)?;
    write_autonomous(config, &program)
}

pub fn build_creator(config: &BuildConfig) -> anyhow::Result<PathBuf> {
    prepare_output(config)?;
    let path = writer::creator::emit(config, &config.output_dir)
        .with_context(|| "Writing creator program")?;
    info!(path = %path.display(), "creator program written");
    Ok(path)
}

/// Translate first, then write both artifacts; a translation error leaves
/// the output directory untouched.
pub fn build_all(config: &BuildConfig) -> anyhow::Result<(PathBuf, PathBuf)> {
    let program = generate(config)?;
    let autonomous = write_autonomous(config, &program)?;
    let creator = build_creator(config)?;
    Ok((autonomous, creator))
}

fn write_autonomous(config: &BuildConfig, program: &GeneratedProgram) -> anyhow::Result<PathBuf> {
    prepare_output(config)?;
    let path = writer::cpp::emit(program, &config.output_dir)
        .with_context(|| "Writing autonomous program")?;
    info!(path = %path.display(), bytes = program.source.len(), "autonomous program written");
    Ok(path)
}

fn prepare_output(config: &BuildConfig) -> anyhow::Result<()> {
    writer::prepare_output_dir(&config.output_dir)
        .with_context(|| format!("Creating {}", config.output_dir.display()))
}
