use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::model::ProjectConfig;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Project config (.json) with ports, output dir and action list path
    #[arg(short, long, default_value = "data/config.json")]
    pub config: PathBuf,
    /// Output directory, overrides `output_dir`
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Action list, overrides `input_file`
    #[arg(short, long)]
    pub input: Option<PathBuf>,
    /// Companion program dialect (`py` or `cpp`), overrides `extension`
    #[arg(short, long)]
    pub ext: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Translate the action list into the autonomous C++ program
    Build,
    /// Write the companion creator program
    Creator,
    /// Both of the above
    #[default]
    All,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, project: &mut ProjectConfig) {
        if let Some(output) = &self.output {
            project.output_dir = output.clone();
        }
        if let Some(input) = &self.input {
            project.input_file = input.clone();
        }
        if let Some(ext) = &self.ext {
            project.extension = ext.clone();
        }
    }
}
