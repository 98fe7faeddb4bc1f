//! Emit the companion creator program, text as prepared by the config.

use crate::model::BuildConfig;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn file_name(config: &BuildConfig) -> String {
    format!("autonomous-creator.{}", config.extension.as_str())
}

pub fn emit(config: &BuildConfig, out_dir: &Path) -> io::Result<PathBuf> {
    let path = out_dir.join(file_name(config));
    fs::write(&path, &config.creator_code)?;
    Ok(path)
}
