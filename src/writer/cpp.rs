//! Emit the assembled autonomous program.

use crate::processor::GeneratedProgram;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const OUTPUT_NAME: &str = "autonomous-creator-output.cpp";

pub fn emit(program: &GeneratedProgram, out_dir: &Path) -> io::Result<PathBuf> {
    let path = out_dir.join(OUTPUT_NAME);
    fs::write(&path, &program.source)?;
    Ok(path)
}
