//! Output artifacts.
pub mod cpp;
pub mod creator;

use std::fs;
use std::io;
use std::path::Path;

/// Create `dir` if it is missing. Parents are not created.
pub fn prepare_output_dir(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        fs::create_dir(dir)?;
    }
    Ok(())
}
