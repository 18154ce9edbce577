use std::fs;
use std::path::{Path, PathBuf};

/// Write text to `path`, creating parent directories as needed.
pub fn write_text(path: &str, contents: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let target = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&target, contents)
        .map_err(|e| format!("Failed to write '{}': {}", target.display(), e))?;
    Ok(target)
}
