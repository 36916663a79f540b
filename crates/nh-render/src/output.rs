//! Writing rendered figures to disk.

use std::path::Path;

use crate::error::Result;

/// Write an SVG string to `path`, creating parent directories as needed.
pub fn save_svg(svg: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, svg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plots/sub/figure.svg");
        save_svg("<svg></svg>", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<svg></svg>");
    }
}
