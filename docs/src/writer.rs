//! Writes the generated document and its companion stylesheet.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::DocsError;

/// Writes `content` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`DocsError::Io`] if the directory cannot be created or the file
/// cannot be written.
pub fn write_file(path: &Path, content: &str) -> Result<(), DocsError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| DocsError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, content).map_err(|source| DocsError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the stylesheet next to the HTML file at `html_path` and returns
/// its path.
///
/// # Errors
///
/// Returns [`DocsError::Io`] if the file cannot be written.
pub fn write_stylesheet(
    html_path: &Path,
    name: &str,
    content: &str,
) -> Result<PathBuf, DocsError> {
    let path = html_path
        .parent()
        .map(|dir| dir.join(name))
        .unwrap_or_else(|| PathBuf::from(name));
    write_file(&path, content)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("supermodel-docs-{}-{name}", std::process::id()))
    }

    #[test]
    fn creates_parent_directories() {
        let dir = scratch("nested");
        let path = dir.join("a/b/out.html");
        write_file(&path, "<p>hi</p>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>hi</p>");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn stylesheet_lands_beside_html() {
        let dir = scratch("css");
        let html = dir.join("doc.html");
        let css = write_stylesheet(&html, "style.css", "body {}").unwrap();
        assert_eq!(css, dir.join("style.css"));
        assert!(css.exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
