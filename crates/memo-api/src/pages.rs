//! HTML pages served by the front-end routes.
//!
//! Pages are read from disk once at startup and handed to the router through
//! [`crate::AppState`]; a missing page stops the server before it binds.

use std::path::Path;

use tracing::{error, info};

use memo_core::Result;

/// File name of the note listing page.
pub const DISPLAY_PAGE: &str = "display.html";
/// File name of the note creation form.
pub const ADD_NEW_MEMO_PAGE: &str = "add_new_memo.html";

/// Loaded page bodies.
#[derive(Debug, Clone)]
pub struct Pages {
    pub display: String,
    pub add_new_memo: String,
}

impl Pages {
    /// Load every page from `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let pages = Self {
            display: read_page(dir, DISPLAY_PAGE)?,
            add_new_memo: read_page(dir, ADD_NEW_MEMO_PAGE)?,
        };
        info!(
            subsystem = "api",
            component = "pages",
            op = "load",
            dir = %dir.display(),
            "Pages loaded"
        );
        Ok(pages)
    }
}

fn read_page(dir: &Path, name: &str) -> Result<String> {
    let path = dir.join(name);
    let body = std::fs::read_to_string(&path).inspect_err(|e| {
        error!(
            subsystem = "api",
            component = "pages",
            path = %path.display(),
            error = %e,
            "Failed to read page"
        );
    })?;
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use memo_core::Error;

    #[test]
    fn test_load_reads_both_pages() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DISPLAY_PAGE), "<h1>notes</h1>").unwrap();
        std::fs::write(dir.path().join(ADD_NEW_MEMO_PAGE), "<form></form>").unwrap();

        let pages = Pages::load(dir.path()).unwrap();
        assert_eq!(pages.display, "<h1>notes</h1>");
        assert_eq!(pages.add_new_memo, "<form></form>");
    }

    #[test]
    fn test_missing_page_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DISPLAY_PAGE), "<h1>notes</h1>").unwrap();

        match Pages::load(dir.path()) {
            Err(Error::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_shipped_pages_load() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../pages");
        let pages = Pages::load(&dir).unwrap();
        assert!(pages.add_new_memo.contains("muistiinpano"));
        assert!(pages.display.contains("/api/notes"));
    }
}
