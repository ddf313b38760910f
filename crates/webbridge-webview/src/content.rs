//! Local content serving via the `webbridge://` custom protocol.
//!
//! The page and its scripts load from the assets directory without a local
//! HTTP server. Requests for paths outside that directory resolve to nothing.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Serves files from a base directory, with optional in-memory overrides.
///
/// `webbridge://localhost/index.html` resolves to `{base_dir}/index.html`.
pub struct ContentProvider {
    base_dir: PathBuf,
    overrides: HashMap<String, (String, Vec<u8>)>, // path -> (mime, data)
}

impl ContentProvider {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Serve `data` at `path` regardless of what is on disk.
    pub fn add_override(
        &mut self,
        path: impl Into<String>,
        mime: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) {
        self.overrides
            .insert(path.into(), (mime.into(), data.into()));
    }

    /// Resolve a request path to MIME type and content bytes.
    pub fn resolve(&self, path: &str) -> Option<(Cow<'_, str>, Cow<'_, [u8]>)> {
        let clean = path.trim_start_matches('/');
        let clean = clean.split(['?', '#']).next().unwrap_or(clean);
        let clean = if clean.is_empty() { "index.html" } else { clean };

        if let Some((mime, data)) = self.overrides.get(clean) {
            return Some((Cow::Borrowed(mime.as_str()), Cow::Borrowed(data.as_slice())));
        }

        let file_path = self.base_dir.join(clean);

        // Canonicalize both sides so `..` and symlinks cannot leave base_dir.
        let canonical_base = std::fs::canonicalize(&self.base_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) || !canonical_file.is_file() {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        let mime = mime_from_extension(&file_path);
        Some((Cow::Borrowed(mime), Cow::Owned(data)))
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }
}

fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("woff2") => "font/woff2",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Path to the assets directory at the workspace root.
    fn assets_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .parent() // crates/
            .unwrap()
            .parent() // workspace root
            .unwrap()
            .join("assets")
    }

    fn temp_assets() -> (tempfile::TempDir, ContentProvider) {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("assets");
        std::fs::create_dir_all(base.join("js")).unwrap();
        std::fs::write(base.join("index.html"), "<html>home</html>").unwrap();
        std::fs::write(base.join("js").join("app.js"), "console.log(1)").unwrap();
        std::fs::write(dir.path().join("private.txt"), "secret").unwrap();
        (dir, ContentProvider::new(base))
    }

    // -----------------------------------------------------------------
    // Bundled page
    // -----------------------------------------------------------------

    #[test]
    fn bundled_index_uses_bridge_api() {
        let cp = ContentProvider::new(assets_dir());
        let (mime, data) = cp.resolve("index.html").expect("index.html should resolve");
        assert_eq!(mime.as_ref(), "text/html");
        let html = String::from_utf8_lossy(&data);
        assert!(html.contains("window.bridge.call"));
        assert!(html.contains("bridge.on("));
        assert!(
            !html.contains(".innerHTML"),
            "index.html must not use innerHTML (XSS risk)"
        );
    }

    #[test]
    fn bundled_readme_is_readable() {
        let cp = ContentProvider::new(assets_dir());
        let (mime, _) = cp.resolve("static/example.txt").expect("example should resolve");
        assert_eq!(mime.as_ref(), "text/plain");
    }

    // -----------------------------------------------------------------
    // Resolution
    // -----------------------------------------------------------------

    #[test]
    fn resolves_files_and_nested_paths() {
        let (_dir, cp) = temp_assets();
        let (mime, data) = cp.resolve("js/app.js").unwrap();
        assert_eq!(mime.as_ref(), "application/javascript");
        assert_eq!(data.as_ref(), b"console.log(1)");
    }

    #[test]
    fn empty_path_serves_index() {
        let (_dir, cp) = temp_assets();
        let (_, data) = cp.resolve("").unwrap();
        assert_eq!(data.as_ref(), b"<html>home</html>");
        let (_, data) = cp.resolve("/").unwrap();
        assert_eq!(data.as_ref(), b"<html>home</html>");
    }

    #[test]
    fn query_string_is_ignored() {
        let (_dir, cp) = temp_assets();
        assert!(cp.resolve("index.html?v=2").is_some());
        assert!(cp.resolve("index.html#top").is_some());
    }

    #[test]
    fn directory_does_not_resolve() {
        let (_dir, cp) = temp_assets();
        assert!(cp.resolve("js").is_none());
    }

    #[test]
    fn nonexistent_file_returns_none() {
        let (_dir, cp) = temp_assets();
        assert!(cp.resolve("missing.html").is_none());
    }

    // -----------------------------------------------------------------
    // Security: directory traversal
    // -----------------------------------------------------------------

    #[test]
    fn traversal_with_dotdot_is_blocked() {
        let (_dir, cp) = temp_assets();
        assert!(cp.resolve("../private.txt").is_none());
        assert!(cp.resolve("js/../../private.txt").is_none());
        assert!(cp.resolve("../../etc/passwd").is_none());
    }

    #[test]
    fn traversal_with_absolute_path_is_blocked() {
        let (_dir, cp) = temp_assets();
        assert!(cp.resolve("/etc/passwd").is_none());
    }

    #[cfg(unix)]
    #[test]
    fn symlink_out_of_base_is_blocked() {
        let (dir, cp) = temp_assets();
        std::os::unix::fs::symlink(
            dir.path().join("private.txt"),
            cp.base_dir().join("leak.txt"),
        )
        .unwrap();
        assert!(cp.resolve("leak.txt").is_none());
    }

    // -----------------------------------------------------------------
    // Overrides & MIME
    // -----------------------------------------------------------------

    #[test]
    fn override_takes_precedence() {
        let (_dir, mut cp) = temp_assets();
        cp.add_override("index.html", "text/html", b"<html>override</html>".to_vec());
        let (mime, data) = cp.resolve("index.html").unwrap();
        assert_eq!(mime.as_ref(), "text/html");
        assert_eq!(data.as_ref(), b"<html>override</html>");
    }

    #[test]
    fn mime_types() {
        assert_eq!(mime_from_extension(Path::new("a.html")), "text/html");
        assert_eq!(mime_from_extension(Path::new("a.css")), "text/css");
        assert_eq!(
            mime_from_extension(Path::new("a.mjs")),
            "application/javascript"
        );
        assert_eq!(
            mime_from_extension(Path::new("a.xyz")),
            "application/octet-stream"
        );
    }
}
