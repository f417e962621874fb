//! Path and URL utilities.
//!
//! Pure functions for path manipulation. No side effects.

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Check if a link is external (has a URL scheme like http:, mailto:, etc.)
/// or is protocol-relative (`//cdn.example.com/...`).
#[inline]
pub fn is_external_link(link: &str) -> bool {
    link.starts_with("//")
        || link.find(':').is_some_and(|pos| {
            pos > 0
                && link[..pos]
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        })
}

/// Normalize a route path: leading slash, no trailing slash (except root),
/// no query string or fragment.
///
/// ```ignore
/// assert_eq!(normalize_route("services/"), "/services");
/// assert_eq!(normalize_route("/blog?page=2#top"), "/blog");
/// assert_eq!(normalize_route(""), "/");
/// ```
pub fn normalize_route(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default().trim();
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Map a site-absolute URL path onto a directory, refusing to escape it.
///
/// Returns `None` for `..` components or empty paths.
pub fn url_to_fs_path(root: &Path, url_path: &str) -> Option<PathBuf> {
    let path = url_path.split(['?', '#']).next().unwrap_or_default();
    let relative = Path::new(path.trim_start_matches('/'));

    let mut out = root.to_path_buf();
    let mut pushed = false;
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                out.push(part);
                pushed = true;
            }
            Component::CurDir => {}
            _ => return None,
        }
    }
    pushed.then_some(out)
}

/// Whether every segment of a route is a plain name (no `.`, `..` or
/// platform separators).
pub fn is_plain_route(route: &str) -> bool {
    normalize_route(route)
        .split('/')
        .filter(|s| !s.is_empty())
        .all(|segment| {
            let mut components = Path::new(segment).components();
            matches!(components.next(), Some(Component::Normal(part)) if part == segment)
                && components.next().is_none()
        })
}

/// Output file for a route: `/` -> `index.html`, `/about` -> `about/index.html`.
///
/// Returns `None` when the route would leave `output_dir`.
pub fn route_output_file(output_dir: &Path, route: &str) -> Option<PathBuf> {
    if !is_plain_route(route) {
        return None;
    }
    let mut path = output_dir.to_path_buf();
    for segment in normalize_route(route).split('/').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    Some(path.join("index.html"))
}
