//! Path normalization utilities.
//!
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `is_external` - distinguish site-root paths from URLs

use std::path::{Path, PathBuf};

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

/// Whether an image/link reference points outside the public directory.
///
/// Only site-root references (`/images/a.png`) are checked on disk;
/// URLs, protocol-relative links and `data:` URIs are taken as-is.
#[inline]
pub fn is_external(reference: &str) -> bool {
    !reference.starts_with('/') || reference.starts_with("//")
}

/// Map a site-root reference (`/images/a.png`) to a file under `public_dir`.
pub fn public_file(public_dir: &Path, reference: &str) -> PathBuf {
    let reference = reference.split(['?', '#']).next().unwrap_or(reference);
    public_dir.join(reference.trim_start_matches('/'))
}
