//! Files shipped alongside the server crate.

use std::path::{Path, PathBuf};

/// Server crate directory at build time; the bundled seed dataset lives under it.
const CRATE_DIR: &str = env!("CARGO_MANIFEST_DIR");

/// Resolve the configured seed file.
///
/// Absolute paths, and relative paths that exist from the working directory,
/// are used as given. Other relative paths are looked up under the server
/// crate directory, so the default `seeds/initial_tickets.json` finds the
/// bundled dataset wherever the binary is started from.
pub fn resolve_seed_path(configured: &Path) -> PathBuf {
    resolve_against(configured, Path::new(CRATE_DIR))
}

fn resolve_against(configured: &Path, base: &Path) -> PathBuf {
    if configured.is_absolute() || configured.exists() {
        return configured.to_path_buf();
    }

    let candidate = base.join(configured);
    if candidate.exists() {
        candidate
    } else {
        configured.to_path_buf()
    }
}
