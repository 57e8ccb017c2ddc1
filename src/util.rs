use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

static INIT_ONCE: std::sync::Once = std::sync::Once::new();
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt().with_env_filter(env_filter).try_init();
    });
}

/// Wall-clock timestamp for snapshot headers and report manifests.
pub(crate) fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Replace `dest` with `tmp` via rename; fall back to copy+remove when the
/// rename fails (cross-device moves, target held open by a viewer).
pub fn replace_file_atomic(tmp: &Path, dest: &Path) -> Result<()> {
    if dest.exists() {
        fs::remove_file(dest).with_context(|| format!("remove {}", dest.display()))?;
    }
    match fs::rename(tmp, dest) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(tmp, dest)
                .with_context(|| format!("copy {} -> {}", tmp.display(), dest.display()))?;
            fs::remove_file(tmp).with_context(|| format!("remove {}", tmp.display()))?;
            Ok(())
        }
    }
}
