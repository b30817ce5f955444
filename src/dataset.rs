use std::path::{Path, PathBuf};

use glob::{glob, Pattern};

use log::{debug, warn};

use crate::{cfg::PrepCfg, error::PrepError};

/// All paths matching `pattern` inside `<sb_path>/<sb_id>`, in glob order.
/// The directory part is escaped, only `pattern` is interpreted.
pub fn find_datasets(sb_path: &Path, sb_id: &str, pattern: &str) -> Result<Vec<PathBuf>, PrepError> {
    let dir = sb_path.join(sb_id);
    let full = format!(
        "{}/{}",
        Pattern::escape(&dir.to_string_lossy()),
        pattern
    );
    debug!("searching {}", full);

    let paths = glob(&full).map_err(|source| PrepError::Glob {
        pattern: full.clone(),
        source,
    })?;

    Ok(paths
        .filter_map(|entry| match entry {
            Ok(p) => Some(p),
            Err(e) => {
                warn!("skipping unreadable entry: {}", e);
                None
            }
        })
        .collect())
}

pub fn resolve_dataset(sb_path: &Path, sb_id: &str, pattern: &str) -> Result<PathBuf, PrepError> {
    let mut found = find_datasets(sb_path, sb_id, pattern)?;
    if found.len() == 1 {
        Ok(found.remove(0))
    } else {
        Err(PrepError::DatasetNotUnique {
            sb_id: sb_id.to_string(),
            pattern: sb_path.join(sb_id).join(pattern).display().to_string(),
            found: found.len(),
        })
    }
}

/// Calibrator and science datasets, in that order.
pub fn resolve_pair(
    cfg: &PrepCfg,
    cal_sb: &str,
    sci_sb: &str,
) -> Result<(PathBuf, PathBuf), PrepError> {
    let cal_ms = resolve_dataset(&cfg.sb_path, cal_sb, &cfg.ms_pattern)?;
    let sci_ms = resolve_dataset(&cfg.sb_path, sci_sb, &cfg.ms_pattern)?;
    Ok((cal_ms, sci_ms))
}
