use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::mapping::{DiscKey, DiscMapping, SeasonKey, VIDEO_EXTENSION};
use crate::rename_log::{RenameLog, DEFAULT_LOG_FILE_NAME};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameOptions {
    /// Delete leftover video files that weren't part of this disc's renames
    pub cleanup_unmapped: bool,
    pub log_file_name: String,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            cleanup_unmapped: false,
            log_file_name: DEFAULT_LOG_FILE_NAME.to_string(),
        }
    }
}

/// What a run did to the folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameReport {
    pub renamed: Vec<(String, String)>,
    pub missing: Vec<String>,
    pub deleted: Vec<String>,
    pub log_path: PathBuf,
}

/// Apply one disc's renames inside `folder`, then optionally clear out
/// unmapped video files.
///
/// Each rename stands on its own: a missing source is logged and skipped,
/// but any other filesystem failure aborts the run where it is.
pub fn apply_renames(
    folder: &Path,
    season: SeasonKey,
    disc: DiscKey,
    renames: &DiscMapping,
    options: &RenameOptions,
) -> Result<RenameReport> {
    info!(
        "Applying {} renames for {} {} in {}",
        renames.len(),
        season,
        disc,
        folder.display()
    );

    if renames.is_empty() {
        warn!("No renames listed for {} {}", season, disc);
    }

    let mut log = RenameLog::create(folder, &options.log_file_name, season, disc)?;
    debug!("Writing rename log to {}", log.path().display());
    let mut report = RenameReport::default();
    let mut renamed_names: HashSet<String> = HashSet::new();

    for entry in renames.entries() {
        let old_path = folder.join(&entry.original);
        let new_path = folder.join(&entry.renamed);

        if old_path.exists() {
            std::fs::rename(&old_path, &new_path)?;
            info!("Renamed {} -> {} ({})", entry.original, entry.renamed, entry.episode);
            log.renamed(&entry.original, &entry.renamed)?;
            renamed_names.insert(entry.renamed.clone());
            report.renamed.push((entry.original.clone(), entry.renamed.clone()));
        } else {
            warn!("Missing {}", entry.original);
            log.missing(&entry.original)?;
            report.missing.push(entry.original.clone());
        }
    }

    if options.cleanup_unmapped {
        for name in unmapped_videos(folder, &renamed_names)? {
            std::fs::remove_file(folder.join(&name))?;
            info!("Deleted {}", name);
            log.deleted(&name)?;
            report.deleted.push(name);
        }
    } else {
        debug!("Cleanup of unmapped files disabled");
    }

    report.log_path = log.finish()?;
    Ok(report)
}

/// Video files directly inside `folder` not in `keep`, sorted by name
fn unmapped_videos(folder: &Path, keep: &HashSet<String>) -> io::Result<Vec<String>> {
    let mut names = Vec::new();

    for entry in WalkDir::new(folder).min_depth(1).max_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        // Follows symlinks, so a link to a video counts as a video
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if name.ends_with(VIDEO_EXTENSION) && !keep.contains(name) {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}
