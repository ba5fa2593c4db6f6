use anyhow::Result;
use std::io::Write;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::RenameError;
use crate::mapping;
use crate::renamer::{self, RenameReport};
use crate::selector::{self, Prompter, SelectorPresets};

/// One complete run: folder, mapping, season/disc, renames.
///
/// Bad input (unknown folder, season or disc, unreadable mapping) is reported
/// on `out` and ends the run with `Ok(None)` before anything on disk changes.
/// Filesystem failures part way through come back as errors.
pub fn run(
    config: &Config,
    presets: &SelectorPresets,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<Option<RenameReport>> {
    writeln!(out, "📺 Friends Renamer Utility")?;

    match execute(config, presets, prompter, out) {
        Ok(report) => {
            print_summary(&report, out)?;
            Ok(Some(report))
        }
        Err(e) if e.is_user_facing() => {
            warn!("Run aborted: {}", e);
            writeln!(out, "❌ {}", e)?;
            Ok(None)
        }
        Err(e) => {
            error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}

fn execute(
    config: &Config,
    presets: &SelectorPresets,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
) -> Result<RenameReport, RenameError> {
    let folder = selector::select_folder(prompter, &config.path_completion(), presets.folder.clone())?;
    let structured = mapping::load_mapping(&config.mapping_file, config.parse_mode())?;
    let selection = selector::select_disc(&structured, prompter, out, presets)?;

    let renames = structured
        .disc(selection.season, selection.disc)
        .ok_or_else(|| RenameError::DiscNotFound {
            season: selection.season.to_string(),
            disc: selection.disc.to_string(),
        })?;

    let report = renamer::apply_renames(
        &folder,
        selection.season,
        selection.disc,
        renames,
        &config.rename_options(),
    )?;

    info!(
        "Run complete: {} renamed, {} missing, {} deleted",
        report.renamed.len(),
        report.missing.len(),
        report.deleted.len()
    );
    Ok(report)
}

fn print_summary(report: &RenameReport, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "✓ Renamed {} file(s)", report.renamed.len())?;
    if !report.missing.is_empty() {
        writeln!(out, "⚠️  {} file(s) missing from the folder", report.missing.len())?;
    }
    if !report.deleted.is_empty() {
        writeln!(out, "🗑️  Deleted {} unmapped file(s)", report.deleted.len())?;
    }
    writeln!(out, "✅ Done. Log saved to {}", report.log_path.display())
}
