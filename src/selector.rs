use std::collections::VecDeque;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::completion::{expand_home, PathCompletion};
use crate::error::{RenameError, Result};
use crate::mapping::{DiscKey, SeasonKey, StructuredMapping};

pub const FOLDER_PROMPT: &str = "Enter the full path to the folder";
pub const SEASON_PROMPT: &str = "Enter the season number (e.g., 2)";
pub const DISC_PROMPT: &str = "Enter the disc number (e.g., 2)";

/// Source of operator answers
pub trait Prompter {
    /// Ask for a folder path, offering completion as configured
    fn ask_folder(&mut self, prompt: &str, completion: &PathCompletion) -> io::Result<String>;

    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// Reads answers from the terminal
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask_folder(&mut self, prompt: &str, completion: &PathCompletion) -> io::Result<String> {
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .completion_with(completion)
            .interact_text()
            .map_err(io::Error::other)
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        dialoguer::Input::<String>::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)
    }
}

/// Replays canned answers in order, for tests and non-interactive use
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    fn next_answer(&mut self, prompt: &str) -> io::Result<String> {
        self.asked.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, format!("no answer for '{}'", prompt)))
    }
}

impl Prompter for ScriptedPrompter {
    fn ask_folder(&mut self, prompt: &str, _completion: &PathCompletion) -> io::Result<String> {
        self.next_answer(prompt)
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.next_answer(prompt)
    }
}

/// Answers already known from the command line. Present values skip their
/// prompt but are validated the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectorPresets {
    pub folder: Option<PathBuf>,
    pub season: Option<String>,
    pub disc: Option<String>,
}

/// The operator's validated choice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscSelection {
    pub season: SeasonKey,
    pub disc: DiscKey,
}

/// Obtain the target folder; it must already be a directory.
pub fn select_folder(
    prompter: &mut dyn Prompter,
    completion: &PathCompletion,
    preset: Option<PathBuf>,
) -> Result<PathBuf> {
    let folder = match preset {
        Some(path) => path,
        None => {
            let answer = prompter.ask_folder(FOLDER_PROMPT, completion)?;
            expand_home(answer.trim())
        }
    };

    if !folder.is_dir() {
        return Err(RenameError::FolderNotFound(folder));
    }

    info!("Target folder: {}", folder.display());
    Ok(folder)
}

/// Obtain season then disc, listing the season's discs in between.
pub fn select_disc(
    mapping: &StructuredMapping,
    prompter: &mut dyn Prompter,
    out: &mut dyn Write,
    presets: &SelectorPresets,
) -> Result<DiscSelection> {
    let season_input = match &presets.season {
        Some(s) => s.clone(),
        None => prompter.ask(SEASON_PROMPT)?,
    };
    let season = SeasonKey::parse(&season_input)
        .filter(|key| mapping.has_season(*key))
        .ok_or_else(|| RenameError::SeasonNotFound(describe_season(&season_input)))?;
    debug!("Season {} selected", season);

    print_disc_listing(mapping, season, out)?;

    let disc_input = match &presets.disc {
        Some(d) => d.clone(),
        None => prompter.ask(DISC_PROMPT)?,
    };
    let disc = DiscKey::parse(&disc_input)
        .filter(|key| mapping.disc(season, *key).is_some())
        .ok_or_else(|| RenameError::DiscNotFound {
            season: season.to_string(),
            disc: describe_disc(&disc_input),
        })?;

    info!("Selected {} {}", season, disc);
    Ok(DiscSelection { season, disc })
}

/// Print every disc of a season with the episodes it covers
pub fn print_disc_listing(mapping: &StructuredMapping, season: SeasonKey, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Available discs for Season {}:", season)?;
    for (disc, renames) in mapping.discs(season) {
        match renames.episode_range() {
            Some(range) => writeln!(out, "  Disc {}: {}", disc.0, range)?,
            None => writeln!(out, "  Disc {}", disc.0)?,
        }
    }
    Ok(())
}

fn describe_season(input: &str) -> String {
    SeasonKey::parse(input)
        .map(|key| key.to_string())
        .unwrap_or_else(|| input.trim().to_string())
}

fn describe_disc(input: &str) -> String {
    DiscKey::parse(input)
        .map(|key| key.to_string())
        .unwrap_or_else(|| input.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{parse_mapping, ParseMode};
    use tempfile::TempDir;

    const MAP: &str = "\
S02E01-Friends_Season_2_Disc_1_t00.mkv
S02E04-Friends_Season_2_Disc_1_t01.mkv
S02E05-Friends_Season_2_Disc_2_t04.mkv
S02E08-Friends_Season_2_Disc_2_t05.mkv
S02E21-Friends_Season_2_Disc_10_t00.mkv
";

    fn mapping() -> StructuredMapping {
        parse_mapping(MAP, ParseMode::Lenient).unwrap()
    }

    #[test]
    fn test_season_with_or_without_leading_zero() {
        for season in ["2", "02", " 2 "] {
            let mut prompter = ScriptedPrompter::new([season, "2"]);
            let mut out = Vec::new();
            let selection = select_disc(&mapping(), &mut prompter, &mut out, &SelectorPresets::default()).unwrap();
            assert_eq!(selection.season.to_string(), "S02");
            assert_eq!(selection.disc.to_string(), "D2");
        }
    }

    #[test]
    fn test_listing_printed_before_disc_prompt() {
        let mut prompter = ScriptedPrompter::new(["2", "1"]);
        let mut out = Vec::new();
        select_disc(&mapping(), &mut prompter, &mut out, &SelectorPresets::default()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "Available discs for Season S02:\n  Disc 1: Episodes 1-4\n  Disc 2: Episodes 5-8\n  Disc 10: Episodes 21-21\n"
        );
        assert_eq!(prompter.asked, vec![SEASON_PROMPT.to_string(), DISC_PROMPT.to_string()]);
    }

    #[test]
    fn test_unknown_season_aborts_without_disc_prompt() {
        let mut prompter = ScriptedPrompter::new(["7", "1"]);
        let mut out = Vec::new();
        let err = select_disc(&mapping(), &mut prompter, &mut out, &SelectorPresets::default()).unwrap_err();

        assert!(matches!(err, RenameError::SeasonNotFound(ref s) if s == "S07"));
        assert_eq!(prompter.asked.len(), 1);
        assert!(out.is_empty());
    }

    #[test]
    fn test_non_numeric_season() {
        let mut prompter = ScriptedPrompter::new(["two"]);
        let mut out = Vec::new();
        let err = select_disc(&mapping(), &mut prompter, &mut out, &SelectorPresets::default()).unwrap_err();
        assert!(matches!(err, RenameError::SeasonNotFound(ref s) if s == "two"));
    }

    #[test]
    fn test_unknown_disc_aborts() {
        let mut prompter = ScriptedPrompter::new(["2", "3"]);
        let mut out = Vec::new();
        let err = select_disc(&mapping(), &mut prompter, &mut out, &SelectorPresets::default()).unwrap_err();

        match err {
            RenameError::DiscNotFound { season, disc } => {
                assert_eq!(season, "S02");
                assert_eq!(disc, "D3");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_presets_skip_prompts() {
        let mut prompter = ScriptedPrompter::default();
        let mut out = Vec::new();
        let presets = SelectorPresets {
            folder: None,
            season: Some("2".to_string()),
            disc: Some("10".to_string()),
        };

        let selection = select_disc(&mapping(), &mut prompter, &mut out, &presets).unwrap();
        assert_eq!(selection, DiscSelection { season: SeasonKey(2), disc: DiscKey(10) });
        assert!(prompter.asked.is_empty());
    }

    #[test]
    fn test_select_folder_validates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().display().to_string();

        let mut prompter = ScriptedPrompter::new([folder.as_str()]);
        let selected = select_folder(&mut prompter, &PathCompletion::default(), None).unwrap();
        assert_eq!(selected, temp_dir.path());

        let missing = temp_dir.path().join("nope");
        let mut prompter = ScriptedPrompter::default();
        let err = select_folder(&mut prompter, &PathCompletion::default(), Some(missing.clone())).unwrap_err();
        assert!(matches!(err, RenameError::FolderNotFound(ref p) if *p == missing));
    }

    #[test]
    fn test_select_folder_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("Friends_Season_2_Disc_2_t05.mkv");
        std::fs::write(&file, b"").unwrap();

        let mut prompter = ScriptedPrompter::default();
        let err = select_folder(&mut prompter, &PathCompletion::default(), Some(file)).unwrap_err();
        assert!(matches!(err, RenameError::FolderNotFound(_)));
    }

    #[test]
    fn test_scripted_prompter_runs_dry() {
        let mut prompter = ScriptedPrompter::default();
        let err = prompter.ask(SEASON_PROMPT).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
