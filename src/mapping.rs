use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::OnceLock;
use tracing::{debug, info, warn};

use crate::error::{RenameError, Result};

/// Extension shared by ripped titles and renamed episodes
pub const VIDEO_EXTENSION: &str = ".mkv";

/// Show name used when building the canonical episode filename
pub const SHOW_NAME: &str = "Friends";

/// `S02E03-Friends_Season_2_Disc_2_t05.mkv`
fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<episode>S\d{2}E\d{2,3})-(?P<original>Friends_Season_\d+_Disc_\d+_t\d+\.mkv)$")
            .expect("mapping line pattern is valid")
    })
}

fn season_disc_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Season_(?P<season>\d+)_Disc_(?P<disc>\d+)").expect("season/disc pattern is valid")
    })
}

fn episode_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"E(?P<number>\d+)\.mkv$").expect("episode number pattern is valid"))
}

/// Parse operator or filename text as a plain decimal number.
/// Leading zeros are fine, anything else that isn't a digit is rejected.
fn parse_number(input: &str) -> Option<u32> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Season identifier, displayed as `S02`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeasonKey(pub u32);

impl SeasonKey {
    pub fn parse(input: &str) -> Option<Self> {
        parse_number(input).map(SeasonKey)
    }
}

impl fmt::Display for SeasonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:02}", self.0)
    }
}

/// Disc identifier, displayed as `D2` (never padded)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscKey(pub u32);

impl DiscKey {
    pub fn parse(input: &str) -> Option<Self> {
        parse_number(input).map(DiscKey)
    }
}

impl fmt::Display for DiscKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "D{}", self.0)
    }
}

/// How to treat lines that don't look like mapping entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Skip them silently
    #[default]
    Lenient,
    /// Fail the load on the first one
    Strict,
}

/// One original -> canonical filename pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub episode: String,
    pub original: String,
    pub renamed: String,
}

impl MappingEntry {
    pub fn new(episode: &str, original: &str) -> Self {
        Self {
            episode: episode.to_string(),
            original: original.to_string(),
            renamed: format!("{} {}{}", SHOW_NAME, episode, VIDEO_EXTENSION),
        }
    }

    /// Episode number taken back out of the canonical filename
    pub fn episode_number(&self) -> Option<u32> {
        episode_number_pattern()
            .captures(&self.renamed)
            .and_then(|caps| caps.name("number"))
            .and_then(|m| parse_number(m.as_str()))
    }
}

/// A mapping line that matched, along with where it belongs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub season: SeasonKey,
    pub disc: DiscKey,
    pub entry: MappingEntry,
}

/// Match a single (already trimmed) line. Season and disc come from the
/// original filename, not the episode code.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let caps = line_pattern().captures(line)?;
    let episode = caps.name("episode")?.as_str();
    let original = caps.name("original")?.as_str();

    let sd = season_disc_pattern().captures(original)?;
    let season = SeasonKey::parse(sd.name("season")?.as_str())?;
    let disc = DiscKey::parse(sd.name("disc")?.as_str())?;

    Some(ParsedLine {
        season,
        disc,
        entry: MappingEntry::new(episode, original),
    })
}

/// Episode span of a disc, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeRange {
    pub first: u32,
    pub last: u32,
}

impl fmt::Display for EpisodeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Episodes {}-{}", self.first, self.last)
    }
}

/// Renames for one disc, in mapping file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscMapping {
    entries: Vec<MappingEntry>,
}

impl DiscMapping {
    /// A repeated original keeps its first position but takes the newer name.
    fn insert(&mut self, entry: MappingEntry) {
        match self.entries.iter_mut().find(|e| e.original == entry.original) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn episode_range(&self) -> Option<EpisodeRange> {
        let numbers: Vec<u32> = self.entries.iter().filter_map(MappingEntry::episode_number).collect();
        let first = *numbers.iter().min()?;
        let last = *numbers.iter().max()?;
        Some(EpisodeRange { first, last })
    }
}

/// Season -> disc -> renames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredMapping {
    seasons: BTreeMap<SeasonKey, BTreeMap<DiscKey, DiscMapping>>,
}

impl StructuredMapping {
    fn insert(&mut self, parsed: ParsedLine) {
        self.seasons
            .entry(parsed.season)
            .or_default()
            .entry(parsed.disc)
            .or_default()
            .insert(parsed.entry);
    }

    pub fn has_season(&self, season: SeasonKey) -> bool {
        self.seasons.contains_key(&season)
    }

    pub fn seasons(&self) -> impl Iterator<Item = SeasonKey> + '_ {
        self.seasons.keys().copied()
    }

    /// Discs for a season, sorted by disc number
    pub fn discs(&self, season: SeasonKey) -> Vec<(DiscKey, &DiscMapping)> {
        self.seasons
            .get(&season)
            .map(|discs| discs.iter().map(|(k, v)| (*k, v)).collect())
            .unwrap_or_default()
    }

    pub fn disc(&self, season: SeasonKey, disc: DiscKey) -> Option<&DiscMapping> {
        self.seasons.get(&season)?.get(&disc)
    }

    /// Total number of entries across every season and disc
    pub fn len(&self) -> usize {
        self.seasons
            .values()
            .flat_map(|discs| discs.values())
            .map(DiscMapping::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }
}

/// Build the structured mapping from mapping file text
pub fn parse_mapping(contents: &str, mode: ParseMode) -> Result<StructuredMapping> {
    let mut mapping = StructuredMapping::default();

    for (index, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Some(parsed) => mapping.insert(parsed),
            None if mode == ParseMode::Strict => {
                return Err(RenameError::MalformedLine {
                    line_number: index + 1,
                    line: line.to_string(),
                });
            }
            None => debug!("Skipping unrecognised mapping line {}: {}", index + 1, line),
        }
    }

    Ok(mapping)
}

/// Read and parse a mapping file
pub fn load_mapping(path: &Path, mode: ParseMode) -> Result<StructuredMapping> {
    let contents = std::fs::read_to_string(path).map_err(|source| RenameError::MappingUnreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let mapping = parse_mapping(&contents, mode)?;
    if mapping.is_empty() {
        warn!("No mapping entries found in {}", path.display());
    }
    info!(
        "Loaded {} mapping entries across {} seasons from {}",
        mapping.len(),
        mapping.seasons().count(),
        path.display()
    );
    Ok(mapping)
}
