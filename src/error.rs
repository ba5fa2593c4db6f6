use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a rename run.
#[derive(Debug, Error)]
pub enum RenameError {
    #[error("That directory doesn't exist: {}", .0.display())]
    FolderNotFound(PathBuf),

    #[error("No mapping found for Season {0}.")]
    SeasonNotFound(String),

    #[error("No mapping found for Season {season} Disc {disc}.")]
    DiscNotFound { season: String, disc: String },

    #[error("Could not read mapping file {}: {source}", path.display())]
    MappingUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed mapping line {line_number}: {line}")]
    MalformedLine { line_number: usize, line: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RenameError {
    /// True for failures caught before anything on disk was touched.
    /// These are reported to the operator and end the run cleanly.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, RenameError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, RenameError>;
