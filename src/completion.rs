use std::path::{is_separator, PathBuf, MAIN_SEPARATOR};

/// Tab-completion settings for the folder prompt.
///
/// Passed explicitly to whatever reads the folder path, so nothing about
/// completion lives in global terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathCompletion {
    pub enabled: bool,
    /// Only offer directories (the folder prompt never wants a file)
    pub directories_only: bool,
}

impl Default for PathCompletion {
    fn default() -> Self {
        Self {
            enabled: true,
            directories_only: true,
        }
    }
}

impl PathCompletion {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Complete the typed text against the filesystem.
    ///
    /// Returns the single match (directories get a trailing separator), or the
    /// longest shared prefix when several entries match and that prefix is
    /// longer than what was typed.
    pub fn complete(&self, input: &str) -> Option<String> {
        if !self.enabled || input.is_empty() {
            return None;
        }

        let (dir_part, prefix) = match input.rfind(is_separator) {
            Some(idx) => input.split_at(idx + 1),
            None => ("", input),
        };

        let search_dir = if dir_part.is_empty() {
            PathBuf::from(".")
        } else {
            expand_home(dir_part)
        };

        let mut candidates: Vec<(String, bool)> = std::fs::read_dir(&search_dir)
            .ok()?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let name = entry.file_name().into_string().ok()?;
                if !name.starts_with(prefix) {
                    return None;
                }
                let is_dir = entry.path().is_dir();
                if self.directories_only && !is_dir {
                    return None;
                }
                Some((name, is_dir))
            })
            .collect();
        candidates.sort();

        match candidates.as_slice() {
            [] => None,
            [(name, is_dir)] => {
                let mut completed = format!("{}{}", dir_part, name);
                if *is_dir {
                    completed.push(MAIN_SEPARATOR);
                }
                Some(completed)
            }
            many => {
                let common = longest_common_prefix(many.iter().map(|(name, _)| name.as_str()));
                if common.len() > prefix.len() {
                    Some(format!("{}{}", dir_part, common))
                } else {
                    None
                }
            }
        }
    }
}

impl dialoguer::Completion for PathCompletion {
    fn get(&self, input: &str) -> Option<String> {
        self.complete(input)
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_home(input: &str) -> PathBuf {
    if input == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = input.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(input)
}

fn longest_common_prefix<'a>(mut names: impl Iterator<Item = &'a str>) -> String {
    let Some(first) = names.next() else {
        return String::new();
    };
    let mut common: &str = first;
    for name in names {
        let shared = common
            .char_indices()
            .zip(name.chars())
            .take_while(|((_, a), b)| a == b)
            .last()
            .map(|((idx, c), _)| idx + c.len_utf8())
            .unwrap_or(0);
        common = &common[..shared];
    }
    common.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("Season 1")).unwrap();
        fs::create_dir(temp_dir.path().join("Season 2")).unwrap();
        fs::create_dir(temp_dir.path().join("Specials")).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), b"").unwrap();
        temp_dir
    }

    fn typed(temp_dir: &TempDir, rest: &str) -> String {
        format!("{}{}{}", temp_dir.path().display(), MAIN_SEPARATOR, rest)
    }

    #[test]
    fn test_unique_directory_match() {
        let temp_dir = setup();
        let completion = PathCompletion::default();

        assert_eq!(
            completion.complete(&typed(&temp_dir, "Sp")),
            Some(typed(&temp_dir, &format!("Specials{}", MAIN_SEPARATOR)))
        );
    }

    #[test]
    fn test_common_prefix_of_several() {
        let temp_dir = setup();
        let completion = PathCompletion::default();

        assert_eq!(
            completion.complete(&typed(&temp_dir, "Sea")),
            Some(typed(&temp_dir, "Season "))
        );
        // Nothing more to add once the shared prefix is typed
        assert_eq!(completion.complete(&typed(&temp_dir, "Season ")), None);
    }

    #[test]
    fn test_files_skipped_when_directories_only() {
        let temp_dir = setup();

        assert_eq!(PathCompletion::default().complete(&typed(&temp_dir, "no")), None);

        let any_entry = PathCompletion {
            enabled: true,
            directories_only: false,
        };
        assert_eq!(
            any_entry.complete(&typed(&temp_dir, "no")),
            Some(typed(&temp_dir, "notes.txt"))
        );
    }

    #[test]
    fn test_disabled_never_completes() {
        let temp_dir = setup();
        assert_eq!(PathCompletion::disabled().complete(&typed(&temp_dir, "Sp")), None);
    }

    #[test]
    fn test_unreadable_parent() {
        let completion = PathCompletion::default();
        assert_eq!(completion.complete("/definitely/not/a/real/dir/x"), None);
        assert_eq!(completion.complete(""), None);
    }

    #[test]
    fn test_longest_common_prefix() {
        assert_eq!(longest_common_prefix(["Season 1", "Season 2"].into_iter()), "Season ");
        assert_eq!(longest_common_prefix(["abc", "xyz"].into_iter()), "");
        assert_eq!(longest_common_prefix(["only"].into_iter()), "only");
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/rips"), PathBuf::from("/tmp/rips"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/Rips"), home.join("Rips"));
            assert_eq!(expand_home("~"), home);
        }
    }
}
