//! Configuration file lookup and parsing
//!
//! The section/key-value syntax itself is delegated to `rust-ini`, with quote
//! and escape processing turned off so values reach the backends exactly as
//! written. This module decides which file to read and turns the parsed
//! document into [`ConfigSections`].

use std::path::{Path, PathBuf};

use ini::{Ini, ParseOption};
use tracing::{debug, info};

use crate::config::error::ConfigError;
use crate::config::sections::{ConfigSection, ConfigSections};

/// Configuration file looked up in the current directory
pub const LOCAL_CONFIG_FILE: &str = "tyme.cfg";

/// Configuration file looked up in the home directory
pub const HOME_CONFIG_FILE: &str = ".tyme.cfg";

/// Locates and loads the notification configuration
#[derive(Debug, Clone)]
pub struct ConfigStore {
    /// Ordered candidate paths; the first existing one wins
    candidates: Vec<PathBuf>,
    /// When set, a missing file is an error instead of falling back
    explicit: bool,
    /// File actually read by the last `load`
    selected: Option<PathBuf>,
}

impl ConfigStore {
    /// Store searching `./tyme.cfg` then `$HOME/.tyme.cfg`
    pub fn new() -> Self {
        let mut candidates = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(home) = home_dir() {
            candidates.push(home.join(HOME_CONFIG_FILE));
        }
        Self::with_candidates(candidates)
    }

    /// Store searching an explicit list of candidates, in order
    pub fn with_candidates(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            explicit: false,
            selected: None,
        }
    }

    /// Store reading exactly one file, which must exist
    pub fn with_file(path: impl Into<PathBuf>) -> Self {
        Self {
            candidates: vec![path.into()],
            explicit: true,
            selected: None,
        }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// File read by the last successful `load`, if any
    pub fn selected_path(&self) -> Option<&Path> {
        self.selected.as_deref()
    }

    /// First existing candidate, if any
    pub fn locate(&self) -> Option<PathBuf> {
        self.candidates.iter().find(|path| path.is_file()).cloned()
    }

    /// Locate and parse the configuration.
    ///
    /// Falls back to [`ConfigSections::builtin_default`] when no candidate
    /// exists, so at least one notification channel is always configured.
    pub fn load(&mut self) -> Result<ConfigSections, ConfigError> {
        let Some(path) = self.locate() else {
            if self.explicit {
                let missing = self.candidates.first().cloned().unwrap_or_default();
                return Err(ConfigError::FileNotFound(missing));
            }
            info!("selected config file : none, using built-in default");
            self.selected = None;
            return Ok(ConfigSections::builtin_default());
        };

        let sections = Self::parse_file(&path)?;
        info!(path = %path.display(), "selected config file");
        self.selected = Some(path);
        Ok(sections)
    }

    /// Parse one configuration file
    pub fn parse_file(path: &Path) -> Result<ConfigSections, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(path, &text)
    }

    /// Parse configuration text; `origin` is only used in error messages
    ///
    /// Options outside of any section and repeated sections or options are
    /// rejected.
    pub fn parse_str(origin: &Path, text: &str) -> Result<ConfigSections, ConfigError> {
        let options = ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..ParseOption::default()
        };
        let document = Ini::load_from_str_opt(text, options)
            .map_err(|e| ConfigError::parse(origin, e.to_string()))?;

        let mut sections = ConfigSections::new();
        for (name, properties) in document.iter() {
            let Some(name) = name else {
                if let Some((key, _)) = properties.iter().next() {
                    return Err(ConfigError::parse(
                        origin,
                        format!("option '{key}' is outside of any section"),
                    ));
                }
                continue;
            };

            if sections.contains(name) {
                return Err(ConfigError::parse(origin, format!("section '{name}' already exists")));
            }

            let mut section = ConfigSection::new(name);
            for (key, value) in properties.iter() {
                if section.options.contains_key(&key.to_lowercase()) {
                    return Err(ConfigError::parse(
                        origin,
                        format!("[{name}] option '{key}' already exists"),
                    ));
                }
                section = section.with_option(key, value);
            }

            debug!(section = %name, options = section.options.len(), "parsed config section");
            sections.insert(section);
        }

        Ok(sections)
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Helper to create a temporary directory holding one config file
    fn setup_config(content: &str) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join(LOCAL_CONFIG_FILE);
        fs::write(&path, content).expect("Failed to write config file");
        (temp_dir, path)
    }

    #[test]
    fn test_default_candidates() {
        let store = ConfigStore::new();
        assert_eq!(store.candidates()[0], PathBuf::from("tyme.cfg"));
        if let Some(home) = store.candidates().get(1) {
            assert!(home.ends_with(".tyme.cfg"));
        }
        assert!(store.selected_path().is_none());
    }

    #[test]
    fn test_one_section() {
        let (_dir, path) = setup_config("[spam]\negg = aZeRtY\nbacon = PoIuY\n\n");
        let mut store = ConfigStore::with_candidates(vec![path.clone()]);

        let sections = store.load().unwrap();
        assert_eq!(sections.names().collect::<Vec<_>>(), vec!["spam"]);
        let spam = sections.get("spam").unwrap();
        assert_eq!(spam.options["egg"], "aZeRtY");
        assert_eq!(spam.options["bacon"], "PoIuY");
        assert_eq!(store.selected_path(), Some(path.as_path()));
    }

    #[test]
    fn test_two_sections() {
        let (_dir, path) = setup_config("[foo]\nspam = 55\negg = 12\n\n[bar]\npy = 3\n\n");
        let sections = ConfigStore::parse_file(&path).unwrap();

        assert_eq!(sections.len(), 2);
        assert_eq!(sections.get("foo").unwrap().options["spam"], "55");
        assert_eq!(sections.get("foo").unwrap().options["egg"], "12");
        assert_eq!(sections.get("bar").unwrap().options["py"], "3");
        assert!(!sections.get("bar").unwrap().options.contains_key("spam"));
    }

    #[test]
    fn test_empty_section_is_kept() {
        let (_dir, path) = setup_config("[stderr]\n");
        let sections = ConfigStore::parse_file(&path).unwrap();
        assert!(sections.contains("stderr"));
        assert!(sections.get("stderr").unwrap().options.is_empty());
    }

    #[test]
    fn test_empty_file_yields_no_sections() {
        let (_dir, path) = setup_config("\n\n");
        let mut store = ConfigStore::with_candidates(vec![path]);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_no_file_falls_back_to_stderr() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = ConfigStore::with_candidates(vec![
            temp_dir.path().join(LOCAL_CONFIG_FILE),
            temp_dir.path().join(HOME_CONFIG_FILE),
        ]);

        let sections = store.load().unwrap();
        assert_eq!(sections, ConfigSections::builtin_default());
        assert!(store.selected_path().is_none());
    }

    #[test]
    fn test_no_candidates_falls_back_to_stderr() {
        let mut store = ConfigStore::with_candidates(Vec::new());
        assert_eq!(store.load().unwrap(), ConfigSections::builtin_default());
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let (_first, first) = setup_config("[first]\n");
        let (_second, second) = setup_config("[second]\n");
        let mut store = ConfigStore::with_candidates(vec![
            PathBuf::from("/nonexistent/tyme.cfg"),
            second.clone(),
            first,
        ]);

        assert_eq!(store.locate(), Some(second));
        let sections = store.load().unwrap();
        assert!(sections.contains("second"));
        assert!(!sections.contains("first"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = ConfigStore::with_file(temp_dir.path().join("missing.cfg"));
        assert!(matches!(store.load(), Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_values_are_kept_verbatim() {
        let sections = ConfigStore::parse_str(
            Path::new("tyme.cfg"),
            "[gmail]\npassword = a\\tb;c\npw = \"quoted\"\nquote = it's\n",
        )
        .unwrap();

        let gmail = &sections.get("gmail").unwrap().options;
        assert_eq!(gmail["password"], "a\\tb;c");
        assert_eq!(gmail["pw"], "\"quoted\"");
        assert_eq!(gmail["quote"], "it's");
    }

    #[test]
    fn test_option_names_lowercased_values_kept() {
        let sections =
            ConfigStore::parse_str(Path::new("tyme.cfg"), "[spam]\nEgg = AzErTy\n").unwrap();
        assert_eq!(sections.get("spam").unwrap().options["egg"], "AzErTy");
    }

    #[test]
    fn test_duplicate_section_is_a_parse_error() {
        let err = ConfigStore::parse_str(Path::new("tyme.cfg"), "[stderr]\n[stderr]\nx = 1\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("stderr"));
    }

    #[test]
    fn test_duplicate_option_is_a_parse_error() {
        let result = ConfigStore::parse_str(Path::new("tyme.cfg"), "[spam]\negg = 1\nEGG = 2\n");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_option_outside_section_is_a_parse_error() {
        let err = ConfigStore::parse_str(Path::new("tyme.cfg"), "egg = 1\n[spam]\n").unwrap_err();
        assert!(err.to_string().contains("outside of any section"));
    }

    #[test]
    fn test_unterminated_section_header_is_a_parse_error() {
        let (_dir, path) = setup_config("[stderr\nkey = value\n");
        let err = ConfigStore::parse_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
