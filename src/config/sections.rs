//! Parsed configuration sections

use std::collections::BTreeMap;

/// Raw string options of one section, keyed by lower-cased option name
pub type SectionOptions = BTreeMap<String, String>;

/// Name of the section used when no configuration file exists
pub const DEFAULT_SECTION: &str = "stderr";

/// One `[name]` block of the configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSection {
    pub name: String,
    pub options: SectionOptions,
}

impl ConfigSection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: SectionOptions::new(),
        }
    }

    /// Add an option; names are case-insensitive and stored lower-cased
    pub fn with_option(mut self, key: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.options.insert(key.as_ref().to_lowercase(), value.into());
        self
    }
}

/// All sections of a configuration, ordered by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigSections {
    sections: BTreeMap<String, ConfigSection>,
}

impl ConfigSections {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fallback configuration: a single `stderr` section with no options
    pub fn builtin_default() -> Self {
        let mut sections = Self::new();
        sections.insert(ConfigSection::new(DEFAULT_SECTION));
        sections
    }

    /// Insert a section, replacing any previous section with the same name
    pub fn insert(&mut self, section: ConfigSection) {
        self.sections.insert(section.name.clone(), section);
    }

    pub fn get(&self, name: &str) -> Option<&ConfigSection> {
        self.sections.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sections.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigSection> {
        self.sections.values()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl FromIterator<ConfigSection> for ConfigSections {
    fn from_iter<I: IntoIterator<Item = ConfigSection>>(iter: I) -> Self {
        let mut sections = Self::new();
        for section in iter {
            sections.insert(section);
        }
        sections
    }
}
