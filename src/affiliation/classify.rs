use std::collections::BTreeSet;

use crate::Config;

use super::segment;

/// One affiliation line tagged against the configured markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AffiliationGroup<'a> {
    pub text: &'a str,
    pub domestic: bool,
    /// Author list preceding the first occurrence of the home marker.
    pub home_prefix: Option<&'a str>,
}

impl AffiliationGroup<'_> {
    pub fn is_home(&self) -> bool {
        self.home_prefix.is_some()
    }

    pub fn is_foreign(&self) -> bool {
        !self.domestic
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeAuthors {
    pub names: BTreeSet<String>,
    /// Whether any group carried the home marker at all.
    pub marker_found: bool,
}

pub struct Classifier<'c> {
    config: &'c Config,
}

impl<'c> Classifier<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    pub fn classify<'a>(&self, text: &'a str) -> AffiliationGroup<'a> {
        let home_prefix = if self.config.home_marker.is_empty() {
            None
        } else {
            text.find(&self.config.home_marker).map(|idx| &text[..idx])
        };

        AffiliationGroup {
            text,
            domestic: self.is_domestic(text),
            home_prefix,
        }
    }

    pub fn is_domestic(&self, text: &str) -> bool {
        let token = &self.config.domestic_token;
        !token.is_empty() && text.ends_with(token.as_str())
    }

    /// Collects the authors of every home-affiliated group in `block`.
    pub fn home_authors(&self, block: &str) -> HomeAuthors {
        let mut home = HomeAuthors::default();

        for group in segment(block).map(|g| self.classify(g)) {
            let Some(prefix) = group.home_prefix else {
                continue;
            };
            home.marker_found = true;

            for name in prefix.split(super::AUTHOR_SEPARATOR) {
                let name = super::clean_name(name);
                if name.is_empty() || self.config.is_reprint(name) {
                    continue;
                }
                home.names.insert(name.to_string());
            }
        }

        home
    }
}
