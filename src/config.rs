use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

pub const MIN_DECKS: u32 = 1;
pub const MAX_DECKS: u32 = 8;

fn default_num_decks() -> u32 {
    6
}

/// Language of the labels and rationale handed to the shell.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(alias = "en")]
    English,
    #[serde(alias = "ru")]
    Russian,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorConfig {
    #[serde(default = "default_num_decks")]
    pub num_decks: u32,
    #[serde(default)]
    pub language: Language,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        AdvisorConfig {
            num_decks: default_num_decks(),
            language: Language::default(),
        }
    }
}

impl AdvisorConfig {
    pub fn validate(&self) -> Result<(), AdvisorError> {
        validate_decks(self.num_decks)
    }
}

pub(crate) fn validate_decks(num_decks: u32) -> Result<(), AdvisorError> {
    if (MIN_DECKS..=MAX_DECKS).contains(&num_decks) {
        Ok(())
    } else {
        Err(AdvisorError::InvalidDeckCount(num_decks))
    }
}
