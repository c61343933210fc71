use serde::{Deserialize, Serialize};

use crate::counter::CountingSystem;
use crate::error::{AdvisorError, Result};

pub const CARDS_PER_DECK: usize = 52;
pub const MAX_DECKS: u8 = 8;
pub const MAX_PLAYERS: u8 = 7;

fn default_decks() -> u8 {
    6
}

fn default_players() -> u8 {
    1
}

/// Only built through `ShoeConfig::new`, so `decks` is always 1..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ShoeConfig {
    decks: u8,
}

impl TryFrom<u8> for ShoeConfig {
    type Error = AdvisorError;

    fn try_from(decks: u8) -> Result<Self> {
        ShoeConfig::new(decks)
    }
}

impl From<ShoeConfig> for u8 {
    fn from(shoe: ShoeConfig) -> Self {
        shoe.decks
    }
}

impl ShoeConfig {
    pub fn new(decks: u8) -> Result<Self> {
        if !(1..=MAX_DECKS).contains(&decks) {
            return Err(AdvisorError::InvalidDeckCount(decks));
        }
        Ok(ShoeConfig { decks })
    }

    pub fn decks(&self) -> u8 {
        self.decks
    }

    pub fn total_cards(&self) -> usize {
        self.decks as usize * CARDS_PER_DECK
    }
}

/// Table setup as entered in the presentation layer. `players` is carried
/// for display only; no decision depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableConfig {
    #[serde(default = "default_decks")]
    pub decks: u8,
    #[serde(default = "default_players")]
    pub players: u8,
    #[serde(default)]
    pub counting_system: CountingSystem,
}

impl Default for TableConfig {
    fn default() -> Self {
        TableConfig {
            decks: default_decks(),
            players: default_players(),
            counting_system: CountingSystem::default(),
        }
    }
}

impl TableConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: TableConfig =
            serde_json::from_str(json).map_err(|err| AdvisorError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ShoeConfig::new(self.decks)?;
        if !(1..=MAX_PLAYERS).contains(&self.players) {
            return Err(AdvisorError::InvalidPlayerCount(self.players));
        }
        Ok(())
    }

    pub fn shoe(&self) -> Result<ShoeConfig> {
        ShoeConfig::new(self.decks)
    }
}
