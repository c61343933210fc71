use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("invalid rank: {0:?}")]
    InvalidRank(String),
    #[error("deck count must be between 1 and 8, got {0}")]
    InvalidDeckCount(u8),
    #[error("player count must be between 1 and 7, got {0}")]
    InvalidPlayerCount(u8),
    #[error("shoe exhausted: all {total} cards have been seen")]
    ShoeExhausted { total: usize },
    #[error("dealer upcard has not been set")]
    MissingDealerUpcard,
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
