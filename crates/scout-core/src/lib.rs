pub mod actions;
pub mod app_config;
pub mod config;
pub mod game_config;
pub mod games;
pub mod signals;

pub use actions::DealActionType;
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use game_config::{load_games, parse_games, GameConfig, GamesFile, SeedSignal};
pub use games::{GameFacts, PublisherStatus, Stage};
pub use signals::{Signal, SignalSource, SignalType};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read games file {path}: {source}")]
    GamesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse games file: {0}")]
    GamesFileParse(#[from] serde_yaml::Error),

    #[error("games file validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid stage: {0}")]
    InvalidStage(String),

    #[error("invalid publisher status: {0}")]
    InvalidPublisherStatus(String),

    #[error("invalid signal type: {0}")]
    InvalidSignalType(String),

    #[error("invalid action type: {0}")]
    InvalidActionType(String),
}
