use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, GameFacts, SignalType, Stage};

/// One tracked game as declared in `config/games.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub app_id: i64,
    pub name: String,
    pub stage: Stage,
    pub release_date: Option<NaiveDate>,
    /// Omitted means "unknown"; an explicit empty list means self-published.
    pub publishers: Option<Vec<String>>,
    pub developer: Option<String>,
    #[serde(default)]
    pub has_demo: bool,
    pub price_eur: Option<f64>,
    pub total_reviews: Option<i64>,
    pub recent_reviews_30d: Option<i64>,
    pub positive_ratio: Option<f64>,
    #[serde(default)]
    pub signals: Vec<SeedSignal>,
}

/// A synthetic signal attached to a seeded game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedSignal {
    pub source: String,
    pub signal_type: SignalType,
    pub text: String,
    pub url: Option<String>,
    #[serde(default)]
    pub confidence: f64,
    pub published_at: Option<DateTime<Utc>>,
}

impl GameConfig {
    #[must_use]
    pub fn steam_url(&self) -> String {
        format!("https://store.steampowered.com/app/{}/", self.app_id)
    }

    #[must_use]
    pub fn to_facts(&self) -> GameFacts {
        GameFacts {
            app_id: self.app_id,
            steam_name: Some(self.name.clone()),
            stage: Some(self.stage),
            release_date: self.release_date,
            publishers: self.publishers.clone(),
            has_demo: self.has_demo,
            price_eur: self.price_eur,
            total_reviews: self.total_reviews,
            recent_reviews_30d: self.recent_reviews_30d,
            positive_ratio: self.positive_ratio,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GamesFile {
    pub games: Vec<GameConfig>,
}

/// Load and validate the games configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_games(path: &Path) -> Result<GamesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::GamesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_games(&content)
}

/// Parse and validate games YAML already in memory.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_games(content: &str) -> Result<GamesFile, ConfigError> {
    let games_file: GamesFile = serde_yaml::from_str(content)?;
    validate_games(&games_file)?;
    Ok(games_file)
}

fn validate_games(games_file: &GamesFile) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for game in &games_file.games {
        if game.app_id <= 0 {
            return Err(ConfigError::Validation(format!(
                "game '{}' has invalid app_id {}; must be positive",
                game.name, game.app_id
            )));
        }

        if game.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "game {} must have a non-empty name",
                game.app_id
            )));
        }

        if !seen_ids.insert(game.app_id) {
            return Err(ConfigError::Validation(format!(
                "duplicate app_id: {}",
                game.app_id
            )));
        }

        if let Some(ratio) = game.positive_ratio {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(ConfigError::Validation(format!(
                    "game {} has positive_ratio {ratio}; must be within 0.0..=1.0",
                    game.app_id
                )));
            }
        }

        if game.price_eur.is_some_and(|p| p < 0.0) {
            return Err(ConfigError::Validation(format!(
                "game {} has a negative price",
                game.app_id
            )));
        }

        for signal in &game.signals {
            if signal.text.trim().is_empty() && signal.url.is_none() {
                return Err(ConfigError::Validation(format!(
                    "game {} has a signal with neither text nor url",
                    game.app_id
                )));
            }
            if !(0.0..=1.0).contains(&signal.confidence) {
                return Err(ConfigError::Validation(format!(
                    "game {} has a signal with confidence {}; must be within 0.0..=1.0",
                    game.app_id, signal.confidence
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "game_config_test.rs"]
mod tests;
