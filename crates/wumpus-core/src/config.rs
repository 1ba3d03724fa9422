use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_GRID_SIZE: u8 = 4;
pub const DEFAULT_PIT_COUNT: u8 = 2;
pub const DEFAULT_WUMPUS_COUNT: u8 = 1;
const MAX_GRID_SIZE: u8 = 16;

/// Fixed world constants the agent assumes at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldConfig {
    #[serde(default = "default_grid_size")]
    pub grid_size: u8,
    #[serde(default = "default_pit_count")]
    pub pit_count: u8,
    #[serde(default = "default_wumpus_count")]
    pub wumpus_count: u8,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            pit_count: DEFAULT_PIT_COUNT,
            wumpus_count: DEFAULT_WUMPUS_COUNT,
        }
    }
}

impl WorldConfig {
    pub const fn grid_area(&self) -> u16 {
        self.grid_size as u16 * self.grid_size as u16
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 || self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridSize(self.grid_size));
        }
        // The start square is always pit-free.
        if u16::from(self.pit_count) >= self.grid_area() {
            return Err(ConfigError::PitCount {
                pits: self.pit_count,
                area: self.grid_area(),
            });
        }
        if self.wumpus_count != 1 {
            return Err(ConfigError::WumpusCount(self.wumpus_count));
        }
        Ok(())
    }
}

fn default_grid_size() -> u8 {
    DEFAULT_GRID_SIZE
}

fn default_pit_count() -> u8 {
    DEFAULT_PIT_COUNT
}

fn default_wumpus_count() -> u8 {
    DEFAULT_WUMPUS_COUNT
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    GridSize(u8),
    PitCount { pits: u8, area: u16 },
    WumpusCount(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::GridSize(size) => {
                write!(f, "grid size {size} outside 2..={MAX_GRID_SIZE}")
            }
            ConfigError::PitCount { pits, area } => {
                write!(f, "{pits} pits do not fit a grid of {area} cells")
            }
            ConfigError::WumpusCount(count) => {
                write!(f, "exactly one wumpus is supported, got {count}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_classic_cave() {
        let cfg = WorldConfig::default();
        assert_eq!(cfg.grid_size, 4);
        assert_eq!(cfg.pit_count, 2);
        assert_eq!(cfg.wumpus_count, 1);
        assert_eq!(cfg.grid_area(), 16);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: WorldConfig = serde_json::from_str(r#"{"grid_size":5}"#).unwrap();
        assert_eq!(cfg.grid_size, 5);
        assert_eq!(cfg.pit_count, DEFAULT_PIT_COUNT);
    }

    #[test]
    fn rejects_degenerate_worlds() {
        let tiny = WorldConfig {
            grid_size: 1,
            ..WorldConfig::default()
        };
        assert_eq!(tiny.validate(), Err(ConfigError::GridSize(1)));

        let crowded = WorldConfig {
            pit_count: 16,
            ..WorldConfig::default()
        };
        assert!(matches!(
            crowded.validate(),
            Err(ConfigError::PitCount { pits: 16, area: 16 })
        ));

        let pack = WorldConfig {
            wumpus_count: 2,
            ..WorldConfig::default()
        };
        assert_eq!(pack.validate(), Err(ConfigError::WumpusCount(2)));
    }
}
