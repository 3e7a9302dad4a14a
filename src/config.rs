use std::time::Duration;

use crate::error::GameError;

pub const FPS_VAR: &str = "WORK_PACMAN_FPS";
pub const SEED_VAR: &str = "WORK_PACMAN_SEED";
pub const LOG_VAR: &str = "WORK_PACMAN_LOG";

const DEFAULT_FPS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub fps: u64,
    pub seed: Option<u64>,
    pub log_path: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            seed: None,
            log_path: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, GameError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// A bad frame rate falls back to the default; a bad seed is an error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fps = lookup(FPS_VAR)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_FPS);

        let seed = match lookup(SEED_VAR) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| GameError::InvalidSetting {
                name: SEED_VAR,
                value: raw.clone(),
            })?),
            None => None,
        };

        let log_path = lookup(LOG_VAR).filter(|v| !v.trim().is_empty());

        Ok(Self {
            fps,
            seed,
            log_path,
        })
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_micros(1_000_000 / self.fps.max(1))
    }
}
