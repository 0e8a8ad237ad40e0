//! Host configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use game_core::GameConfig;
use runtime::RuntimeConfig;

/// Configuration required to bootstrap a game host.
#[derive(Clone, Debug)]
pub struct BootstrapConfig {
    pub channels: ChannelConfig,
    pub game: GameConfig,
    /// Where the high score is kept. `None` keeps it in memory only.
    pub save_data_dir: Option<PathBuf>,
    pub seed: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            channels: ChannelConfig::default(),
            game: GameConfig::default(),
            save_data_dir: default_save_dir(),
            seed: rand::random(),
        }
    }
}

impl BootstrapConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `WHACK_SAVE_DATA_DIR` - Directory for the high score (default: platform data dir)
    /// - `WHACK_EVENT_BUFFER` - Capacity of each event topic (default: 100)
    /// - `WHACK_COMMAND_BUFFER` - Command queue size (default: 32)
    /// - `WHACK_SEED` - Spawn RNG seed (default: random)
    /// - `WHACK_ROUND_SECONDS` - Round length (default: 30)
    /// - `WHACK_MAX_MISSES` - Misses allowed per round (default: 3)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a caller-supplied variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).map(|value| value.trim().to_owned());
        let parse = |key: &str| read(key).and_then(|value| value.parse::<u64>().ok());

        let mut config = Self::default();

        if let Some(dir) = read("WHACK_SAVE_DATA_DIR").filter(|dir| !dir.is_empty()) {
            config.save_data_dir = Some(PathBuf::from(dir));
        }

        if let Some(capacity) = parse("WHACK_EVENT_BUFFER") {
            config.channels.event_buffer = (capacity as usize).max(1);
        }

        if let Some(capacity) = parse("WHACK_COMMAND_BUFFER") {
            config.channels.command_buffer = (capacity as usize).max(1);
        }

        if let Some(seed) = parse("WHACK_SEED") {
            config.seed = seed;
        }

        if let Some(secs) = parse("WHACK_ROUND_SECONDS").and_then(|v| u32::try_from(v).ok()) {
            config.game = config.game.with_round_duration_secs(secs);
        }

        if let Some(misses) = parse("WHACK_MAX_MISSES").and_then(|v| u32::try_from(v).ok()) {
            config.game = config.game.with_max_misses(misses);
        }

        config
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            game_config: self.game.clone(),
            event_buffer_size: self.channels.event_buffer,
            command_buffer_size: self.channels.command_buffer,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ChannelConfig {
    pub event_buffer: usize,
    pub command_buffer: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            event_buffer: 100,
            command_buffer: 32,
        }
    }
}

/// Platform data directory for the game
///
/// - Linux: `~/.local/share/whack-a-mole` (or `$XDG_DATA_HOME/whack-a-mole`)
/// - macOS: `~/Library/Application Support/whack-a-mole`
/// - Windows: `%APPDATA%\whack-a-mole`
pub fn default_save_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "whack-a-mole").map(|dirs| dirs.data_dir().to_path_buf())
}
