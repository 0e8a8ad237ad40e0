//! Builds the runtime and config bundle used by hosts.
use anyhow::{Context, Result};
use runtime::{Runtime, RuntimeHandle};

use crate::config::BootstrapConfig;

/// Builder that assembles the runtime from a [`BootstrapConfig`].
pub struct RuntimeBootstrap {
    config: BootstrapConfig,
}

impl RuntimeBootstrap {
    pub fn new(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// Keep the high score in memory regardless of the configured directory.
    pub fn in_memory(mut self) -> Self {
        self.config.save_data_dir = None;
        self
    }

    pub async fn build(self) -> Result<RuntimeSetup> {
        let mut builder = Runtime::builder()
            .config(self.config.runtime_config())
            .seed(self.config.seed);

        if let Some(ref dir) = self.config.save_data_dir {
            builder = builder.save_dir(dir.clone());
        }

        let runtime = builder.build().await.with_context(|| {
            match &self.config.save_data_dir {
                Some(dir) => format!("failed to start runtime with save dir {}", dir.display()),
                None => "failed to start in-memory runtime".to_owned(),
            }
        })?;

        tracing::info!(
            save_dir = ?self.config.save_data_dir,
            round_secs = self.config.game.round_duration_secs,
            "Runtime bootstrapped"
        );

        Ok(RuntimeSetup {
            config: self.config,
            runtime,
        })
    }
}

pub struct RuntimeSetup {
    pub config: BootstrapConfig,
    pub runtime: Runtime,
}

impl RuntimeSetup {
    pub fn handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Phase;
    use tempfile::TempDir;

    #[tokio::test]
    async fn builds_file_backed_runtime() {
        let dir = TempDir::new().unwrap();
        let config = BootstrapConfig {
            save_data_dir: Some(dir.path().join("saves")),
            seed: 9,
            ..BootstrapConfig::default()
        };

        let setup = RuntimeBootstrap::new(config).build().await.unwrap();
        let state = setup.handle().query_state().await.unwrap();
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.moles.len(), 9);
        assert!(dir.path().join("saves").is_dir());

        setup.runtime.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn invalid_rules_surface_context() {
        let mut config = BootstrapConfig::default();
        config.game = config.game.with_points_per_hit(0);

        let err = RuntimeBootstrap::new(config)
            .in_memory()
            .build()
            .await
            .err()
            .unwrap();
        assert!(err.to_string().contains("in-memory runtime"));
    }
}
