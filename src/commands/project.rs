//! Project context shared by every command

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use regsync::application::{DeleteOptions, DeleteUseCase, ReconcileOptions, ReconcileUseCase};
use regsync::config::{self, Config, ResolvedPaths};
use regsync::infrastructure::{ComposeCli, JsonRegistryRepository, YamlComposeRepository};

pub type Reconcile = ReconcileUseCase<JsonRegistryRepository, YamlComposeRepository, ComposeCli>;
pub type Delete = DeleteUseCase<JsonRegistryRepository, YamlComposeRepository, ComposeCli>;

/// Resolved configuration and paths for one project root
#[derive(Debug, Clone)]
pub struct Project {
    pub config: Config,
    pub paths: ResolvedPaths,
}

impl Project {
    /// Resolve the root and load configuration (CLI flag > env > file > defaults)
    pub fn load(root: Option<&Path>, config_file: Option<&Path>) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to read current directory")?;
        let root = match root {
            Some(root) => absolute(&cwd, root),
            None => cwd.clone(),
        };
        let config_file = config_file.map(|path| absolute(&cwd, path));

        let (config, warnings) = config::resolve(&root, config_file.as_deref())
            .with_context(|| format!("failed to load configuration for {}", root.display()))?;
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }

        let paths = config.resolve_paths(&root);
        tracing::debug!(?paths, "resolved project paths");
        Ok(Self { config, paths })
    }

    pub fn registry_repo(&self) -> JsonRegistryRepository {
        JsonRegistryRepository::new(&self.paths.registry)
    }

    pub fn compose_repo(&self) -> YamlComposeRepository {
        YamlComposeRepository::new(&self.paths.compose)
    }

    pub fn runtime(&self) -> ComposeCli {
        ComposeCli::new(&self.paths.compose)
            .with_compose_command(self.config.runtime.compose_command.clone())
            .with_docker_command(self.config.runtime.docker_command.clone())
            .with_working_dir(self.paths.compose_dir())
    }

    pub fn reconcile(&self) -> Reconcile {
        ReconcileUseCase::new(
            self.registry_repo(),
            self.compose_repo(),
            self.runtime(),
            ReconcileOptions::from_config(&self.config, &self.paths),
        )
    }

    pub fn delete(&self) -> Delete {
        DeleteUseCase::new(
            self.registry_repo(),
            self.compose_repo(),
            self.runtime(),
            DeleteOptions::from_paths(&self.paths),
        )
    }
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}
