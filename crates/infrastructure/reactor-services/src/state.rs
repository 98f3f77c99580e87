use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use reactor_app_core::StateManager;
use reactor_core::ReactorSetpoints;
use serde::{Deserialize, Serialize};

use crate::ServiceError;

pub const STATE_FILE_NAME: &str = "shell-state.json";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub setpoints: ReactorSetpoints,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Picks the state directory: an explicit path wins, then the environment
/// override, then the per-user config directory.
pub fn resolve_state_dir(explicit: Option<PathBuf>) -> Result<PathBuf, ServiceError> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(reactor_config::STATE_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let dirs = ProjectDirs::from(
        reactor_config::APP_QUALIFIER,
        reactor_config::APP_ORG,
        reactor_config::APP_NAME,
    )
    .ok_or(ServiceError::NoStateDir)?;
    Ok(dirs.config_dir().to_path_buf())
}

/// Keeps shell state in memory and persists it as JSON in one file.
pub struct FileStateManager {
    dir: PathBuf,
    state: Mutex<PersistedState>,
    initialized: AtomicBool,
}

impl FileStateManager {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            state: Mutex::new(PersistedState::default()),
            initialized: AtomicBool::new(false),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STATE_FILE_NAME)
    }

    pub fn snapshot(&self) -> PersistedState {
        self.state.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut PersistedState) -> R) -> R {
        let mut guard = self.state.lock().unwrap_or_else(|p| p.into_inner());
        f(&mut guard)
    }

    fn ensure_initialized(&self) -> Result<(), ServiceError> {
        if self.initialized.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ServiceError::NotInitialized("state manager"))
        }
    }
}

#[async_trait]
impl StateManager for FileStateManager {
    async fn initialize(&self) -> anyhow::Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("Failed to create state directory {}", self.dir.display()))?;
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn load_state(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let path = self.path();
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::info!(path = %path.display(), "no saved state; using defaults");
            return Ok(());
        }

        let content = tokio::fs::read_to_string(&path)
            .await
            .context("Failed to read saved state")?;
        let loaded: PersistedState = serde_json::from_str(&content)
            .map_err(ServiceError::from)
            .with_context(|| format!("Saved state at {} is corrupt", path.display()))?;

        tracing::info!(saved_at = ?loaded.saved_at, "saved state loaded");
        *self.state.lock().unwrap_or_else(|p| p.into_inner()) = loaded;
        Ok(())
    }

    async fn save_state(&self) -> anyhow::Result<()> {
        self.ensure_initialized()?;
        let snapshot = self.update(|state| {
            state.saved_at = Some(Utc::now());
            state.clone()
        });
        let json = serde_json::to_string_pretty(&snapshot).map_err(ServiceError::from)?;
        let path = self.path();

        tokio::task::spawn_blocking(move || atomic_write(&path, json.as_bytes()))
            .await
            .context("State writer task failed")??;
        Ok(())
    }
}

fn atomic_write(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    let tmp_path = {
        let mut name = path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    };

    let mut file = fs::File::create(&tmp_path)
        .with_context(|| format!("Failed to create temp file {}", tmp_path.display()))?;
    file.write_all(contents)
        .with_context(|| format!("Failed to write temp file {}", tmp_path.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to sync temp file {}", tmp_path.display()))?;
    drop(file);

    match fs::rename(&tmp_path, path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            fs::remove_file(path).ok();
            fs::rename(&tmp_path, path)
                .with_context(|| format!("Failed to replace state file {}", path.display()))?;
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!(
                    "Failed to move {} into place at {}",
                    tmp_path.display(),
                    path.display()
                )
            });
        }
    }

    Ok(())
}
