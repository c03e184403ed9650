use crate::backend::{HttpBackend, LibraryBackend};
use crate::client::{AdminConsole, AuthFlow, CatalogPage, StudentDashboard};
use crate::clock::{Clock, SystemClock};
use crate::config::Config;
use crate::session::SessionStore;
use crate::Result;
use monlivre_types::Session;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Entry point: one workspace directory, one backend, one session
pub struct MonLivre {
    data_dir: PathBuf,
    config: Arc<Config>,
    backend: Arc<dyn LibraryBackend>,
    clock: Arc<dyn Clock>,
    sessions: SessionStore,
}

impl MonLivre {
    /// Load `config.toml` from `data_dir` and connect over HTTP
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        let config = Config::load_from(&data_dir.join("config.toml"))?;
        Self::open_with(data_dir, config)
    }

    /// Like [`MonLivre::open`] with an already resolved configuration
    pub fn open_with(data_dir: PathBuf, config: Config) -> Result<Self> {
        let backend = Arc::new(HttpBackend::new(&config.backend)?);
        Ok(Self::with_backend(data_dir, config, backend, Arc::new(SystemClock)))
    }

    pub fn with_backend(
        data_dir: PathBuf,
        config: Config,
        backend: Arc<dyn LibraryBackend>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let sessions = SessionStore::in_workspace(&data_dir);
        Self {
            data_dir,
            config: Arc::new(config),
            backend,
            clock,
            sessions,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> Result<Session> {
        self.sessions.load()
    }

    pub fn auth(&self) -> AuthFlow {
        AuthFlow::new(self.backend.clone(), self.sessions.clone())
    }

    pub async fn dashboard(&self) -> Result<StudentDashboard> {
        let session = self.session()?;
        StudentDashboard::open(
            self.backend.clone(),
            self.clock.clone(),
            &session,
            self.config.loans.clone(),
        )
        .await
    }

    pub async fn catalog(&self) -> Result<CatalogPage> {
        let session = self.session()?;
        CatalogPage::open(self.backend.clone(), self.clock.clone(), session).await
    }

    pub async fn admin(&self) -> Result<AdminConsole> {
        AdminConsole::open(self.backend.clone()).await
    }
}
