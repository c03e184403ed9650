//! TestWorld pattern for declarative integration test setup.

use anyhow::Result;
use assert_cmd::Command;
use monlivre_runtime::{Config, SessionStore};
use monlivre_types::{Session, UserId};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated workspace directory for CLI runs.
///
/// # Example
/// ```no_run
/// use monlivre_testing::TestWorld;
///
/// let world = TestWorld::new().with_student("42");
///
/// let result = world.run(&["loans", "list"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    format: &'static str,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join(".monlivre");
        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");

        Self {
            temp_dir,
            data_dir,
            format: "plain",
            env_vars: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `config.toml` into the data directory.
    pub fn with_config(self, config: &Config) -> Self {
        config
            .save_to(&self.data_dir.join("config.toml"))
            .expect("Failed to write config");
        self
    }

    /// Point the CLI at `base_url`, keeping other defaults.
    pub fn with_base_url(self, base_url: &str) -> Self {
        let mut config = Config::default();
        config.backend.base_url = base_url.to_string();
        config.backend.timeout_secs = Some(5);
        self.with_config(&config)
    }

    /// Store a logged-in student session.
    pub fn with_student(self, user_id: &str) -> Self {
        self.with_session(Session::student(user_id))
    }

    /// Store a logged-in administrator session.
    pub fn with_admin(self, user_id: &str) -> Self {
        self.with_session(Session::Authenticated {
            user_id: UserId::new(user_id),
            is_admin: true,
        })
    }

    pub fn with_session(self, session: Session) -> Self {
        self.session_store()
            .save(&session)
            .expect("Failed to write session");
        self
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::in_workspace(&self.data_dir)
    }

    /// Switch every subsequent run to `--format json`.
    pub fn json(mut self) -> Self {
        self.format = "json";
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    /// Configure a CLI command with this test environment's settings.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir")
            .arg(self.data_dir())
            .arg("--format")
            .arg(self.format);

        cmd.current_dir(self.temp_dir.path());
        cmd.env_remove("MONLIVRE_PATH");
        cmd.env_remove("MONLIVRE_LOG");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute the `monlivre` binary with `args` and capture its output.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("monlivre")
            .map_err(|e| anyhow::anyhow!("Failed to find monlivre binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
