use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness running the binary against a throwaway data file.
pub struct CliTestHarness {
    temp_dir: TempDir,
    data_file: PathBuf,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let data_file = temp_dir.path().join("agenda.json");
        Self {
            temp_dir,
            data_file,
        }
    }

    /// A Command wired to this harness's data file. The working directory
    /// is the temp dir so no stray agenda.toml leaks into the run.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("agenda").expect("Failed to find agenda binary");
        cmd.current_dir(self.temp_dir.path());
        cmd.env("AGENDA_DATA_FILE", &self.data_file);
        cmd
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Looks a task id up in the persisted snapshot by task name,
    /// returned in the hyphenated form the file stores.
    pub fn task_id_by_name(&self, name: &str) -> String {
        let raw = std::fs::read_to_string(&self.data_file).expect("snapshot file");
        let snapshot: serde_json::Value = serde_json::from_str(&raw).expect("snapshot json");
        snapshot["tasks"]
            .as_array()
            .expect("tasks array")
            .iter()
            .find(|t| t["name"] == name)
            .map(|t| t["id"].as_str().expect("task id").to_string())
            .unwrap_or_else(|| panic!("task '{name}' not found in snapshot"))
    }

    /// Short-id form of a persisted task: first 8 hex digits.
    pub fn short_task_id(&self, name: &str) -> String {
        self.task_id_by_name(name).replace('-', "")[..8].to_string()
    }
}
