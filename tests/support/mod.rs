use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

pub struct TestStore {
    dir: TempDir,
}

impl TestStore {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    /// A store seeded with the demo fixture.
    pub fn with_demo() -> Self {
        let store = Self::new();
        store.cmd().args(["init", "--demo"]).assert().success();
        store
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.path().join(".anasa").join("store.json")
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(".anasa.toml");
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn write_file(&self, rel_path: &str, contents: &[u8]) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = anasa_cmd();
        cmd.current_dir(self.dir.path());
        cmd.env_remove("ANASA_DIR");
        cmd.env_remove("ANASA_USER");
        cmd
    }

    /// Run a command with --json and return the parsed success envelope.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(args)
            .arg("--json")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&output).expect("json envelope")
    }
}

pub fn anasa_cmd() -> Command {
    Command::cargo_bin("anasa").expect("anasa binary")
}
