#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated home directory and database path for one test.
pub struct Sandbox {
    pub dir: TempDir,
    pub db: String,
}

impl Sandbox {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db = dir.path().join("kpr.db").to_string_lossy().to_string();
        Self { dir, db }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// `kpr --db <sandbox db> --test --no-color <args>` with HOME pointed at the sandbox.
    pub fn kpr(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("kpr");
        cmd.env("HOME", self.dir.path())
            .env("USERPROFILE", self.dir.path())
            .args(["--db", &self.db, "--test", "--no-color"]);
        cmd
    }

    /// Run the command and return its stdout, asserting success.
    pub fn stdout(&self, args: &[&str]) -> String {
        let out = self.kpr().args(args).assert().success();
        String::from_utf8(out.get_output().stdout.clone()).expect("utf-8 stdout")
    }

    /// Run a `--json` list command and parse the result.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        serde_json::from_str(&self.stdout(args)).expect("valid json")
    }
}

/// Initialize the sandbox database through the CLI.
pub fn init_sandbox() -> Sandbox {
    let sb = Sandbox::new();
    sb.kpr().arg("init").assert().success();
    sb
}
