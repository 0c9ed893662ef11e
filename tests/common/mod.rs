use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use taeti_report::input::Config;

/// A temporary directory holding a config file, issue table and time log.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    #[must_use]
    pub fn new(config: &str, issues: &str, log: &str) -> Self {
        let dir = tempfile::tempdir().expect("should be able to create a temporary directory");

        fs::write(dir.path().join("config.toml"), config).expect("config should be writable");
        fs::write(dir.path().join("issues.csv"), issues).expect("issues should be writable");
        fs::write(dir.path().join("taeti.log"), log).expect("log should be writable");

        Self { dir }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.toml")
    }

    #[must_use]
    pub fn config(&self) -> Config {
        Config::try_from_toml_file(self.config_path())
            .expect("config should be valid")
            .build()
            .expect("config should be valid")
    }

    /// Generates the report, the errors are formatted with their causes.
    pub fn report(&self) -> Result<String, String> {
        let mut output = Vec::new();

        taeti_report::generate_report(&self.config(), &mut output)
            .map_err(|e| format!("{:#}", e))?;

        Ok(String::from_utf8(output).expect("report should be valid utf-8"))
    }
}

#[must_use]
pub fn make_config(extra: &str) -> String {
    concat!(
        "issues = \"issues.csv\"\n",
        "log = \"taeti.log\"\n",
        "default_project = \"Misc\"\n",
        "color = false\n",
    )
    .to_string()
        + extra
}
