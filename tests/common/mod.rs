use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

#[allow(dead_code)]
pub const SURVEY_HEADER: &str = "\"Submit Date (UTC)\",\"Are you enjoying Swizec’s Newsletter?\",\"What hesitation did you have about subscribing?\",\"What have you learned from Swizec’s Newsletter?\",\"What have you liked most about the Swizec’s Newsletter?\",\"What are some other benefits you got from Swizec’s Newsletter?\",\"Would you recommend Swizec’s Newsletter to a friend or coworker? Why?\",\"Any other thoughts you'd like to share about Swizec’s Newsletter?\",\"What are you going to use this knowledge for?\"";

#[allow(dead_code)]
pub fn run_survey_digest(args: &[&str]) -> Output {
    TestEnv::new().run(args)
}

pub struct TestEnv {
    home: TempDir,
    config: TempDir,
    data: TempDir,
    ollama_host: Option<String>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            home: tempfile::tempdir().expect("create temporary HOME dir"),
            config: tempfile::tempdir().expect("create temporary XDG config dir"),
            data: tempfile::tempdir().expect("create temporary data dir"),
            ollama_host: None,
        }
    }

    /// Point the binary at a (mock) generation server.
    #[allow(dead_code)]
    pub fn with_ollama(mut self, url: &str) -> Self {
        self.ollama_host = Some(url.to_string());
        self
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_survey-digest"));
        cmd.args(args)
            .current_dir(self.data.path())
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.config.path())
            .env_remove("OLLAMA_HOST")
            .env_remove("RUST_LOG");
        if let Some(host) = &self.ollama_host {
            cmd.env("OLLAMA_HOST", host);
        }
        cmd.output().expect("failed to execute survey-digest binary")
    }

    /// Write a survey file into the working directory and return its path.
    #[allow(dead_code)]
    pub fn write_survey(&self, name: &str, rows: &[&str]) -> PathBuf {
        let mut contents = String::from(SURVEY_HEADER);
        contents.push('\n');
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        self.write_file(name, &contents)
    }

    #[allow(dead_code)]
    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.data.path().join(name);
        std::fs::write(&path, contents).expect("write test file");
        path
    }

    #[allow(dead_code)]
    pub fn config_path(&self) -> PathBuf {
        let output = self.run(&["config", "path"]);
        assert!(
            output.status.success(),
            "config path should succeed\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );

        let path = String::from_utf8_lossy(&output.stdout);
        PathBuf::from(path.trim())
    }

    #[allow(dead_code)]
    pub fn write_config(&self, contents: &str) {
        let config_path = self.config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).expect("create config parent directory");
        }
        std::fs::write(&config_path, contents).expect("write config file");
    }
}
