use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Graph with one direct GPL dependency pulling in an MIT/Apache library
pub const SAMPLE_GRAPH: &str = r#"[project]
group = "com.acme"
artifact = "service"
version = "1.4.0"
name = "Acme Service"

[[artifact]]
group = "org.gpl"
artifact = "engine"
version = "2.0"
direct = true
licenses = ["GNU General Public License v3.0"]

[[artifact]]
group = "org.dual"
artifact = "codec"
version = "1.1"
licenses = ["MIT", "Apache-2.0"]

[[artifact]]
group = "org.bare"
artifact = "util"
version = "0.3"
licenses = []

[[artifact]]
group = "junit"
artifact = "junit"
version = "4.13.2"
scope = "test"
direct = true
licenses = ["GPL-2.0"]
"#;

pub struct TestProject {
    pub dir: TempDir,
    pub binary_path: String,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let binary_path = env!("CARGO_BIN_EXE_licensescan").to_string();

        Self { dir, binary_path }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_graph(&self, content: &str) {
        fs::write(self.path().join("dependency-graph.toml"), content).expect("Failed to write graph");
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.path().join("licensescan.toml"), content).expect("Failed to write config");
    }

    /// Install a POM under `repository/` in Maven layout
    pub fn write_pom(&self, group: &str, artifact: &str, version: &str, content: &str) -> PathBuf {
        let mut dir = self.path().join("repository");
        for segment in group.split('.') {
            dir.push(segment);
        }
        dir.push(artifact);
        dir.push(version);
        fs::create_dir_all(&dir).expect("Failed to create repository dir");

        let path = dir.join(format!("{}-{}.pom", artifact, version));
        fs::write(&path, content).expect("Failed to write pom");
        path
    }

    pub fn results_dir(&self) -> PathBuf {
        self.path().join("target").join("license-scan-results")
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.path())
            .env_remove("LICENSESCAN_LOG")
            .output()
            .expect("Failed to run licensescan")
    }
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}
