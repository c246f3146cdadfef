use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub project: ProjectConfig,
    pub paths: PathsConfig,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub id: String,
    /// Suite file used when `run` is given no explicit path. Relative to the
    /// project root.
    pub default_suite: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Root all artifact paths resolve against.
    pub source_root: String,
    /// Where per-run report directories land. `~` expands.
    pub report_root: String,
}

impl Config {
    pub fn default_for_project(project_id: &str) -> Self {
        Self {
            project: ProjectConfig {
                id: project_id.to_string(),
                default_suite: ".verifix/suite.yaml".to_string(),
            },
            paths: PathsConfig {
                source_root: ".".to_string(),
                report_root: "~/.verifix/reports".to_string(),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        let cfg: Config = toml::from_str(&s).with_context(|| "parse verifix.toml")?;
        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let s = toml::to_string_pretty(self).with_context(|| "serialize toml")?;
        std::fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    pub fn config_path(project_root: &Path) -> PathBuf {
        project_root.join(".verifix").join("verifix.toml")
    }

    pub fn source_root(&self, project_root: &Path) -> PathBuf {
        resolve(&self.paths.source_root, project_root)
    }

    pub fn report_root(&self, project_root: &Path) -> PathBuf {
        resolve(&self.paths.report_root, project_root)
    }

    pub fn default_suite_path(&self, project_root: &Path) -> PathBuf {
        resolve(&self.project.default_suite, project_root)
    }
}

fn resolve(raw: &str, project_root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(raw).to_string();
    if expanded == "." {
        return project_root.to_path_buf();
    }
    let path = PathBuf::from(expanded);
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}
