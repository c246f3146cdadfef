use anyhow::{anyhow, Context, Result};
use std::path::Path;

use crate::Config;
use verifix_suite::{compile_suite, load_suite};

/// Validate the environment before anyone relies on a run: config paths must
/// point somewhere sensible and the default suite must compile.
pub fn doctor(project_root: &Path, cfg: &Config) -> Result<()> {
    let source_root = cfg.source_root(project_root);
    if !source_root.is_dir() {
        return Err(anyhow!(
            "source root is not a directory: {}",
            source_root.display()
        ));
    }

    let report_root = cfg.report_root(project_root);
    std::fs::create_dir_all(&report_root)
        .with_context(|| format!("report root not creatable: {}", report_root.display()))?;

    let suite_path = cfg.default_suite_path(project_root);
    if !suite_path.exists() {
        return Err(anyhow!(
            "default suite not found: {} (set project.default_suite or pass --suite)",
            suite_path.display()
        ));
    }
    let spec = load_suite(&suite_path)?;
    let suite = compile_suite(&spec)?;

    // Missing artifacts fail a run's checks rather than the run itself, but
    // doctor is the place to hear about them early.
    let missing: Vec<String> = suite
        .artifacts
        .iter()
        .filter(|b| !source_root.join(&b.path).exists())
        .map(|b| format!("{} ({})", b.id.as_str(), b.path.display()))
        .collect();
    if !missing.is_empty() {
        return Err(anyhow!("artifacts not found: {}", missing.join(", ")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const SUITE: &str = "suite: s\nartifacts:\n  - id: a\n    path: a.ts\nchecks:\n  - name: c\n    artifact: a\n    require:\n      contains: x\n";

    #[test]
    fn doctor_passes_on_a_complete_setup() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".verifix")).unwrap();
        std::fs::write(root.join(".verifix/suite.yaml"), SUITE).unwrap();
        std::fs::write(root.join("a.ts"), "x").unwrap();
        let mut cfg = Config::default_for_project("p");
        cfg.paths.report_root = ".verifix/reports".into();
        doctor(root, &cfg).unwrap();
    }

    #[test]
    fn doctor_flags_missing_artifacts() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join(".verifix")).unwrap();
        std::fs::write(root.join(".verifix/suite.yaml"), SUITE).unwrap();
        let mut cfg = Config::default_for_project("p");
        cfg.paths.report_root = ".verifix/reports".into();
        let err = doctor(root, &cfg).unwrap_err();
        assert!(err.to_string().contains("artifacts not found"));
    }

    #[test]
    fn doctor_flags_a_missing_suite() {
        let dir = tempdir().unwrap();
        let mut cfg = Config::default_for_project("p");
        cfg.paths.report_root = ".verifix/reports".into();
        let err = doctor(dir.path(), &cfg).unwrap_err();
        assert!(err.to_string().contains("default suite not found"));
    }
}
