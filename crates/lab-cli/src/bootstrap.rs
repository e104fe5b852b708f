use std::path::{Path, PathBuf};

use anyhow::Context;
use lab_config::{LabConfig, PROJECT_DIR};

/// Project root holding `.orchid/config.toml` and `.env`.
///
/// An explicit `--project` wins (a path to the `.orchid` directory itself
/// is accepted too). Otherwise the nearest ancestor of the current
/// directory that has a `.orchid` directory; `None` if there is none, in
/// which case only user config and env apply.
pub fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);
        if explicit
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == PROJECT_DIR)
        {
            return explicit
                .parent()
                .map(|parent| Some(parent.to_path_buf()))
                .context("invalid --project path: '.orchid' directory has no parent");
        }
        if explicit.is_dir() {
            return Ok(Some(explicit));
        }
        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    Ok(find_project_root(&start))
}

fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(PROJECT_DIR).is_dir())
        .map(Path::to_path_buf)
}

pub fn load_config(project_root: Option<&Path>) -> anyhow::Result<LabConfig> {
    LabConfig::load_with_dotenv(project_root).context("failed to load orchid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_nearest_ancestor_with_project_dir() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let root = tmp.path().join("lab");
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(root.join(PROJECT_DIR)).expect("mkdir");
        std::fs::create_dir_all(&nested).expect("mkdir");

        assert_eq!(find_project_root(&nested), Some(root));
    }

    #[test]
    fn explicit_project_dir_resolves_to_parent() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let dot_dir = tmp.path().join(PROJECT_DIR);
        std::fs::create_dir_all(&dot_dir).expect("mkdir");

        let root = resolve_project_root(dot_dir.to_str()).expect("resolves");
        assert_eq!(root.as_deref(), Some(tmp.path()));
    }

    #[test]
    fn missing_explicit_project_is_an_error() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let missing = tmp.path().join("nope");
        let err = resolve_project_root(missing.to_str()).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
