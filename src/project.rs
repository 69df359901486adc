//! Resolution of a project's own import path.
//!
//! A project inside a Go module takes its import path from the nearest
//! `go.mod` `module` directive plus the project's location relative to that
//! file. Otherwise the project must live under `src/` of a `GOPATH`
//! workspace; `GOPATH` defaults to `~/go`.

use crate::error::ProjectError;
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

const MOD_FILE: &str = "go.mod";

/// Derives the canonical import path of the project at `root`.
pub fn import_path(root: impl AsRef<Path>) -> Result<String, ProjectError> {
    let root = root.as_ref();
    let root = root
        .canonicalize()
        .map_err(|source| ProjectError::Canonicalize {
            path: root.to_path_buf(),
            source,
        })?;

    if let Some(path) = module_import_path(&root)? {
        return Ok(path);
    }

    for workspace in gopath_entries() {
        let src = workspace.canonicalize().unwrap_or(workspace).join("src");
        if let Ok(rel) = root.strip_prefix(&src) {
            let path = slash_path(rel);
            if !path.is_empty() {
                debug!(workspace = %src.display(), import_path = %path, "resolved from GOPATH");
                return Ok(path);
            }
        }
    }

    Err(ProjectError::NotInWorkspace { path: root })
}

fn module_import_path(root: &Path) -> Result<Option<String>, ProjectError> {
    for dir in root.ancestors() {
        let mod_file = dir.join(MOD_FILE);
        if !mod_file.is_file() {
            continue;
        }

        let content = fs::read_to_string(&mod_file).map_err(|source| ProjectError::ModFile {
            path: mod_file.clone(),
            source,
        })?;
        let module = parse_module_directive(&content)
            .ok_or_else(|| ProjectError::MissingModule {
                path: mod_file.clone(),
            })?;

        let rel = root.strip_prefix(dir).map(slash_path).unwrap_or_default();
        let path = if rel.is_empty() {
            module
        } else {
            format!("{}/{}", module, rel)
        };
        debug!(mod_file = %mod_file.display(), import_path = %path, "resolved from go.mod");
        return Ok(Some(path));
    }
    Ok(None)
}

/// Extracts the module path from `go.mod` contents.
pub fn parse_module_directive(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = match line.find("//") {
            Some(pos) => &line[..pos],
            None => line,
        };
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with([' ', '\t']) {
            return None;
        }
        let module = rest.trim().trim_matches(|c| c == '"' || c == '`');
        if module.is_empty() {
            None
        } else {
            Some(module.to_string())
        }
    })
}

fn gopath_entries() -> Vec<PathBuf> {
    match env::var_os("GOPATH") {
        Some(value) if !value.is_empty() => env::split_paths(&value)
            .filter(|p| !p.as_os_str().is_empty())
            .collect(),
        _ => dirs::home_dir()
            .map(|home| vec![home.join("go")])
            .unwrap_or_default(),
    }
}

fn slash_path(rel: &Path) -> String {
    rel.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
