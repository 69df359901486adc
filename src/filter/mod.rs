//! Post-scan filters over a [`PackageList`].
//!
//! Each filter returns a new list in the original order and leaves its input
//! untouched.

pub mod stdlib;

pub use stdlib::is_standard_package;

use crate::error::ProjectError;
use crate::model::PackageList;
use crate::project;
use std::path::Path;
use tracing::debug;

/// Reduces scan results to the packages a project has to vendor.
///
/// Standard packages are dropped unless `include_standard` is set. The
/// project's own packages are always dropped, so its import path must
/// resolve from `project_root`.
pub fn external_packages(
    packages: &PackageList,
    project_root: &Path,
    include_standard: bool,
) -> Result<PackageList, ProjectError> {
    let packages = if include_standard {
        packages.clone()
    } else {
        remove_standard_packages(packages)
    };

    let project_path = project::import_path(project_root)?;
    debug!(project = %project_path, "removing project packages");
    Ok(remove_prefix(&project_path, &packages))
}

/// Drops standard library packages.
pub fn remove_standard_packages(packages: &PackageList) -> PackageList {
    packages.retained(|path| !is_standard_package(path))
}

/// Drops the project's own package and its sub-packages.
///
/// A path is removed when it equals `project` or starts with `project/`.
/// An empty `project` removes nothing.
pub fn remove_prefix(project: &str, packages: &PackageList) -> PackageList {
    if project.is_empty() {
        return packages.clone();
    }
    packages.retained(|path| !is_within(project, path))
}

/// Drops packages matching any of the `*`-glob `patterns`.
pub fn remove_ignored(patterns: &[String], packages: &PackageList) -> PackageList {
    if patterns.is_empty() {
        return packages.clone();
    }
    packages.retained(|path| !patterns.iter().any(|pattern| glob_match(pattern, path)))
}

fn is_within(project: &str, path: &str) -> bool {
    match path.strip_prefix(project) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Simple glob matching (supports * as wildcard).
fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();

    if parts.len() == 1 {
        return pattern == text;
    }

    let mut remaining = text;

    let first = parts[0];
    if !remaining.starts_with(first) {
        return false;
    }
    remaining = &remaining[first.len()..];

    let last = parts[parts.len() - 1];
    if remaining.len() < last.len() || !remaining.ends_with(last) {
        return false;
    }
    remaining = &remaining[..remaining.len() - last.len()];

    for part in &parts[1..parts.len() - 1] {
        if part.is_empty() {
            continue;
        }
        match remaining.find(part) {
            Some(pos) => remaining = &remaining[pos + part.len()..],
            None => return false,
        }
    }

    true
}
