use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered, duplicate-free list of import paths.
///
/// Paths keep the order in which they were first pushed. A companion set
/// gives constant-time membership checks without disturbing that order.
#[derive(Debug, Clone, Default)]
pub struct PackageList {
    paths: Vec<String>,
    seen: HashSet<String>,
}

impl PackageList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `path` unless it is already present. Returns whether it was added.
    pub fn push(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.paths.push(path);
        true
    }

    pub fn contains(&self, path: &str) -> bool {
        self.seen.contains(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.paths
    }

    pub fn into_vec(self) -> Vec<String> {
        self.paths
    }

    /// Returns a new list holding the paths for which `keep` is true, in order.
    pub fn retained<F>(&self, mut keep: F) -> PackageList
    where
        F: FnMut(&str) -> bool,
    {
        self.iter().filter(|p| keep(p)).collect()
    }
}

impl PartialEq for PackageList {
    fn eq(&self, other: &Self) -> bool {
        self.paths == other.paths
    }
}

impl Eq for PackageList {}

impl<S: Into<String>> FromIterator<S> for PackageList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut list = PackageList::new();
        for path in iter {
            list.push(path);
        }
        list
    }
}

impl<'a> IntoIterator for &'a PackageList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}

impl Serialize for PackageList {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.paths.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PackageList {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let paths = Vec::<String>::deserialize(deserializer)?;
        Ok(paths.into_iter().collect())
    }
}
