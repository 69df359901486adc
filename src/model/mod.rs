//! Core data types for scan results and vendoring options.
//!
//! - [`PackageList`] - Ordered, duplicate-free import paths
//! - [`VendOption`] / [`OptionSet`] - Vendoring behavior toggles
//! - [`ScanReport`] - A scan's packages plus walk statistics
//!
//! # Example
//!
//! ```
//! use vendscan::{OptionSet, PackageList, VendFlags, VendOption};
//!
//! let mut list = PackageList::new();
//! list.push("github.com/foo/bar");
//! list.push("github.com/foo/bar");
//! assert_eq!(list.len(), 1);
//!
//! let options = OptionSet::from_flags(VendFlags { prune: true, ..Default::default() });
//! assert!(options.contains(VendOption::Prune));
//! ```

mod options;
mod package;

pub use options::*;
pub use package::*;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of a successful scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub packages: PackageList,
    /// Source files whose import section was parsed.
    pub files_parsed: usize,
    /// Source files skipped because they carry no package clause.
    pub empty_files: usize,
    /// Directory entries that could not be read.
    pub walk_errors: usize,
    pub scan_time: DateTime<Utc>,
}

impl ScanReport {
    pub fn new(packages: PackageList) -> Self {
        Self {
            packages,
            files_parsed: 0,
            empty_files: 0,
            walk_errors: 0,
            scan_time: Utc::now(),
        }
    }
}
