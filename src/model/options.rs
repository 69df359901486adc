use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single vendoring behavior toggle.
///
/// The declaration order is the canonical order used by [`OptionSet`]
/// iteration and by [`OptionSet::from_flags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VendOption {
    /// Update vendored repositories.
    Update,
    /// Lock the revision of vendored repositories.
    Lock,
    /// Hold onto a vendored repository even when no import path uses it.
    Hold,
    /// Remove vendored packages that are not needed.
    Prune,
    /// Do not prune by build tag when pruning.
    AllBuildTags,
    /// Ignore the source import paths.
    Ignore,
    /// Print packages as they are vendored.
    Verbose,
    /// Print package names as an indented tree.
    Tree,
    /// Print a summary of scanned, skipped and downloaded counts.
    Results,
    /// Fail when a path or revision is invalid.
    Strict,
}

impl VendOption {
    pub const ALL: [VendOption; 10] = [
        VendOption::Update,
        VendOption::Lock,
        VendOption::Hold,
        VendOption::Prune,
        VendOption::AllBuildTags,
        VendOption::Ignore,
        VendOption::Verbose,
        VendOption::Tree,
        VendOption::Results,
        VendOption::Strict,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VendOption::Update => "update",
            VendOption::Lock => "lock",
            VendOption::Hold => "hold",
            VendOption::Prune => "prune",
            VendOption::AllBuildTags => "all-build-tags",
            VendOption::Ignore => "ignore",
            VendOption::Verbose => "verbose",
            VendOption::Tree => "tree",
            VendOption::Results => "results",
            VendOption::Strict => "strict",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for VendOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VendOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_lowercase();
        VendOption::ALL
            .into_iter()
            .find(|opt| opt.as_str() == name)
            .ok_or_else(|| format!("Unknown vend option: {}", s))
    }
}

/// The ten vend toggles as plain booleans, as they arrive from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VendFlags {
    pub update: bool,
    pub lock: bool,
    pub hold: bool,
    pub prune: bool,
    pub all_build_tags: bool,
    pub ignore: bool,
    pub verbose: bool,
    pub tree: bool,
    pub results: bool,
    pub strict: bool,
}

/// The set of vend options active for one invocation.
///
/// Stored as a bitmask, so duplicates cannot occur and iteration always
/// follows the canonical [`VendOption`] order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct OptionSet {
    bits: u16,
}

impl OptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set holding every option whose flag is `true`.
    pub fn from_flags(flags: VendFlags) -> Self {
        let pairs = [
            (flags.update, VendOption::Update),
            (flags.lock, VendOption::Lock),
            (flags.hold, VendOption::Hold),
            (flags.prune, VendOption::Prune),
            (flags.all_build_tags, VendOption::AllBuildTags),
            (flags.ignore, VendOption::Ignore),
            (flags.verbose, VendOption::Verbose),
            (flags.tree, VendOption::Tree),
            (flags.results, VendOption::Results),
            (flags.strict, VendOption::Strict),
        ];

        pairs
            .into_iter()
            .filter(|(on, _)| *on)
            .map(|(_, opt)| opt)
            .collect()
    }

    /// Expands the set back into individual flags.
    pub fn to_flags(&self) -> VendFlags {
        let mut flags = VendFlags::default();
        for option in self.iter() {
            // No wildcard arm: a new option must be handled here.
            match option {
                VendOption::Update => flags.update = true,
                VendOption::Lock => flags.lock = true,
                VendOption::Hold => flags.hold = true,
                VendOption::Prune => flags.prune = true,
                VendOption::AllBuildTags => flags.all_build_tags = true,
                VendOption::Ignore => flags.ignore = true,
                VendOption::Verbose => flags.verbose = true,
                VendOption::Tree => flags.tree = true,
                VendOption::Results => flags.results = true,
                VendOption::Strict => flags.strict = true,
            }
        }
        flags
    }

    pub fn insert(&mut self, option: VendOption) {
        self.bits |= option.bit();
    }

    pub fn contains(&self, option: VendOption) -> bool {
        self.bits & option.bit() != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterates the active options in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = VendOption> + '_ {
        VendOption::ALL
            .into_iter()
            .filter(move |opt| self.contains(*opt))
    }
}

impl FromIterator<VendOption> for OptionSet {
    fn from_iter<I: IntoIterator<Item = VendOption>>(iter: I) -> Self {
        let mut set = OptionSet::new();
        for option in iter {
            set.insert(option);
        }
        set
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|o| o.as_str()).collect();
        write!(f, "{}", names.join(","))
    }
}

impl Serialize for OptionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for OptionSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let options = Vec::<VendOption>::deserialize(deserializer)?;
        Ok(options.into_iter().collect())
    }
}
