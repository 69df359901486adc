//! Import scanning for Go project trees.
//!
//! [`ImportScanner`] walks a project directory depth first, in file-name
//! order, and collects every import path declared by its `.go` files. The
//! vendor directory is never descended into, so already-vendored code is not
//! mistaken for first-party source.
//!
//! # Example
//!
//! ```no_run
//! use vendscan::scanner::ImportScanner;
//!
//! let report = ImportScanner::new().scan(".")?;
//! for path in report.packages.iter() {
//!     println!("{}", path);
//! }
//! # Ok::<(), vendscan::error::ScanError>(())
//! ```

mod parser;
mod unquote;

pub use parser::{parse_imports, ImportSection, ImportSpec};
pub use unquote::unquote;

use crate::error::{ScanError, ScanResult};
use crate::model::{PackageList, ScanReport};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Directory name holding vendored dependencies.
pub const DEFAULT_VENDOR_DIR: &str = "_vendor";

/// File name suffix of Go source files.
pub const SOURCE_EXTENSION: &str = ".go";

/// Characters Go rejects anywhere in an import path.
const ILLEGAL_IMPORT_CHARS: &str = "!\"#$%&'()*,:;<=>?[\\]^{|}`\u{FFFD}";

/// Collects external import paths from a project tree.
#[derive(Debug, Clone)]
pub struct ImportScanner {
    vendor_dir: String,
}

impl ImportScanner {
    pub fn new() -> Self {
        Self {
            vendor_dir: DEFAULT_VENDOR_DIR.to_string(),
        }
    }

    /// Uses `name` as the vendor directory to skip.
    pub fn with_vendor_dir(mut self, name: impl Into<String>) -> Self {
        self.vendor_dir = name.into();
        self
    }

    pub fn vendor_dir(&self) -> &str {
        &self.vendor_dir
    }

    /// Scans the tree rooted at `root`.
    ///
    /// A missing or unlistable `root` is an error. Unreadable entries below
    /// it are logged, counted and skipped. Source files without a package
    /// clause are skipped. Any other parse failure, an unreadable source
    /// file, or a malformed import path aborts the scan and no partial list
    /// is returned.
    pub fn scan(&self, root: impl AsRef<Path>) -> ScanResult<ScanReport> {
        let root = root.as_ref();
        let mut report = ScanReport::new(PackageList::new());

        let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();
        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(ScanError::Root {
                        path: root.to_path_buf(),
                        source: err.into(),
                    });
                }
                Err(err) => {
                    warn!(error = %err, "skipping unreadable directory entry");
                    report.walk_errors += 1;
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                if entry.file_name() == self.vendor_dir.as_str() {
                    debug!(path = %entry.path().display(), "skipping vendor directory");
                    walker.skip_current_dir();
                }
                continue;
            }

            if !entry.file_name().to_string_lossy().ends_with(SOURCE_EXTENSION) {
                continue;
            }

            self.scan_file(entry.path(), &mut report)?;
        }

        info!(
            root = %root.display(),
            packages = report.packages.len(),
            files = report.files_parsed,
            "scan complete"
        );
        Ok(report)
    }

    fn scan_file(&self, path: &Path, report: &mut ScanReport) -> ScanResult<()> {
        let src = fs::read_to_string(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let section = match parse_imports(&src) {
            Ok(section) => section,
            Err(err) if err.is_missing_package() => {
                debug!(path = %path.display(), "skipping file without package clause");
                report.empty_files += 1;
                return Ok(());
            }
            Err(source) => {
                return Err(ScanError::Parse {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        report.files_parsed += 1;
        debug!(
            path = %path.display(),
            package = %section.package,
            imports = section.imports.len(),
            "parsed imports"
        );

        for spec in section.imports {
            let import_path = unquote(&spec.literal).map_err(|source| ScanError::Unquote {
                path: path.to_path_buf(),
                line: spec.line,
                literal: spec.literal.clone(),
                source,
            })?;

            if import_path.is_empty() {
                return Err(ScanError::EmptyImportPath {
                    path: path.to_path_buf(),
                    line: spec.line,
                });
            }
            if !is_valid_import_path(&import_path) {
                return Err(ScanError::InvalidImportPath {
                    path: path.to_path_buf(),
                    line: spec.line,
                    import_path,
                });
            }

            report.packages.push(import_path);
        }

        Ok(())
    }
}

impl Default for ImportScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Reports whether `path` is an import path Go accepts: non-empty, with no
/// whitespace, no non-printing characters and none of the reserved
/// punctuation.
pub fn is_valid_import_path(path: &str) -> bool {
    !path.is_empty()
        && path
            .chars()
            .all(|c| is_graphic(c) && !c.is_whitespace() && !ILLEGAL_IMPORT_CHARS.contains(c))
}

// Letters, marks, numbers, punctuation, symbols and spaces. Control, format
// and private-use code points are not graphic.
fn is_graphic(c: char) -> bool {
    !c.is_control()
        && !matches!(
            c,
            '\u{00AD}'
                | '\u{0600}'..='\u{0605}'
                | '\u{061C}'
                | '\u{06DD}'
                | '\u{070F}'
                | '\u{180E}'
                | '\u{200B}'..='\u{200F}'
                | '\u{202A}'..='\u{202E}'
                | '\u{2060}'..='\u{206F}'
                | '\u{E000}'..='\u{F8FF}'
                | '\u{FEFF}'
                | '\u{FFF9}'..='\u{FFFB}'
        )
}

/// Scans `root` with the default vendor directory and returns its import paths.
pub fn scan(root: impl AsRef<Path>) -> ScanResult<PackageList> {
    ImportScanner::new().scan(root).map(|report| report.packages)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, contents: &str) -> PathBuf {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_scan_deduplicates_in_walk_order() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "a.go",
            "package main\nimport (\n\t\"fmt\"\n\t\"github.com/x/y\"\n)\n",
        );
        write(
            dir.path(),
            "b.go",
            "package main\nimport (\n\t\"os\"\n\t\"fmt\"\n)\n",
        );
        write(dir.path(), "sub/c.go", "package sub\nimport \"github.com/x/y\"\n");

        let report = ImportScanner::new().scan(dir.path()).unwrap();
        assert_eq!(report.packages.as_slice(), ["fmt", "github.com/x/y", "os"]);
        assert_eq!(report.files_parsed, 3);
    }

    #[test]
    fn test_vendor_directory_is_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.go", "package main\nimport \"fmt\"\n");
        write(
            dir.path(),
            "_vendor/github.com/dep/dep.go",
            "package dep\nimport \"encoding/json\"\n",
        );
        write(dir.path(), "z/z.go", "package z\nimport \"strings\"\n");

        let packages = scan(dir.path()).unwrap();
        assert_eq!(packages.as_slice(), ["fmt", "strings"]);
    }

    #[test]
    fn test_custom_vendor_directory() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.go", "package main\nimport \"fmt\"\n");
        write(dir.path(), "vendor/a/a.go", "package a\nimport \"net\"\n");
        write(dir.path(), "_vendor/b/b.go", "package b\nimport \"os\"\n");

        let scanner = ImportScanner::new().with_vendor_dir("vendor");
        let packages = scanner.scan(dir.path()).unwrap().packages;
        assert_eq!(packages.as_slice(), ["os", "fmt"]);
    }

    #[test]
    fn test_non_source_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "README.md", "import \"not/go\"\n");
        write(dir.path(), "main.go.orig", "this is not go");
        write(dir.path(), "dir.go/inner.txt", "nothing");
        write(dir.path(), "main.go", "package main\n");

        let report = ImportScanner::new().scan(dir.path()).unwrap();
        assert!(report.packages.is_empty());
        assert_eq!(report.files_parsed, 1);
    }

    #[test]
    fn test_empty_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "doc.go", "// Nothing here yet.\n");
        write(dir.path(), "empty.go", "");
        write(dir.path(), "main.go", "package main\nimport \"fmt\"\n");

        let report = ImportScanner::new().scan(dir.path()).unwrap();
        assert_eq!(report.packages.as_slice(), ["fmt"]);
        assert_eq!(report.empty_files, 2);
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.go", "package main\nimport \"fmt\"\n");
        write(dir.path(), "b.go", "func main() {}\n");

        let err = ImportScanner::new().scan(dir.path()).unwrap_err();
        match err {
            ScanError::Parse { path, source } => {
                assert!(path.ends_with("b.go"));
                assert_eq!(source.message, "expected 'package', found 'func'");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_literal_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.go", "package main\nimport \"a\\qb\"\n");

        let err = ImportScanner::new().scan(dir.path()).unwrap_err();
        assert!(matches!(err, ScanError::Unquote { line: 2, .. }), "{err}");
    }

    #[test]
    fn test_empty_import_path_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "main.go", "package main\nimport \"\"\n");

        let err = ImportScanner::new().scan(dir.path()).unwrap_err();
        assert!(matches!(err, ScanError::EmptyImportPath { .. }));
    }

    #[test]
    fn test_invalid_import_paths_are_fatal() {
        let cases = [
            ("\"has space\"", "has space"),
            ("\"a:b\"", "a:b"),
            ("\"x\\ty\"", "x\ty"),
            ("\"bad\\uFFFDchar\"", "bad\u{FFFD}char"),
            ("\"zero\\u200Bwidth\"", "zero\u{200B}width"),
        ];
        for (literal, expected) in cases {
            let dir = TempDir::new().unwrap();
            write(dir.path(), "a.go", "package a\nimport \"fmt\"\n");
            write(
                dir.path(),
                "b.go",
                &format!("package b\n\nimport (\n\t\"os\"\n\t{}\n)\n", literal),
            );

            let err = ImportScanner::new().scan(dir.path()).unwrap_err();
            match err {
                ScanError::InvalidImportPath {
                    path,
                    line,
                    import_path,
                } => {
                    assert!(path.ends_with("b.go"));
                    assert_eq!(line, 5);
                    assert_eq!(import_path, expected);
                }
                other => panic!("expected invalid import path for {literal}, got {other}"),
            }
        }
    }

    #[test]
    fn test_import_path_validity() {
        for ok in [
            "fmt",
            "github.com/foo/bar",
            "gopkg.in/yaml.v2",
            "example.com/a-b_c~d+e@v1",
            "例子.com/包",
        ] {
            assert!(is_valid_import_path(ok), "{ok} should be accepted");
        }

        assert!(!is_valid_import_path(""));
        for c in ILLEGAL_IMPORT_CHARS.chars() {
            let path = format!("example.com/a{}b", c);
            assert!(!is_valid_import_path(&path), "{path:?} should be rejected");
        }
        for c in [' ', '\t', '\n', '\u{00A0}', '\u{3000}'] {
            assert!(!is_valid_import_path(&format!("a{}b", c)), "space {c:?}");
        }
        for c in ['\u{0000}', '\u{001B}', '\u{007F}', '\u{200B}', '\u{FEFF}', '\u{E000}'] {
            assert!(!is_valid_import_path(&format!("a{}b", c)), "non-graphic {c:?}");
        }
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = ImportScanner::new().scan(&missing).unwrap_err();
        match err {
            ScanError::Root { path, source } => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected root error, got {other}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_counted_and_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/a.go", "package a\nimport \"fmt\"\n");
        write(dir.path(), "b/b.go", "package b\nimport \"net\"\n");
        write(dir.path(), "c/c.go", "package c\nimport \"os\"\n");

        let locked = dir.path().join("b");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // Privileged users read through mode bits.
        let still_readable = fs::read_dir(&locked).is_ok();
        let result = ImportScanner::new().scan(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        if still_readable {
            return;
        }

        let report = result.unwrap();
        assert_eq!(report.packages.as_slice(), ["fmt", "os"]);
        assert_eq!(report.walk_errors, 1);
        assert_eq!(report.files_parsed, 2);
    }
}
