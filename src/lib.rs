pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod output;
pub mod project;
pub mod scanner;

pub use config::Config;
pub use error::{ParseError, ParseErrorKind, ProjectError, ScanError, UnquoteError};
pub use model::{OptionSet, PackageList, ScanReport, VendFlags, VendOption};
pub use scanner::{scan, ImportScanner};
