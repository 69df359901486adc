use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;
use vendscan::{
    config::Config,
    filter::{external_packages, remove_ignored},
    model::{OptionSet, PackageList, ScanReport, VendFlags, VendOption},
    output::{format_packages, print_summary, write_packages, OutputFormat},
    scanner::ImportScanner,
};

/// Exit codes
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
}

#[derive(Parser)]
#[command(name = "vendscan")]
#[command(
    author,
    version,
    about = "Scan Go projects for external package imports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a project and list the external packages it imports
    Scan {
        /// Project directory (defaults to the current directory)
        project: Option<PathBuf>,

        /// Write results to this file instead of stdout
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Output format (txt, json, yaml, xml); inferred from --file when omitted
        #[arg(long)]
        format: Option<String>,

        /// Keep standard library packages
        #[arg(short, long)]
        all: bool,

        /// Vendor directory name to skip
        #[arg(long)]
        vendor_dir: Option<String>,

        #[command(flatten)]
        vend: VendArgs,
    },

    /// Show the vend options selected by the given flags
    Options {
        /// Output format (txt, json)
        #[arg(long, default_value = "txt")]
        format: String,

        #[command(flatten)]
        vend: VendArgs,
    },

    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Args, Clone, Copy)]
struct VendArgs {
    /// Update vendored repositories
    #[arg(short, long)]
    update: bool,

    /// Lock the revision of vendored repositories
    #[arg(short, long)]
    lock: bool,

    /// Keep vendored repositories even when unused
    #[arg(long)]
    hold: bool,

    /// Remove vendored packages that are not needed
    #[arg(long)]
    prune: bool,

    /// Do not prune by build tag
    #[arg(short = 't', long = "tags")]
    all_build_tags: bool,

    /// Ignore the source import paths
    #[arg(short, long)]
    ignore: bool,

    /// Log progress while working
    #[arg(short, long)]
    verbose: bool,

    /// Print packages as an indented tree
    #[arg(long)]
    tree: bool,

    /// Print a summary of the scan
    #[arg(short, long)]
    results: bool,

    /// Fail on invalid paths while vendoring (recorded for downstream tools)
    #[arg(long)]
    strict: bool,
}

impl From<VendArgs> for VendFlags {
    fn from(args: VendArgs) -> Self {
        VendFlags {
            update: args.update,
            lock: args.lock,
            hold: args.hold,
            prune: args.prune,
            all_build_tags: args.all_build_tags,
            ignore: args.ignore,
            verbose: args.verbose,
            tree: args.tree,
            results: args.results,
            strict: args.strict,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn run() -> Result<u8> {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Scan { vend, .. } | Commands::Options { vend, .. } => vend.verbose,
        Commands::Config { .. } => false,
    };
    init_tracing(verbose);

    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "using default configuration");
        Config::default()
    });

    match cli.command {
        Commands::Scan {
            project,
            file,
            format,
            all,
            vendor_dir,
            vend,
        } => {
            let options = OptionSet::from_flags(vend.into());
            let request = ScanRequest {
                project: project.unwrap_or_else(|| PathBuf::from(".")),
                file,
                format,
                include_standard: all || config.include_standard,
                vendor_dir: vendor_dir.unwrap_or_else(|| config.vendor_dir.clone()),
                options,
            };
            run_scan(request, &config)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Options { format, vend } => {
            let options = OptionSet::from_flags(vend.into());
            print_options(&options, &format)?;
            Ok(exit_codes::SUCCESS)
        }
        Commands::Config { init, path } => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct ScanRequest {
    project: PathBuf,
    file: Option<PathBuf>,
    format: Option<String>,
    include_standard: bool,
    vendor_dir: String,
    options: OptionSet,
}

fn run_scan(request: ScanRequest, config: &Config) -> Result<()> {
    let options = request.options;
    debug!(options = %options, "resolved vend options");

    let format = match (request.format.as_deref(), request.file.as_deref()) {
        (None, None) => config.default_format.parse::<OutputFormat>()?,
        (format, file) => OutputFormat::resolve(format, file)?,
    };

    let report = if options.contains(VendOption::Ignore) {
        info!("ignoring source import paths");
        ScanReport::new(PackageList::new())
    } else {
        let scanner = ImportScanner::new().with_vendor_dir(request.vendor_dir.as_str());
        scan_with_progress(&scanner, &request.project)?
    };

    let packages =
        external_packages(&report.packages, &request.project, request.include_standard)
            .context("Failed to resolve the project import path")?;
    let packages = remove_ignored(&config.ignore.packages, &packages);

    write_packages(&packages, format, request.file.as_deref())?;

    if options.contains(VendOption::Results) {
        print_summary(&report, packages.len(), &options);
    }
    if let Some(path) = &request.file {
        if std::io::stderr().is_terminal() {
            eprintln!("Results written to: {}", path.display());
        }
    }

    Ok(())
}

fn scan_with_progress(scanner: &ImportScanner, project: &Path) -> Result<ScanReport> {
    let progress = if std::io::stderr().is_terminal() {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Scanning {}...", project.display()));
        Some(pb)
    } else {
        None
    };

    let result = scanner
        .scan(project)
        .with_context(|| format!("Failed to scan {}", project.display()));

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    result
}

fn print_options(options: &OptionSet, format: &str) -> Result<()> {
    match format.to_lowercase().as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(options)?),
        "txt" | "text" => {
            let names: PackageList = options.iter().map(|o| o.as_str()).collect();
            print!("{}", format_packages(&names, OutputFormat::Txt)?);
        }
        other => anyhow::bail!("unsupported format: {}", other),
    }
    Ok(())
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            println!("Config file already exists at: {}", config_path.display());
            return Ok(());
        }

        Config::default().save()?;
        println!("Created config file at: {}", config_path.display());
        println!();
        println!("{}", Config::default().summary());
        return Ok(());
    }

    if config_path.exists() {
        println!("Config file: {}", config_path.display());
    } else {
        println!("No config file at {}; using defaults.", config_path.display());
        println!("Run 'vendscan config --init' to create one.");
    }
    println!();
    println!("{}", Config::load_from(&config_path)?.summary());

    Ok(())
}
