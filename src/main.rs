use std::env;
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bsdfetch::config::{self, ColorMode, LogoSource};
use bsdfetch::display::{self, RenderOptions};
use bsdfetch::utils::parsing::basename;
use bsdfetch::{collect_report, detect_variant, logo, FetchError, NativeHost, Result};

const VERSION: &str = env!("CARGO_PKG_VERSION");
const BUILD_DATE: &str = env!("BSDFETCH_BUILD_DATE");

/// Flags only count when given alone, so the usual clap help and
/// version handling is switched off in favour of the classic texts.
#[derive(Parser, Debug, Default)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Cli {
    /// Show this help text
    #[arg(short = 'h')]
    help: bool,

    /// Turn off colors
    #[arg(short = 'n')]
    no_color: bool,

    /// Show version
    #[arg(short = 'v')]
    version: bool,
}

/// The only spellings accepted; clusters like `-hn` run the report.
const FLAGS: [&str; 3] = ["-h", "-n", "-v"];

impl Cli {
    fn from_args(args: &[OsString]) -> Self {
        let sole = match args {
            [_, arg] => arg.to_str(),
            _ => None,
        };
        if !sole.map_or(false, |arg| FLAGS.contains(&arg)) {
            return Cli::default();
        }
        Cli::try_parse_from(args).unwrap_or_default()
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("BSDFETCH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn usage(prog: &str) {
    println!(
        "USAGE: {} [-h|-n|-v]\n   -h  Show this help text\n   -n  Turn off colors\n   -v  Show version",
        prog
    );
}

fn version(prog: &str) {
    println!("{} - version {} ({})", prog, VERSION, BUILD_DATE);
}

fn run(force_no_color: bool) -> Result<()> {
    let config = config::load_config()?;
    let color = !force_no_color
        && match config.display.color {
            ColorMode::Auto => io::stdout().is_terminal(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        };

    let host = NativeHost::new();
    let variant = detect_variant(&host)?;
    debug!(%variant, color, "detected");

    // Asset problems abort before any probe runs
    let logo = match (config.logo.enabled, config.logo.source) {
        (false, _) => None,
        (true, LogoSource::Builtin) => logo::select_logo(variant.name()),
        (true, LogoSource::File) => {
            let dirs = logo::search_paths(config.logo_dir().as_deref());
            Some(logo::load_logo_file(variant, &dirs)?)
        }
    };

    let report = collect_report(&host, variant, &config.policy_for(variant))?;

    let opts = RenderOptions::from_config(&config, color);
    let mut out = io::stdout().lock();
    finish_output(display::render(&mut out, config.display.layout, logo.as_ref(), &report, &opts))
}

/// A reader that went away (`bsdfetch | head -1`) is not a failure.
fn finish_output(result: io::Result<()>) -> Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            debug!("stdout closed early");
            Ok(())
        }
        other => other.map_err(|source| FetchError::Write { source }),
    }
}

fn main() -> ExitCode {
    let args: Vec<OsString> = env::args_os().collect();
    let prog = args
        .first()
        .map(|arg0| basename(&arg0.to_string_lossy()).to_string())
        .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let cli = Cli::from_args(&args);
    if cli.help {
        usage(&prog);
        return ExitCode::SUCCESS;
    }
    if cli.version {
        version(&prog);
        return ExitCode::SUCCESS;
    }

    init_logging();

    match run(cli.no_color) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {}", prog, err);
            ExitCode::FAILURE
        }
    }
}
