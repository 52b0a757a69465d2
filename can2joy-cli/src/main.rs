//! can2joy - CAN steering wheel to joystick bridge
//!
//! Reads the pedal and steering frames of a car's steering unit from a
//! SocketCAN interface and replays them as a uinput joystick. It uses the
//! can2joy-core library and adds:
//! - Command line and config file handling
//! - The SocketCAN transport and the uinput device
//! - Ctrl-C / SIGTERM shutdown with device teardown

use anyhow::{Context, Result};
use can2joy_core::{RunStats, Translator};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod bus;
mod config;
mod uinput;

use bus::SocketCanSource;
use config::AppConfig;
use uinput::UinputSink;

/// can2joy - Drive a virtual joystick from a CAN steering wheel
#[derive(Parser, Debug)]
#[command(name = "can2joy")]
#[command(about = "Translate CAN steering wheel and pedal frames into joystick events", long_about = None)]
#[command(version)]
struct Args {
    /// CAN interface to read from (e.g. can0)
    #[arg(value_name = "CAN-INTERFACE")]
    interface: Option<String>,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Some(interface) = args.interface.as_deref() else {
        print_usage();
        return ExitCode::FAILURE;
    };

    init_logging(args.verbose, args.quiet);

    match run(interface, &args) {
        Ok(stats) => {
            log::info!("Shut down cleanly: {}", stats);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Set up transport and device, then translate until shutdown
fn run(interface: &str, args: &Args) -> Result<RunStats> {
    log::info!("can2joy v{}", env!("CARGO_PKG_VERSION"));
    log::debug!("Using core library v{}", can2joy_core::VERSION);

    let config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => AppConfig::default(),
    };

    let mut translator = Translator::new(&config.translator).context("Invalid configuration")?;

    let source = SocketCanSource::open(interface, config.translator.read_timeout())
        .with_context(|| format!("Failed to open CAN interface {}", interface))?;

    let sink = UinputSink::create(&config.device).context("Failed to create uinput device")?;

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        ctrlc::set_handler(move || {
            shutdown.store(true, Ordering::Relaxed);
        })
        .context("Failed to install Ctrl-C handler")?;
    }

    log::info!("Translating frames from {} (Ctrl-C to stop)", source.interface());

    // source and sink are moved in and dropped on every return path, which
    // closes the socket and destroys the virtual device.
    let stats = translator
        .run(source, sink, &shutdown)
        .with_context(|| format!("Lost CAN interface {}", interface))?;

    Ok(stats)
}

/// Print the short usage text shown when no interface is given
fn print_usage() {
    let prog = std::env::args()
        .next()
        .unwrap_or_else(|| "can2joy".to_string());

    println!("Usage: {} <can-interface>", prog);
    println!();
    println!("Example: {} can0", prog);
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_argument() {
        let args = Args::try_parse_from(["can2joy", "vcan0"]).unwrap();
        assert_eq!(args.interface.as_deref(), Some("vcan0"));
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_missing_interface_is_not_a_parse_error() {
        let args = Args::try_parse_from(["can2joy"]).unwrap();
        assert!(args.interface.is_none());
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from(["can2joy", "-vv", "--config", "wheel.toml", "can1"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.config, Some(PathBuf::from("wheel.toml")));
        assert_eq!(args.interface.as_deref(), Some("can1"));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Args::try_parse_from(["can2joy", "--bitrate", "500000", "can0"]).is_err());
    }
}
