//! monctl CLI: command-line OSD control for USB-HID monitors.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use monctl_core::device::{self, DeviceSelector};
use monctl_core::dispatch::{self, DispatchMode, Dispatched};
use monctl_core::protocol::ProtocolVariant;
use monctl_core::registry;
use monctl_core::resolve::CommandRequest;
use tracing::debug;

#[derive(Parser)]
#[command(name = "monctl", version, about = "Set monitor OSD properties over USB HID")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set a property by name or raw address.
    #[command(after_help = properties_help())]
    Set(SetArgs),
    /// List known properties and their ranges.
    List {
        /// Print the property table as JSON.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct SetArgs {
    /// Property to set (see the list below).
    #[arg(long)]
    prop: Option<String>,
    /// Raw property address to set instead of --prop (decimal or 0x-prefixed hex).
    #[arg(long = "prop-num", value_parser = parse_u16)]
    prop_num: Option<u16>,
    /// Value to set the property to.
    #[arg(long, allow_hyphen_values = true)]
    val: Option<i64>,
    /// Dry run: print the report instead of sending it.
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Firmware protocol generation.
    #[arg(long, default_value_t = ProtocolVariant::ShortPlain)]
    variant: ProtocolVariant,
    /// USB vendor ID of the monitor.
    #[arg(long, value_parser = parse_u16, default_value = "0x0BDA")]
    vid: u16,
    /// USB product ID of the monitor.
    #[arg(long, value_parser = parse_u16, default_value = "0x1100")]
    pid: u16,
}

fn properties_help() -> String {
    format!("Available properties:\n{}", registry::help_text())
}

/// Parse a decimal or `0x`-prefixed hex number.
fn parse_u16(s: &str) -> std::result::Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid 16-bit number '{s}': {e}"))
}

fn set(args: SetArgs) -> Result<()> {
    let request = CommandRequest::from_parts(args.prop.as_deref(), args.prop_num, args.val)?;
    debug!(?request, variant = %args.variant, dry_run = args.dry_run, "Parsed set request");
    let report = dispatch::prepare(&request, args.variant)?;

    let mode = if args.dry_run {
        DispatchMode::DryRun
    } else {
        DispatchMode::Write
    };
    let selector = DeviceSelector {
        vid: args.vid,
        pid: args.pid,
    };

    match dispatch::dispatch(&report, mode, || device::open_first(selector))
        .with_context(|| format!("failed to set property on monitor ({selector})"))?
    {
        Dispatched::DryRun(dump) => println!("Would have sent:\n{dump}"),
        Dispatched::Written(_) => println!("Property set."),
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Set(args) => set(args)?,
        Commands::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(registry::PROPERTIES)?);
            } else {
                println!("{}", properties_help());
            }
        }
    }

    Ok(())
}
