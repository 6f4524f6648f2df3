//! Character Matrix Control Tool
//!
//! CLI for sending styled text and init sequences to a USB HID
//! character-matrix display.

mod config;
mod input;

use anyhow::{Context, Result};
use charmatrix_hw::{
    encode_text, format_packet_line, Background, DisplayWriter, Foreground, SendStatus,
};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::Config;
use input::TextSource;

/// Config file read when `--config` is not given, if present.
const DEFAULT_CONFIG_PATH: &str = "charmatrix.toml";

#[derive(Parser)]
#[command(name = "charmatrixctl")]
#[command(about = "Control tool for USB character-matrix displays")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// USB vendor ID (overrides config)
    #[arg(long, value_parser = parse_id)]
    vid: Option<u16>,

    /// USB product ID (overrides config)
    #[arg(long, value_parser = parse_id)]
    pid: Option<u16>,

    /// Delay between packets in milliseconds (overrides config, floor 10)
    #[arg(long)]
    delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send styled text to the display
    Send {
        #[command(flatten)]
        source: TextSource,

        /// Skip the init sequence after opening the device
        #[arg(long)]
        no_init: bool,
    },
    /// Print the packets a send would write, without touching the device
    Encode {
        #[command(flatten)]
        source: TextSource,
    },
    /// Send only the init sequence
    Init {
        /// Init file (overrides config)
        path: Option<PathBuf>,
    },
    /// List the available colors
    Colors,
    /// Print the resolved configuration, or write it to a file
    Config {
        /// Output file (prints to stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

/// Parses a USB ID in decimal or 0x-prefixed hex.
fn parse_id(s: &str) -> Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid USB ID '{}': {}", s, e))
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::load(DEFAULT_CONFIG_PATH)?,
        None => Config::default(),
    };

    if let Some(vid) = cli.vid {
        config.device.vid = vid;
    }
    if let Some(pid) = cli.pid {
        config.device.pid = pid;
    }
    if let Some(delay) = cli.delay_ms {
        config.write_delay_ms = delay;
    }

    debug!("Using configuration: {:?}", config);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Send { source, no_init } => handle_send(&source, no_init, &config).await,
        Commands::Encode { source } => handle_encode(&source),
        Commands::Init { path } => handle_init(path, &config).await,
        Commands::Colors => {
            handle_colors();
            Ok(())
        }
        Commands::Config { output } => handle_config(output.as_deref(), &config),
    }
}

async fn handle_send(source: &TextSource, no_init: bool, config: &Config) -> Result<()> {
    let blocks = source.blocks()?;
    let options = config.writer_options(!no_init);

    // HID writes and pacing block; keep them off the async workers.
    let status = tokio::task::spawn_blocking(move || -> Result<SendStatus> {
        let writer = DisplayWriter::open(&options).context("Failed to open display")?;
        writer
            .send_text(&blocks)
            .context("Failed to send text to display")
    })
    .await??;

    match status {
        SendStatus::Sent { packets } => println!("Sent {} packets", packets),
        SendStatus::Busy => println!("Display busy, text dropped"),
    }
    Ok(())
}

fn handle_encode(source: &TextSource) -> Result<()> {
    let blocks = source.blocks()?;
    let packets = encode_text(&blocks);
    info!("Encoded {} blocks into {} packets", blocks.len(), packets.len());
    for packet in &packets {
        println!("{}", format_packet_line(packet));
    }
    Ok(())
}

async fn handle_init(path: Option<PathBuf>, config: &Config) -> Result<()> {
    let mut options = config.writer_options(false);
    options.init_file = Some(path.unwrap_or_else(|| config.init.path.clone()));

    tokio::task::spawn_blocking(move || -> Result<()> {
        DisplayWriter::open(&options).context("Failed to send init sequence")?;
        Ok(())
    })
    .await??;

    println!("Init sequence sent");
    Ok(())
}

fn handle_config(output: Option<&Path>, config: &Config) -> Result<()> {
    match output {
        Some(path) => {
            config.save(path)?;
            println!("Configuration written to: {}", path.display());
        }
        None => {
            let content =
                toml::to_string_pretty(config).context("Failed to serialize configuration")?;
            print!("{}", content);
        }
    }
    Ok(())
}

fn handle_colors() {
    println!("Foreground colors:");
    for fg in Foreground::ALL {
        println!("  {} ({})", fg, fg.code());
    }
    println!("Background colors:");
    for bg in Background::ALL {
        println!("  {} ({})", bg, bg.code());
    }
}
