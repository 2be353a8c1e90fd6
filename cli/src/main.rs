// Licensed under the Apache-2.0 license

//! `uvmtb` command line: generate a skeletal UVM testbench tree from a
//! tabular interface description.

mod header;

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode, WriteLogger};
use uvmtb_generator::naming::format_mhz;
use uvmtb_generator::{codegen, parse, GenContext};

/// Fixed-name run log; every invocation mirrors its console output here.
const LOG_FILE: &str = "uvmtb_log.txt";

#[derive(Parser, Debug)]
#[command(
    name = "uvmtb",
    author,
    version,
    about = "Generate a skeletal UVM testbench from a tabular interface description"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parse the description file and generate the testbench tree
    Generate {
        /// Path to the tabular description
        #[arg(short, long, value_name = "FILE", default_value = "UVM_TB_PARAMS.csv")]
        config: PathBuf,

        /// Root directory of the generated tree
        #[arg(short, long, value_name = "DIR", default_value = "verif")]
        output: PathBuf,
    },
    /// Insert the standard banner comment at the top of a file
    InsertHeader {
        /// File to prepend the banner to
        file: PathBuf,

        /// Version recorded in the banner
        #[arg(long, default_value = "1.0.0")]
        version: String,
    },
}

/// Mirrors all log output to the console and the fixed-name run log.
fn init_logging() -> Result<()> {
    let log_file = File::create(LOG_FILE)
        .with_context(|| format!("failed to create {LOG_FILE}"))?;
    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Info, Config::default(), log_file),
    ])?;
    Ok(())
}

fn run_generate(config_path: &Path, output_root: &Path) -> Result<()> {
    let parsed = parse::parse_file(config_path)?;
    for warning in &parsed.warnings {
        warn!("{warning}");
    }

    let cfg = &parsed.config;
    info!(
        "DUT name: {}",
        cfg.dut_name.as_deref().unwrap_or("(missing)")
    );
    info!(
        "Declared interfaces: {}",
        cfg.declared_interface_count
            .map(|c| c.to_string())
            .unwrap_or_else(|| "(not declared)".to_string())
    );
    for (idx, intf) in cfg.interfaces.iter().enumerate() {
        info!(
            "[{}] name: {}, mode: {}, freq: {}, clk: {}, rst: {}, polarity: {}",
            idx + 1,
            intf.name,
            intf.mode,
            intf.clock_frequency_mhz
                .map(|f| format!("{} MHz", format_mhz(f)))
                .unwrap_or_else(|| "-".to_string()),
            intf.clock_signal.as_deref().unwrap_or("-"),
            intf.reset_signal.as_deref().unwrap_or("-"),
            intf.reset_polarity
                .map(|p| p.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    let ctx = GenContext::new(output_root);
    ctx.bootstrap()?;
    codegen::generate_all(cfg, &ctx)?;
    info!(
        "Refer to {} for the full generation summary",
        ctx.summary_path().display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    info!(
        ">> Log started at {} <<",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!(">> uvmtb version {} <<", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Commands::Generate { config, output } => run_generate(config, output),
        Commands::InsertHeader { file, version } => header::insert_header(file, version),
    }
}
