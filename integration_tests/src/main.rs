//! Integration tests for the coordinate beacon firmware.
//!
//! Run right after flashing (or resetting) the firmware: the device accepts
//! one coordinate per boot, so the tests walk through a single input cycle.

mod device;

use clap::Parser;
use colored::Colorize;

use device::{resolve_port, DeviceClient};
use tests::{print_results, run_all_tests};

#[derive(Parser)]
#[command(name = "integration-tests")]
#[command(about = "Integration tests for the coordinate beacon firmware")]
struct Args {
    /// Serial port for the device (use "auto" to auto-detect)
    #[arg(short, long, default_value = "auto")]
    port: String,

    /// Baud rate
    #[arg(short, long, default_value = "115200")]
    baud: u32,

    /// Send the accepted coordinate as Latin-1 instead of UTF-8
    #[arg(long)]
    latin1: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Resolve port (auto-detect if "auto")
    let port = resolve_port(&args.port)?;

    println!("{}", "Coordinate Beacon Integration Tests".bold());
    println!("Port: {}", port);
    println!("Baud: {}", args.baud);
    println!();

    println!("Connecting to device...");
    let mut device = DeviceClient::new(&port, args.baud)?;
    println!("{}", "Connected!".green());

    println!("\nRunning tests...\n");

    let results = run_all_tests(&mut device, args.latin1);
    print_results(&results);

    // Exit with error code if any tests failed
    let failed = results.iter().filter(|r| !r.passed).count();
    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
