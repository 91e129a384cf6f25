//! Over-the-air beacon tests.
//!
//! Enters a coordinate over serial, then scans for the beacon and checks that
//! the coordinate reassembled from its advertising data matches.

mod beacon_scanner;
mod device;

use std::time::Duration;

use clap::Parser;
use colored::Colorize;

use beacon_scanner::BeaconScanner;
use device::{resolve_port, DeviceClient, ACCEPTED, ADVERTISING};

#[derive(Parser)]
#[command(name = "beacon-scan-tests")]
#[command(about = "Over-the-air tests for the coordinate beacon")]
struct Args {
    /// Serial port for the device (use "auto" to auto-detect)
    #[arg(short, long, default_value = "auto")]
    port: String,

    /// Baud rate for serial
    #[arg(short, long, default_value = "115200")]
    baud: u32,

    /// Name the beacon advertises
    #[arg(long, default_value = "GeoBeacon")]
    name: String,

    /// Coordinate to enter
    #[arg(long, default_value = "59°24'40.5\"N, 124°44'31.3\"W")]
    coordinate: String,

    /// BLE scan timeout in seconds
    #[arg(long, default_value = "15")]
    scan_timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let port = resolve_port(&args.port)?;

    println!("{}", "Coordinate Beacon Scan Tests".bold());
    println!("Serial: {}", port);
    println!("Beacon: \"{}\"", args.name);
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: coordinate entered over serial
    print!("  Test 1: Coordinate accepted over serial ... ");
    std::io::Write::flush(&mut std::io::stdout())?;
    match enter_coordinate(&port, args.baud, &args.coordinate) {
        Ok(()) => {
            println!("{}", "PASS".green().bold());
            passed += 1;
        }
        Err(e) => {
            println!("{}", "FAIL".red().bold());
            println!("    {}", e.to_string().red());
            failed += 1;
        }
    }

    // Test 2: same coordinate seen on air
    print!("  Test 2: Coordinate advertised ... ");
    std::io::Write::flush(&mut std::io::stdout())?;
    match scan_coordinate(&args.name, &args.coordinate, args.scan_timeout).await {
        Ok(()) => {
            println!("{}", "PASS".green().bold());
            passed += 1;
        }
        Err(e) => {
            println!("{}", "FAIL".red().bold());
            println!("    {}", e.to_string().red());
            failed += 1;
        }
    }

    // Summary
    println!("\n{}", "=".repeat(60));
    println!("{}", "Test Results".bold());
    println!("{}", "=".repeat(60));
    println!(
        "  Total: {} passed, {} failed",
        passed.to_string().green(),
        if failed > 0 {
            failed.to_string().red()
        } else {
            failed.to_string().normal()
        }
    );
    println!("{}", "=".repeat(60));

    if failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn enter_coordinate(port: &str, baud: u32, coordinate: &str) -> anyhow::Result<()> {
    let mut device = DeviceClient::new(port, baud)?;
    device.set_timeout(Duration::from_secs(5));
    device.clear_buffer()?;
    device.send_line(coordinate)?;
    device.wait_for(ACCEPTED)?;
    device.wait_for(ADVERTISING)?;
    Ok(())
}

async fn scan_coordinate(name: &str, expected: &str, scan_timeout: u64) -> anyhow::Result<()> {
    let scanner = BeaconScanner::new().await?;
    let seen = scanner
        .read_coordinate(name, Duration::from_secs(scan_timeout))
        .await?;

    if seen != expected {
        anyhow::bail!("Expected {:?} on air, got {:?}", expected, seen);
    }
    println!("    {}", seen);
    Ok(())
}
