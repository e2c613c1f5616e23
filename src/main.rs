use anyhow::Result;
use clap::{Parser, Subcommand};
use diskpurge::device::BlockDevice;
use diskpurge::system::{SystemDevice, SystemLocator, TargetValidator};
use diskpurge::{audit, fill, orchestrator, ConfirmationGate, EraseConfig, EraseOrchestrator, EraseOutcome};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "diskpurge")]
#[command(about = "Irreversible block-device erasure with hidden-area exposure and DoD overwrite")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Disable safety checks (DANGEROUS!)
    #[arg(long, global = true)]
    unsafe_mode: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Erase a device: expose hidden areas, vendor secure erase, then the
    /// three-pass overwrite
    Wipe {
        /// Device path (e.g. /dev/sdb on Linux, \\.\PhysicalDrive1 on Windows)
        device: PathBuf,

        /// Audit log file
        #[arg(long, default_value = "drive_cleaning.log")]
        log_file: PathBuf,

        /// Write a JSON run report
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Skip HPA/DCO removal
        #[arg(long)]
        no_hpa_dco: bool,

        /// Skip the vendor secure-erase command
        #[arg(long)]
        no_secure_erase: bool,
    },

    /// Resolve the system device and validate a candidate without writing
    Probe {
        /// Device path to check
        device: PathBuf,
    },

    /// Fill a mounted volume with copies of a file until free space runs out
    Fill {
        /// File to copy repeatedly
        source: PathBuf,

        /// Directory on the volume to fill
        target_dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Wipe {
            device,
            log_file,
            report,
            no_hpa_dco,
            no_secure_erase,
        } => {
            if !cli.unsafe_mode && !orchestrator::is_elevated() {
                eprintln!("Error: this program requires elevated privileges for raw device access.");
                eprintln!("Please run with sudo or as an administrator.");
                return Ok(ExitCode::FAILURE);
            }

            let _audit_guard = audit::init(&log_file)?;

            let mut config = EraseConfig::new(device);
            config.expose_hidden_areas = !no_hpa_dco;
            config.vendor_secure_erase = !no_secure_erase;
            config.require_elevation = !cli.unsafe_mode;

            let started = Instant::now();
            let mut orchestrator = EraseOrchestrator::new(config);
            let outcome = orchestrator.execute(&StdinConfirmation);

            if let Some(path) = report {
                let json = serde_json::to_string_pretty(orchestrator.report())?;
                std::fs::write(&path, json)?;
                println!("Run report written to {}", path.display());
            }

            let elapsed = Duration::from_secs(started.elapsed().as_secs());
            println!("Elapsed: {}", humantime::format_duration(elapsed));

            match outcome {
                EraseOutcome::Completed => {
                    println!("Drive erased successfully.");
                    Ok(ExitCode::SUCCESS)
                }
                EraseOutcome::Cancelled => {
                    println!("Operation cancelled. No data was written.");
                    Ok(ExitCode::SUCCESS)
                }
                EraseOutcome::Aborted(e) => {
                    eprintln!("Erase aborted: {}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Commands::Probe { device } => {
            let system = SystemLocator::locate();
            match &system {
                SystemDevice::Known(id) => println!("System device: {}", id),
                SystemDevice::Unknown => println!("System device: unknown"),
            }

            match TargetValidator::validate(&device, &system) {
                Ok(()) => match BlockDevice::probe(&device) {
                    Ok(probed) => {
                        println!(
                            "{}: {} bytes, cleared for erasure",
                            probed.path().display(),
                            probed.capacity()
                        );
                        Ok(ExitCode::SUCCESS)
                    }
                    Err(e) => {
                        println!("{}: validation passed but probe failed: {}", device.display(), e);
                        Ok(ExitCode::FAILURE)
                    }
                },
                Err(e) => {
                    println!("{}: rejected: {}", device.display(), e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Commands::Fill { source, target_dir } => {
            let copies = fill::fill_volume(&source, &target_dir)?;
            println!(
                "Wrote {} copies of {} into {}",
                copies,
                source.display(),
                target_dir.display()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Stdin confirmation gate: only the exact literal token confirms; any other
/// input declines and ends the run with nothing written.
struct StdinConfirmation;

impl ConfirmationGate for StdinConfirmation {
    fn confirm(&self, device: &BlockDevice) -> bool {
        println!(
            "WARNING: This will permanently erase all data on {} ({} bytes).",
            device.path().display(),
            device.capacity()
        );
        print!("Type 'ERASE' to confirm: ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return false;
        }
        input.trim() == "ERASE"
    }
}
