use std::io;
use std::process::ExitCode;

use clap::Parser;
use keysmith::{
    ClipboardBackend, ClipboardExporter, GenerationOptions, KeysmithError, PasswordController, PasswordSampler,
    SystemClipboard, clipboard::wait_for_clear,
};
use log::{error, info};
use rand::Rng;
use serde_json::json;

mod cli;
mod ui;

use cli::{Cli, Commands, GenArgs};

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn generate<R: Rng>(mut sampler: PasswordSampler<R>, args: &GenArgs) -> Result<(), KeysmithError> {
    let options = GenerationOptions::new(args.length, args.digits, args.symbols)?;
    let password = sampler.generate_for(&options);

    if args.json {
        println!("{}", json!({ "password": password, "options": options }));
    } else {
        println!("{}", password);
    }

    if let Some(secs) = args.hold_secs() {
        let handle = SystemClipboard.copy_with_timeout(&password, secs)?;
        eprintln!("Holding the clipboard for {}s, then clearing it", secs);
        info!("Clipboard will be cleared in {}s", secs);
        wait_for_clear(handle)?;
    }
    Ok(())
}

fn interactive<R: Rng, B: ClipboardBackend>(controller: PasswordController<R, B>) -> io::Result<()> {
    let stdin = io::stdin();
    ui::run_session(controller, stdin.lock(), io::stdout())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Gen(args) => {
            let result = match args.seed {
                Some(seed) => generate(PasswordSampler::seeded(seed), &args),
                None => generate(PasswordSampler::thread(), &args),
            };
            if let Err(e) = result {
                error!("Generation failed: {}", e);
                eprintln!("{}", e);
                return ExitCode::FAILURE;
            }
        }
        Commands::Interactive { seed } => {
            let exporter = ClipboardExporter::new(SystemClipboard);
            let result = match seed {
                Some(seed) => interactive(PasswordController::new(PasswordSampler::seeded(seed), exporter)),
                None => interactive(PasswordController::new(PasswordSampler::thread(), exporter)),
            };
            if let Err(e) = result {
                error!("Session ended: {}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
