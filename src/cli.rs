//! Command-line surface for keysmith. No generation logic lives here.

use clap::{Args, Parser, Subcommand};

/// How long `--copy` keeps the process alive as clipboard owner.
pub const DEFAULT_HOLD_SECS: u64 = 10;

#[derive(Parser, Debug)]
#[command(
    name = "keysmith",
    version,
    about = "Generate random passwords from a few constraints",
    long_about = r#"
keysmith builds a password by drawing characters uniformly from an alphabet
of upper and lowercase letters, optionally extended with digits and symbols.

Typical usage:
  keysmith gen
  keysmith gen --length 20 --digits --symbols --copy
  keysmith interactive

Passwords are never stored. keysmith makes no claim of cryptographic strength.
"#
)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a single password and print it
    Gen(GenArgs),

    /// Start an interactive session that regenerates on every option change
    Interactive {
        /// Seed the random source for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct GenArgs {
    /// Length of the password (6 to 100)
    #[arg(short, long, default_value_t = 8, allow_negative_numbers = true)]
    pub length: i64,

    /// Include digits (0-9)
    #[arg(short, long)]
    pub digits: bool,

    /// Include symbols (e.g. !@#$%)
    #[arg(short, long)]
    pub symbols: bool,

    /// Copy the password to the clipboard, hold it for 10 seconds, then clear it
    #[arg(short, long)]
    pub copy: bool,

    /// Hold and clear the clipboard after this many seconds (implies --copy)
    #[arg(long, value_name = "SECS")]
    pub clear_after: Option<u64>,

    /// Seed the random source for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the password and options as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenArgs {
    /// Seconds to keep the clipboard before clearing, if copying at all.
    pub fn hold_secs(&self) -> Option<u64> {
        self.clear_after.or(self.copy.then_some(DEFAULT_HOLD_SECS))
    }
}
