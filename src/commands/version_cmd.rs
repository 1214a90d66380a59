use clap::{Args, Subcommand};
use macro_meals_core::{compare_versions, MalformedVersionPolicy};
use std::cmp::Ordering;

#[derive(Args)]
pub struct VersionCommand {
    #[command(subcommand)]
    pub command: VersionSubcommand,
}

#[derive(Subcommand)]
pub enum VersionSubcommand {
    /// Compare two version strings
    Compare {
        a: String,
        b: String,

        /// Read malformed segments as 0 instead of failing
        #[arg(long)]
        lenient: bool,
    },
}

impl VersionCommand {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            VersionSubcommand::Compare { a, b, lenient } => {
                let policy = if *lenient {
                    MalformedVersionPolicy::TreatAsZero
                } else {
                    MalformedVersionPolicy::Reject
                };
                let symbol = match compare_versions(a, b, policy)? {
                    Ordering::Less => "<",
                    Ordering::Equal => "=",
                    Ordering::Greater => ">",
                };
                println!("{} {} {}", a, symbol, b);
                Ok(())
            }
        }
    }
}
