use chrono::Utc;
use clap::{Args, Subcommand};
use macro_meals_core::{FileStore, SnoozeStore};

use crate::config::Config;

#[derive(Args)]
pub struct SnoozeCommand {
    #[command(subcommand)]
    pub command: SnoozeSubcommand,
}

#[derive(Subcommand)]
pub enum SnoozeSubcommand {
    /// Show whether soft update prompts are snoozed
    Status,

    /// Remove the snooze record
    Clear,
}

impl SnoozeCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let snooze = SnoozeStore::with_cooldown(
            FileStore::new(config.data_dir.value.clone()),
            config.snooze_cooldown(),
        );

        match &self.command {
            SnoozeSubcommand::Status => {
                let now = Utc::now();
                match snooze.last_snoozed_at().await {
                    Some(at) => {
                        println!("Last snoozed: {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
                        if snooze.is_snooze_active(now).await {
                            let cooldown = chrono::Duration::from_std(snooze.cooldown())?;
                            let remaining = (at + cooldown) - now;
                            println!(
                                "Active: yes ({}h {}m remaining)",
                                remaining.num_hours(),
                                remaining.num_minutes() % 60
                            );
                        } else {
                            println!("Active: no");
                        }
                    }
                    None => println!("No snooze recorded"),
                }
            }
            SnoozeSubcommand::Clear => {
                snooze.clear().await?;
                println!("Snooze cleared");
            }
        }
        Ok(())
    }
}
