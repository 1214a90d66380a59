use clap::{Args, Subcommand, ValueEnum};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::config::{Config, ConfigValue};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration and sample remote config files
    Init,
}

const DEFAULT_CONFIG: &str = r#"# macromeals configuration

# Directory for local storage (default: platform data dir + macromeals)
# data_dir: ~/.local/share/macromeals

# YAML file standing in for remote config
# remote_config_path: remote_config.yaml

# Platform whose thresholds apply: ios or android
platform: ios

# Version of the running app; quote it when it has a single dot ("1.10")
# current_version: "1.0.0"

# Hours a "Later" hides soft update prompts
snooze_hours: 24

# Seconds before a required update prompt reappears
reprompt_seconds: 5

# reject or treat_as_zero
malformed_versions: reject
"#;

const DEFAULT_REMOTE_CONFIG: &str = r#"# Remote config values read by `macromeals check`
# Quote versions with a single dot ("1.10"), YAML reads them as numbers
force_update: "false"
soft_update: "true"
ios_min_supported_build: 1.0.0
ios_latest_build: 1.0.0
android_min_supported_version_code: "1"
android_latest_version_code: "1"
update_url_ios: https://apps.apple.com/app/macro-meals
update_url_android: https://play.google.com/store/apps/details?id=com.macromeals
update_title: Update Available
"#;

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                Config::default_config_path().display()
                            );
                        }
                        println!();

                        print_value("data_dir", &config.data_dir, |v| {
                            v.display().to_string()
                        });
                        print_value("remote_config_path", &config.remote_config_path, |v| {
                            v.display().to_string()
                        });
                        print_value("platform", &config.platform, |v| v.to_string());
                        print_value("current_version", &config.current_version, |v| v.clone());
                        print_value("snooze_hours", &config.snooze_hours, |v| v.to_string());
                        print_value("reprompt_seconds", &config.reprompt_seconds, |v| {
                            v.to_string()
                        });
                        print_value("malformed_versions", &config.malformed_versions, |v| {
                            format!("{:?}", v)
                        });
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = Config::default_config_path();

                // Check if config already exists
                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'macromeals config show' to view current configuration.");
                    return Ok(());
                }

                write_new_file(&config_path, DEFAULT_CONFIG)?;
                println!("Created config file: {}", config_path.display());

                let remote_path = Config::default_remote_config_path();
                if !remote_path.exists() {
                    write_new_file(&remote_path, DEFAULT_REMOTE_CONFIG)?;
                    println!("Created remote config file: {}", remote_path.display());
                }

                println!("\nEdit these files to customize your settings.");
                Ok(())
            }
        }
    }
}

fn print_value<T>(name: &str, value: &ConfigValue<T>, render: impl Fn(&T) -> String) {
    println!("{}: {}", name, render(&value.value));
    println!("  source: {}", value.source);
    println!();
}

fn write_new_file(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    file.write_all(contents.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_files_parse() {
        let config: serde_yaml::Value = serde_yaml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config["platform"].as_str(), Some("ios"));

        let remote: serde_yaml::Value = serde_yaml::from_str(DEFAULT_REMOTE_CONFIG).unwrap();
        assert_eq!(remote["soft_update"].as_str(), Some("true"));
    }
}
