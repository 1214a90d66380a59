use clap::{Args, ValueEnum};
use macro_meals_core::{
    AlertPresenter, EngineHooks, ErrorReporter, FileStore, NoopPresenter, Platform, SnoozeStore,
    TracingReporter, UpdateDecision, UpdatePolicyEngine, UserAction,
};
use std::sync::Arc;

use crate::config::Config;
use crate::remote::FileRemoteConfig;
use crate::terminal::{SystemLinkOpener, TerminalPresenter};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct CheckCommand {
    /// Platform whose thresholds apply (ios or android)
    #[arg(long)]
    pub platform: Option<Platform>,

    /// Version of the running app
    #[arg(long)]
    pub app_version: Option<String>,

    /// Answer the prompt non-interactively (update, later or cancel)
    #[arg(long)]
    pub respond: Option<UserAction>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl CheckCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut settings = config.policy_settings();
        if let Some(platform) = self.platform {
            settings.platform = platform;
        }
        if let Some(version) = &self.app_version {
            settings.current_version = version.clone();
        }

        let presenter: Arc<dyn AlertPresenter> = match self.format {
            OutputFormat::Text => Arc::new(TerminalPresenter),
            OutputFormat::Json => Arc::new(NoopPresenter),
        };
        let reporter = Arc::new(TracingReporter);
        reporter.set_tag("platform", &settings.platform.to_string());
        reporter.set_tag("app_version", &settings.current_version);

        let hooks = EngineHooks {
            presenter,
            opener: Arc::new(SystemLinkOpener),
            reporter,
        };
        let snooze = SnoozeStore::with_cooldown(
            FileStore::new(config.data_dir.value.clone()),
            config.snooze_cooldown(),
        );
        let remote = FileRemoteConfig::new(config.remote_config_path.value.clone());

        let mut engine = UpdatePolicyEngine::new(remote, snooze, hooks, settings);
        let decision = engine.check_for_update().await;

        if let Some(action) = self.respond {
            engine.respond(action).await;
        }

        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "platform": engine.settings().platform,
                    "current_version": engine.settings().current_version,
                    "result": decision,
                    "state": engine.state(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if decision == UpdateDecision::NoAction {
                    println!(
                        "No update prompt for {} {}",
                        engine.settings().platform,
                        engine.settings().current_version
                    );
                }
                if self.respond.is_some() {
                    println!("State: {:?}", engine.state());
                }
            }
        }

        engine.close();
        Ok(())
    }
}
