//! The update policy state machine.

use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use super::decision::{
    PolicyState, UpdateDecision, UpdatePrompt, DEFAULT_UPDATE_DESCRIPTION, DEFAULT_UPDATE_TITLE,
};
use crate::flags::parse_boolean_flag;
use crate::hooks::{AlertPresenter, LinkOpener, UserAction};
use crate::remote_config::{keys, ConfigMap, RemoteConfig, RemoteConfigError};
use crate::snooze::SnoozeStore;
use crate::storage::KeyValueStore;
use crate::telemetry::ErrorReporter;
use crate::thresholds::{resolve_thresholds, Platform};
use crate::version::{compare_versions, MalformedVersionPolicy, VersionError};

/// Delay before a required-update prompt reappears after the user follows
/// the update link.
pub const DEFAULT_REPROMPT_INTERVAL: Duration = Duration::from_secs(5);

/// Static inputs for the engine.
#[derive(Debug, Clone)]
pub struct PolicySettings {
    pub platform: Platform,
    /// Version of the running app.
    pub current_version: String,
    pub reprompt_interval: Duration,
    pub malformed_versions: MalformedVersionPolicy,
}

impl PolicySettings {
    pub fn new(platform: Platform, current_version: impl Into<String>) -> Self {
        Self {
            platform,
            current_version: current_version.into(),
            reprompt_interval: DEFAULT_REPROMPT_INTERVAL,
            malformed_versions: MalformedVersionPolicy::default(),
        }
    }
}

/// Host-provided side effects.
#[derive(Clone)]
pub struct EngineHooks {
    pub presenter: Arc<dyn AlertPresenter>,
    pub opener: Arc<dyn LinkOpener>,
    pub reporter: Arc<dyn ErrorReporter>,
}

#[derive(Debug, thiserror::Error)]
enum CheckError {
    #[error(transparent)]
    RemoteConfig(#[from] RemoteConfigError),
    #[error(transparent)]
    Version(#[from] VersionError),
}

/// Decides between a forced update, a soft update prompt, or nothing.
///
/// # States
///
/// ```text
/// Idle -> Checking -> ForceBlocked | SoftPrompted | Idle
/// ```
///
/// `ForceBlocked` has no exit driven by the user. Choosing "Update" opens the
/// store link and arms a single re-prompt timer; the same alert comes back
/// when it fires. Only a new check (after the app is updated or the remote
/// flag is turned off) or [`close`](Self::close) leaves the state.
pub struct UpdatePolicyEngine<R, K> {
    remote: R,
    snooze: SnoozeStore<K>,
    hooks: EngineHooks,
    settings: PolicySettings,
    state: PolicyState,
    decision: UpdateDecision,
    reprompt: Option<JoinHandle<()>>,
}

impl<R, K> UpdatePolicyEngine<R, K> {
    pub fn state(&self) -> PolicyState {
        self.state
    }

    /// Decision from the latest check while its prompt is still up.
    pub fn active_decision(&self) -> &UpdateDecision {
        &self.decision
    }

    pub fn settings(&self) -> &PolicySettings {
        &self.settings
    }

    pub fn snooze(&self) -> &SnoozeStore<K> {
        &self.snooze
    }

    /// Returns true while a required-update re-prompt is scheduled.
    pub fn has_pending_reprompt(&self) -> bool {
        self.reprompt
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Tear down the prompt: cancel any re-prompt and return to `Idle`.
    pub fn close(&mut self) {
        self.cancel_reprompt();
        self.settle(UpdateDecision::NoAction);
    }

    fn cancel_reprompt(&mut self) {
        if let Some(handle) = self.reprompt.take() {
            handle.abort();
        }
    }

    fn settle(&mut self, decision: UpdateDecision) {
        self.state = decision.state();
        self.decision = decision;
    }
}

impl<R: RemoteConfig, K: KeyValueStore> UpdatePolicyEngine<R, K> {
    pub fn new(
        remote: R,
        snooze: SnoozeStore<K>,
        hooks: EngineHooks,
        settings: PolicySettings,
    ) -> Self {
        Self {
            remote,
            snooze,
            hooks,
            settings,
            state: PolicyState::Idle,
            decision: UpdateDecision::NoAction,
            reprompt: None,
        }
    }

    /// Run a check now and present whatever it decides.
    pub async fn check_for_update(&mut self) -> UpdateDecision {
        self.check_for_update_at(Utc::now()).await
    }

    /// Run a check as of `now`.
    ///
    /// Never fails: any error is logged, reported, and turned into
    /// [`UpdateDecision::NoAction`].
    pub async fn check_for_update_at(&mut self, now: DateTime<Utc>) -> UpdateDecision {
        self.cancel_reprompt();
        self.state = PolicyState::Checking;

        let decision = match self.evaluate(now).await {
            Ok(decision) => decision,
            Err(e) => {
                tracing::warn!("Update check failed, skipping prompt: {}", e);
                self.hooks.reporter.record_error(&e);
                UpdateDecision::NoAction
            }
        };

        tracing::debug!(state = ?decision.state(), "Update check finished");
        if let Some(alert) = decision.alert() {
            self.hooks.reporter.log(&format!(
                "Update prompt shown: {:?} ({} {})",
                decision.state(),
                self.settings.platform,
                self.settings.current_version
            ));
            self.hooks.presenter.present(&alert);
        }
        self.settle(decision.clone());
        decision
    }

    /// Apply the user's choice on the prompt currently shown.
    pub async fn respond(&mut self, action: UserAction) {
        self.respond_at(action, Utc::now()).await
    }

    pub async fn respond_at(&mut self, action: UserAction, now: DateTime<Utc>) {
        match (self.state, action) {
            (PolicyState::ForceBlocked, UserAction::Update) => {
                self.open_update_url();
                self.schedule_reprompt();
            }
            (PolicyState::SoftPrompted, UserAction::Update) => {
                self.open_update_url();
                self.settle(UpdateDecision::NoAction);
            }
            (PolicyState::SoftPrompted, UserAction::Later) => {
                self.snooze.record_snooze(now).await;
                self.settle(UpdateDecision::NoAction);
            }
            (PolicyState::SoftPrompted, UserAction::Cancel) => {
                self.settle(UpdateDecision::NoAction);
            }
            (state, action) => {
                tracing::debug!(?state, ?action, "Ignoring update prompt action");
            }
        }
    }

    async fn evaluate(&self, now: DateTime<Utc>) -> Result<UpdateDecision, CheckError> {
        if !self.remote.is_ready() {
            return Err(RemoteConfigError::NotInitialized.into());
        }
        let config = self.remote.fetch().await?;

        let thresholds = resolve_thresholds(&config, self.settings.platform);
        let force_enabled = parse_boolean_flag(value(&config, keys::FORCE_UPDATE));
        let soft_enabled = parse_boolean_flag(value(&config, keys::SOFT_UPDATE));
        let current = self.settings.current_version.as_str();
        let policy = self.settings.malformed_versions;

        let prompt = || UpdatePrompt {
            title: value(&config, keys::UPDATE_TITLE)
                .unwrap_or(DEFAULT_UPDATE_TITLE)
                .to_string(),
            description: value(&config, keys::UPDATE_DESCRIPTION)
                .unwrap_or(DEFAULT_UPDATE_DESCRIPTION)
                .to_string(),
            update_url: thresholds.update_url.clone(),
        };

        if force_enabled
            && compare_versions(current, &thresholds.min_supported, policy)? == Ordering::Less
        {
            tracing::info!(
                "App version {} is below minimum supported {}",
                current,
                thresholds.min_supported
            );
            return Ok(UpdateDecision::ForceUpdate(prompt()));
        }

        if soft_enabled && compare_versions(current, &thresholds.latest, policy)? == Ordering::Less
        {
            if self.snooze.is_snooze_active(now).await {
                tracing::debug!("Soft update prompt snoozed");
                return Ok(UpdateDecision::NoAction);
            }
            tracing::info!(
                "App version {} is behind latest {}",
                current,
                thresholds.latest
            );
            return Ok(UpdateDecision::SoftUpdate(prompt()));
        }

        Ok(UpdateDecision::NoAction)
    }

    fn open_update_url(&self) {
        let Some(url) = self
            .decision
            .prompt()
            .and_then(|prompt| prompt.update_url.as_deref())
        else {
            tracing::warn!("No update URL configured for {}", self.settings.platform);
            return;
        };

        if let Err(e) = self.hooks.opener.open(url) {
            tracing::warn!("Failed to open update URL {}: {}", url, e);
            self.hooks.reporter.record_error(&e);
        }
    }

    fn schedule_reprompt(&mut self) {
        self.cancel_reprompt();

        let Some(alert) = self.decision.alert() else {
            return;
        };
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                tracing::warn!("No async runtime available, update prompt will not reappear");
                return;
            }
        };

        let presenter = Arc::clone(&self.hooks.presenter);
        let interval = self.settings.reprompt_interval;
        self.reprompt = Some(runtime.spawn(async move {
            tokio::time::sleep(interval).await;
            tracing::debug!("Re-presenting required update prompt");
            presenter.present(&alert);
        }));
    }
}

impl<R, K> Drop for UpdatePolicyEngine<R, K> {
    fn drop(&mut self) {
        self.cancel_reprompt();
    }
}

fn value<'a>(config: &'a ConfigMap, key: &str) -> Option<&'a str> {
    config.get(key).map(String::as_str)
}
