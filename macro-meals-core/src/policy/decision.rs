//! Outcome of an update check and the prompt it shows.

use serde::Serialize;

use crate::hooks::{Alert, AlertButton, ButtonStyle, UserAction};

pub const DEFAULT_UPDATE_TITLE: &str = "Update Available";
pub const DEFAULT_UPDATE_DESCRIPTION: &str =
    "A new version of Macro Meals is available. Update now to get the latest features and improvements.";

/// Where the engine is in its check cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyState {
    Idle,
    Checking,
    /// A non-dismissible update prompt is up. Only a new check leaves it.
    ForceBlocked,
    SoftPrompted,
}

/// Text and link shown on an update prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatePrompt {
    pub title: String,
    pub description: String,
    pub update_url: Option<String>,
}

/// Result of one update check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum UpdateDecision {
    ForceUpdate(UpdatePrompt),
    SoftUpdate(UpdatePrompt),
    NoAction,
}

impl UpdateDecision {
    /// State the engine settles in after producing this decision.
    pub fn state(&self) -> PolicyState {
        match self {
            UpdateDecision::ForceUpdate(_) => PolicyState::ForceBlocked,
            UpdateDecision::SoftUpdate(_) => PolicyState::SoftPrompted,
            UpdateDecision::NoAction => PolicyState::Idle,
        }
    }

    pub fn prompt(&self) -> Option<&UpdatePrompt> {
        match self {
            UpdateDecision::ForceUpdate(prompt) | UpdateDecision::SoftUpdate(prompt) => {
                Some(prompt)
            }
            UpdateDecision::NoAction => None,
        }
    }

    pub fn is_blocking(&self) -> bool {
        matches!(self, UpdateDecision::ForceUpdate(_))
    }

    /// The alert the host should show, if any.
    pub fn alert(&self) -> Option<Alert> {
        match self {
            UpdateDecision::ForceUpdate(prompt) => Some(Alert {
                title: prompt.title.clone(),
                message: prompt.description.clone(),
                buttons: vec![AlertButton::new(
                    "Update",
                    UserAction::Update,
                    ButtonStyle::Default,
                )],
                cancelable: false,
            }),
            UpdateDecision::SoftUpdate(prompt) => Some(Alert {
                title: prompt.title.clone(),
                message: prompt.description.clone(),
                buttons: vec![
                    AlertButton::new("Cancel", UserAction::Cancel, ButtonStyle::Cancel),
                    AlertButton::new("Later", UserAction::Later, ButtonStyle::Default),
                    AlertButton::new("Update", UserAction::Update, ButtonStyle::Default),
                ],
                cancelable: true,
            }),
            UpdateDecision::NoAction => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> UpdatePrompt {
        UpdatePrompt {
            title: DEFAULT_UPDATE_TITLE.to_string(),
            description: DEFAULT_UPDATE_DESCRIPTION.to_string(),
            update_url: Some("https://example.com/app".to_string()),
        }
    }

    #[test]
    fn test_force_alert_is_not_dismissible() {
        let alert = UpdateDecision::ForceUpdate(prompt()).alert().unwrap();
        assert!(!alert.cancelable);
        assert_eq!(alert.buttons.len(), 1);
        assert_eq!(alert.buttons[0].action, UserAction::Update);
    }

    #[test]
    fn test_soft_alert_offers_three_choices() {
        let alert = UpdateDecision::SoftUpdate(prompt()).alert().unwrap();
        assert!(alert.cancelable);
        let actions: Vec<UserAction> = alert.buttons.iter().map(|b| b.action).collect();
        assert_eq!(
            actions,
            vec![UserAction::Cancel, UserAction::Later, UserAction::Update]
        );
        assert_eq!(alert.buttons[0].style, ButtonStyle::Cancel);
    }

    #[test]
    fn test_no_action_has_no_alert() {
        assert!(UpdateDecision::NoAction.alert().is_none());
        assert!(UpdateDecision::NoAction.prompt().is_none());
        assert_eq!(UpdateDecision::NoAction.state(), PolicyState::Idle);
    }

    #[test]
    fn test_decision_serializes_with_tag() {
        let json = serde_json::to_value(UpdateDecision::SoftUpdate(prompt())).unwrap();
        assert_eq!(json["decision"], "soft_update");
        assert_eq!(json["update_url"], "https://example.com/app");

        let json = serde_json::to_value(UpdateDecision::NoAction).unwrap();
        assert_eq!(json["decision"], "no_action");
    }
}
