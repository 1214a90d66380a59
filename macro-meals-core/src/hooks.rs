//! Presentation seams used by the update gate.
//!
//! The engine never draws anything. It describes an [`Alert`] and hands it to
//! an [`AlertPresenter`]; following an update link goes through a
//! [`LinkOpener`]. Hosts supply both.

use std::io;

use serde::Serialize;

/// A button choice the user can make on an update prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserAction {
    Update,
    Later,
    Cancel,
}

impl std::str::FromStr for UserAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "update" => Ok(UserAction::Update),
            "later" => Ok(UserAction::Later),
            "cancel" => Ok(UserAction::Cancel),
            _ => Err(format!("Unknown action '{}'", s)),
        }
    }
}

/// Visual style hint for a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Default,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertButton {
    pub label: String,
    pub action: UserAction,
    pub style: ButtonStyle,
}

impl AlertButton {
    pub fn new(label: impl Into<String>, action: UserAction, style: ButtonStyle) -> Self {
        Self {
            label: label.into(),
            action,
            style,
        }
    }
}

/// A dialog to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub title: String,
    pub message: String,
    /// Buttons in display order.
    pub buttons: Vec<AlertButton>,
    /// Whether tapping outside the dialog dismisses it.
    pub cancelable: bool,
}

/// Shows alerts on behalf of the engine.
///
/// Called from the engine's re-prompt timer as well, hence `Send + Sync`.
pub trait AlertPresenter: Send + Sync {
    fn present(&self, alert: &Alert);
}

/// Opens a URL outside the app.
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Presenter that shows nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopPresenter;

impl AlertPresenter for NoopPresenter {
    fn present(&self, _alert: &Alert) {}
}
