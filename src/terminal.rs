//! Terminal implementations of the engine's presentation hooks.

use std::io;

use macro_meals_core::{Alert, AlertPresenter, ButtonStyle, LinkOpener};

/// Prints alerts to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPresenter;

impl AlertPresenter for TerminalPresenter {
    fn present(&self, alert: &Alert) {
        println!("{}", render_alert(alert));
    }
}

pub fn render_alert(alert: &Alert) -> String {
    let mut out = String::new();
    out.push_str(&alert.title);
    out.push('\n');
    out.push_str(&"=".repeat(alert.title.chars().count()));
    out.push_str("\n\n");
    out.push_str(&alert.message);
    out.push_str("\n\n");

    let buttons: Vec<String> = alert
        .buttons
        .iter()
        .map(|button| match button.style {
            ButtonStyle::Cancel => format!("({})", button.label),
            ButtonStyle::Default => format!("[{}]", button.label),
        })
        .collect();
    out.push_str(&buttons.join(" "));

    if !alert.cancelable {
        out.push_str("\n(update required to continue)");
    }
    out
}

/// Opens links with the system handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLinkOpener;

impl LinkOpener for SystemLinkOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        tracing::info!("Opening {}", url);
        open::that(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macro_meals_core::{UpdateDecision, UpdatePrompt};

    fn prompt() -> UpdatePrompt {
        UpdatePrompt {
            title: "Update Available".to_string(),
            description: "Get the new version".to_string(),
            update_url: None,
        }
    }

    #[test]
    fn test_render_soft_alert() {
        let alert = UpdateDecision::SoftUpdate(prompt()).alert().unwrap();
        let rendered = render_alert(&alert);

        assert!(rendered.starts_with("Update Available\n================\n"));
        assert!(rendered.contains("Get the new version"));
        assert!(rendered.contains("(Cancel) [Later] [Update]"));
        assert!(!rendered.contains("required"));
    }

    #[test]
    fn test_render_force_alert() {
        let alert = UpdateDecision::ForceUpdate(prompt()).alert().unwrap();
        let rendered = render_alert(&alert);

        assert!(rendered.contains("[Update]"));
        assert!(!rendered.contains("[Later]"));
        assert!(rendered.ends_with("(update required to continue)"));
    }
}
