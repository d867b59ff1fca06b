use std::process::Stdio;

use notifier_core::config::NotifyConfig;
use tracing::{debug, info, warn};

/// Somewhere to surface "channel went live" messages. Delivery is
/// fire-and-forget: implementations log failures and never return them.
pub trait Notifier {
    async fn notify(&self, message: &str);
}

/// Runs an external notification command (`notify-send` by default) with
/// the message as its single argument.
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    command: String,
    enabled: bool,
}

impl DesktopNotifier {
    pub fn new(config: &NotifyConfig) -> Self {
        Self {
            command: config.command.clone(),
            enabled: config.enabled,
        }
    }
}

impl Notifier for DesktopNotifier {
    async fn notify(&self, message: &str) {
        info!("{}", message);
        if !self.enabled {
            return;
        }

        let status = tokio::process::Command::new(&self.command)
            .arg(message)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(s) if s.success() => debug!("{} delivered", self.command),
            Ok(s) => warn!("{} exited with {}", self.command, s),
            Err(e) => warn!("Failed to run {}: {}", self.command, e),
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn notifier(command: &str, enabled: bool) -> DesktopNotifier {
        DesktopNotifier::new(&NotifyConfig {
            enabled,
            command: command.to_string(),
        })
    }

    #[tokio::test]
    async fn test_successful_command() {
        notifier("true", true).notify("foo is now streaming!").await;
    }

    #[tokio::test]
    async fn test_failures_are_swallowed() {
        notifier("false", true).notify("x").await;
        notifier("/nonexistent/notify-send", true).notify("x").await;
    }

    #[tokio::test]
    async fn test_disabled_never_spawns() {
        notifier("/nonexistent/notify-send", false).notify("x").await;
    }
}
