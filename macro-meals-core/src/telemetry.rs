//! Error reporting seam.
//!
//! Crash reporters and error trackers are global SDK singletons on mobile.
//! Here they sit behind [`ErrorReporter`] so the engine and tests never see a
//! vendor SDK.

/// Narrow interface over crash reporting and error tracking.
pub trait ErrorReporter: Send + Sync {
    /// Record a breadcrumb message.
    fn log(&self, message: &str);

    /// Record a handled error.
    fn record_error(&self, error: &(dyn std::error::Error + 'static));

    fn set_user(&self, user_id: &str);

    fn set_tag(&self, key: &str, value: &str);
}

/// Reporter that forwards everything to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn log(&self, message: &str) {
        tracing::info!(target: "macro_meals_core::telemetry", "{}", message);
    }

    fn record_error(&self, error: &(dyn std::error::Error + 'static)) {
        let mut chain = error.to_string();
        let mut source = error.source();
        while let Some(cause) = source {
            chain.push_str(": ");
            chain.push_str(&cause.to_string());
            source = cause.source();
        }
        tracing::error!(target: "macro_meals_core::telemetry", "{}", chain);
    }

    fn set_user(&self, user_id: &str) {
        tracing::debug!(target: "macro_meals_core::telemetry", user_id, "Reporter user set");
    }

    fn set_tag(&self, key: &str, value: &str) {
        tracing::debug!(target: "macro_meals_core::telemetry", key, value, "Reporter tag set");
    }
}
