//! Update gating policy.
//!
//! A host screen calls [`UpdatePolicyEngine::check_for_update`] when it becomes
//! visible. The engine reads remote configuration, resolves the platform's
//! thresholds, consults the snooze record, and settles on one of three
//! outcomes:
//!
//! 1. **Force update** - the force flag is on and the app is below the
//!    minimum supported version. The prompt cannot be dismissed.
//! 2. **Soft update** - the soft flag is on, the app is behind the latest
//!    version, and the user has not chosen "Later" within the cooldown.
//! 3. **No action** - everything else, including every failure.

mod decision;
mod engine;

pub use decision::{
    PolicyState, UpdateDecision, UpdatePrompt, DEFAULT_UPDATE_DESCRIPTION, DEFAULT_UPDATE_TITLE,
};
pub use engine::{EngineHooks, PolicySettings, UpdatePolicyEngine, DEFAULT_REPROMPT_INTERVAL};
