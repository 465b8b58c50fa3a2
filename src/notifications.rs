//! Cross-platform notification support
//! Currently only implements macOS notifications

use crate::domain::{FocusPhase, PhaseChange};

#[cfg(target_os = "macos")]
use std::process::Command;

/// Message shown when a focus phase runs out
pub fn phase_message(change: &PhaseChange) -> String {
    match change.from {
        FocusPhase::Work => format!(
            "Focus session {} complete. Time for a {}.",
            change.sessions_completed,
            change.to.label().to_lowercase()
        ),
        FocusPhase::Break | FocusPhase::LongBreak => {
            "Break is over. Ready to focus again?".to_string()
        }
    }
}

/// Send a notification when a focus phase completes on its own
pub fn notify_phase_complete(change: &PhaseChange) {
    let message = phase_message(change);

    #[cfg(target_os = "macos")]
    {
        let script = format!(
            r#"display notification "{}" with title "FocusFlow - {} Complete""#,
            message.replace('"', "\\\""),
            change.from.label()
        );

        if let Err(err) = Command::new("osascript").arg("-e").arg(&script).output() {
            tracing::debug!(error = %err, "notification failed");
        }
    }

    #[cfg(not(target_os = "macos"))]
    {
        // No-op on other platforms
        let _ = message;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_message() {
        let change = PhaseChange {
            from: FocusPhase::Work,
            to: FocusPhase::LongBreak,
            sessions_completed: 4,
        };
        assert_eq!(
            phase_message(&change),
            "Focus session 4 complete. Time for a long break."
        );

        let back = PhaseChange {
            from: FocusPhase::Break,
            to: FocusPhase::Work,
            sessions_completed: 4,
        };
        assert!(phase_message(&back).starts_with("Break is over"));
    }
}
