use client_core::AlertGateway;
use shared::domain::Severity;

/// Prints alerts; danger goes to stderr.
pub struct TerminalAlerts;

impl AlertGateway for TerminalAlerts {
    fn alert(&self, dismissible: bool, severity: Severity, message: &str) {
        tracing::debug!(dismissible, severity = severity.as_str(), "alert raised");
        match severity {
            Severity::Success => println!("[{severity}] {message}"),
            Severity::Danger => eprintln!("[{severity}] {message}"),
        }
    }
}
