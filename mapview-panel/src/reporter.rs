use mapview_core::{HostCommand, HostError};
use std::sync::Mutex;
use tracing::error;

/// Where failed host requests end up. Nothing is shown to the user and
/// nothing is retried; the report is the only trace.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, command: HostCommand, error: &HostError);
}

/// Logs failures through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ErrorReporter for TracingReporter {
    fn report(&self, command: HostCommand, error: &HostError) {
        error!(command = command.as_str(), "Host request failed: {}", error);
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    reports: Mutex<Vec<(HostCommand, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports received so far, as `(command, error message)`.
    pub fn reports(&self) -> Vec<(HostCommand, String)> {
        match self.reports.lock() {
            Ok(reports) => reports.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.reports().is_empty()
    }
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, command: HostCommand, error: &HostError) {
        let mut reports = match self.reports.lock() {
            Ok(reports) => reports,
            Err(poisoned) => poisoned.into_inner(),
        };
        reports.push((command, error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_reporter_keeps_order() {
        let reporter = RecordingReporter::new();
        reporter.report(HostCommand::SetMap, &HostError::Other("first".into()));
        reporter.report(HostCommand::PopMap, &HostError::Other("second".into()));

        let reports = reporter.reports();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0], (HostCommand::SetMap, "Other error: first".to_string()));
        assert_eq!(reports[1].0, HostCommand::PopMap);
    }
}
