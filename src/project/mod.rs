mod aggregator;
mod cancel;
mod diagnostics;
mod result;

pub use aggregator::{FileOutcome, ProjectAggregator, RunLimits, SkipReason};
pub use cancel::CancellationToken;
pub use diagnostics::{
    DelimiterDiagnostics, Diagnostic, DiagnosticsSource, JsonDiagnostics, NoDiagnostics, Severity,
};
pub use result::CheckRunResult;

/// Observer for run progress.
pub trait ProgressSink {
    /// Called once with the number of candidate files.
    fn begin(&self, _total: usize) {}

    /// Called before each non-whitelisted file with a "checking <path>" message.
    fn report(&self, message: &str);

    /// Called once after the last file.
    fn finish(&self) {}
}

impl<F: Fn(&str)> ProgressSink for F {
    fn report(&self, message: &str) {
        self(message);
    }
}
