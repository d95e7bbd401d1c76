use std::fmt;
use std::path::{Path, PathBuf};

use crate::analyzer::{FunctionParser, ParseErrorCode, SourceScanner, load_source};
use crate::checker::{DocRuleEngine, ProblemRecord, WhitelistPolicy, check_functions};
use crate::config::{Config, DEFAULT_MAX_FILE_SIZE, DEFAULT_MAX_PROBLEMS, ScanConfig};
use crate::scanner::FileEnumerator;
use crate::source_fs::{RealSourceFs, SourceFs};

use super::{
    CancellationToken, CheckRunResult, Diagnostic, DiagnosticsSource, NoDiagnostics, ProgressSink,
};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Run-level limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    /// Files strictly larger than this many bytes are skipped.
    pub max_file_size: u64,
    /// Reaching this many problems stops the run.
    pub max_problems: usize,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_problems: DEFAULT_MAX_PROBLEMS,
        }
    }
}

impl From<&ScanConfig> for RunLimits {
    fn from(scan: &ScanConfig) -> Self {
        Self {
            max_file_size: scan.max_file_size,
            max_problems: scan.max_problems,
        }
    }
}

/// Why a file was not checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Whitelisted,
    MetadataUnavailable,
    TooLarge(u64),
    Unreadable { code: ParseErrorCode, message: String },
    SyntaxErrors,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whitelisted => f.write_str("in whitelist"),
            Self::MetadataUnavailable => f.write_str("unable to read file metadata"),
            #[allow(clippy::cast_precision_loss)]
            Self::TooLarge(size) => write!(f, "file too large: {:.2}MB", *size as f64 / BYTES_PER_MB),
            Self::Unreadable { code, message } => write!(f, "{code}: {message}"),
            Self::SyntaxErrors => f.write_str("has syntax errors"),
        }
    }
}

/// Result of evaluating a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Every function was evaluated; the problems may be empty.
    Checked(Vec<ProblemRecord>),
    /// The file carries error diagnostics and was not scanned.
    SyntaxError(ProblemRecord),
    Skipped(SkipReason),
}

/// Checks every candidate file of a project and collects the problems.
///
/// Files are processed sequentially in enumeration order. Problems of one
/// file are appended together once the whole file has been evaluated.
pub struct ProjectAggregator {
    fs: Box<dyn SourceFs>,
    diagnostics: Box<dyn DiagnosticsSource>,
    policy: WhitelistPolicy,
    scanner: SourceScanner,
    rules: DocRuleEngine,
    limits: RunLimits,
    cancel: CancellationToken,
}

impl ProjectAggregator {
    /// Aggregator over the real filesystem with no diagnostics.
    ///
    /// The whitelist and limits are taken from `config` once, here.
    #[must_use]
    pub fn new(config: &Config, workspace_root: Option<PathBuf>) -> Self {
        Self {
            fs: Box::new(RealSourceFs),
            diagnostics: Box::new(NoDiagnostics),
            policy: WhitelistPolicy::new(config.whitelist.clone(), workspace_root),
            scanner: SourceScanner::new()
                .with_skip_control_statements(config.scan.skip_control_statements),
            rules: DocRuleEngine::new(),
            limits: RunLimits::from(&config.scan),
            cancel: CancellationToken::new(),
        }
    }

    #[must_use]
    pub fn with_source_fs(mut self, fs: impl SourceFs + 'static) -> Self {
        self.fs = Box::new(fs);
        self
    }

    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: impl DiagnosticsSource + 'static) -> Self {
        self.diagnostics = Box::new(diagnostics);
        self
    }

    #[must_use]
    pub const fn with_limits(mut self, limits: RunLimits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> &WhitelistPolicy {
        &self.policy
    }

    /// Check every file the enumerator yields.
    ///
    /// Never fails: enumeration errors produce an unsuccessful result, and
    /// per-file failures become skip reasons.
    pub fn run(
        &self,
        enumerator: &dyn FileEnumerator,
        progress: Option<&dyn ProgressSink>,
    ) -> CheckRunResult {
        let enumeration = match enumerator.enumerate() {
            Ok(enumeration) => enumeration,
            Err(err) => {
                tracing::error!(error = %err, "file enumeration failed");
                return CheckRunResult::fatal(err.to_string());
            }
        };

        let mut result = CheckRunResult::new(enumeration.files.len());
        if enumeration.truncated {
            let cap = enumeration.files.len();
            tracing::warn!(cap, "file limit reached");
            result.note_error(format!(
                "maximum number of files reached ({cap}), only the first {cap} files are checked"
            ));
        }
        if enumeration.files.is_empty() {
            result.note_error("no C/C++ files found");
            return result;
        }

        if let Some(sink) = progress {
            sink.begin(enumeration.files.len());
        }

        for path in &enumeration.files {
            if self.cancel.is_cancelled() {
                tracing::warn!(
                    checked = result.checked_files,
                    total = result.total_files,
                    "check cancelled"
                );
                result.cancelled = true;
                result.note_error("check cancelled");
                break;
            }

            let relative = self.policy.relative_path(path);
            if self.policy.is_file_whitelisted(path) {
                record_skip(&mut result, &relative, &SkipReason::Whitelisted);
                continue;
            }

            if let Some(sink) = progress {
                sink.report(&format!("checking {relative}"));
            }

            let batch = match self.evaluate(path) {
                FileOutcome::Checked(problems) => Some(problems),
                FileOutcome::SyntaxError(problem) => {
                    record_skip(&mut result, &relative, &SkipReason::SyntaxErrors);
                    result.problems.push(problem);
                    None
                }
                FileOutcome::Skipped(reason) => {
                    record_skip(&mut result, &relative, &reason);
                    None
                }
            };
            let counts_as_checked = batch.is_some();
            result.problems.extend(batch.unwrap_or_default());

            if result.problems.len() >= self.limits.max_problems {
                result.problems.truncate(self.limits.max_problems);
                tracing::warn!(max = self.limits.max_problems, "problem limit reached");
                result.note_error(format!(
                    "maximum number of problems reached ({}), check stopped",
                    self.limits.max_problems
                ));
                break;
            }
            if counts_as_checked {
                result.checked_files += 1;
            }
        }

        if let Some(sink) = progress {
            sink.finish();
        }
        tracing::info!(
            total = result.total_files,
            checked = result.checked_files,
            skipped = result.skipped_files.len(),
            problems = result.problems.len(),
            "check finished"
        );
        result
    }

    /// Check one file outside a project run, file whitelist included.
    pub fn check_file(&self, path: &Path) -> FileOutcome {
        if self.policy.is_file_whitelisted(path) {
            return FileOutcome::Skipped(SkipReason::Whitelisted);
        }
        self.evaluate(path)
    }

    fn evaluate(&self, path: &Path) -> FileOutcome {
        let size = match self.fs.file_size(path) {
            Ok(size) => size,
            Err(err) => {
                tracing::debug!(path = %path.display(), error = %err, "stat failed");
                return FileOutcome::Skipped(SkipReason::MetadataUnavailable);
            }
        };
        if size > self.limits.max_file_size {
            return FileOutcome::Skipped(SkipReason::TooLarge(size));
        }

        let content = match load_source(self.fs.as_ref(), path) {
            Ok(content) => content,
            Err((code, message)) => {
                return FileOutcome::Skipped(SkipReason::Unreadable { code, message });
            }
        };

        let errors: Vec<Diagnostic> = self
            .diagnostics
            .diagnostics(path, &content)
            .into_iter()
            .filter(Diagnostic::is_error)
            .collect();
        if let Some(first) = errors.first() {
            return FileOutcome::SyntaxError(syntax_problem(path, first, errors.len()));
        }

        let functions = self.scanner.scan(&content, path);
        FileOutcome::Checked(check_functions(&functions, &self.policy, &self.rules))
    }
}

fn record_skip(result: &mut CheckRunResult, relative: &str, reason: &SkipReason) {
    tracing::debug!(path = relative, reason = %reason, "skipping file");
    result.skipped_files.push(format!("{relative} ({reason})"));
}

fn syntax_problem(path: &Path, first: &Diagnostic, count: usize) -> ProblemRecord {
    let location = format!(
        "{} at line {}, column {}",
        first.message, first.line, first.column
    );
    let description = if count == 1 {
        format!("syntax error: {location}")
    } else {
        format!("{count} syntax errors; first: {location}")
    };
    ProblemRecord::syntax_error(path.to_path_buf(), first.line, first.column, description)
}

#[cfg(test)]
#[path = "aggregator_tests.rs"]
mod tests;
