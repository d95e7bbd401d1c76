use std::path::{Path, PathBuf};

use regex::Regex;

use crate::analyzer::FunctionRecord;
use crate::config::{GLOBAL_FUNCTION_KEY, WhitelistConfig};
use crate::path_utils::{relative_slash_path, to_slash};

/// Decides which files and functions are exempt from documentation checks.
///
/// Checks short-circuit in this order:
/// 1. `main`, unless `check_main_function` is set
/// 2. file path prefix (`files`)
/// 3. function name or exact signature, for the file's key or `"*"` (`functions`)
/// 4. return type (`return_types`)
pub struct WhitelistPolicy {
    config: WhitelistConfig,
    workspace_root: Option<PathBuf>,
    modifiers: Regex,
    pointer_marks: Regex,
}

impl WhitelistPolicy {
    #[must_use]
    pub fn new(config: WhitelistConfig, workspace_root: Option<PathBuf>) -> Self {
        Self {
            config,
            workspace_root,
            modifiers: Regex::new(r"\b(static|const|inline|virtual|constexpr|friend|extern)\b")
                .expect("Invalid regex"),
            pointer_marks: Regex::new(r"[*&]+").expect("Invalid regex"),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &WhitelistConfig {
        &self.config
    }

    /// Path used for whitelist lookups: workspace-relative, forward slashes.
    #[must_use]
    pub fn relative_path(&self, path: &Path) -> String {
        relative_slash_path(path, self.workspace_root.as_deref())
    }

    #[must_use]
    pub fn should_skip(&self, function: &FunctionRecord) -> bool {
        if !self.config.check_main_function && function.function_name == "main" {
            return true;
        }

        self.is_file_whitelisted(&function.file_path)
            || self.is_function_whitelisted(function)
            || self.is_return_type_whitelisted(function)
    }

    /// The file's relative path equals or starts with a configured prefix.
    #[must_use]
    pub fn is_file_whitelisted(&self, path: &Path) -> bool {
        if self.config.file_whitelist.is_empty() {
            return false;
        }

        let rel = self.relative_path(path);
        self.config.file_whitelist.iter().any(|prefix| {
            let prefix = to_slash(prefix);
            !prefix.is_empty() && rel.starts_with(&prefix)
        })
    }

    /// Listed under the file's key or `"*"`, by exact signature or by name.
    #[must_use]
    pub fn is_function_whitelisted(&self, function: &FunctionRecord) -> bool {
        let rel = self.relative_path(&function.file_path);

        [rel.as_str(), GLOBAL_FUNCTION_KEY]
            .into_iter()
            .filter_map(|key| self.config.functions_for(key))
            .any(|names| {
                names.contains(&function.function_signature)
                    || names.contains(&function.function_name)
            })
    }

    /// The cleaned return type, or its last word, equals a configured entry.
    #[must_use]
    pub fn is_return_type_whitelisted(&self, function: &FunctionRecord) -> bool {
        if self.config.return_type_whitelist.is_empty() {
            return false;
        }

        let Some(cleaned) = self.return_type_phrase(function) else {
            return false;
        };
        let base_type = cleaned.split(' ').next_back().unwrap_or_default();

        self.config.return_type_whitelist.iter().any(|entry| {
            let entry = entry.trim();
            !entry.is_empty() && (base_type == entry || cleaned == entry)
        })
    }

    /// Text before the function name, minus modifiers and `*`/`&`, whitespace-collapsed.
    ///
    /// `static const char **name(...)` yields `"char"`; `unsigned long f(...)`
    /// yields `"unsigned long"`.
    #[must_use]
    pub fn return_type_phrase(&self, function: &FunctionRecord) -> Option<String> {
        let sig = function.function_signature.trim();
        let paren = sig.find('(').filter(|&i| i > 0)?;

        let mut before = sig[..paren].trim();
        let name = function.function_name.trim();
        if !name.is_empty()
            && let Some(idx) = before.rfind(name)
        {
            before = before[..idx].trim();
        }
        if before.is_empty() {
            return None;
        }

        let without_modifiers = self.modifiers.replace_all(before, " ");
        let without_marks = self.pointer_marks.replace_all(&without_modifiers, " ");
        let cleaned = without_marks.split_whitespace().collect::<Vec<_>>().join(" ");

        (!cleaned.is_empty()).then_some(cleaned)
    }
}

#[cfg(test)]
#[path = "whitelist_tests.rs"]
mod tests;
