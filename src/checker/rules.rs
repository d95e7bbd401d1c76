use regex::Regex;

use crate::analyzer::FunctionRecord;

use super::problem::{ProblemRecord, ProblemType};

/// Trait for deriving documentation problems from one function.
pub trait DocumentationChecker {
    /// Problems in fixed order: brief, then each parameter, then return.
    fn check(&self, function: &FunctionRecord) -> Vec<ProblemRecord>;
}

/// Doxygen rule set: `@brief` (or any free text), `@param <name>`, `@return`.
pub struct DocRuleEngine {
    brief_tag: Regex,
    comment_delimiters: Regex,
    return_tag: Regex,
    param_list: Regex,
}

impl Default for DocRuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DocRuleEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            brief_tag: Regex::new(r"@brief\s+\S").expect("Invalid regex"),
            comment_delimiters: Regex::new(r"/\*\*?|\*/|\*").expect("Invalid regex"),
            return_tag: Regex::new(r"@return\s+\S").expect("Invalid regex"),
            param_list: Regex::new(r"\(([^)]*)\)").expect("Invalid regex"),
        }
    }

    /// Either an `@brief` with content, or any text once delimiters are removed.
    fn has_brief(&self, comment: &str) -> bool {
        if comment.is_empty() {
            return false;
        }
        self.brief_tag.is_match(comment)
            || !self
                .comment_delimiters
                .replace_all(comment, "")
                .trim()
                .is_empty()
    }

    fn has_param(comment: &str, name: &str) -> bool {
        if comment.is_empty() {
            return false;
        }
        let pattern = format!(r"(?i)@param\s+{}\s+\S", regex::escape(name));
        Regex::new(&pattern).is_ok_and(|re| re.is_match(comment))
    }

    fn has_return(&self, comment: &str) -> bool {
        !comment.is_empty() && self.return_tag.is_match(comment)
    }

    /// Parameter names from the first parenthesized segment of `signature`.
    ///
    /// `int add(int a, char **out)` yields `["a", "out"]`; `(void)` yields nothing.
    #[must_use]
    pub fn extract_parameters(&self, signature: &str) -> Vec<String> {
        let Some(list) = self.param_list.captures(signature).and_then(|c| c.get(1)) else {
            return Vec::new();
        };

        list.as_str()
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty() && *p != "void")
            .filter_map(|p| p.split_whitespace().last())
            .map(|last| last.replace(['*', '&'], ""))
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Only signatures beginning with `void ` are treated as returning nothing.
    #[must_use]
    pub fn returns_value(signature: &str) -> bool {
        !signature.trim().starts_with("void ")
    }
}

impl DocumentationChecker for DocRuleEngine {
    fn check(&self, function: &FunctionRecord) -> Vec<ProblemRecord> {
        let comment = function.comment.as_str();
        let mut problems = Vec::new();

        if !self.has_brief(comment) {
            problems.push(ProblemRecord::for_function(
                ProblemType::BriefMissing,
                function,
                "missing function description (@brief)".to_string(),
            ));
        }

        for param in self.extract_parameters(&function.function_signature) {
            if !Self::has_param(comment, &param) {
                problems.push(ProblemRecord::for_function(
                    ProblemType::ParamMissing,
                    function,
                    format!("missing description for parameter \"{param}\" (@param {param})"),
                ));
            }
        }

        if Self::returns_value(&function.function_signature) && !self.has_return(comment) {
            problems.push(ProblemRecord::for_function(
                ProblemType::ReturnMissing,
                function,
                "missing return value description (@return)".to_string(),
            ));
        }

        problems
    }
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
