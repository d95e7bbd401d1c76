mod problem;
mod rules;
mod whitelist;

pub use problem::{ProblemRecord, ProblemType, SNIPPET_MAX_CHARS, SYNTAX_ERROR_FUNCTION_NAME};
pub use rules::{DocRuleEngine, DocumentationChecker};
pub use whitelist::WhitelistPolicy;

use crate::analyzer::FunctionRecord;

/// Problems for every function the policy does not exempt, in input order.
pub fn check_functions<C: DocumentationChecker + ?Sized>(
    functions: &[FunctionRecord],
    policy: &WhitelistPolicy,
    checker: &C,
) -> Vec<ProblemRecord> {
    functions
        .iter()
        .filter(|f| !policy.should_skip(f))
        .flat_map(|f| checker.check(f))
        .collect()
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
