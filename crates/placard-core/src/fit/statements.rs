use regex::Regex;
use std::sync::LazyLock;

/// Trailing referral sentence appended after the precautionary statements.
pub const SDS_NOTE: &str = "See SDS for complete precautionary information.";

/// Matches the regulatory code token statements are authored with,
/// e.g. "H225:" or "P303+P361+P353:".
static CODE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[PH]\d+(\+[PH]\d+)*:\s*").expect("statement code pattern"));

/// Strip the leading P/H code token from a hazard or precautionary
/// statement, leaving the human-readable sentence. Already-stripped text is
/// returned unchanged, so the operation is idempotent.
pub fn strip_statement_code(statement: &str) -> String {
    CODE_PREFIX.replace(statement, "").into_owned()
}

/// Strip codes from every statement and, when requested, append the fixed
/// SDS referral line. Order-preserving; the note is only added when the
/// input list is non-empty.
pub fn process_precautionary_statements(statements: &[String], add_sds_note: bool) -> Vec<String> {
    let mut processed: Vec<String> = statements
        .iter()
        .map(|s| strip_statement_code(s))
        .collect();

    if add_sds_note && !processed.is_empty() {
        processed.push(SDS_NOTE.to_string());
    }

    processed
}
