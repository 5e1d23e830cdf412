use std::collections::HashSet;

/// Clinical significance labels described in the ClinVar documentation.
/// Used as the allowed set when the caller supplies none.
pub const DEFAULT_ALLOWED_CLINICAL_SIGNIFICANCE: &[&str] = &[
    "unknown",
    "untested",
    "non-pathogenic",
    "probable-non-pathogenic",
    "probable-pathogenic",
    "pathogenic",
    "drug-response",
    "drug response",
    "histocompatibility",
    "other",
    "benign",
    "protective",
    "not provided",
    "likely benign",
    "confers sensitivity",
    "uncertain significance",
    "likely pathogenic",
    "conflicting data from submitters",
    "risk factor",
    "association",
];

///
/// Is `significance` one of the labels ClinVar documents?
///
pub fn is_recognised_significance(significance: &str) -> bool {
    DEFAULT_ALLOWED_CLINICAL_SIGNIFICANCE.contains(&normalise(significance).as_str())
}

fn normalise(significance: &str) -> String {
    significance.trim().to_lowercase()
}

///
/// The set of clinical significances a record must carry to produce evidence.
/// Comparison is case-insensitive.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowedSignificance {
    allowed: HashSet<String>,
}

impl Default for AllowedSignificance {
    fn default() -> Self {
        AllowedSignificance::from_labels(DEFAULT_ALLOWED_CLINICAL_SIGNIFICANCE)
    }
}

impl AllowedSignificance {
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Self {
        let allowed = labels
            .iter()
            .map(|label| normalise(label.as_ref()))
            .filter(|label| !label.is_empty())
            .collect();

        AllowedSignificance { allowed }
    }

    ///
    /// Parse a comma separated list, e.g. `pathogenic,likely pathogenic`.
    /// Empty entries are ignored.
    ///
    pub fn from_comma_separated(list: &str) -> Self {
        let labels: Vec<&str> = list.split(',').collect();
        AllowedSignificance::from_labels(&labels)
    }

    pub fn is_allowed(&self, significance: &str) -> bool {
        self.allowed.contains(&normalise(significance))
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}
