use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Raw ClinVar origins that are reported as germline.
pub const GERMLINE_ORIGINS: &[&str] = &[
    "biparental",
    "de novo",
    "germline",
    "inherited",
    "maternal",
    "not applicable",
    "not provided",
    "paternal",
    "uniparental",
    "unknown",
];

const SOMATIC_ORIGIN: &str = "somatic";

///
/// Controlled allele origin vocabulary. Selects which evidence string shape
/// is emitted.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlleleOrigin {
    Germline,
    Somatic,
}

impl AlleleOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlleleOrigin::Germline => "germline",
            AlleleOrigin::Somatic => "somatic",
        }
    }
}

impl Display for AlleleOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AlleleOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "germline" => Ok(AlleleOrigin::Germline),
            "somatic" => Ok(AlleleOrigin::Somatic),
            _ => Err(format!("Unrecognised allele origin: {}", s)),
        }
    }
}

///
/// Classify raw ClinVar allele origins.
///
/// The result is `Somatic` first when any raw origin is `somatic`, then
/// `Germline` when any raw origin is in [GERMLINE_ORIGINS]. Input case and
/// order do not matter; unrecognised raw origins contribute nothing.
///
pub fn classify_allele_origins<S: AsRef<str>>(raw_origins: &[S]) -> Vec<AlleleOrigin> {
    let folded: Vec<String> = raw_origins
        .iter()
        .map(|origin| origin.as_ref().to_lowercase())
        .collect();

    let mut classified = Vec::with_capacity(2);

    if folded.iter().any(|origin| origin == SOMATIC_ORIGIN) {
        classified.push(AlleleOrigin::Somatic);
    }
    if folded
        .iter()
        .any(|origin| GERMLINE_ORIGINS.contains(&origin.as_str()))
    {
        classified.push(AlleleOrigin::Germline);
    }

    classified
}
