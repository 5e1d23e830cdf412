use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{EvidenceError, Result};
use crate::significance::AllowedSignificance;

///
/// Run configuration, read from a TOML file and/or assembled from command
/// line flags. Every field is optional here so that partial configurations
/// can be layered with [RunConfig::merge]; [RunConfig::resolve] checks that
/// the required paths are present.
///
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    pub efo_mapping: Option<PathBuf>,
    pub gene_mapping: Option<PathBuf>,
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub schema: Option<PathBuf>,
    pub allowed_clinical_significance: Option<Vec<String>>,
}

///
/// A complete run configuration.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRunConfig {
    pub efo_mapping: PathBuf,
    pub gene_mapping: PathBuf,
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub schema: Option<PathBuf>,
    pub allowed: AllowedSignificance,
}

impl TryFrom<&Path> for RunConfig {
    type Error = EvidenceError;

    fn try_from(path: &Path) -> Result<Self> {
        let toml_str = read_to_string(path)?;
        let config = toml::from_str(&toml_str)?;
        Ok(config)
    }
}

impl RunConfig {
    ///
    /// Layer `overrides` on top of `self`. Values set in `overrides` win.
    ///
    pub fn merge(self, overrides: RunConfig) -> RunConfig {
        RunConfig {
            efo_mapping: overrides.efo_mapping.or(self.efo_mapping),
            gene_mapping: overrides.gene_mapping.or(self.gene_mapping),
            input: overrides.input.or(self.input),
            output_dir: overrides.output_dir.or(self.output_dir),
            schema: overrides.schema.or(self.schema),
            allowed_clinical_significance: overrides
                .allowed_clinical_significance
                .or(self.allowed_clinical_significance),
        }
    }

    pub fn allowed_significance(&self) -> AllowedSignificance {
        match &self.allowed_clinical_significance {
            Some(labels) => AllowedSignificance::from_labels(labels),
            None => AllowedSignificance::default(),
        }
    }

    pub fn resolve(self) -> Result<ResolvedRunConfig> {
        let allowed = self.allowed_significance();
        if allowed.is_empty() {
            return Err(EvidenceError::InvalidConfig(
                "allowed_clinical_significance must not be empty".to_string(),
            ));
        }

        Ok(ResolvedRunConfig {
            efo_mapping: required(self.efo_mapping, "efo_mapping")?,
            gene_mapping: required(self.gene_mapping, "gene_mapping")?,
            input: required(self.input, "input")?,
            output_dir: required(self.output_dir, "output_dir")?,
            schema: self.schema,
            allowed,
        })
    }
}

fn required(value: Option<PathBuf>, name: &str) -> Result<PathBuf> {
    value.ok_or_else(|| EvidenceError::InvalidConfig(format!("`{}` is not set", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[rstest]
    fn test_try_from_toml() {
        let file = write_config(
            r#"
efo_mapping = "maps/efo.tsv"
gene_mapping = "maps/genes.tsv.gz"
input = "clinvar.jsonl.gz"
output_dir = "out"
allowed_clinical_significance = ["pathogenic", "likely pathogenic"]
"#,
        );

        let config = RunConfig::try_from(file.path()).unwrap();
        assert_eq!(config.efo_mapping, Some(PathBuf::from("maps/efo.tsv")));
        assert_eq!(config.schema, None);

        let allowed = config.allowed_significance();
        assert_eq!(allowed.len(), 2);
        assert!(allowed.is_allowed("Likely pathogenic"));
        assert!(!allowed.is_allowed("benign"));
    }

    #[rstest]
    fn test_unknown_key_is_rejected() {
        let file = write_config("efo_maping = \"efo.tsv\"\n");
        let result = RunConfig::try_from(file.path());
        assert!(matches!(result, Err(EvidenceError::Toml(_))));
    }

    #[rstest]
    fn test_flags_override_file() {
        let from_file = RunConfig {
            efo_mapping: Some(PathBuf::from("efo.tsv")),
            gene_mapping: Some(PathBuf::from("genes.tsv")),
            input: Some(PathBuf::from("a.jsonl")),
            output_dir: Some(PathBuf::from("out")),
            ..Default::default()
        };
        let from_flags = RunConfig {
            input: Some(PathBuf::from("b.jsonl")),
            ..Default::default()
        };

        let resolved = from_file.merge(from_flags).resolve().unwrap();
        assert_eq!(resolved.input, PathBuf::from("b.jsonl"));
        assert_eq!(resolved.efo_mapping, PathBuf::from("efo.tsv"));
        assert_eq!(resolved.allowed, AllowedSignificance::default());
    }

    #[rstest]
    fn test_missing_required_path() {
        let config = RunConfig {
            efo_mapping: Some(PathBuf::from("efo.tsv")),
            ..Default::default()
        };

        match config.resolve() {
            Err(EvidenceError::InvalidConfig(message)) => {
                assert_eq!(message, "`gene_mapping` is not set")
            }
            other => panic!("expected a config error, got {:?}", other),
        }
    }

    #[rstest]
    fn test_empty_allowed_list() {
        let config = RunConfig {
            allowed_clinical_significance: Some(vec![" ".to_string()]),
            ..Default::default()
        };
        assert!(matches!(config.resolve(), Err(EvidenceError::InvalidConfig(_))));
    }
}
