use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

use fxhash::FxHashMap as HashMap;
use log::info;

use cttv_core::utils::get_dynamic_reader;

use crate::errors::{EvidenceError, Result};

///
/// An ontology term a trait name maps to.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyMapping {
    pub ontology_id: String,
    pub ontology_label: Option<String>,
}

///
/// A reported trait resolved to one ontology term.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTrait {
    /// The (lower-cased) name that matched the mapping file.
    pub name: String,
    pub ontology_id: String,
    pub ontology_label: Option<String>,
    /// Index of the trait group in the record this was resolved from.
    pub group_index: usize,
}

///
/// Trait name -> ontology terms, loaded once from the EFO mapping file.
///
/// Lookups never mutate the mapper. Which names were actually used to emit
/// evidence is tracked separately through [TraitMapper::mark_used], so the
/// mappings that were never used can be reported for curation.
///
#[derive(Debug, Default)]
pub struct TraitMapper {
    map: HashMap<String, Vec<OntologyMapping>>,
    // file order of names, for stable reporting
    order: Vec<String>,
    unused: HashSet<String>,
    n_lines: usize,
}

impl TraitMapper {
    ///
    /// Build the mapper from a tab separated reader with the columns
    /// `trait name`, `|`-joined ontology ids and optionally `|`-joined
    /// ontology labels. When labels are given, ids without a label are
    /// dropped.
    ///
    /// A line without the ontology id column is a configuration error.
    ///
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut mapper = TraitMapper::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split('\t');
            let name = parts.next().unwrap_or_default().to_lowercase();

            let ids = match parts.next() {
                Some(ids) => ids,
                None => {
                    return Err(EvidenceError::MissingOntologyMapping {
                        name,
                        line: index + 1,
                    });
                }
            };

            // with a label column, ids and labels pair up and the shorter list wins
            let mappings: Vec<OntologyMapping> = match parts.next() {
                Some(labels) => ids
                    .split('|')
                    .zip(labels.split('|'))
                    .map(|(ontology_id, label)| OntologyMapping {
                        ontology_id: ontology_id.to_string(),
                        ontology_label: Some(label.to_string()),
                    })
                    .collect(),
                None => ids
                    .split('|')
                    .map(|ontology_id| OntologyMapping {
                        ontology_id: ontology_id.to_string(),
                        ontology_label: None,
                    })
                    .collect(),
            };

            mapper.insert(name, mappings);
            mapper.n_lines += 1;
        }

        info!("{} EFO mappings loaded", mapper.n_lines);

        Ok(mapper)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading trait -> EFO mappings from {:?}", path);
        let reader = get_dynamic_reader(path)
            .map_err(|e| EvidenceError::MappingFileReadError(format!("{:#}", e)))?;
        Self::from_reader(reader)
    }

    fn insert(&mut self, name: String, mappings: Vec<OntologyMapping>) {
        if !self.map.contains_key(&name) {
            self.order.push(name.clone());
            self.unused.insert(name.clone());
        }
        self.map.entry(name).or_default().extend(mappings);
    }

    /// Number of accepted mapping lines.
    pub fn n_mappings(&self) -> usize {
        self.n_lines
    }

    /// Number of distinct trait names.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&[OntologyMapping]> {
        self.map.get(&name.to_lowercase()).map(|v| v.as_slice())
    }

    ///
    /// Resolve a group of synonymous trait names.
    ///
    /// Names are tried in order, case-insensitively; the first one with at
    /// least one ontology mapping wins and yields one [ResolvedTrait] per
    /// mapping. Returns `None` when no name in the group is mapped.
    ///
    /// # Arguments
    /// - names: synonymous names of one reported trait
    /// - group_index: position of the group in the record
    pub fn resolve(&self, names: &[String], group_index: usize) -> Option<Vec<ResolvedTrait>> {
        names.iter().find_map(|raw_name| {
            let name = raw_name.to_lowercase();
            let mappings = self.map.get(&name).filter(|m| !m.is_empty())?;

            Some(
                mappings
                    .iter()
                    .map(|mapping| ResolvedTrait {
                        name: name.clone(),
                        ontology_id: mapping.ontology_id.clone(),
                        ontology_label: mapping.ontology_label.clone(),
                        group_index,
                    })
                    .collect(),
            )
        })
    }

    ///
    /// Record that `name` produced evidence. Marking an unknown or already
    /// used name is a no-op.
    ///
    pub fn mark_used(&mut self, name: &str) {
        self.unused.remove(name);
    }

    pub fn is_used(&self, name: &str) -> bool {
        self.map.contains_key(name) && !self.unused.contains(name)
    }

    ///
    /// Mappings whose name never produced evidence, in file order.
    ///
    pub fn unused_mappings(&self) -> impl Iterator<Item = (&str, &[OntologyMapping])> {
        self.order
            .iter()
            .filter(|name| self.unused.contains(*name))
            .filter_map(|name| self.map.get(name).map(|m| (name.as_str(), m.as_slice())))
    }
}
