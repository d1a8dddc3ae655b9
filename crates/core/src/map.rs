// Sheet-to-dependencies mapping

use serde::{Deserialize, Serialize};

/// Insertion-ordered mapping from a sheet name to the list of other sheet
/// names its formulas mention.
///
/// Entries keep workbook order (one persisted row per sheet, in the order
/// the sheets were listed). Per-sheet lists are NOT deduplicated: a
/// dependency is appended once per formula that mentions it. The graph
/// layer collapses duplicates into a single edge; the mapping keeps them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyMap {
    entries: Vec<(String, Vec<String>)>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get-or-create the dependency list for `sheet`, preserving first
    /// insertion order.
    pub fn entry(&mut self, sheet: &str) -> &mut Vec<String> {
        let idx = match self.entries.iter().position(|(name, _)| name == sheet) {
            Some(idx) => idx,
            None => {
                self.entries.push((sheet.to_string(), Vec::new()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    /// Append one dependency to `sheet`'s list, creating the entry if needed.
    pub fn push_dependency(&mut self, sheet: &str, dep: impl Into<String>) {
        self.entry(sheet).push(dep.into());
    }

    pub fn get(&self, sheet: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(name, _)| name == sheet)
            .map(|(_, deps)| deps.as_slice())
    }

    pub fn contains(&self, sheet: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == sheet)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, deps)| (name.as_str(), deps.as_slice()))
    }

    /// Sheet names in insertion order.
    pub fn sheets(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of (sheet, dependency) pairs, duplicates included.
    pub fn pair_count(&self) -> usize {
        self.entries.iter().map(|(_, deps)| deps.len()).sum()
    }
}

impl FromIterator<(String, Vec<String>)> for DependencyMap {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (sheet, deps) in iter {
            map.entry(&sheet).extend(deps);
        }
        map
    }
}
