use crate::error::{RegistryError, Result};
use crate::matching::{
    normalize_name, partial_similarity, strip_suffix, MatchKind, NameMatch, PARTIAL_MATCH_THRESHOLD,
};
use crate::types::Position;
use std::collections::HashMap;
use tracing::debug;

/// Anything that can be looked up by player name
pub trait RegistryEntry {
    fn lookup_name(&self) -> &str;
    fn lookup_position(&self) -> Position;
}

/// Read-only name index over a set of player records
///
/// Built once from a record set and then shared; lookups never mutate it.
#[derive(Debug, Clone)]
pub struct PlayerRegistry<T> {
    entries: Vec<T>,

    /// Normalized name of each entry, suffix stripped
    base_names: Vec<String>,

    /// Map from normalized name to entry indices
    by_name: HashMap<String, Vec<usize>>,

    /// Map from suffix-stripped normalized name to entry indices
    by_base_name: HashMap<String, Vec<usize>>,
}

impl<T: RegistryEntry> PlayerRegistry<T> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            base_names: Vec::new(),
            by_name: HashMap::new(),
            by_base_name: HashMap::new(),
        }
    }

    pub fn from_entries(entries: impl IntoIterator<Item = T>) -> Self {
        let mut registry = Self::new();
        for entry in entries {
            registry.insert(entry);
        }
        registry
    }

    fn insert(&mut self, entry: T) {
        let index = self.entries.len();
        let normalized = normalize_name(entry.lookup_name());
        let base = strip_suffix(&normalized);

        self.by_name.entry(normalized).or_default().push(index);
        self.by_base_name.entry(base.clone()).or_default().push(index);
        self.base_names.push(base);
        self.entries.push(entry);
    }

    /// Resolve a name using exact, then suffix-normalized, then partial matching.
    ///
    /// When `position` is given, same-position entries win at every level and
    /// partial matches are restricted to that position.
    pub fn find(&self, name: &str, position: Option<Position>) -> Option<NameMatch> {
        let normalized = normalize_name(name);
        if normalized.is_empty() {
            return None;
        }

        if let Some(index) = self.pick(self.by_name.get(&normalized), position) {
            return Some(NameMatch { index, kind: MatchKind::Exact, similarity: 1.0 });
        }

        let base = strip_suffix(&normalized);
        if let Some(index) = self.pick(self.by_base_name.get(&base), position) {
            return Some(NameMatch { index, kind: MatchKind::Suffix, similarity: 1.0 });
        }

        let mut best: Option<NameMatch> = None;
        for (index, candidate) in self.base_names.iter().enumerate() {
            if position.is_some_and(|pos| self.entries[index].lookup_position() != pos) {
                continue;
            }
            let similarity = partial_similarity(&base, candidate);
            if similarity < PARTIAL_MATCH_THRESHOLD {
                continue;
            }
            // Strictly greater keeps the earliest entry on ties
            if best.map_or(true, |b| similarity > b.similarity) {
                best = Some(NameMatch { index, kind: MatchKind::Partial, similarity });
            }
        }

        if let Some(found) = best {
            debug!(
                "Partial name match for '{}' -> '{}' ({:.2})",
                name,
                self.entries[found.index].lookup_name(),
                found.similarity
            );
        }
        best
    }

    /// Resolve a name to its record
    pub fn lookup(&self, name: &str, position: Option<Position>) -> Option<&T> {
        self.find(name, position).map(|found| &self.entries[found.index])
    }

    /// Get a record by exact normalized name
    pub fn get_by_name(&self, name: &str) -> Result<&T> {
        self.by_name
            .get(&normalize_name(name))
            .and_then(|indices| indices.first())
            .map(|&index| &self.entries[index])
            .ok_or_else(|| RegistryError::PlayerNotFound(name.to_string()))
    }

    /// Search for records whose name contains the query, case-insensitively
    pub fn search_players(&self, query: &str) -> Vec<&T> {
        let query = normalize_name(query);
        self.entries
            .iter()
            .filter(|entry| normalize_name(entry.lookup_name()).contains(&query))
            .collect()
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First candidate at the requested position, else the first candidate
    fn pick(&self, candidates: Option<&Vec<usize>>, position: Option<Position>) -> Option<usize> {
        let candidates = candidates?;
        position
            .and_then(|pos| {
                candidates.iter().copied().find(|&i| self.entries[i].lookup_position() == pos)
            })
            .or_else(|| candidates.first().copied())
    }
}

impl<T: RegistryEntry> Default for PlayerRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RegistryEntry> FromIterator<T> for PlayerRegistry<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl RegistryEntry for crate::types::PlayerProjection {
    fn lookup_name(&self) -> &str {
        self.display_name()
    }

    fn lookup_position(&self) -> Position {
        self.position
    }
}
