//! Relations between tables.
//!
//! A relation `(source_table, source_field, target_table)` reads as "for a
//! record of the source table, find the first record of the target table
//! whose field of the same name holds the same value". The target key is
//! never stored; it is always the target's field named `source_field`.

use std::fmt;

/// A directed lookup from a source table field into a target table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Table the lookup starts from
    pub source_table: String,
    /// Key field in the source table (and, by name, in the target)
    pub source_field: String,
    /// Table searched for a matching record
    pub target_table: String,
}

impl Relation {
    /// Creates a relation from canonical names.
    pub fn new(
        source_table: impl Into<String>,
        source_field: impl Into<String>,
        target_table: impl Into<String>,
    ) -> Self {
        Self {
            source_table: source_table.into(),
            source_field: source_field.into(),
            target_table: target_table.into(),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}",
            self.source_table, self.source_field, self.target_table
        )
    }
}

/// Relations in declaration order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationSet {
    relations: Vec<Relation>,
}

impl RelationSet {
    /// Creates an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a relation without deduplication and returns it
    pub fn push(&mut self, relation: Relation) -> &Relation {
        self.relations.push(relation);
        &self.relations[self.relations.len() - 1]
    }

    /// Relations in declaration order
    pub fn iter(&self) -> std::slice::Iter<'_, Relation> {
        self.relations.iter()
    }

    /// Number of declared relations
    pub fn len(&self) -> usize {
        self.relations.len()
    }

    /// Whether no relation has been declared
    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    /// Relations whose source is `table`, in declaration order
    pub fn from_table<'a>(&'a self, table: &'a str) -> impl Iterator<Item = &'a Relation> + 'a {
        self.relations.iter().filter(move |r| r.source_table == table)
    }

    /// First declared relation linking `source` to `target`
    pub fn resolve(&self, source: &str, target: &str) -> Option<&Relation> {
        self.relations
            .iter()
            .find(|r| r.source_table == source && r.target_table == target)
    }
}

impl FromIterator<Relation> for RelationSet {
    fn from_iter<I: IntoIterator<Item = Relation>>(iter: I) -> Self {
        Self {
            relations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RelationSet {
    type Item = &'a Relation;
    type IntoIter = std::slice::Iter<'a, Relation>;

    fn into_iter(self) -> Self::IntoIter {
        self.relations.iter()
    }
}
