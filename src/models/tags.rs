use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::BTreeSet, fmt::Display};

/// A set of normalized constraint tags (lowercase, trimmed)
///
/// Tags are stored as a comma-separated string at rest and on the wire
/// (`"gluten-free, vegetarian"`). Parsing drops empty tokens, so the empty
/// string yields the empty set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Parses a comma-separated tag string
    pub fn parse(raw: &str) -> Self {
        raw.split(',').collect()
    }

    /// Adds a single tag after normalizing it; blank tags are ignored
    pub fn insert(&mut self, tag: &str) {
        let tag = normalize(tag);
        if !tag.is_empty() {
            self.0.insert(tag);
        }
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(&normalize(tag))
    }

    pub fn is_subset(&self, other: &TagSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

fn normalize(tag: &str) -> String {
    tag.trim().to_lowercase()
}

impl<S: AsRef<str>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag.as_ref());
        }
        set
    }
}

impl Display for TagSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "{}", joined.join(", "))
    }
}

impl Serialize for TagSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TagSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TagSet::parse(&raw))
    }
}
