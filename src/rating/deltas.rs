use crate::Rating;
use serde::ser::SerializeMap;

/// Rating adjustment per player name.
///
/// Keeps the order in which names were first seen. Inserting a name again
/// replaces its delta in place, so a player listed twice in one table gets
/// the delta of their last row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Deltas(Vec<(String, Rating)>);

impl Deltas {
    pub fn insert(&mut self, name: &str, delta: Rating) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = delta,
            None => self.0.push((name.to_string(), delta)),
        }
    }
    pub fn get(&self, name: &str) -> Option<Rating> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, d)| *d)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rating)> {
        self.0.iter().map(|(n, d)| (n.as_str(), *d))
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl serde::Serialize for Deltas {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, delta) in self.0.iter() {
            map.serialize_entry(name, delta)?;
        }
        map.end()
    }
}
