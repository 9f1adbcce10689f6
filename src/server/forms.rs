use crate::ClubError;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Decoded `application/x-www-form-urlencoded` body.
///
/// Keeps every pair in submission order, so repeated keys such as
/// `player` or `selected` come back as ordered lists.
#[derive(Debug, Clone, Default)]
pub struct Fields(Vec<(String, String)>);

impl Fields {
    pub fn parse(body: &[u8]) -> Result<Self, ClubError> {
        serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
            .map(Self)
            .map_err(|e| ClubError::validation(e.to_string()))
    }
    /// First value of a required field.
    pub fn one(&self, key: &str) -> Result<&str, ClubError> {
        self.optional(key)
            .ok_or_else(|| ClubError::validation(format!("missing field: {}", key)))
    }
    pub fn optional(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
    /// Required field parsed after trimming whitespace.
    pub fn parsed<T: FromStr>(&self, key: &str) -> Result<T, ClubError> {
        let raw = self.one(key)?;
        raw.trim()
            .parse::<T>()
            .map_err(|_| ClubError::validation(format!("invalid {}: {:?}", key, raw)))
    }
    /// Every value of a repeated field, in order.
    pub fn all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .collect()
    }
    /// Round columns: every field named `s<k>` with numeric `k`,
    /// ordered by `k`, each with its values in submission order.
    pub fn rounds(&self) -> Vec<Vec<String>> {
        let mut columns = BTreeMap::<u32, Vec<String>>::new();
        for (key, value) in self.0.iter() {
            if let Some(k) = key
                .strip_prefix('s')
                .filter(|k| !k.is_empty() && k.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|k| k.parse::<u32>().ok())
            {
                columns.entry(k).or_default().push(value.clone());
            }
        }
        columns.into_values().collect()
    }
}
