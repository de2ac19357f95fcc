//! Insertion-ordered frequency table of banned addresses.
//!
//! Keys keep the order in which they were first seen, so charts and JSON
//! output are deterministic for a given log. Every key holds a count of at
//! least 1.

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Mapping from IP address to the number of ban events observed for it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    /// (address, count) in first-seen order
    entries: Vec<(String, u64)>,

    /// address -> position in `entries`
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one ban event for `ip_address`
    ///
    /// **Public** - the aggregation rule
    ///
    /// # Returns
    /// The updated count for the address
    pub fn record(&mut self, ip_address: &str) -> u64 {
        if let Some(&slot) = self.index.get(ip_address) {
            let entry = &mut self.entries[slot];
            entry.1 += 1;
            return entry.1;
        }

        self.index.insert(ip_address.to_string(), self.entries.len());
        self.entries.push((ip_address.to_string(), 1));
        1
    }

    /// Ban count for an address, if it was seen
    pub fn get(&self, ip_address: &str) -> Option<u64> {
        self.index.get(ip_address).map(|&slot| self.entries[slot].1)
    }

    /// Number of distinct addresses
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts (equals the number of qualifying lines)
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    /// Iterate entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.entries.iter().map(|(ip, count)| (ip.as_str(), *count))
    }

    /// Largest single count, or 0 for an empty table
    pub fn max_count(&self) -> u64 {
        self.entries.iter().map(|(_, count)| *count).max().unwrap_or(0)
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (ip, count) in &self.entries {
            map.serialize_entry(ip, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FrequencyTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FrequencyTableVisitor)
    }
}

struct FrequencyTableVisitor;

impl<'de> Visitor<'de> for FrequencyTableVisitor {
    type Value = FrequencyTable;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of IP address to ban count")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = FrequencyTable::new();

        while let Some((ip, count)) = access.next_entry::<String, u64>()? {
            if count == 0 {
                return Err(de::Error::custom(format!(
                    "ban count for {} must be at least 1",
                    ip
                )));
            }
            if table.index.contains_key(&ip) {
                return Err(de::Error::custom(format!("duplicate address: {}", ip)));
            }

            table.index.insert(ip.clone(), table.entries.len());
            table.entries.push((ip, count));
        }

        Ok(table)
    }
}
