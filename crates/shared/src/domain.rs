use std::{
    cmp::Ordering,
    collections::BTreeMap,
    fmt,
    hash::{Hash, Hasher},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a cluster node as reported by the registry.
///
/// Numbers order by value and sort before strings, strings order by bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Numeric(i64),
    // Only reached for integers above `i64::MAX`.
    Unsigned(u64),
    Fractional(f64),
    Text(String),
}

impl NodeId {
    fn rank(&self) -> u8 {
        match self {
            NodeId::Numeric(_) => 0,
            NodeId::Unsigned(_) => 1,
            NodeId::Fractional(_) => 2,
            NodeId::Text(_) => 3,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            NodeId::Numeric(id) => Some(*id as f64),
            NodeId::Unsigned(id) => Some(*id as f64),
            NodeId::Fractional(id) => Some(*id),
            NodeId::Text(_) => None,
        }
    }
}

impl Ord for NodeId {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (NodeId::Text(a), NodeId::Text(b)) => a.cmp(b),
            (NodeId::Text(_), _) => Ordering::Greater,
            (_, NodeId::Text(_)) => Ordering::Less,
            _ => {
                let by_value = match (self.as_f64(), other.as_f64()) {
                    (Some(a), Some(b)) => a.total_cmp(&b),
                    _ => Ordering::Equal,
                };
                by_value
                    .then_with(|| self.rank().cmp(&other.rank()))
                    .then_with(|| match (self, other) {
                        (NodeId::Numeric(a), NodeId::Numeric(b)) => a.cmp(b),
                        (NodeId::Unsigned(a), NodeId::Unsigned(b)) => a.cmp(b),
                        (NodeId::Fractional(a), NodeId::Fractional(b)) => a.total_cmp(b),
                        _ => Ordering::Equal,
                    })
            }
        }
    }
}

impl PartialOrd for NodeId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for NodeId {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for NodeId {}

impl Hash for NodeId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            NodeId::Numeric(id) => id.hash(state),
            NodeId::Unsigned(id) => id.hash(state),
            NodeId::Fractional(id) => id.to_bits().hash(state),
            NodeId::Text(id) => id.hash(state),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Numeric(id) => write!(f, "{id}"),
            NodeId::Unsigned(id) => write!(f, "{id}"),
            NodeId::Fractional(id) => write!(f, "{id}"),
            NodeId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId::Numeric(value)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        NodeId::Text(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        NodeId::Text(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub locality: String,
    /// Registration time. UNIX milliseconds on the wire.
    #[serde(
        default,
        with = "created_wire",
        skip_serializing_if = "Option::is_none"
    )]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl NodeRecord {
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            service: String::new(),
            locality: String::new(),
            created: None,
            revision: None,
            metadata: BTreeMap::new(),
        }
    }
}

mod created_wire {
    use chrono::{DateTime, Utc};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        Millis(i64),
        Text(String),
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_some(&ts.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Wire>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Wire::Millis(millis)) => DateTime::from_timestamp_millis(millis)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("created out of range: {millis}"))),
            Some(Wire::Text(raw)) => DateTime::parse_from_rfc3339(&raw)
                .map(|ts| Some(ts.with_timezone(&Utc)))
                .map_err(|e| D::Error::custom(format!("invalid created timestamp {raw:?}: {e}"))),
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
