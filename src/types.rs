//! Core data types for TopicVis-RS
//!
//! These types mirror the player's view of topics, subscriptions and
//! publishers. They are owned by the player and handed to the UI as an
//! immutable [`PlayerState`] snapshot.
//!
//! # Main Types
//!
//! - [`Topic`] - A named data channel, optionally renamed from an original topic
//! - [`SubscribePayload`] - A request to receive data on a topic
//! - [`AdvertisePayload`] - A declaration of intent to publish on a topic
//! - [`Requester`] / [`Advertiser`] - Who made the subscription or advertisement
//! - [`PlayerState`] - The snapshot bundle consumed by the Internals panel
//!
//! # Wire Format
//!
//! Snapshots are JSON. Requesters and advertisers are tagged objects
//! (`{"type": "panel", "name": "Plot"}`). A tag this build does not know, or
//! an object without a string `name`, is kept as [`Requester::Unrecognized`] /
//! [`Advertiser::Unrecognized`] instead of failing the whole snapshot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TopicVisError};

/// A named data channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub name: String,
    /// Source name before any topic transformation was applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_topic: Option<String>,
}

impl Topic {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            original_topic: None,
        }
    }

    pub fn with_original(name: impl Into<String>, original_topic: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            original_topic: Some(original_topic.into()),
        }
    }
}

/// Stand-in text for a tag or name missing from the wire
pub const MISSING_FIELD: &str = "undefined";

/// Tagged object as it appears on the wire.
///
/// Both fields are loose so that a variant with an unexpected shape still
/// parses and ends up as `Unrecognized`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawOrigin {
    #[serde(rename = "type", default)]
    kind: Value,
    #[serde(default)]
    name: Value,
}

impl RawOrigin {
    fn new(kind: &str, name: &str) -> Self {
        Self {
            kind: Value::String(kind.to_string()),
            name: Value::String(name.to_string()),
        }
    }

    /// Tag and name, when both are strings
    fn known_parts(&self) -> Option<(&str, String)> {
        Some((self.kind.as_str()?, self.name.as_str()?.to_string()))
    }

    fn unrecognized_parts(&self) -> (String, String) {
        (wire_text(&self.kind), wire_text(&self.name))
    }
}

fn wire_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => MISSING_FIELD.to_string(),
        other => other.to_string(),
    }
}

/// Who requested a subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOrigin", into = "RawOrigin")]
pub enum Requester {
    Panel(String),
    Node(String),
    Other(String),
    /// A tag outside the known set, only produced by deserialization
    Unrecognized { kind: String, name: String },
}

impl Requester {
    /// Wire tag for this requester
    pub fn kind(&self) -> &str {
        match self {
            Requester::Panel(_) => "panel",
            Requester::Node(_) => "node",
            Requester::Other(_) => "other",
            Requester::Unrecognized { kind, .. } => kind,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Requester::Panel(name) | Requester::Node(name) | Requester::Other(name) => name,
            Requester::Unrecognized { name, .. } => name,
        }
    }
}

impl From<RawOrigin> for Requester {
    fn from(raw: RawOrigin) -> Self {
        match raw.known_parts() {
            Some(("panel", name)) => Requester::Panel(name),
            Some(("node", name)) => Requester::Node(name),
            Some(("other", name)) => Requester::Other(name),
            _ => {
                let (kind, name) = raw.unrecognized_parts();
                Requester::Unrecognized { kind, name }
            }
        }
    }
}

impl From<Requester> for RawOrigin {
    fn from(requester: Requester) -> Self {
        RawOrigin::new(requester.kind(), requester.name())
    }
}

/// Who advertised a publisher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOrigin", into = "RawOrigin")]
pub enum Advertiser {
    Panel(String),
    /// A tag outside the known set, only produced by deserialization
    Unrecognized { kind: String, name: String },
}

impl Advertiser {
    /// Wire tag for this advertiser
    pub fn kind(&self) -> &str {
        match self {
            Advertiser::Panel(_) => "panel",
            Advertiser::Unrecognized { kind, .. } => kind,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Advertiser::Panel(name) => name,
            Advertiser::Unrecognized { name, .. } => name,
        }
    }
}

impl From<RawOrigin> for Advertiser {
    fn from(raw: RawOrigin) -> Self {
        match raw.known_parts() {
            Some(("panel", name)) => Advertiser::Panel(name),
            _ => {
                let (kind, name) = raw.unrecognized_parts();
                Advertiser::Unrecognized { kind, name }
            }
        }
    }
}

impl From<Advertiser> for RawOrigin {
    fn from(advertiser: Advertiser) -> Self {
        RawOrigin::new(advertiser.kind(), advertiser.name())
    }
}

/// A request to receive data on `topic`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribePayload {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requester: Option<Requester>,
}

impl SubscribePayload {
    pub fn new(topic: impl Into<String>, requester: Option<Requester>) -> Self {
        Self {
            topic: topic.into(),
            requester,
        }
    }
}

/// A declaration of intent to publish on `topic`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvertisePayload {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advertiser: Option<Advertiser>,
}

impl AdvertisePayload {
    pub fn new(topic: impl Into<String>, advertiser: Option<Advertiser>) -> Self {
        Self {
            topic: topic.into(),
            advertiser,
        }
    }
}

/// Immutable snapshot of the player state read by the Internals panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub subscriptions: Vec<SubscribePayload>,
    #[serde(default)]
    pub publishers: Vec<AdvertisePayload>,
}

impl PlayerState {
    /// Parse a snapshot from JSON and check its invariants
    pub fn from_json(json: &str) -> Result<Self> {
        let state: PlayerState = serde_json::from_str(json)
            .map_err(|e| TopicVisError::Snapshot(format!("Invalid snapshot JSON: {}", e)))?;
        state.validate()?;
        Ok(state)
    }

    /// Every subscription and publisher must name a non-empty topic
    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self.subscriptions.iter().position(|s| s.topic.is_empty()) {
            return Err(TopicVisError::Snapshot(format!(
                "subscription #{} has an empty topic",
                index
            )));
        }
        if let Some(index) = self.publishers.iter().position(|p| p.topic.is_empty()) {
            return Err(TopicVisError::Snapshot(format!(
                "publisher #{} has an empty topic",
                index
            )));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty() && self.subscriptions.is_empty() && self.publishers.is_empty()
    }
}
