//! View tree for the Internals panel.
//!
//! The tree is plain data: the egui pane and the text renderer both walk it,
//! and it serializes to JSON for headless output.

use serde::Serialize;

use crate::internals::grouping::{group_publishers, group_subscriptions, OriginalTopicIndex};
use crate::types::PlayerState;

/// Placeholder shown for a section with no items.
pub const NO_DATA_PLACEHOLDER: &str = "(none)";

pub const SUBSCRIPTIONS_TITLE: &str = "Subscriptions";
pub const PUBLISHERS_TITLE: &str = "Publishers";

/// Both sections of the panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InternalsView {
    pub subscriptions: SectionView,
    pub publishers: SectionView,
}

impl InternalsView {
    pub fn sections(&self) -> [&SectionView; 2] {
        [&self.subscriptions, &self.publishers]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub title: &'static str,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "groups", rename_all = "snake_case")]
pub enum SectionBody {
    /// Rendered as [`NO_DATA_PLACEHOLDER`]
    Empty,
    Groups(Vec<GroupView>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    pub label: String,
    pub items: Vec<ItemLine>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemLine {
    pub topic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

impl ItemLine {
    /// Topic name followed by the annotation, if any
    pub fn text(&self) -> String {
        match &self.annotation {
            Some(annotation) => format!("{} {}", self.topic, annotation),
            None => self.topic.clone(),
        }
    }
}

/// Build the panel view from a player snapshot.
pub fn build_view(state: &PlayerState) -> InternalsView {
    let index = OriginalTopicIndex::new(&state.topics);

    let subscriptions = match group_subscriptions(&state.subscriptions) {
        None => SectionBody::Empty,
        Some(groups) => SectionBody::Groups(
            groups
                .into_iter()
                .map(|group| GroupView {
                    label: group.label,
                    items: group
                        .items
                        .into_iter()
                        .map(|sub| ItemLine {
                            topic: sub.topic.clone(),
                            annotation: index.annotation_for(&sub.topic),
                        })
                        .collect(),
                })
                .collect(),
        ),
    };

    let publishers = match group_publishers(&state.publishers) {
        None => SectionBody::Empty,
        Some(groups) => SectionBody::Groups(
            groups
                .into_iter()
                .map(|group| GroupView {
                    label: group.label,
                    items: group
                        .items
                        .into_iter()
                        .map(|publisher| ItemLine {
                            topic: publisher.topic.clone(),
                            annotation: None,
                        })
                        .collect(),
                })
                .collect(),
        ),
    };

    InternalsView {
        subscriptions: SectionView {
            title: SUBSCRIPTIONS_TITLE,
            body: subscriptions,
        },
        publishers: SectionView {
            title: PUBLISHERS_TITLE,
            body: publishers,
        },
    }
}
