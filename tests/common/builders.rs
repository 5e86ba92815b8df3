//! Test data builders for creating player snapshots

use topicvis_rs::{AdvertisePayload, Advertiser, PlayerState, Requester, SubscribePayload, Topic};

/// Builder for creating test PlayerStates
#[derive(Default)]
pub struct PlayerStateBuilder {
    state: PlayerState,
}

impl PlayerStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topic(mut self, name: &str) -> Self {
        self.state.topics.push(Topic::new(name));
        self
    }

    pub fn renamed_topic(mut self, name: &str, original: &str) -> Self {
        self.state.topics.push(Topic::with_original(name, original));
        self
    }

    pub fn subscription(mut self, topic: &str, requester: Option<Requester>) -> Self {
        self.state
            .subscriptions
            .push(SubscribePayload::new(topic, requester));
        self
    }

    pub fn publisher(mut self, topic: &str, advertiser: Option<Advertiser>) -> Self {
        self.state
            .publishers
            .push(AdvertisePayload::new(topic, advertiser));
        self
    }

    pub fn build(self) -> PlayerState {
        self.state
    }
}

pub fn panel(name: &str) -> Option<Requester> {
    Some(Requester::Panel(name.to_string()))
}

pub fn node(name: &str) -> Option<Requester> {
    Some(Requester::Node(name.to_string()))
}

pub fn other(name: &str) -> Option<Requester> {
    Some(Requester::Other(name.to_string()))
}

pub fn panel_advertiser(name: &str) -> Option<Advertiser> {
    Some(Advertiser::Panel(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_state_builder() {
        let state = PlayerStateBuilder::new()
            .renamed_topic("/a", "/orig_a")
            .subscription("/a", panel("P"))
            .publisher("/cmd", None)
            .build();

        assert_eq!(state.topics[0].original_topic.as_deref(), Some("/orig_a"));
        assert_eq!(state.subscriptions[0].requester, panel("P"));
        assert_eq!(state.publishers[0].advertiser, None);
    }
}
