//! Grouping and labelling of subscriptions and publishers.
//!
//! Everything here is a pure function of its inputs. Items are borrowed from
//! the snapshot, never cloned.

use std::collections::{BTreeMap, HashMap};

use crate::types::{AdvertisePayload, Advertiser, Requester, SubscribePayload, Topic};

/// Label used when a payload carries no requester or advertiser.
pub const UNKNOWN_ORIGIN: &str = "<unknown>";

/// Group label for a subscription, derived from its requester.
pub fn classify_subscription_origin(payload: &SubscribePayload) -> String {
    match &payload.requester {
        None => UNKNOWN_ORIGIN.to_string(),
        Some(Requester::Panel(name)) => panel_label(name),
        Some(Requester::Node(name)) => format!("Node \"{}\"", name),
        Some(Requester::Other(name)) => name.clone(),
        Some(Requester::Unrecognized { kind, name }) => unrecognized_label(kind, name),
    }
}

/// Group label for a publisher, derived from its advertiser.
pub fn classify_publisher_origin(payload: &AdvertisePayload) -> String {
    match &payload.advertiser {
        None => UNKNOWN_ORIGIN.to_string(),
        Some(Advertiser::Panel(name)) => panel_label(name),
        Some(Advertiser::Unrecognized { kind, name }) => unrecognized_label(kind, name),
    }
}

fn panel_label(name: &str) -> String {
    format!("Panel \"{}\"", name)
}

// Tag and name are embedded unescaped, so distinct inputs can collide.
fn unrecognized_label(kind: &str, name: &str) -> String {
    tracing::debug!(kind, name, "Unrecognized origin tag");
    format!("<unknown: {} {}>", kind, name)
}

/// Sort key for subscriptions
pub fn subscription_topic(payload: &SubscribePayload) -> &str {
    &payload.topic
}

/// Sort key for publishers
pub fn publisher_topic(payload: &AdvertisePayload) -> &str {
    &payload.topic
}

/// One labelled group of items, borrowed from the input slice
#[derive(Debug, PartialEq, Eq)]
pub struct OriginGroup<'a, T> {
    pub label: String,
    pub items: Vec<&'a T>,
}

// Manual impl: derive would require `T: Clone`.
impl<T> Clone for OriginGroup<'_, T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            items: self.items.clone(),
        }
    }
}

/// Partition `items` by label and order the result.
///
/// Groups come out in ascending (byte-wise, case-sensitive) label order.
/// Items inside a group are ordered by `sort_key` with a stable sort, so
/// equal keys keep their input order.
///
/// Returns `None` for an empty input so callers can render a placeholder.
pub fn group_and_sort<'a, T, C, K>(
    items: &'a [T],
    classify: C,
    sort_key: K,
) -> Option<Vec<OriginGroup<'a, T>>>
where
    C: Fn(&T) -> String,
    K: Fn(&T) -> &str,
{
    if items.is_empty() {
        return None;
    }

    let mut by_label: BTreeMap<String, Vec<&'a T>> = BTreeMap::new();
    for item in items {
        by_label.entry(classify(item)).or_default().push(item);
    }

    let groups: Vec<OriginGroup<'a, T>> = by_label
        .into_iter()
        .map(|(label, mut members)| {
            // slice::sort_by is stable
            members.sort_by(|a, b| sort_key(*a).cmp(sort_key(*b)));
            OriginGroup {
                label,
                items: members,
            }
        })
        .collect();

    tracing::trace!(items = items.len(), groups = groups.len(), "Grouped items");
    Some(groups)
}

/// Group subscriptions by requester, each group sorted by topic
pub fn group_subscriptions(
    subscriptions: &[SubscribePayload],
) -> Option<Vec<OriginGroup<'_, SubscribePayload>>> {
    group_and_sort(subscriptions, classify_subscription_origin, subscription_topic)
}

/// Group publishers by advertiser, each group sorted by topic
pub fn group_publishers(
    publishers: &[AdvertisePayload],
) -> Option<Vec<OriginGroup<'_, AdvertisePayload>>> {
    group_and_sort(publishers, classify_publisher_origin, publisher_topic)
}

/// Lookup from topic name to the first topic entry with that name.
pub struct OriginalTopicIndex<'a> {
    by_name: HashMap<&'a str, &'a Topic>,
}

impl<'a> OriginalTopicIndex<'a> {
    pub fn new(topics: &'a [Topic]) -> Self {
        let mut by_name = HashMap::with_capacity(topics.len());
        for topic in topics {
            // First entry wins on duplicate names
            by_name.entry(topic.name.as_str()).or_insert(topic);
        }
        Self { by_name }
    }

    /// `(original topic: ...)` for a topic that was renamed, otherwise `None`
    pub fn annotation_for(&self, topic_name: &str) -> Option<String> {
        self.by_name
            .get(topic_name)
            .and_then(|topic| topic.original_topic.as_deref())
            .map(|original| format!("(original topic: {})", original))
    }
}

/// Original-topic annotation for each subscription, index-aligned with the input.
pub fn annotate_original_topic(
    subscriptions: &[SubscribePayload],
    topics: &[Topic],
) -> Vec<Option<String>> {
    let index = OriginalTopicIndex::new(topics);
    subscriptions
        .iter()
        .map(|sub| index.annotation_for(&sub.topic))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(topic: &str, requester: Option<Requester>) -> SubscribePayload {
        SubscribePayload::new(topic, requester)
    }

    fn node(name: &str) -> Option<Requester> {
        Some(Requester::Node(name.to_string()))
    }

    fn topics_of<'a>(group: &OriginGroup<'a, SubscribePayload>) -> Vec<&'a str> {
        group.items.iter().map(|s| s.topic.as_str()).collect()
    }

    #[test]
    fn test_subscription_labels() {
        assert_eq!(classify_subscription_origin(&sub("/a", None)), "<unknown>");
        assert_eq!(
            classify_subscription_origin(&sub("/a", Some(Requester::Panel("Foo".into())))),
            "Panel \"Foo\""
        );
        assert_eq!(classify_subscription_origin(&sub("/a", node("Bar"))), "Node \"Bar\"");
        assert_eq!(
            classify_subscription_origin(&sub("/a", Some(Requester::Other("Baz".into())))),
            "Baz"
        );
    }

    #[test]
    fn test_unrecognized_requester_falls_back() {
        let payload = sub(
            "/a",
            Some(Requester::Unrecognized {
                kind: "bogus".into(),
                name: "X".into(),
            }),
        );
        assert_eq!(classify_subscription_origin(&payload), "<unknown: bogus X>");
    }

    #[test]
    fn test_publisher_labels() {
        let panel = AdvertisePayload::new("/cmd", Some(Advertiser::Panel("Foo".into())));
        assert_eq!(classify_publisher_origin(&panel), "Panel \"Foo\"");

        let bare = AdvertisePayload::new("/cmd", None);
        assert_eq!(classify_publisher_origin(&bare), "<unknown>");

        let other = AdvertisePayload::new(
            "/cmd",
            Some(Advertiser::Unrecognized {
                kind: "node".into(),
                name: "N".into(),
            }),
        );
        assert_eq!(classify_publisher_origin(&other), "<unknown: node N>");
    }

    #[test]
    fn test_empty_input_is_no_data() {
        assert!(group_subscriptions(&[]).is_none());
        assert!(group_publishers(&[]).is_none());
    }

    #[test]
    fn test_single_group_sorted_by_topic() {
        let subs = vec![sub("/b", node("N1")), sub("/a", node("N1"))];
        let groups = group_subscriptions(&subs).unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "Node \"N1\"");
        assert_eq!(topics_of(&groups[0]), vec!["/a", "/b"]);
    }

    #[test]
    fn test_group_labels_sorted_case_sensitive() {
        let subs = vec![
            sub("/x", Some(Requester::Other("beta".into()))),
            sub("/x", Some(Requester::Other("Alpha".into()))),
            sub("/x", None),
            sub("/x", Some(Requester::Panel("Plot".into()))),
            sub("/x", node("N1")),
        ];
        let labels: Vec<_> = group_subscriptions(&subs)
            .unwrap()
            .into_iter()
            .map(|g| g.label)
            .collect();

        // '<' sorts before uppercase letters, uppercase before lowercase
        assert_eq!(
            labels,
            vec!["<unknown>", "Alpha", "Node \"N1\"", "Panel \"Plot\"", "beta"]
        );
    }

    #[test]
    fn test_equal_topics_keep_input_order() {
        let first = sub("/same", node("N"));
        let second = sub("/same", node("N"));
        let subs = vec![sub("/z", node("N")), first, sub("/a", node("N")), second];

        let groups = group_subscriptions(&subs).unwrap();
        let items = &groups[0].items;

        assert_eq!(topics_of(&groups[0]), vec!["/a", "/same", "/same", "/z"]);
        assert!(std::ptr::eq(items[1], &subs[1]));
        assert!(std::ptr::eq(items[2], &subs[3]));
    }

    #[test]
    fn test_publishers_grouped_by_advertiser() {
        let pubs = vec![
            AdvertisePayload::new("/b", Some(Advertiser::Panel("Publish".into()))),
            AdvertisePayload::new("/c", None),
            AdvertisePayload::new("/a", Some(Advertiser::Panel("Publish".into()))),
        ];
        let groups = group_publishers(&pubs).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "<unknown>");
        assert_eq!(groups[1].label, "Panel \"Publish\"");
        let topics: Vec<_> = groups[1].items.iter().map(|p| p.topic.as_str()).collect();
        assert_eq!(topics, vec!["/a", "/b"]);
    }

    #[test]
    fn test_annotation_when_original_topic_present() {
        let topics = vec![Topic::with_original("/a", "/orig_a"), Topic::new("/b")];
        let subs = vec![
            sub("/a", Some(Requester::Panel("P".into()))),
            sub("/b", None),
            sub("/missing", None),
        ];

        assert_eq!(
            annotate_original_topic(&subs, &topics),
            vec![Some("(original topic: /orig_a)".to_string()), None, None]
        );
    }

    #[test]
    fn test_annotation_first_topic_wins() {
        let topics = vec![
            Topic::with_original("/a", "/first"),
            Topic::with_original("/a", "/second"),
        ];
        let index = OriginalTopicIndex::new(&topics);
        assert_eq!(
            index.annotation_for("/a").as_deref(),
            Some("(original topic: /first)")
        );

        // A first entry without an original topic shadows later ones
        let topics = vec![Topic::new("/a"), Topic::with_original("/a", "/later")];
        let index = OriginalTopicIndex::new(&topics);
        assert_eq!(index.annotation_for("/a"), None);
    }

    // Property-based tests using proptest
    use proptest::prelude::*;

    fn arb_requester() -> impl Strategy<Value = Option<Requester>> {
        prop_oneof![
            Just(None),
            "[A-Ca-c]{1,2}".prop_map(|n| Some(Requester::Panel(n))),
            "[A-Ca-c]{1,2}".prop_map(|n| Some(Requester::Node(n))),
            "[A-Ca-c]{1,2}".prop_map(|n| Some(Requester::Other(n))),
            ("[a-z]{1,4}", "[A-C]").prop_map(|(kind, name)| Some(Requester::Unrecognized {
                kind,
                name
            })),
        ]
    }

    fn arb_subscriptions() -> impl Strategy<Value = Vec<SubscribePayload>> {
        prop::collection::vec(
            ("/[a-d]{1,2}", arb_requester()).prop_map(|(topic, requester)| sub(&topic, requester)),
            1..40,
        )
    }

    proptest! {
        #[test]
        fn test_labels_are_sorted_and_distinct(subs in arb_subscriptions()) {
            let groups = group_subscriptions(&subs).unwrap();
            let labels: Vec<&String> = groups.iter().map(|g| &g.label).collect();

            let mut expected: Vec<String> = subs.iter().map(classify_subscription_origin).collect();
            expected.sort();
            expected.dedup();

            prop_assert_eq!(labels, expected.iter().collect::<Vec<_>>());
        }

        #[test]
        fn test_every_item_lands_in_its_own_group_once(subs in arb_subscriptions()) {
            let groups = group_subscriptions(&subs).unwrap();
            let total: usize = groups.iter().map(|g| g.items.len()).sum();
            prop_assert_eq!(total, subs.len());

            for group in &groups {
                for item in &group.items {
                    prop_assert_eq!(classify_subscription_origin(item), group.label.clone());
                }
            }
        }

        #[test]
        fn test_items_sorted_with_ties_in_input_order(subs in arb_subscriptions()) {
            let position = |item: &SubscribePayload| {
                subs.iter().position(|s| std::ptr::eq(s, item)).unwrap()
            };

            for group in group_subscriptions(&subs).unwrap() {
                for pair in group.items.windows(2) {
                    let (a, b) = (pair[0], pair[1]);
                    prop_assert!(a.topic <= b.topic);
                    if a.topic == b.topic {
                        prop_assert!(position(a) < position(b));
                    }
                }
            }
        }

        #[test]
        fn test_grouping_is_idempotent(subs in arb_subscriptions()) {
            prop_assert_eq!(group_subscriptions(&subs), group_subscriptions(&subs));
        }
    }
}
