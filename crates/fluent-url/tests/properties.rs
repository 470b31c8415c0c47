//! Property tests for rendering and path composition.

use fluent_url::{ImmutableUrlBuilder, UrlBuilder, UrlBuilding, UrlComponents};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9]{1,8}", 0..5)
}

fn query() -> impl Strategy<Value = BTreeMap<String, Option<String>>> {
    prop::collection::btree_map("[a-z]{1,5}", prop::option::of("[a-z0-9]{1,5}"), 0..4)
}

fn render_query(query: &BTreeMap<String, Option<String>>) -> String {
    query
        .iter()
        .map(|(key, value)| match value {
            Some(value) => format!("{key}={value}"),
            None => key.clone(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

proptest! {
    #[test]
    fn url_without_placeholders_round_trips(
        https in any::<bool>(),
        host in "[a-z]{1,10}\\.com",
        segments in segments(),
        query in query(),
    ) {
        let scheme = if https { "https" } else { "http" };
        let mut input = format!("{scheme}://{host}/{}", segments.join("/"));
        if !query.is_empty() {
            input.push('?');
            input.push_str(&render_query(&query));
        }

        let builder = UrlBuilder::parse(&input).unwrap();
        let built = builder.build().unwrap();
        prop_assert_eq!(built.as_str(), input.as_str());

        let builder = ImmutableUrlBuilder::parse(&input).unwrap();
        let built = builder.build().unwrap();
        prop_assert_eq!(built.as_str(), input.as_str());
    }

    #[test]
    fn add_path_joined_equals_add_path_separately(segments in segments()) {
        let mut joined = UrlBuilder::parse("http://test.de").unwrap();
        joined.add_path(&segments.join("/"));

        let mut separate = ImmutableUrlBuilder::parse("http://test.de").unwrap();
        for segment in &segments {
            separate = separate.add_path(segment);
        }

        if segments.is_empty() {
            prop_assert_eq!(joined.segments(), [String::new()]);
        } else {
            prop_assert_eq!(joined.segments(), separate.segments());
            prop_assert_eq!(joined.build().unwrap(), separate.build().unwrap());
        }
    }

    #[test]
    fn derived_immutable_builder_never_changes_original(
        path in "[a-z]{1,8}",
        key in "[a-z]{1,5}",
        value in "[a-z0-9]{1,5}",
        port in 0u16..=65535,
    ) {
        let original = ImmutableUrlBuilder::parse("https://test.de/base?x=1").unwrap();
        let before = original.build().unwrap();

        let derived = original
            .add_path(&path)
            .add_query(&key, [value.as_str()])
            .with_path_value(&key, value.as_str())
            .set_port(port)
            .unwrap();

        prop_assert_eq!(original.build().unwrap(), before);
        prop_assert_eq!(derived.port(), port);
    }
}
