//! Property-based checks of build and cleanup invariants

use fixture_factory::{AttributeTemplate, AttributeValue, Factory, MemoryModel, Overrides};
use proptest::collection::{btree_map, vec};
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::Arc;

// Property test generators
mod generators {
    use super::*;

    /// A template entry: constant, sync generator, or async generator
    pub fn attribute_value() -> impl Strategy<Value = (u8, i64)> {
        (0..3u8, any::<i64>())
    }

    pub fn template() -> impl Strategy<Value = Vec<(String, (u8, i64))>> {
        btree_map("[a-f]", attribute_value(), 0..6)
            .prop_map(|entries| entries.into_iter().collect())
    }

    pub fn overrides() -> impl Strategy<Value = Vec<(String, i64)>> {
        btree_map("[d-j]", any::<i64>(), 0..6)
            .prop_map(|entries| entries.into_iter().collect())
    }
}

fn entry(kind: u8, n: i64) -> AttributeValue {
    match kind {
        0 => AttributeValue::constant(n),
        1 => AttributeValue::sync(move |_| json!(n)),
        _ => AttributeValue::future(move |_| async move {
            tokio::task::yield_now().await;
            Ok::<_, fixture_factory::BoxError>(json!(n))
        }),
    }
}

proptest! {
    #[test]
    fn prop_build_equals_template_overlaid_by_overrides(
        template in generators::template(),
        overrides in generators::overrides(),
    ) {
        let factory = Factory::new();
        factory.define(
            "thing",
            Arc::new(MemoryModel::new("Thing")),
            template
                .iter()
                .map(|(key, (kind, n))| (key.clone(), entry(*kind, *n)))
                .collect::<AttributeTemplate>(),
        );
        let given: Overrides = overrides
            .iter()
            .map(|(key, n)| (key.clone(), AttributeValue::constant(*n)))
            .collect();

        let document = tokio_test::block_on(factory.build("thing", given)).unwrap();

        let mut expected = serde_json::Map::new();
        for (key, (_, n)) in &template {
            expected.insert(key.clone(), json!(n));
        }
        for (key, n) in &overrides {
            expected.insert(key.clone(), json!(n));
        }
        prop_assert_eq!(document.to_value(), Value::Object(expected));
    }

    #[test]
    fn prop_cleanup_destroys_everything_created(count in 0..12usize) {
        let factory = Factory::new();
        let rows = MemoryModel::new("Row");
        factory.define("row", Arc::new(rows.clone()), AttributeTemplate::new());

        tokio_test::block_on(async {
            factory.create_many("row", count).await.unwrap();
            let ids: Vec<_> = factory
                .created()
                .iter()
                .filter_map(|record| record.document().get("id").and_then(Value::as_u64))
                .collect();
            assert_eq!(ids, (1..=count as u64).collect::<Vec<_>>());

            factory.cleanup().await.unwrap();
        });

        prop_assert_eq!(rows.count(), 0);
        prop_assert!(factory.created().is_empty());
    }

    #[test]
    fn prop_batch_length_matches_request(listed in vec(any::<i64>(), 0..8), count in 0..8usize) {
        let factory = Factory::new();
        factory.define("x", Arc::new(MemoryModel::new("X")), AttributeTemplate::new());
        let overrides: Vec<Overrides> = listed
            .iter()
            .map(|n| Overrides::new().value("n", *n))
            .collect();

        let documents = tokio_test::block_on(factory.build_many("x", (overrides, count))).unwrap();

        prop_assert_eq!(documents.len(), count);
        for (index, document) in documents.iter().enumerate() {
            let expected = listed.get(index).map(|n| json!(n));
            prop_assert_eq!(document.get("n"), expected.as_ref());
        }
    }
}
