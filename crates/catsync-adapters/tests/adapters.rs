//! End-to-end adapter runs over whole payloads.

use catsync_adapters::{
    adapter_for, AdapterError, AdapterSettings, MagentoAdapter, Platform, PrestashopAdapter,
    ShopifyAdapter, SourceAdapter,
};
use catsync_core::ItemErrorKind;
use serde_json::{json, Value};

fn prestashop_payload(products: Value) -> Value {
    json!({"data": {"products": products}})
}

fn magento_payload(items: Value) -> Value {
    json!({"data": {"products": {"items": items, "total_count": 0}}})
}

// ---------------------------------------------------------------------------
// Minimal valid items are all converted
// ---------------------------------------------------------------------------

#[test]
fn minimal_items_preserve_count_on_every_platform() {
    let cases = [
        (
            Platform::Prestashop,
            prestashop_payload(json!([
                {"remoteId": 1, "sku": "A"},
                {"remoteId": 2, "sku": "B"},
                {"remoteId": 3, "sku": "C"}
            ])),
        ),
        (
            Platform::Shopify,
            json!({"products": [
                {"id": "gid://shopify/Product/1", "title": "A"},
                {"id": "gid://shopify/Product/2", "title": "B"},
                {"id": "gid://shopify/Product/3", "title": "C"}
            ]}),
        ),
        (
            Platform::Magento,
            magento_payload(json!([
                {"id": 1, "sku": "A", "name": "A"},
                {"id": 2, "sku": "B", "name": "B"},
                {"id": 3, "sku": "C", "name": "C"}
            ])),
        ),
    ];

    for (platform, payload) in cases {
        let adapter = adapter_for(platform, &AdapterSettings::default());
        let output = adapter.transform(&payload).unwrap();
        assert_eq!(output.products.len(), 3, "{platform}");
        assert!(output.is_clean(), "{platform}: {:?}", output.errors);
    }
}

// ---------------------------------------------------------------------------
// A missing required field drops exactly that item
// ---------------------------------------------------------------------------

#[test]
fn missing_required_field_yields_one_transformation_error() {
    let cases: [(Box<dyn SourceAdapter>, Value, &str); 3] = [
        (
            Box::new(PrestashopAdapter::new()),
            prestashop_payload(json!([
                {"remoteId": 1, "sku": "A"},
                {"remoteId": 2},
                {"remoteId": 3, "sku": "C"}
            ])),
            "sku",
        ),
        (
            Box::new(ShopifyAdapter::new()),
            json!({"products": [
                {"id": "gid://shopify/Product/1", "title": "A"},
                {"id": "gid://shopify/Product/2"},
                {"id": "gid://shopify/Product/3", "title": "C"}
            ]}),
            "title",
        ),
        (
            Box::new(MagentoAdapter::new()),
            magento_payload(json!([
                {"id": 1, "sku": "A", "name": "A"},
                {"id": 2, "name": "B"},
                {"id": 3, "sku": "C", "name": "C"}
            ])),
            "sku",
        ),
    ];

    for (adapter, payload, field) in cases {
        let platform = adapter.platform();
        let output = adapter.transform(&payload).unwrap();
        assert_eq!(output.products.len(), 2, "{platform}");
        assert_eq!(output.errors.len(), 1, "{platform}");

        let error = &output.errors[0];
        assert_eq!(error.kind, ItemErrorKind::TransformationError);
        assert_eq!(error.product_index, 1);
        assert_eq!(error.product_id.as_deref().map(str::is_empty), Some(false));
        assert!(
            error.message.contains(field),
            "{platform}: message {:?} should name {field}",
            error.message
        );
    }
}

#[test]
fn non_object_items_are_invalid_structure() {
    let payload = json!({"products": [
        "gid://shopify/Product/1",
        {"id": "gid://shopify/Product/2", "title": "B"}
    ]});
    let output = ShopifyAdapter::new().transform(&payload).unwrap();
    assert_eq!(output.products.len(), 1);
    assert_eq!(output.errors[0].kind, ItemErrorKind::InvalidStructure);
    assert_eq!(output.errors[0].product_index, 0);
}

// ---------------------------------------------------------------------------
// Fatal container and strict-mode errors
// ---------------------------------------------------------------------------

#[test]
fn missing_container_is_fatal_on_every_platform() {
    for platform in [Platform::Prestashop, Platform::Shopify, Platform::Magento] {
        let adapter = adapter_for(platform, &AdapterSettings::default());
        let err = adapter.transform(&json!({"unexpected": []})).unwrap_err();
        assert!(
            matches!(err, AdapterError::MissingContainer { .. }),
            "{platform}: {err}"
        );
    }
}

#[test]
fn strict_prestashop_aborts_on_missing_identity() {
    let settings = AdapterSettings {
        prestashop_strict: true,
        ..AdapterSettings::default()
    };
    let adapter = adapter_for(Platform::Prestashop, &settings);
    let payload = prestashop_payload(json!([
        {"remoteId": 1, "sku": "A"},
        {"sku": "B"}
    ]));

    let err = adapter.transform(&payload).unwrap_err();
    assert!(matches!(
        err,
        AdapterError::MissingRequiredField {
            index: 1,
            field: "remoteId"
        }
    ));
}

#[test]
fn magento_without_items_is_empty() {
    let output = MagentoAdapter::new()
        .transform(&json!({"data": {"products": {"total_count": 0}}}))
        .unwrap();
    assert!(output.products.is_empty());
    assert!(output.is_clean());
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn prestashop_shoe_is_expanded_per_locale() {
    let payload = prestashop_payload(json!([{
        "remoteId": "17",
        "sku": "SHOE-17",
        "localizedNames": {"en-US": "Shoe", "lt-LT": "Batas"}
    }]));
    let output = PrestashopAdapter::new().transform(&payload).unwrap();
    let doc = output.products[0].to_document().unwrap();

    assert_eq!(doc["name"], json!("Shoe"));
    assert_eq!(doc["name_lt-LT"], json!("Batas"));
    let mut name_keys: Vec<&str> = doc
        .keys()
        .map(String::as_str)
        .filter(|key| key.starts_with("name"))
        .collect();
    name_keys.sort_unstable();
    assert_eq!(name_keys, vec!["name", "name_lt-LT"]);
}

#[test]
fn shopify_gid_is_reduced_to_digits() {
    let payload = json!({"data": {"products": {"edges": [
        {"node": {"id": "gid://shopify/Product/6843600694995", "title": "A"}},
        {"node": {"id": "gid://shopify/Product/not-a-number", "title": "B"}}
    ]}}});
    let output = ShopifyAdapter::new().transform(&payload).unwrap();
    assert_eq!(output.products[0].id, "6843600694995");
    assert_eq!(output.products[1].id, "");
}

#[test]
fn magento_categories_resolve_across_the_response() {
    let payload = magento_payload(json!([
        {
            "id": 1, "sku": "A", "name": "A",
            "categories": [
                {"id": 10, "name": "Root", "level": 1, "path": "1/10"},
                {"id": 20, "name": "Sub", "level": 2, "path": "1/10/20"}
            ]
        },
        {
            "id": 2, "sku": "B", "name": "B",
            "categories": [{"id": 30, "name": "Leaf", "level": 3, "path": "1/10/20/30"}]
        }
    ]));
    let output = MagentoAdapter::new().transform(&payload).unwrap();

    let first = &output.products[0];
    assert_eq!(
        first.categories,
        Some(vec!["Root".to_owned(), "Root > Sub".to_owned()])
    );
    assert_eq!(first.category_default.as_deref(), Some("Root"));

    let second = &output.products[1];
    assert_eq!(
        second.categories,
        Some(vec!["Root > Sub > Leaf".to_owned()])
    );
    assert_eq!(second.category_default.as_deref(), Some("Leaf"));
}

#[test]
fn adapters_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PrestashopAdapter>();
    assert_send_sync::<ShopifyAdapter>();
    assert_send_sync::<MagentoAdapter>();
    assert_send_sync::<Box<dyn SourceAdapter>>();
}
