use serde_json::json;

use super::*;

fn make_product() -> Value {
    json!({
        "id": "gid://shopify/Product/6843600694995",
        "title": "Trail Runner",
        "vendor": "Acme",
        "descriptionHtml": "<p>Light <b>and</b> fast.</p>",
        "onlineStoreUrl": "https://shop.example/products/trail-runner",
        "productType": "Shoes",
        "tags": ["running", "Shoes", "summer"],
        "priceRangeV2": {
            "minVariantPrice": {"amount": "89.00", "currencyCode": "EUR"},
            "maxVariantPrice": {"amount": "99.5", "currencyCode": "EUR"}
        },
        "images": {"edges": [
            {"node": {"url": "https://cdn.example/large.jpg", "width": 2048}},
            {"node": {"url": "https://cdn.example/small.jpg", "width": 320}},
            {"node": {"url": "https://cdn.example/medium.jpg", "width": 1024}}
        ]},
        "variants": {"edges": [
            {"node": {
                "id": "gid://shopify/ProductVariant/111",
                "sku": "",
                "availableForSale": false,
                "selectedOptions": [{"name": "Color", "value": "Red"}, {"name": "Size", "value": "42"}]
            }},
            {"node": {
                "id": "gid://shopify/ProductVariant/112",
                "sku": "TR-BLUE-42",
                "availableForSale": true,
                "selectedOptions": [{"name": "Color", "value": "Blue"}]
            }}
        ]}
    })
}

// -----------------------------------------------------------------------
// identity
// -----------------------------------------------------------------------

#[test]
fn gid_is_reduced_to_numeric_id() {
    let product = normalize_product(&make_product()).unwrap();
    assert_eq!(product.id, "6843600694995");
    assert_eq!(product.name.as_deref(), Some("Trail Runner"));
}

#[test]
fn malformed_gid_yields_empty_id() {
    let mut raw = make_product();
    raw["id"] = json!("gid://shopify/Product/abc");
    let product = normalize_product(&raw).unwrap();
    assert_eq!(product.id, "");
}

#[test]
fn sku_is_first_non_empty_variant_sku() {
    let product = normalize_product(&make_product()).unwrap();
    assert_eq!(product.sku, "TR-BLUE-42");
}

#[test]
fn sku_falls_back_to_numeric_id() {
    let product = normalize_product(&json!({"id": "gid://shopify/Product/9", "title": "Cap"})).unwrap();
    assert_eq!(product.sku, "9");
}

#[test]
fn missing_title_is_reported_by_name() {
    let err = normalize_product(&json!({"id": "gid://shopify/Product/9"})).unwrap_err();
    assert!(matches!(err, AdapterError::MissingField { ref field } if field == "title"));
}

// -----------------------------------------------------------------------
// descriptive fields
// -----------------------------------------------------------------------

#[test]
fn description_html_is_stripped_when_plain_text_absent() {
    let product = normalize_product(&make_product()).unwrap();
    assert_eq!(product.description.as_deref(), Some("Light and fast."));
    assert_eq!(product.brand.as_deref(), Some("Acme"));
}

#[test]
fn plain_description_wins_over_html() {
    let mut raw = make_product();
    raw["description"] = json!("Plain");
    let product = normalize_product(&raw).unwrap();
    assert_eq!(product.description.as_deref(), Some("Plain"));
}

#[test]
fn categories_come_from_type_then_deduped_tags() {
    let product = normalize_product(&make_product()).unwrap();
    assert_eq!(
        product.categories,
        Some(vec![
            "Shoes".to_owned(),
            "running".to_owned(),
            "summer".to_owned()
        ])
    );
    assert_eq!(product.category_default.as_deref(), Some("Shoes"));
}

#[test]
fn comma_separated_tags_are_split() {
    let raw = json!({"id": "1", "title": "Cap", "tags": "sale, hats,,sale"});
    let product = normalize_product(&raw).unwrap();
    assert_eq!(
        product.categories,
        Some(vec!["sale".to_owned(), "hats".to_owned()])
    );
    assert_eq!(product.category_default.as_deref(), Some(""));
}

// -----------------------------------------------------------------------
// prices and images
// -----------------------------------------------------------------------

#[test]
fn price_range_maps_min_and_max() {
    let product = normalize_product(&make_product()).unwrap();
    assert_eq!(product.price.as_deref(), Some("89"));
    assert_eq!(product.base_price.as_deref(), Some("99.5"));
}

#[test]
fn base_price_falls_back_to_min() {
    let raw = json!({
        "id": "1",
        "title": "Cap",
        "priceRange": {"minVariantPrice": {"amount": 15}}
    });
    let product = normalize_product(&raw).unwrap();
    assert_eq!(product.price.as_deref(), Some("15"));
    assert_eq!(product.base_price.as_deref(), Some("15"));
}

#[test]
fn images_are_selected_by_width() {
    let product = normalize_product(&make_product()).unwrap();
    let images = product.image_url.unwrap();
    assert_eq!(images.small.as_deref(), Some("https://cdn.example/small.jpg"));
    assert_eq!(images.medium.as_deref(), Some("https://cdn.example/medium.jpg"));
}

#[test]
fn legacy_image_src_alias_is_read() {
    let raw = json!({"id": "1", "title": "Cap", "images": [{"src": "https://cdn.example/cap.png"}]});
    let images = normalize_product(&raw).unwrap().image_url.unwrap();
    assert_eq!(images.small, images.medium);
    assert_eq!(images.small.as_deref(), Some("https://cdn.example/cap.png"));
}

// -----------------------------------------------------------------------
// variants and stock
// -----------------------------------------------------------------------

#[test]
fn variants_carry_numeric_ids_urls_and_lowercased_options() {
    let product = normalize_product(&make_product()).unwrap();
    let variants = product.variants.unwrap();
    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0].id, "111");
    assert!(variants[0].sku.is_none());
    assert_eq!(
        variants[0].url.as_deref(),
        Some("https://shop.example/products/trail-runner?variant=111")
    );
    assert_eq!(
        variants[0].attributes,
        vec![
            VariantAttribute::new("color", "Red"),
            VariantAttribute::new("size", "42")
        ]
    );
}

#[test]
fn in_stock_when_any_variant_is_available() {
    assert_eq!(normalize_product(&make_product()).unwrap().in_stock, Some(true));

    let mut raw = make_product();
    raw["variants"]["edges"][1]["node"]["availableForSale"] = json!(false);
    assert_eq!(normalize_product(&raw).unwrap().in_stock, Some(false));
}

#[test]
fn variant_url_requires_product_url() {
    let raw = json!({
        "id": "1",
        "title": "Cap",
        "variants": [{"id": "gid://shopify/ProductVariant/5"}]
    });
    let product = normalize_product(&raw).unwrap();
    let variants = product.variants.unwrap();
    assert_eq!(variants[0].id, "5");
    assert!(variants[0].url.is_none());
}
