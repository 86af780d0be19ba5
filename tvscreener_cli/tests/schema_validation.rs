use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use tvscreener_lib::types::{ScanResponse, ScreenerResult};
use tvscreener_lib::{CatalogId, CryptoSearch, ScanRequest, ScreenerQuery, StockSearch};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("CLI crate should be inside workspace")
        .to_path_buf()
}

fn load_fixture(name: &str) -> String {
    let path = workspace_root()
        .join("tvscreener_api/tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e))
}

fn load_schema(name: &str) -> Value {
    let path = workspace_root().join("schema").join(name);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read schema {}: {}", path.display(), e));
    serde_json::from_str(&text).expect("schema is valid JSON")
}

fn assert_valid(schema_name: &str, instance: &Value) {
    let schema = load_schema(schema_name);
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    if let Err(e) = validator.validate(instance) {
        panic!("{} rejected {}: {e}", schema_name, instance);
    }
}

fn assert_invalid(schema_name: &str, instance: &Value) {
    let schema = load_schema(schema_name);
    let validator = jsonschema::draft202012::new(&schema).expect("schema compiles");
    assert!(
        !validator.is_valid(instance),
        "{} accepted {}",
        schema_name,
        instance
    );
}

fn result_from_fixture(name: &str, query: &ScreenerQuery) -> ScreenerResult {
    let response: ScanResponse =
        serde_json::from_str(&load_fixture(name)).expect("fixture is a scan response");
    ScreenerResult::from_scan(response, &query.columns())
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

#[test]
fn default_payloads_conform() {
    for catalog in CatalogId::ALL {
        let payload = ScreenerQuery::new(catalog).payload();
        assert_valid("scan_payload.schema.json", &serde_json::to_value(payload).unwrap());
    }
}

#[test]
fn full_request_payload_conforms() {
    let request = ScanRequest {
        filters: vec![
            "PRICE=10..50".into(),
            "SECTOR=Finance,Utilities".into(),
            "VOLUME!=0".into(),
        ],
        fields: vec!["NAME".into(), "PRICE".into(), "PRICE[1]".into()],
        sort: Some("VOLUME".into()),
        ascending: true,
        offset: 50,
        limit: 25,
        symbol_types: vec!["stock".into()],
        ..ScanRequest::new(CatalogId::Stock)
    };
    let payload = serde_json::to_value(request.to_query().unwrap().payload()).unwrap();
    assert_eq!(payload["sort"]["sortOrder"], "asc");
    assert_valid("scan_payload.schema.json", &payload);
}

#[test]
fn index_payload_conforms() {
    let payload = ScreenerQuery::stocks().with_index(&["SYML:SP;SPX"]).payload();
    assert_valid("scan_payload.schema.json", &serde_json::to_value(payload).unwrap());
}

#[test]
fn preset_payloads_conform() {
    let stocks = StockSearch {
        min_price: Some(5.0),
        max_market_cap: Some(2e9),
        ..Default::default()
    };
    let crypto = CryptoSearch {
        min_volume_24h: Some(1e6),
        limit: Some(5),
        ..Default::default()
    };
    for payload in [stocks.to_query().unwrap().payload(), crypto.to_query().unwrap().payload()] {
        assert_valid("scan_payload.schema.json", &serde_json::to_value(payload).unwrap());
    }
}

// ---------------------------------------------------------------------------
// Mapped results
// ---------------------------------------------------------------------------

#[test]
fn stock_result_conforms() {
    let query = ScreenerQuery::stocks()
        .with_fields([
            tvscreener_lib::tvscreener_api::StockField::NAME,
            tvscreener_lib::tvscreener_api::StockField::PRICE,
        ])
        .unwrap();
    let result = result_from_fixture("scan.json", &query);
    assert_valid("scan_result.schema.json", &serde_json::to_value(result).unwrap());
}

#[test]
fn futures_result_with_nulls_conforms() {
    let result = result_from_fixture("scan_futures.json", &ScreenerQuery::futures());
    let value = serde_json::to_value(result).unwrap();
    assert_eq!(value["data"].as_array().unwrap().len(), 3);
    assert_valid("scan_result.schema.json", &value);
}

// ---------------------------------------------------------------------------
// Negative validation
// ---------------------------------------------------------------------------

#[test]
fn unknown_operation_is_rejected() {
    let mut payload = serde_json::to_value(ScreenerQuery::stocks().payload()).unwrap();
    payload["filter"] = json!([{"left": "close", "operation": "bigger", "right": 1}]);
    assert_invalid("scan_payload.schema.json", &payload);
}

#[test]
fn malformed_range_is_rejected() {
    let mut payload = serde_json::to_value(ScreenerQuery::stocks().payload()).unwrap();
    payload["range"] = json!([0, 10, 20]);
    assert_invalid("scan_payload.schema.json", &payload);
}

#[test]
fn result_row_without_symbol_is_rejected() {
    let value = json!({"totalCount": 1, "data": [{"close": 1.0}]});
    assert_invalid("scan_result.schema.json", &value);
}
