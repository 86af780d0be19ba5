use std::time::Duration;

use serde_json::json;
use tvscreener_lib::format::format_value;
use tvscreener_lib::{CatalogId, ClientConfig, ScanRequest, ScreenerError, StockSearch};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig {
        base_url: server.uri(),
        timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn preset_search_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/america/scan"))
        .and(body_partial_json(json!({
            "filter": [{"left": "close", "operation": "egreater", "right": 100.0}],
            "range": [0, 2]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(include_str!("fixtures/scan_stocks.json")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = config_for(&mock_server).build_client();
    let search = StockSearch {
        min_price: Some(100.0),
        limit: Some(2),
        ..Default::default()
    };
    let query = search.to_query().unwrap();
    let result = query.get(&client).await.unwrap();

    assert_eq!(result.total_count, 412);
    let nvda = &result.data[0];
    assert_eq!(nvda.symbol, "NASDAQ:NVDA");

    let fields = query.fields();
    let rendered: Vec<String> = fields
        .iter()
        .map(|field| {
            let value = nvda.get(&field.wire_name()).cloned().unwrap_or_default();
            format_value(&value, field.format())
        })
        .collect();
    assert_eq!(
        rendered,
        ["NVDA", "$875.28", "3.12%", "41,234,567", "$2,188,000,000,000.00"]
    );
}

#[tokio::test]
async fn request_errors_are_wrapped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/futures/scan"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"message": "slow down"})))
        .mount(&mock_server)
        .await;

    let client = config_for(&mock_server).build_client();
    let query = ScanRequest::new(CatalogId::Futures).to_query().unwrap();
    let err: ScreenerError = query.get(&client).await.unwrap_err().into();
    assert!(err.to_string().starts_with("API error: Request to "));
    assert!(err.to_string().ends_with("failed with status 429: slow down"));
}

#[test]
fn invalid_requests_fail_before_sending() {
    let request = ScanRequest {
        fields: vec!["PRICE".into(), "NOT_A_FIELD".into()],
        ..ScanRequest::new(CatalogId::Crypto)
    };
    let err = request.to_query().unwrap_err();
    assert!(matches!(err, ScreenerError::InvalidInput(_)));
}
