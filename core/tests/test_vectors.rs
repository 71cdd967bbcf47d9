//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Expected payloads are decoded with the same
//! lenient rules, so vectors only list the fields they care about.

use azurlane_core::{
    ApiError, AzurLaneClient, Category, ClientConfig, Construction, HttpRequest, HttpResponse, Ship,
    ShipSummary,
};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000/v2";

fn client() -> AzurLaneClient {
    AzurLaneClient::new(ClientConfig::default().with_base_url(BASE_URL))
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(expected["method"], "GET", "{name}: only GET is supported");
    assert_eq!(
        req.url,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: url"
    );
    assert_eq!(req.header("Accept"), Some("application/json"), "{name}: accept");
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().as_bytes().to_vec(),
    }
}

/// Assert `result` matches the case's `expected_error`, or return the value.
fn check_outcome<T: std::fmt::Debug>(name: &str, case: &Value, result: Result<T, ApiError>) -> Option<T> {
    let Some(expected_error) = case.get("expected_error") else {
        return Some(result.unwrap_or_else(|e| panic!("{name}: unexpected error {e:?}")));
    };
    let err = result.unwrap_err();
    match expected_error["kind"].as_str().unwrap() {
        "UnexpectedStatus" => {
            let want = expected_error["status"].as_u64().unwrap() as u16;
            assert!(
                matches!(err, ApiError::UnexpectedStatus { status, .. } if status == want),
                "{name}: expected UnexpectedStatus({want}), got {err:?}"
            );
        }
        "Decode" => assert!(matches!(err, ApiError::Decode(_)), "{name}: expected Decode, got {err:?}"),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
    None
}

// ---------------------------------------------------------------------------
// Ship
// ---------------------------------------------------------------------------

#[test]
fn ship_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/ship.json")) {
        let name = case["name"].as_str().unwrap();
        let input = case["input"].as_str().unwrap();

        let req = match case["lookup"].as_str().unwrap() {
            "name" => c.build_ship_by_name(input),
            "id" => c.build_ship_by_id(input),
            other => panic!("{name}: unknown lookup: {other}"),
        };
        check_request(name, &req, &case["expected_request"]);

        if let Some(ship) = check_outcome(name, &case, c.parse_ship(simulated_response(&case))) {
            let expected: Ship = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(ship, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Ships
// ---------------------------------------------------------------------------

#[test]
fn ships_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/ships.json")) {
        let name = case["name"].as_str().unwrap();
        let category: Category = case["category"].as_str().unwrap().parse().unwrap();

        let req = c.build_ships(category, case["input"].as_str().unwrap());
        check_request(name, &req, &case["expected_request"]);

        if let Some(ships) = check_outcome(name, &case, c.parse_ships(simulated_response(&case))) {
            let expected: Vec<ShipSummary> =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(ships, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

#[test]
fn build_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/build.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_build_info(case["input"].as_str().unwrap());
        check_request(name, &req, &case["expected_request"]);

        if let Some(construction) =
            check_outcome(name, &case, c.parse_build_info(simulated_response(&case)))
        {
            let expected: Construction =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(construction, expected, "{name}: parsed result");
        }
    }
}
