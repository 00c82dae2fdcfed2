//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and either an expected parse result or an expected error classification.
//! Comparing parsed JSON (not raw strings) avoids false negatives from
//! field-ordering differences.

use serde_json::Value;
use taskboard_core::{
    ApiError, ClientConfig, ErrorKind, HttpMethod, HttpRequest, HttpResponse, Task, TaskClient,
    TaskDraft, TaskPatch,
};

const BASE_URL: &str = "http://localhost:5000/api/todos";

fn client() -> TaskClient {
    TaskClient::new(ClientConfig::new(BASE_URL).unwrap())
}

fn cases(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn parse_kind(s: &str) -> ErrorKind {
    match s {
        "Connection" => ErrorKind::Connection,
        "BadRequest" => ErrorKind::BadRequest,
        "Unauthorized" => ErrorKind::Unauthorized,
        "Forbidden" => ErrorKind::Forbidden,
        "NotFound" => ErrorKind::NotFound,
        "ServerFault" => ErrorKind::ServerFault,
        "Http" => ErrorKind::Http,
        "Application" => ErrorKind::Application,
        "Decode" => ErrorKind::Decode,
        other => panic!("unknown error kind: {other}"),
    }
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");
    match &expected["body"] {
        Value::Null => assert!(req.body.is_none(), "{name}: body should be None"),
        body => {
            let actual: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&actual, body, "{name}: body");
        }
    }
}

fn simulated(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn check_error(name: &str, err: ApiError, expected: &Value) {
    assert_eq!(err.kind(), parse_kind(expected["kind"].as_str().unwrap()), "{name}: kind");
    assert_eq!(err.status(), expected["status"].as_u64().map(|s| s as u16), "{name}: status");
    let needle = expected["message_contains"].as_str().unwrap();
    assert!(err.message().contains(needle), "{name}: message `{}` lacks `{needle}`", err.message());
}

fn check_task(name: &str, result: Result<Task, ApiError>, case: &Value) {
    match case.get("expected_error") {
        Some(expected) => check_error(name, result.unwrap_err(), expected),
        None => {
            let expected: Task = serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(result.unwrap(), expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        check_request(name, &c.build_list_tasks(), &case["expected_request"]);

        let result = c.parse_list_tasks(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected),
            None => {
                let expected: Vec<Task> =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: TaskDraft = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_create_task(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);
        assert!(
            req.headers
                .contains(&("content-type".to_string(), "application/json".to_string())),
            "{name}: content-type"
        );

        check_task(name, c.parse_create_task(simulated(&case)), &case);
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        let input: TaskPatch = serde_json::from_value(case["input"].clone()).unwrap();
        check_request(name, &c.build_update_task(id, &input).unwrap(), &case["expected_request"]);

        check_task(name, c.parse_update_task(simulated(&case)), &case);
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in cases(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_str().unwrap();
        check_request(name, &c.build_delete_task(id), &case["expected_request"]);

        let result = c.parse_delete_task(simulated(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected),
            None => {
                let confirmation = result.unwrap();
                assert_eq!(
                    confirmation.message.as_deref(),
                    case["expected_result"]["message"].as_str(),
                    "{name}: message"
                );
            }
        }
    }
}
