use serde_json::{Value as JsonValue, json};
use tabular_compute::dispatch::{Dispatcher, DispatcherOptions, ExecutionMode};

fn sync_dispatcher() -> Dispatcher {
    Dispatcher::new(DispatcherOptions {
        num_threads: None,
        mode: ExecutionMode::Synchronous,
    })
}

fn sales_rows() -> JsonValue {
    json!([
        {"r": "A", "c": "X", "v": "2"},
        {"r": "A", "c": "X", "v": "3"},
        {"r": "B", "c": "Y", "v": "5"}
    ])
}

#[test]
fn pivot_over_the_wire_conserves_sums_and_key_order() {
    let response = Dispatcher::default().handle_value(json!({
        "operation": "pivot",
        "dataset": sales_rows(),
        "config": {"rowField": "r", "colField": "c", "valueField": "v"}
    }));

    assert_eq!(response["operation"], "pivot");
    assert_eq!(response["result"]["table"]["A"]["X"], 5.0);
    assert_eq!(response["result"]["table"]["B"]["Y"], 5.0);
    assert_eq!(response["result"]["rowKeys"], json!(["A", "B"]));
    assert_eq!(response["result"]["colKeys"], json!(["X", "Y"]));
}

#[test]
fn decision_over_the_wire_normalizes_and_ranks() {
    let response = Dispatcher::default().handle_value(json!({
        "operation": "decision",
        "dataset": [{"a": 10}, {"a": 5}, {"a": 0}],
        "config": {"numericCols": ["a"], "weights": {}}
    }));

    assert_eq!(response["operation"], "decision");
    let result = response["result"].as_array().unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(result[0]["a"], 10.0);
    assert_eq!(result[0]["totalScore"], 1.0);
    assert_eq!(result[1]["totalScore"], 0.5);
    assert_eq!(result[2]["totalScore"], 0.0);
}

#[test]
fn decision_fail_fast_surfaces_as_an_error_response() {
    let response = Dispatcher::default().handle_value(json!({
        "operation": "decision",
        "dataset": [{"a": 10}, {"a": "not a number"}],
        "config": {"numericCols": ["a"], "weights": {}}
    }));

    let error = response["error"].as_str().unwrap();
    assert!(error.contains("'a'"));
    assert!(response.get("result").is_none());
}

#[test]
fn sort_filter_over_the_wire_is_case_insensitive() {
    let response = Dispatcher::default().handle_value(json!({
        "operation": "sortFilter",
        "dataset": [
            {"name": "Bob", "age": 30},
            {"name": "ann", "age": 25}
        ],
        "config": {
            "filter": "bo",
            "sortConfig": {"key": null, "direction": "asc"},
            "columns": ["name"]
        }
    }));

    assert_eq!(response["operation"], "sortFilter");
    assert_eq!(response["result"], json!([{"name": "Bob", "age": 30.0}]));
}

#[test]
fn sort_filter_without_a_key_preserves_dataset_order() {
    let request = json!({
        "operation": "sortFilter",
        "dataset": [
            {"name": "Bob", "age": 30},
            {"name": "ann", "age": 25}
        ],
        "config": {"sortConfig": {}, "columns": ["name"]}
    });
    let response = Dispatcher::default().handle_value(request);
    let names: Vec<&str> = response["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Bob", "ann"]);
}

#[test]
fn sort_filter_is_idempotent_byte_for_byte() {
    let request = r#"{
        "operation": "sortFilter",
        "dataset": [{"name": "Bob", "age": 30}, {"name": "ann", "age": 25}],
        "config": {
            "filter": "n",
            "sortConfig": {"key": "age", "direction": "desc"},
            "columns": ["name"]
        }
    }"#;
    let dispatcher = Dispatcher::default();
    assert_eq!(dispatcher.handle_json(request), dispatcher.handle_json(request));
}

#[test]
fn stats_over_the_wire_matches_the_reference_values() {
    let response = Dispatcher::default().handle_value(json!({
        "operation": "stats",
        "dataset": {
            "v": [1, 2, 3, 4],
            "broken": ["x", null]
        }
    }));

    assert_eq!(response["operation"], "stats");
    let v = &response["result"]["v"];
    assert_eq!(v["mean"], 2.5);
    assert_eq!(v["median"], 2.5);
    assert!((v["stdDev"].as_f64().unwrap() - 1.118033988749895).abs() < 1e-12);
    assert_eq!(v["min"], 1.0);
    assert_eq!(v["max"], 4.0);

    let broken = &response["result"]["broken"];
    assert_eq!(broken["mean"], 0.0);
    assert_eq!(broken["stdDev"], 0.0);
}

#[test]
fn unknown_operation_yields_the_fixed_error_message() {
    let response = Dispatcher::default().handle_value(json!({
        "operation": "bogus", "dataset": [], "config": {}
    }));
    assert_eq!(response, json!({"error": "Unknown computation type"}));
}

#[test]
fn malformed_json_yields_an_error_response_not_a_fault() {
    let out = Dispatcher::default().handle_json("{not json");
    let response: JsonValue = serde_json::from_str(&out).unwrap();
    assert!(response["error"].as_str().unwrap().contains("invalid request"));
}

#[test]
fn malformed_config_yields_an_error_response() {
    let response = Dispatcher::default().handle_value(json!({
        "operation": "pivot",
        "dataset": sales_rows(),
        "config": {"rowField": "r"}
    }));
    assert!(response["error"].as_str().unwrap().contains("invalid request"));
}

#[test]
fn synchronous_fallback_answers_identically_to_parallel() {
    let request = json!({
        "operation": "pivot",
        "dataset": sales_rows(),
        "config": {"rowField": "r", "colField": "c", "valueField": "v"}
    });

    let parallel = Dispatcher::default().handle_value(request.clone());
    let synchronous = sync_dispatcher().handle_value(request);
    assert_eq!(parallel, synchronous);
}

#[test]
fn mixed_concurrent_requests_each_receive_their_own_operation() {
    let dispatcher = Dispatcher::new(DispatcherOptions {
        num_threads: Some(4),
        mode: ExecutionMode::Parallel,
    });

    let requests = vec![
        json!({
            "operation": "pivot",
            "dataset": sales_rows(),
            "config": {"rowField": "r", "colField": "c", "valueField": "v"}
        }),
        json!({
            "operation": "stats",
            "dataset": {"v": [1, 2, 3]}
        }),
        json!({
            "operation": "sortFilter",
            "dataset": [{"name": "Bob"}],
            "config": {"sortConfig": {}, "columns": []}
        }),
        json!({
            "operation": "decision",
            "dataset": [{"a": 1}],
            "config": {"numericCols": ["a"], "weights": {}}
        }),
    ];

    std::thread::scope(|scope| {
        let handles: Vec<_> = requests
            .iter()
            .map(|request| {
                let dispatcher = &dispatcher;
                scope.spawn(move || {
                    let expected = request["operation"].clone();
                    let response = dispatcher.handle_value(request.clone());
                    assert_eq!(response["operation"], expected);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    });
}

#[test]
fn empty_dataset_is_degenerate_input_not_an_error() {
    let response = Dispatcher::default().handle_value(json!({
        "operation": "pivot",
        "dataset": [],
        "config": {"rowField": "r", "colField": "c", "valueField": "v"}
    }));
    assert_eq!(response["operation"], "pivot");
    assert_eq!(response["result"]["rowKeys"], json!([]));
    assert_eq!(response["result"]["table"], json!({}));
}
