use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use database::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;
use web_server::{router, AppState};

fn app() -> Router {
    router(AppState::new(MemoryStore::new()))
}

fn example_facility() -> Value {
    json!({
        "uid": "M.B.ABC_VA.0",
        "segment": "Manufacturing",
        "company": "ABC Group",
        "technology": "Batteries",
        "subcategory": "EAM",
        "investment_status": "U",
        "latitude": 36.63792,
        "longitude": -76.39912,
        "estimated_investment": 6023143,
        "announcement_date": "2023-06-19"
    })
}

fn facility(uid: &str, segment: &str, announced: &str) -> Value {
    let mut body = example_facility();
    body["uid"] = json!(uid);
    body["segment"] = json!(segment);
    body["announcement_date"] = json!(announced);
    body
}

/// Sends one request through a clone of the router and returns status + JSON body.
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

#[tokio::test]
async fn example_lifecycle_end_to_end() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/facilities/", Some(example_facility())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created, example_facility());

    let (status, fetched) = send(&app, Method::GET, "/facilities/M.B.ABC_VA.0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, example_facility());

    let (status, ack) = send(&app, Method::DELETE, "/facilities/M.B.ABC_VA.0", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack, json!({ "ok": true }));

    let (status, _) = send(&app, Method::GET, "/facilities/M.B.ABC_VA.0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/facilities/M.B.ABC_VA.0", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_uid_is_a_conflict() {
    let app = app();
    let (status, _) = send(&app, Method::POST, "/facilities/", Some(example_facility())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::POST, "/facilities/", Some(example_facility())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "A resource with this uid already exists");
}

#[tokio::test]
async fn concurrent_duplicate_creates_yield_one_success() {
    let app = app();
    let (a, b) = tokio::join!(
        send(&app, Method::POST, "/facilities/", Some(example_facility())),
        send(&app, Method::POST, "/facilities/", Some(example_facility())),
    );
    let mut statuses = [a.0.as_u16(), b.0.as_u16()];
    statuses.sort();
    assert_eq!(statuses, [200, 409]);
}

#[tokio::test]
async fn out_of_range_coordinates_are_unprocessable() {
    let app = app();
    let mut body = example_facility();
    body["latitude"] = json!(90.0);
    let (status, _) = send(&app, Method::POST, "/facilities/", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut body = example_facility();
    body["longitude"] = json!(-180.5);
    let (status, _) = send(&app, Method::POST, "/facilities/", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut body = example_facility();
    body["uid"] = json!(42);
    let (status, _) = send(&app, Method::POST, "/facilities/", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing reached the store.
    let (_, listed) = send(&app, Method::GET, "/facilities/", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn missing_announcement_date_is_unprocessable() {
    let app = app();
    let mut body = example_facility();
    body.as_object_mut().unwrap().remove("announcement_date");
    let (status, _) = send(&app, Method::POST, "/facilities/", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unfiltered_list_is_ordered_by_announcement_date() {
    let app = app();
    for (uid, date) in [("C", "2024-01-05"), ("A", "2021-03-01"), ("B", "2022-11-30")] {
        let (status, _) =
            send(&app, Method::POST, "/facilities/", Some(facility(uid, "Energy", date))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, listed) = send(&app, Method::GET, "/facilities/", None).await;
    assert_eq!(status, StatusCode::OK);
    let uids: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["uid"].as_str().unwrap())
        .collect();
    assert_eq!(uids, ["A", "B", "C"]);

    // The path without the trailing slash serves the same listing.
    let (status, same) = send(&app, Method::GET, "/facilities", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(same, listed);
}

#[tokio::test]
async fn list_filters_by_segment_and_strict_date_window() {
    let app = app();
    for (uid, segment, date) in [
        ("M1", "Manufacturing", "2023-06-19"),
        ("M2", "Manufacturing", "2023-01-01"),
        ("M3", "Manufacturing", "2024-02-01"),
        ("E1", "Energy", "2023-06-19"),
    ] {
        send(&app, Method::POST, "/facilities/", Some(facility(uid, segment, date))).await;
    }

    let (_, by_segment) = send(&app, Method::GET, "/facilities/?segment=Manufacturing", None).await;
    assert_eq!(by_segment.as_array().unwrap().len(), 3);
    assert!(
        by_segment
            .as_array()
            .unwrap()
            .iter()
            .all(|f| f["segment"] == "Manufacturing")
    );

    let (_, windowed) = send(
        &app,
        Method::GET,
        "/facilities/?announced_after=2023-01-01&announced_before=2023-12-31",
        None,
    )
    .await;
    let uids: Vec<&str> = windowed
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["uid"].as_str().unwrap())
        .collect();
    assert_eq!(uids, ["E1", "M1"]);
}

#[tokio::test]
async fn limit_above_ceiling_is_rejected() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/facilities/?limit=6000", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, Method::GET, "/facilities/?limit=5000", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_filter_values_are_unprocessable() {
    let app = app();
    for uri in [
        "/facilities/?announced_before=yesterday",
        "/facilities/?offset=-1",
        "/facilities/?limit=ten",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn pagination_walks_the_ordered_results() {
    let app = app();
    for (uid, date) in [("A", "2023-01-01"), ("B", "2023-01-01"), ("C", "2023-01-02")] {
        send(&app, Method::POST, "/facilities/", Some(facility(uid, "Energy", date))).await;
    }

    let (_, page) = send(&app, Method::GET, "/facilities/?offset=1&limit=1", None).await;
    assert_eq!(page.as_array().unwrap().len(), 1);
    assert_eq!(page[0]["uid"], "B");
}

#[tokio::test]
async fn health_check_responds() {
    let app = app();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
