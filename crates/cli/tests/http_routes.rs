use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use orgchart_cli::{router, AppState};
use orgchart_indexer::{load_catalog, Catalog, CatalogHandle, LoaderConfig};
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

const HEADER: &str = "Employee ID,Preferred Name,Email - Work,Worker Corporate Title,Location Address - City,Cost Center Name,UBR Level 8,Organization Manager,Organization Manager Employee ID,Organization Manager Email,Matrix Manager,Worker Type";

const ROWS: &[&str] = &[
    "1001,Ada,ada@corp.example,Managing Director,London,Rates Desk,1100 Rates Trading,Grace,0000009,,,Employee",
    "1002,Bo,,Vice President,New York,CCAR Team NY,1100 Rates Trading,Ada,1001,,,Employee",
    "1003,Cy,,Analyst,Paris,Rates Desk,1100 Rates Trading,Ada,1001,,,Employee",
    "1004,Di,,Director,London,Rates Desk,1100 Rates Trading,Ada,1001,,,Contingent Worker",
    "2001,Ed,,Senior Analyst,Berlin,Audit Desk,2200 Internal Audit,Fay,2000,,,Employee",
    "3001,Gus,,,Madrid,Ops Desk,3300 Operations,Hal,3000,,,Employee",
];

fn app_with_rows(rows: &[&str]) -> (TempDir, Router) {
    let temp = TempDir::new().expect("tempdir");
    let mut body = format!("Workforce Report\n{HEADER}\n");
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    std::fs::write(temp.path().join("100 WD Report.csv"), body).expect("write report");

    let catalog = load_catalog(&LoaderConfig::new(temp.path())).expect("load");
    let app = router(AppState::new(Arc::new(CatalogHandle::new(catalog))));
    (temp, app)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}

#[tokio::test]
async fn homepage_reports_leaders_and_palette() {
    let (_temp, app) = app_with_rows(ROWS);
    let (status, json) = get_json(app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["groups"],
        serde_json::json!(["Rates Trading", "Internal Audit", "Operations"])
    );
    assert_eq!(
        json["group_data"]["Rates Trading"]["employee_ids"],
        serde_json::json!(["1001"])
    );
    assert_eq!(json["group_data"]["Rates Trading"]["total_count"], 3);
    assert_eq!(
        json["group_data"]["Internal Audit"]["employee_ids"],
        serde_json::json!([])
    );
    assert_eq!(json["colors"].as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn chart_data_is_ranked() {
    let (_temp, app) = app_with_rows(ROWS);
    let (status, json) = get_json(app, "/api/chart_data/Rates%20Trading").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = json
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|row| row["Employee ID"].as_str())
        .collect();
    assert_eq!(ids, ["1001", "1002", "1003"]);
    assert_eq!(json[0]["Hierarchy Rank"], 1);
    assert_eq!(json[0]["Key"], 100);
}

#[tokio::test]
async fn unknown_group_is_404_with_error_body() {
    let (_temp, app) = app_with_rows(ROWS);
    let (status, json) = get_json(app, "/api/chart_data/Payments").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No dataset for group 'Payments'");
}

#[tokio::test]
async fn missing_titles_are_400() {
    let (_temp, app) = app_with_rows(ROWS);
    let (status, json) = get_json(app, "/chart/Operations").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "1 rows with missing corporate title found for Operations"
    );
}

#[tokio::test]
async fn ccar_chart_routes_share_the_cost_center_dataset() {
    let (_temp, app) = app_with_rows(ROWS);
    let (status, json) = get_json(app.clone(), "/api/ccar_chart_data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json[0]["Employee ID"], "1002");

    let (status, page) = get_json(app, "/chart/CCAR?highlight=1002").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["group"], "CCAR");
    assert_eq!(page["highlight_id"], "1002");
    assert_eq!(page["chart_data"], json);
}

#[tokio::test]
async fn empty_ccar_dataset_is_404() {
    let (_temp, app) = app_with_rows(&ROWS[4..]);
    let (status, json) = get_json(app, "/api/ccar_chart_data").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "CCAR dataset is empty");
}

#[tokio::test]
async fn managers_lists_divisions_and_roster() {
    let (_temp, app) = app_with_rows(ROWS);
    let (status, json) = get_json(app.clone(), "/managers").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["division"], Value::Null);
    assert_eq!(json["managers"], serde_json::json!({}));
    assert_eq!(json["divisions"].as_array().map(Vec::len), Some(3));

    let (status, json) = get_json(app, "/managers?division=Rates%20Trading").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["division"], "Rates Trading");
    assert_eq!(json["managers"]["Grace"], serde_json::json!(["Ada"]));
    assert_eq!(json["managers"]["Ada"], serde_json::json!(["Bo", "Cy"]));
}

#[tokio::test]
async fn employees_lists_everyone_with_cities() {
    let (_temp, app) = app_with_rows(ROWS);
    let (status, json) = get_json(app, "/employees").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["all_employees"].as_array().map(Vec::len), Some(6));
    assert_eq!(
        json["cities"],
        serde_json::json!(["Berlin", "London", "Madrid", "New York", "Paris"])
    );
}

#[tokio::test]
async fn health_reports_degraded_catalog() {
    let app = router(AppState::new(Arc::new(CatalogHandle::new(
        Catalog::degraded("Missing columns in the dataset - Worker Type"),
    ))));
    let (status, json) = get_json(app.clone(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "degraded");
    assert_eq!(
        json["reason"],
        "Missing columns in the dataset - Worker Type"
    );

    let (status, json) = get_json(app, "/management").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["groups"], serde_json::json!([]));
}

#[tokio::test]
async fn managers_division_mentioning_ccar_uses_cost_center() {
    let (_temp, app) = app_with_rows(ROWS);
    let (status, json) = get_json(app, "/managers?division=CCAR").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["division"], "CCAR");
    assert_eq!(json["managers"], serde_json::json!({ "Ada": ["Bo"] }));
}
