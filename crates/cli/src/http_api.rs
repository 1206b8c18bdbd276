use axum::{
    extract::{Path, Query, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use orgchart_indexer::{CatalogHandle, LoadStats, LoadStatus};
use orgchart_protocol::{serialize_json, ErrorBody, LeadershipOverview, GROUP_COLORS};
use orgchart_query::{DatasetSelector, OrgQuery, QueryError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

const INTERNAL_ERROR_BODY: &str = r#"{"error":"Internal server error"}"#;

#[derive(Clone)]
pub struct AppState {
    catalog: Arc<CatalogHandle>,
}

impl AppState {
    pub fn new(catalog: Arc<CatalogHandle>) -> Self {
        Self { catalog }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(homepage))
        .route("/management", get(management))
        .route("/managers", get(managers))
        .route("/employees", get(employees))
        .route("/api/chart_data/:group", get(chart_data))
        .route("/api/ccar_chart_data", get(ccar_chart_data))
        .route("/chart/:group", get(chart_page))
        .route("/health", get(health))
        .with_state(state)
}

/// Failure of a query-backed route, answered as `{"error": ...}`.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] QueryError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            QueryError::NotFound(_) | QueryError::EmptyDataset(_) => StatusCode::NOT_FOUND,
            QueryError::MissingTitles { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        log::warn!("Request rejected ({status}): {self}");
        json_response(status, &ErrorBody::new(self.to_string()))
    }
}

type ApiResult = std::result::Result<Response, ApiError>;

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> Response {
    match serialize_json(value) {
        Ok(body) => (status, [(CONTENT_TYPE, "application/json")], body).into_response(),
        Err(err) => {
            log::error!("Failed to serialize response: {err:#}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(CONTENT_TYPE, "application/json")],
                INTERNAL_ERROR_BODY,
            )
                .into_response()
        }
    }
}

fn ok_json<T: Serialize>(value: &T) -> ApiResult {
    Ok(json_response(StatusCode::OK, value))
}

#[derive(Serialize)]
struct Homepage<'a> {
    #[serde(flatten)]
    overview: LeadershipOverview,
    colors: &'a [&'a str],
}

async fn homepage(State(state): State<AppState>) -> ApiResult {
    let catalog = state.catalog.snapshot();
    let overview = OrgQuery::new(&catalog).leadership_overview();
    ok_json(&Homepage {
        overview,
        colors: &GROUP_COLORS,
    })
}

async fn management(State(state): State<AppState>) -> ApiResult {
    let catalog = state.catalog.snapshot();
    ok_json(&OrgQuery::new(&catalog).leadership_overview())
}

#[derive(Debug, Deserialize)]
struct ManagersParams {
    division: Option<String>,
}

async fn managers(
    State(state): State<AppState>,
    Query(params): Query<ManagersParams>,
) -> ApiResult {
    let catalog = state.catalog.snapshot();
    let division = params.division.as_deref().filter(|d| !d.is_empty());
    let page = OrgQuery::new(&catalog).managers_page(division)?;
    ok_json(&page)
}

async fn employees(State(state): State<AppState>) -> ApiResult {
    let catalog = state.catalog.snapshot();
    let directory = OrgQuery::new(&catalog).all_employees_with_cities();
    ok_json(&directory.to_payload())
}

async fn chart_data(State(state): State<AppState>, Path(group): Path<String>) -> ApiResult {
    chart_rows(&state, &DatasetSelector::parse(&group))
}

async fn ccar_chart_data(State(state): State<AppState>) -> ApiResult {
    chart_rows(&state, &DatasetSelector::Ccar)
}

fn chart_rows(state: &AppState, selector: &DatasetSelector) -> ApiResult {
    let catalog = state.catalog.snapshot();
    let page = OrgQuery::new(&catalog).chart_page(selector, None)?;
    ok_json(&page.chart_data)
}

#[derive(Debug, Deserialize)]
struct ChartParams {
    highlight: Option<String>,
}

async fn chart_page(
    State(state): State<AppState>,
    Path(group): Path<String>,
    Query(params): Query<ChartParams>,
) -> ApiResult {
    let catalog = state.catalog.snapshot();
    let page =
        OrgQuery::new(&catalog).chart_page(&DatasetSelector::parse(&group), params.highlight)?;
    ok_json(&page)
}

#[derive(Serialize)]
struct HealthReport<'a> {
    #[serde(flatten)]
    status: &'a LoadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    stats: &'a LoadStats,
}

async fn health(State(state): State<AppState>) -> ApiResult {
    let catalog = state.catalog.snapshot();
    ok_json(&HealthReport {
        status: catalog.load_status(),
        source: catalog.source().map(|path| path.display().to_string()),
        stats: catalog.stats(),
    })
}
