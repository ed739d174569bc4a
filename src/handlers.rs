// region:    --- Imports
use crate::bidding::model::FieldEdits;
use crate::catalogue::model::Product;
use crate::error::{BidError, PersistenceError, SessionError};
use crate::server::AppState;
use crate::session::SessionId;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Error Response
/// 핸들러 오류 -> JSON 응답 변환
#[derive(Debug)]
pub enum ApiError {
    Bid(BidError),
    ProductNotFound(String),
}

impl From<BidError> for ApiError {
    fn from(e: BidError) -> Self {
        Self::Bid(e)
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        Self::Bid(e.into())
    }
}

impl From<PersistenceError> for ApiError {
    fn from(e: PersistenceError) -> Self {
        Self::Bid(e.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::ProductNotFound(code) => (
                StatusCode::NOT_FOUND,
                "PRODUCT_NOT_FOUND",
                format!("product {code} not found"),
            ),
            ApiError::Bid(BidError::Validation(e)) => {
                (StatusCode::BAD_REQUEST, e.code(), e.to_string())
            }
            ApiError::Bid(BidError::Session(e)) => {
                let (status, code) = match e {
                    SessionError::NotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
                    SessionError::FormNotOpen => (StatusCode::BAD_REQUEST, "FORM_NOT_OPEN"),
                    SessionError::NoProductSelected => {
                        (StatusCode::BAD_REQUEST, "NO_PRODUCT_SELECTED")
                    }
                };
                (status, code, e.to_string())
            }
            ApiError::Bid(BidError::Persistence(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PERSISTENCE_FAILED",
                e.to_string(),
            ),
        };
        warn!("{:<12} --> {} {}: {}", "Handler", status, code, message);
        (
            status,
            Json(serde_json::json!({ "error": message, "code": code })),
        )
            .into_response()
    }
}
// endregion: --- Error Response

// region:    --- Catalogue Handlers

#[derive(Debug, Deserialize)]
pub struct BrandQuery {
    pub category: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub product_code: Option<String>,
}

/// 카테고리 목록 조회
pub async fn handle_get_categories(State(state): State<AppState>) -> impl IntoResponse {
    info!("{:<12} --> 카테고리 목록 조회", "HandlerQuery");
    let categories: Vec<String> = state
        .catalogue
        .categories()
        .into_iter()
        .map(String::from)
        .collect();
    Json(categories)
}

/// 브랜드 목록 조회
pub async fn handle_get_brands(
    State(state): State<AppState>,
    Query(query): Query<BrandQuery>,
) -> impl IntoResponse {
    info!("{:<12} --> 브랜드 목록 조회: {}", "HandlerQuery", query.category);
    let brands: Vec<String> = state
        .catalogue
        .brands(&query.category)
        .into_iter()
        .map(String::from)
        .collect();
    Json(brands)
}

#[derive(Debug, Deserialize)]
pub struct ProductCodeQuery {
    pub category: String,
    pub brand: String,
}

/// 상품코드 목록 조회
pub async fn handle_get_product_codes(
    State(state): State<AppState>,
    Query(query): Query<ProductCodeQuery>,
) -> impl IntoResponse {
    let codes: Vec<String> = state
        .catalogue
        .product_codes(&query.category, &query.brand)
        .into_iter()
        .map(String::from)
        .collect();
    Json(codes)
}

/// 상품 필터링 조회
pub async fn handle_get_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> impl IntoResponse {
    info!("{:<12} --> 상품 조회: {:?}", "HandlerQuery", query);
    let products: Vec<Product> = state
        .catalogue
        .filter(
            query.category.as_deref(),
            query.brand.as_deref(),
            query.product_code.as_deref(),
        )
        .into_iter()
        .cloned()
        .collect();
    Json(products)
}

/// 상품 상세 (이미지 배치 포함)
pub async fn handle_get_product(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, ApiError> {
    info!("{:<12} --> 상품 상세 조회 code: {}", "HandlerQuery", code);
    let product = state
        .catalogue
        .get(&code)
        .ok_or_else(|| ApiError::ProductNotFound(code.clone()))?;
    let images = state.gallery.layout_for(&code);
    Ok(Json(serde_json::json!({ "product": product, "images": images })).into_response())
}

/// 상품별 입찰 기록 조회
pub async fn handle_get_product_bids(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Response, ApiError> {
    info!("{:<12} --> 상품별 입찰 기록 조회 code: {}", "HandlerQuery", code);
    if state.catalogue.get(&code).is_none() {
        return Err(ApiError::ProductNotFound(code));
    }
    let records = state.records.product_records(&code).await?;
    Ok(Json(records).into_response())
}

// endregion: --- Catalogue Handlers

// region:    --- Session Handlers

#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub category: String,
    pub brand: String,
    pub product_code: String,
}

/// 세션 생성
pub async fn handle_create_session(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.sessions.create().await;
    (StatusCode::CREATED, Json(session))
}

/// 세션 조회
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Response, ApiError> {
    let session = state.sessions.snapshot(id).await?;
    Ok(Json(session).into_response())
}

/// 세션 삭제
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Response, ApiError> {
    info!("{:<12} --> 세션 삭제 id: {}", "Command", id);
    state.sessions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// 상품 선택 변경
pub async fn handle_select_product(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(req): Json<SelectionRequest>,
) -> Result<Response, ApiError> {
    info!("{:<12} --> 상품 선택 id: {}, {:?}", "Command", id, req);
    let session = state
        .sessions
        .select(id, &req.category, &req.brand, &req.product_code)
        .await?;
    Ok(Json(session).into_response())
}

/// 입찰 시작
pub async fn handle_begin_bid(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Response, ApiError> {
    info!("{:<12} --> 입찰 시작 id: {}", "Command", id);
    let session = state.sessions.begin_bid(id).await?;
    Ok(Json(session).into_response())
}

/// 입력값 수정
pub async fn handle_edit_fields(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
    Json(edits): Json<FieldEdits>,
) -> Result<Response, ApiError> {
    let session = state.sessions.edit(id, edits).await?;
    Ok(Json(session).into_response())
}

/// 입찰 확정
pub async fn handle_confirm(
    State(state): State<AppState>,
    Path(id): Path<SessionId>,
) -> Result<Response, ApiError> {
    info!("{:<12} --> 입찰 확정 id: {}", "Command", id);
    let record = state.sessions.confirm(id, state.records.as_ref()).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Confirmed", "record": record })),
    )
        .into_response())
}

// endregion: --- Session Handlers

// region:    --- Record Handlers

/// 모든 입찰 기록 조회
pub async fn handle_get_bids(State(state): State<AppState>) -> Result<Response, ApiError> {
    info!("{:<12} --> 입찰 기록 조회", "HandlerQuery");
    let records = state.records.all_records().await?;
    Ok(Json(records).into_response())
}

/// 내보내기 파일 재생성
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, ApiError> {
    info!("{:<12} --> 내보내기 요청", "Command");
    let rows = state.records.export_all().await?;
    let path = state.records.export_path().display().to_string();
    Ok(Json(serde_json::json!({ "rows": rows, "path": path })).into_response())
}

// endregion: --- Record Handlers
