// region:    --- Imports
use super::queries;
use crate::bidding::model::BidRecord;
use crate::database::DatabaseManager;
use sqlx::Error as SqlxError;
use tracing::info;

// endregion: --- Imports

// region:    --- Query Handlers

/// 모든 입찰 기록 조회
pub async fn get_all_records(db_manager: &DatabaseManager) -> Result<Vec<BidRecord>, SqlxError> {
    info!("{:<12} --> 모든 입찰 기록 조회", "Query");
    sqlx::query_as::<_, BidRecord>(queries::GET_ALL_RECORDS)
        .fetch_all(db_manager.pool())
        .await
}

/// 입찰 기록 수 조회
pub async fn count_records(db_manager: &DatabaseManager) -> Result<i64, SqlxError> {
    sqlx::query_scalar::<_, i64>(queries::COUNT_RECORDS)
        .fetch_one(db_manager.pool())
        .await
}

/// 상품 입찰 기록 조회
pub async fn get_product_records(
    db_manager: &DatabaseManager,
    product_code: &str,
) -> Result<Vec<BidRecord>, SqlxError> {
    info!("{:<12} --> 상품 입찰 기록 조회 code: {}", "Query", product_code);
    sqlx::query_as::<_, BidRecord>(queries::GET_PRODUCT_RECORDS)
        .bind(product_code)
        .fetch_all(db_manager.pool())
        .await
}

// endregion: --- Query Handlers
