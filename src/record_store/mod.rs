// region:    --- Imports
use crate::bidding::model::BidRecord;
use crate::database::DatabaseManager;
use crate::error::PersistenceError;
use crate::export::SpreadsheetExporter;
use crate::query::{handlers, queries};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

// endregion: --- Imports

// region:    --- Record Store Trait
/// 입찰 기록 저장소 트레이트
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 기록 추가 (단일 트랜잭션으로 커밋)
    async fn add_record(&self, record: &BidRecord) -> Result<(), PersistenceError>;

    /// 전체 기록 내보내기, 내보낸 행 수 반환
    async fn export_all(&self) -> Result<usize, PersistenceError>;

    async fn all_records(&self) -> Result<Vec<BidRecord>, PersistenceError>;

    /// 상품별 기록 조회
    async fn product_records(
        &self,
        product_code: &str,
    ) -> Result<Vec<BidRecord>, PersistenceError>;

    async fn count(&self) -> Result<i64, PersistenceError>;

    /// 내보내기 파일 경로
    fn export_path(&self) -> &Path;
}
// endregion: --- Record Store Trait

// region:    --- Sqlite Record Store
/// 입찰 기록 저장소 구현체
pub struct SqliteRecordStore {
    db_manager: Arc<DatabaseManager>,
    exporter: SpreadsheetExporter,
}

impl SqliteRecordStore {
    /// 저장소 생성
    /// 테이블이 없으면 만들고, 있으면 기존 기록을 유지한다.
    pub async fn open(
        db_manager: Arc<DatabaseManager>,
        exporter: SpreadsheetExporter,
    ) -> Result<Self, PersistenceError> {
        db_manager.initialize_database().await?;
        Ok(Self {
            db_manager,
            exporter,
        })
    }

    pub fn exporter(&self) -> &SpreadsheetExporter {
        &self.exporter
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    async fn add_record(&self, record: &BidRecord) -> Result<(), PersistenceError> {
        let record = record.clone();
        self.db_manager
            .transaction(move |tx| {
                Box::pin(async move {
                    sqlx::query(queries::INSERT_RECORD)
                        .bind(&record.category)
                        .bind(&record.brand)
                        .bind(&record.product)
                        .bind(&record.full_name)
                        .bind(&record.phone_number)
                        .bind(&record.email)
                        .bind(record.proposed_bid)
                        .bind(record.action_date)
                        .execute(&mut **tx)
                        .await?;
                    Ok::<(), PersistenceError>(())
                })
            })
            .await
            .inspect_err(|e| error!("{:<12} --> 기록 저장 실패: {:?}", "RecordStore", e))
    }

    async fn export_all(&self) -> Result<usize, PersistenceError> {
        let records = self.all_records().await?;
        // 파일 쓰기는 블로킹 스레드에서 수행
        let exporter = self.exporter.clone();
        let rows = tokio::task::spawn_blocking(move || exporter.write_all(&records)).await??;
        info!("{:<12} --> 전체 기록 내보내기: {}", "RecordStore", rows);
        Ok(rows)
    }

    async fn all_records(&self) -> Result<Vec<BidRecord>, PersistenceError> {
        Ok(handlers::get_all_records(&self.db_manager).await?)
    }

    async fn product_records(
        &self,
        product_code: &str,
    ) -> Result<Vec<BidRecord>, PersistenceError> {
        Ok(handlers::get_product_records(&self.db_manager, product_code).await?)
    }

    async fn count(&self) -> Result<i64, PersistenceError> {
        Ok(handlers::count_records(&self.db_manager).await?)
    }

    fn export_path(&self) -> &Path {
        self.exporter.path()
    }
}
// endregion: --- Sqlite Record Store
