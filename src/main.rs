// region:    --- Imports
use catalogue_bid_service::catalogue::CatalogueStore;
use catalogue_bid_service::config::Settings;
use catalogue_bid_service::database::DatabaseManager;
use catalogue_bid_service::export::SpreadsheetExporter;
use catalogue_bid_service::gallery::ImageGallery;
use catalogue_bid_service::record_store::{RecordStore, SqliteRecordStore};
use catalogue_bid_service::server::{self, AppState, PHOTOS_ROUTE};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let settings = Settings::load()?;
    info!("{:<12} --> 설정 로드: {:?}", "Main", settings);

    // 카탈로그 로드 (실패 시 서비스 시작 불가)
    let catalogue = match CatalogueStore::load(&settings.catalogue_path) {
        Ok(catalogue) => Arc::new(catalogue),
        Err(e) => {
            error!("{:<12} --> 카탈로그 로드 실패: {}", "Main", e);
            return Err(e.into());
        }
    };

    // DatabaseManager 생성 및 저장소 초기화
    let db_manager = Arc::new(DatabaseManager::new(&settings.database_url).await?);
    let store = SqliteRecordStore::open(
        db_manager,
        SpreadsheetExporter::new(&settings.export_path),
    )
    .await?;
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 시작 시 내보내기 파일을 저장소와 맞춘다
    store.export_all().await?;

    let gallery = ImageGallery::new(&settings.photos_dir, PHOTOS_ROUTE);
    let state = AppState::new(catalogue, Arc::new(store), gallery);
    let routes_all = server::router(state);

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
