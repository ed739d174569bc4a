// region:    --- Imports
use crate::catalogue::CatalogueStore;
use crate::gallery::ImageGallery;
use crate::handlers;
use crate::record_store::RecordStore;
use crate::session::SessionStore;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

// endregion: --- Imports

/// 이미지 정적 파일 경로
pub const PHOTOS_ROUTE: &str = "/photos";

// region:    --- App State
#[derive(Clone)]
pub struct AppState {
    pub catalogue: Arc<CatalogueStore>,
    pub records: Arc<dyn RecordStore>,
    pub sessions: Arc<SessionStore>,
    pub gallery: Arc<ImageGallery>,
}

impl AppState {
    pub fn new(
        catalogue: Arc<CatalogueStore>,
        records: Arc<dyn RecordStore>,
        gallery: ImageGallery,
    ) -> Self {
        let sessions = Arc::new(SessionStore::new(Arc::clone(&catalogue)));
        Self {
            catalogue,
            records,
            sessions,
            gallery: Arc::new(gallery),
        }
    }
}
// endregion: --- App State

// region:    --- Router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let photos = ServeDir::new(state.gallery.dir());

    Router::new()
        .route("/catalogue/categories", get(handlers::handle_get_categories))
        .route("/catalogue/brands", get(handlers::handle_get_brands))
        .route(
            "/catalogue/product-codes",
            get(handlers::handle_get_product_codes),
        )
        .route("/catalogue/products", get(handlers::handle_get_products))
        .route("/products/:code", get(handlers::handle_get_product))
        .route("/sessions", post(handlers::handle_create_session))
        .route(
            "/products/:code/bids",
            get(handlers::handle_get_product_bids),
        )
        .route(
            "/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/sessions/:id/selection",
            put(handlers::handle_select_product),
        )
        .route("/sessions/:id/bid", post(handlers::handle_begin_bid))
        .route("/sessions/:id/fields", put(handlers::handle_edit_fields))
        .route("/sessions/:id/confirm", post(handlers::handle_confirm))
        .route("/bids", get(handlers::handle_get_bids))
        .route("/bids/export", get(handlers::handle_export))
        .nest_service(PHOTOS_ROUTE, photos)
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 64))
        .with_state(state)
}
// endregion: --- Router
