/// 사용자 세션 관리
/// 세션마다 상품 선택과 입찰 폼 상태를 하나씩 가진다.
/// 유휴 시간이 지난 세션은 새 세션 생성 시 정리된다.
// region:    --- Imports
use crate::bidding::commands;
use crate::bidding::model::{BidRecord, FieldEdits, FormState};
use crate::catalogue::model::Product;
use crate::catalogue::CatalogueStore;
use crate::error::{BidError, SessionError};
use crate::record_store::RecordStore;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::info;

// endregion: --- Imports

pub type SessionId = u64;

/// 기본 세션 유휴 만료 시간
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

// region:    --- Session
#[derive(Debug, Clone, Default, Serialize)]
pub struct Session {
    pub id: SessionId,
    pub selection: Option<Product>,
    pub form: FormState,
}

struct Entry {
    session: Session,
    last_seen: Instant,
}

impl Entry {
    fn touch(&mut self) -> &mut Session {
        self.last_seen = Instant::now();
        &mut self.session
    }
}
// endregion: --- Session

// region:    --- Session Store
pub struct SessionStore {
    catalogue: Arc<CatalogueStore>,
    sessions: Mutex<HashMap<SessionId, Entry>>,
    next_id: AtomicU64,
    idle_ttl: Duration,
}

impl SessionStore {
    pub fn new(catalogue: Arc<CatalogueStore>) -> Self {
        Self::with_idle_ttl(catalogue, DEFAULT_IDLE_TTL)
    }

    pub fn with_idle_ttl(catalogue: Arc<CatalogueStore>, idle_ttl: Duration) -> Self {
        Self {
            catalogue,
            sessions: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            idle_ttl,
        }
    }

    /// 세션 생성 (Idle, 선택 없음)
    /// 생성 전에 유휴 세션을 정리한다.
    pub async fn create(&self) -> Session {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let session = Session {
            id,
            ..Session::default()
        };

        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        let idle_ttl = self.idle_ttl;
        sessions.retain(|_, entry| entry.last_seen.elapsed() < idle_ttl);
        let evicted = before - sessions.len();
        if evicted > 0 {
            info!("{:<12} --> 유휴 세션 {}개 정리", "Session", evicted);
        }

        sessions.insert(
            id,
            Entry {
                session: session.clone(),
                last_seen: Instant::now(),
            },
        );
        info!("{:<12} --> 세션 생성 id: {}", "Session", id);
        session
    }

    /// 세션 삭제
    pub async fn remove(&self, id: SessionId) -> Result<(), SessionError> {
        match self.sessions.lock().await.remove(&id) {
            Some(_) => {
                info!("{:<12} --> 세션 삭제 id: {}", "Session", id);
                Ok(())
            }
            None => Err(SessionError::NotFound(id)),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn snapshot(&self, id: SessionId) -> Result<Session, SessionError> {
        self.update(id, |_| Ok(())).await
    }

    /// 상품 선택
    /// 선택된 상품이 바뀌면 폼을 Idle 로 초기화한다.
    /// 일치하는 상품이 없으면 선택이 해제된다.
    pub async fn select(
        &self,
        id: SessionId,
        category: &str,
        brand: &str,
        product_code: &str,
    ) -> Result<Session, SessionError> {
        let product = self.catalogue.select(category, brand, product_code).cloned();
        self.update(id, |session| {
            let previous = session.selection.as_ref().map(|p| p.product_code.as_str());
            let next = product.as_ref().map(|p| p.product_code.as_str());
            if previous != next {
                info!(
                    "{:<12} --> 상품 변경 id: {}, {:?} -> {:?}",
                    "Session", session.id, previous, next
                );
                session.form = commands::reset(std::mem::take(&mut session.form));
            }
            session.selection = product;
            Ok(())
        })
        .await
    }

    /// 입찰 시작
    pub async fn begin_bid(&self, id: SessionId) -> Result<Session, SessionError> {
        self.update(id, |session| {
            if session.selection.is_none() {
                return Err(SessionError::NoProductSelected);
            }
            session.form = commands::begin_bid(std::mem::take(&mut session.form));
            Ok(())
        })
        .await
    }

    /// 입력값 수정
    pub async fn edit(&self, id: SessionId, edits: FieldEdits) -> Result<Session, SessionError> {
        self.update(id, |session| {
            session.form = commands::edit(session.form.clone(), edits)?;
            Ok(())
        })
        .await
    }

    /// 입찰 확정
    /// 확정 처리가 끝날 때까지 잠금을 유지하여 쓰기를 직렬화한다.
    pub async fn confirm(
        &self,
        id: SessionId,
        store: &dyn RecordStore,
    ) -> Result<BidRecord, BidError> {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(SessionError::NotFound(id))?
            .touch();
        let product = session
            .selection
            .clone()
            .ok_or(SessionError::NoProductSelected)?;
        commands::handle_confirm_bid(&mut session.form, &product, store).await
    }

    async fn update<F>(&self, id: SessionId, f: F) -> Result<Session, SessionError>
    where
        F: FnOnce(&mut Session) -> Result<(), SessionError>,
    {
        let mut sessions = self.sessions.lock().await;
        let session = sessions
            .get_mut(&id)
            .ok_or(SessionError::NotFound(id))?
            .touch();
        f(session)?;
        Ok(session.clone())
    }
}
// endregion: --- Session Store
