use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::str::FromStr;
use tracing::{error, info};

pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    /// 데이터베이스 매니저 생성
    /// 연결은 하나로 제한하여 쓰기를 직렬화한다.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        ensure_parent_dir(database_url)?;

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        info!("{:<12} --> 데이터베이스 연결: {}", "Database", database_url);
        Ok(Self { pool })
    }

    /// 트랜잭션 실행
    pub async fn transaction<F, R, E>(&self, f: F) -> Result<R, E>
    where
        F: for<'c> FnOnce(
            &'c mut sqlx::Transaction<'_, sqlx::Sqlite>,
        ) -> Pin<Box<dyn Future<Output = Result<R, E>> + Send + 'c>>,
        E: From<sqlx::Error>,
    {
        let mut tx = self.pool.begin().await?;
        let result = f(&mut tx).await;
        match result {
            Ok(r) => {
                tx.commit().await?;
                Ok(r)
            }
            Err(e) => {
                // 롤백 실패는 기록만 하고 원래 오류를 반환한다
                if let Err(rollback_err) = tx.rollback().await {
                    error!(
                        "{:<12} --> 롤백 실패: {:?}",
                        "Database", rollback_err
                    );
                }
                Err(e)
            }
        }
    }

    /// 데이터베이스 초기화
    /// 테이블이 이미 있으면 그대로 둔다.
    pub async fn initialize_database(&self) -> Result<(), sqlx::Error> {
        let create_schema_sql = include_str!("../sql/01-create-schema.sql");
        self.execute_multi_query(create_schema_sql).await?;
        Ok(())
    }

    /// 여러 쿼리 실행
    async fn execute_multi_query(&self, sql: &str) -> Result<(), sqlx::Error> {
        for query in sql.split(';') {
            let query = strip_comments(query);
            if !query.is_empty() {
                sqlx::query(&query).execute(&self.pool).await?;
            }
        }
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn strip_comments(query: &str) -> String {
    query
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// sqlite 파일의 상위 디렉터리 생성
fn ensure_parent_dir(database_url: &str) -> Result<(), sqlx::Error> {
    let path = database_url
        .strip_prefix("sqlite://")
        .or_else(|| database_url.strip_prefix("sqlite:"))
        .unwrap_or(database_url);
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
