//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 데이터베이스와 직접 상호작용하는 코드를 모아둔 모듈입니다.
//! 라우트 핸들러(routes/)에서 이 모듈을 호출하여 DB 작업을 수행합니다.
//!
//! hellodb가 데이터베이스에 하는 일은 단 하나, "지금 몇 시야?"라고 묻는 것입니다.
//! 이 읽기 전용 쿼리가 성공하면 데이터베이스에 연결할 수 있다는 뜻입니다.
//!
//! 설계 포인트: 연결 풀을 전역 변수로 두지 않고 `Database` 구조체로 감싸,
//! main()에서 **명시적으로 생성**하고 종료 시 **명시적으로 닫습니다**.
//! 핸들러는 AppState를 통해 이 클라이언트를 주입받습니다.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

// probe 쿼리: SQLite에게 현재 UTC 시각을 RFC 3339 문자열로 요청합니다.
// 예: "2024-01-01T00:00:00Z"
const PROBE_QUERY: &str = "SELECT strftime('%Y-%m-%dT%H:%M:%SZ', 'now')";

/// 데이터베이스 클라이언트
///
/// 내부의 SqlitePool은 Arc 기반이므로 `.clone()`은 같은 풀을 공유합니다.
/// (풀 하나를 여러 요청이 나눠 쓰는 구조)
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// 연결 풀을 만들어 클라이언트를 생성합니다.
    ///
    /// 서버 시작 시 한 번만 호출됩니다. URL이 잘못되었거나
    /// 데이터베이스 파일을 열 수 없으면 에러를 반환합니다.
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5) // 최대 5개의 동시 연결을 유지
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// 데이터베이스가 보고하는 현재 시각을 조회합니다.
    ///
    /// 요청당 정확히 한 번 실행되는 읽기 전용 쿼리입니다.
    /// 재시도하지 않으며, 어떤 실패든 `AppError`로 반환됩니다.
    pub async fn current_timestamp(&self) -> Result<DateTime<Utc>, AppError> {
        fetch_timestamp(&self.pool, PROBE_QUERY).await
    }

    /// 풀의 모든 연결을 닫습니다. 서버 종료 시 호출됩니다.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// 한 행, 한 컬럼짜리 시각 쿼리를 실행하고 `DateTime<Utc>`로 해석합니다.
///
/// 세 가지 실패가 모두 명시적인 variant로 구분됩니다:
/// - 쿼리 실행 실패 → `AppError::Database`
/// - 결과가 0행 → `AppError::EmptyResult` (성공으로 간주하지 않음)
/// - 시각 문자열 파싱 실패 → `AppError::InvalidTimestamp`
async fn fetch_timestamp(pool: &SqlitePool, sql: &str) -> Result<DateTime<Utc>, AppError> {
    // fetch_optional: 0행이면 None, 1행 이상이면 첫 행의 값을 반환합니다.
    // fetch_one과 달리 "행이 없음"을 에러가 아닌 None으로 돌려주므로,
    // 그 경우를 우리가 원하는 에러로 직접 매핑할 수 있습니다.
    let raw: Option<String> = sqlx::query_scalar(sql).fetch_optional(pool).await?;
    let raw = raw.ok_or(AppError::EmptyResult)?;

    // RFC 3339 문자열 → DateTime<Utc>
    let time = DateTime::parse_from_rfc3339(&raw)?.with_timezone(&Utc);
    Ok(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 인메모리 SQLite: 파일 없이 프로세스 안에서만 존재하는 데이터베이스.
    // probe는 스키마가 필요 없으므로 테스트 셋업이 이것으로 끝입니다.
    async fn memory_db() -> Database {
        Database::connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite should always connect")
    }

    #[tokio::test]
    async fn healthy_database_reports_a_timestamp() {
        let db = memory_db().await;

        let time = db.current_timestamp().await.expect("probe should succeed");
        // strftime은 초 단위까지만 반환하므로 나노초는 항상 0입니다.
        assert_eq!(time.timestamp_subsec_nanos(), 0);
    }

    #[tokio::test]
    async fn repeated_probes_succeed_on_the_same_pool() {
        let db = memory_db().await;

        // 읽기 전용 쿼리이므로 몇 번을 불러도 상태가 변하지 않습니다.
        for _ in 0..3 {
            db.current_timestamp().await.expect("probe should succeed");
        }
    }

    #[tokio::test]
    async fn closed_pool_is_a_database_error() {
        let db = memory_db().await;
        db.close().await;

        // 풀이 닫힌 뒤의 쿼리는 연결 획득 단계에서 실패합니다.
        let err = db.current_timestamp().await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }

    #[tokio::test]
    async fn zero_rows_is_an_explicit_error() {
        let db = memory_db().await;

        // WHERE 1 = 0: 어떤 행도 반환하지 않는 쿼리
        let err = fetch_timestamp(&db.pool, "SELECT '2024-01-01T00:00:00Z' WHERE 1 = 0")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyResult));
    }

    #[tokio::test]
    async fn unparseable_timestamp_is_an_explicit_error() {
        let db = memory_db().await;

        let err = fetch_timestamp(&db.pool, "SELECT 'not-a-timestamp'")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTimestamp(_)));
    }

    #[tokio::test]
    async fn unreachable_database_fails_at_connect() {
        // 존재하지 않는 디렉토리의 파일은 열 수 없습니다.
        // (sqlx는 기본적으로 없는 데이터베이스 파일을 생성하지 않습니다)
        let result = Database::connect("sqlite:/nonexistent-dir/hellodb.db").await;
        assert!(result.is_err());
    }
}
