//! # 데이터베이스 연결 확인(probe) 핸들러
//!
//! "서버가 살아 있고, 데이터베이스에 연결할 수 있는가?"에 답하는 엔드포인트입니다.
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | GET | /api/hello | `hello` | DB에 현재 시각을 조회해 연결 상태 응답 |
//!
//! ## 응답
//! - 성공 (200): `{ "message": "hello World", "dbstatus": "Connected", "time": "<DB가 보고한 현재 시각>" }`
//! - 실패 (500): `{ "error": "Database connection failed" }` — 원인과 무관하게 항상 이 본문
//!
//! 주로 다음 용도로 사용됩니다:
//! - 로드밸런서의 서버 상태 확인
//! - 컨테이너 오케스트레이터(Docker)의 헬스체크
//! - 모니터링 시스템의 가동 시간 추적

use crate::{
    db::Database,          // 데이터베이스 클라이언트 (main에서 주입됨)
    error::AppError,       // 에러 타입 (자동으로 고정된 500 응답으로 변환됨)
    models::ProbeResponse, // 성공 응답 구조체
};
use axum::{
    extract::State, // Axum 추출자: 앱 상태 추출
    Json,           // JSON 응답 래퍼
};

/// 모든 라우트 핸들러가 공유하는 애플리케이션 상태
///
/// main()에서 한 번 만들어 `.with_state()`로 라우터에 등록합니다.
/// Clone이 필요한 이유: Axum은 요청마다 상태를 복제해 핸들러에 넘겨줍니다.
/// Database 내부는 Arc 기반 풀이므로 복제 비용은 참조 카운트 증가뿐입니다.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// 데이터베이스 연결 상태를 확인합니다.
///
/// `GET /api/hello` → `{ "message": "hello World", "dbstatus": "Connected", "time": ... }`
///
/// ## 동작
/// 요청당 정확히 한 번, 데이터베이스에 현재 시각을 묻는 읽기 전용 쿼리를 보냅니다.
/// 재시도나 타임아웃 정책은 없습니다 — 한 번 시도하고, 결과 그대로 응답합니다.
///
/// ## 에러 처리
/// 데이터베이스 호출은 명시적인 `Result`를 반환합니다.
/// 실패(Err)는 이 핸들러 경계에서 `AppError`의 `IntoResponse` 구현을 통해
/// 고정된 500 응답으로 변환되며, 더 위로 전파되지 않습니다.
pub async fn hello(State(state): State<AppState>) -> Result<Json<ProbeResponse>, AppError> {
    let time = state.db.current_timestamp().await?;
    Ok(Json(ProbeResponse::connected(time)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::get,
        Router,
    };
    use chrono::DateTime;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt; // oneshot: 라우터에 요청 하나를 직접 보냅니다

    // main.rs와 같은 모양의 라우터를 만듭니다 (/api 중첩 포함).
    fn app(db: Database) -> Router {
        let state = AppState { db };
        Router::new().nest(
            "/api",
            Router::new().route("/hello", get(hello)).with_state(state),
        )
    }

    async fn get_hello(app: Router) -> (StatusCode, Option<String>, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/hello")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, content_type, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn healthy_database_yields_connected_payload() {
        let db = Database::connect("sqlite::memory:").await.unwrap();

        let (status, content_type, body) = get_hello(app(db)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert_eq!(body["message"], "hello World");
        assert_eq!(body["dbstatus"], "Connected");

        // time은 비어 있지 않고, RFC 3339로 파싱 가능해야 합니다.
        let time = body["time"].as_str().expect("time should be a string");
        DateTime::parse_from_rfc3339(time).expect("time should be RFC 3339");
    }

    #[tokio::test]
    async fn failing_database_yields_the_fixed_error_body() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        // 풀을 닫아 "연결할 수 없는 데이터베이스"를 재현합니다.
        db.close().await;

        let (status, content_type, body) = get_hello(app(db)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        // 본문은 정확히 이 JSON이어야 합니다 — 내부 에러는 절대 노출되지 않습니다.
        assert_eq!(body, json!({ "error": "Database connection failed" }));
    }

    #[tokio::test]
    async fn probe_is_idempotent() {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let app = app(db);

        // Router는 Clone이므로 같은 앱(같은 풀)에 요청을 반복해서 보낼 수 있습니다.
        for _ in 0..3 {
            let (status, _, body) = get_hello(app.clone()).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["dbstatus"], "Connected");
        }
    }
}
