//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 HTTP 응답으로 자동 변환
//!
//! hellodb의 에러 정책은 단순합니다: 호출자 입장에서 실패는 한 종류뿐입니다.
//! 연결 실패든, 쿼리 실패든, 결과 해석 실패든 모두
//! `500 { "error": "Database connection failed" }` 하나로 수렴하고,
//! 구체적인 원인은 **로그에만** 기록합니다.

use axum::{
    http::StatusCode,                   // HTTP 상태 코드 (200, 404, 500 등)
    response::{IntoResponse, Response}, // Axum의 응답 변환 트레이트
    Json,                               // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로: JSON 객체를 간편하게 생성
use thiserror::Error; // thiserror: 커스텀 에러 타입을 쉽게 만들어주는 매크로 크레이트

// #[derive(Debug, Error)]: 두 가지 derive 매크로를 적용합니다.
// - Debug: 디버깅용 출력 ({:?})
// - Error (thiserror): std::error::Error 트레이트를 자동 구현.
//   #[error("...")] 어트리뷰트로 Display 트레이트(사람이 읽을 에러 메시지)도 자동 생성합니다.
//
// enum(열거형): 여러 가지 가능한 값 중 하나를 나타내는 타입.
// 다른 언어의 union type이나 sealed class와 비슷합니다.

/// 데이터베이스 probe 중에 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
/// 어떤 variant든 클라이언트에게는 같은 500 응답으로 보입니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 데이터베이스 오류 (연결 획득 실패, 쿼리 실행 실패, 풀 종료 등)
    /// #[from]: sqlx::Error를 AppError로 자동 변환하는 From 트레이트를 구현합니다.
    /// 이를 통해 sqlx 함수에서 반환된 에러에 `?` 연산자를 사용하면
    /// 자동으로 AppError::Database로 변환됩니다.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// probe 쿼리가 행(row)을 하나도 반환하지 않음
    /// 현재 시각 조회는 항상 한 행을 돌려줘야 하므로, 빈 결과도 실패로 취급합니다.
    #[error("probe query returned no rows")]
    EmptyResult,

    /// 데이터베이스가 돌려준 시각 문자열이 RFC 3339 형식이 아님
    /// #[from]: chrono::ParseError → AppError::InvalidTimestamp 자동 변환
    #[error("invalid timestamp from database: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),
}

// impl IntoResponse for AppError:
// Axum의 IntoResponse 트레이트를 AppError에 구현합니다.
// 핸들러가 Err(AppError)를 반환하면 Axum이 이 메서드를 호출합니다.
// 에러가 상위로 전파되는 곳은 여기가 마지막입니다 — 핸들러 경계에서 전부 흡수됩니다.
impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러의 실제 내용은 로그에만 기록하고,
    /// 클라이언트에는 고정된 메시지만 반환합니다 (보안: 내부 구현 노출 방지).
    fn into_response(self) -> Response {
        // Display 구현({})이 variant별 상세 메시지를 만들어 줍니다.
        tracing::error!("database probe failed: {}", self);

        // JSON 응답 본문을 생성합니다.
        // json! 매크로: Rust 코드로 JSON 구조를 직관적으로 작성할 수 있게 합니다.
        // 결과: { "error": "Database connection failed" }
        let body = Json(json!({ "error": "Database connection failed" }));

        // (StatusCode, Json<Value>)를 Response로 변환합니다.
        // Axum은 튜플 (상태코드, 본문)을 자동으로 HTTP 응답으로 변환합니다.
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
