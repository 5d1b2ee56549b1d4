//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `hello`: 데이터베이스 연결 확인 probe (이 서버의 유일한 엔드포인트)

pub mod hello;

// 핸들러 함수들을 재공개하여
// main.rs에서 `routes::hello::hello`처럼 바로 접근 가능하게 합니다.
pub use hello::*;
