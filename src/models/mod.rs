//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! - `probe`: 데이터베이스 연결 확인 응답 구조체
//!
//! `pub use X::*;`는 하위 모듈의 모든 공개 항목을
//! 이 모듈에서 바로 접근할 수 있게 재공개(re-export)합니다.
//! 예: `crate::models::probe::ProbeResponse` 대신 `crate::models::ProbeResponse`로 접근 가능

pub mod probe;

pub use probe::*;
