use chrono::{DateTime, Utc};
use serde::Serialize;

/// `GET /api/hello` 성공 응답 본문
///
/// 요청 하나를 처리하는 동안만 존재하는 일회성 값입니다.
/// `time`은 chrono의 serde 지원으로 RFC 3339 문자열로 직렬화됩니다.
/// (초 이하가 0이면 "2024-01-01T00:00:00Z" 형태)
#[derive(Debug, Clone, Serialize)]
pub struct ProbeResponse {
    pub message: String,
    pub dbstatus: String,
    pub time: DateTime<Utc>,
}

impl ProbeResponse {
    /// 연결 성공 응답을 만듭니다. message와 dbstatus는 고정 문자열입니다.
    pub fn connected(time: DateTime<Utc>) -> Self {
        Self {
            message: "hello World".to_string(),
            dbstatus: "Connected".to_string(),
            time,
        }
    }
}
