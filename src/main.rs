//! # hellodb 웹 서버 진입점
//!
//! 이 파일은 hellodb 애플리케이션의 **시작점(entry point)**입니다.
//! Rust 프로그램은 항상 `main()` 함수에서 실행이 시작됩니다.
//!
//! hellodb는 단 하나의 일을 하는 서버입니다:
//! `GET /api/hello` 요청을 받으면 데이터베이스에 현재 시각을 물어보고,
//! 연결 상태를 JSON으로 응답합니다. (서비스 생존/연결 확인용 probe)
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 설정 로딩
//! 4. SQLite 데이터베이스 클라이언트 생성
//! 5. API 라우터 설정
//! 6. HTTP 서버 시작 (종료 시그널을 받으면 정상 종료)
//! 7. 데이터베이스 연결 풀 명시적 종료

// ── 모듈 선언 ──
// `mod` 키워드는 다른 파일을 모듈로 가져옵니다.
// 예: `mod config;`는 같은 디렉토리의 `config.rs` 또는 `config/mod.rs`를 가져옵니다.
// Rust에서는 파일 시스템 구조가 곧 모듈 구조입니다.
mod config;
mod db;
mod error;
mod models;
mod routes;

// ── 외부 크레이트 및 모듈에서 필요한 항목 가져오기 ──
// `use` 키워드는 다른 모듈의 항목을 현재 스코프로 가져옵니다.
// Python의 `from X import Y`와 비슷합니다.
use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use axum::{
    routing::get, // GET 메서드 라우팅 함수
    Router,       // 라우터: URL 경로와 핸들러를 연결하는 구조체
};
use config::Config; // 우리가 만든 설정 모듈
use db::Database; // 명시적으로 생성/종료하는 데이터베이스 클라이언트
use routes::hello::AppState; // 핸들러들이 공유하는 애플리케이션 상태
use tower_http::{
    // tower-http: HTTP 미들웨어 모음 크레이트
    cors::{Any, CorsLayer}, // CORS(Cross-Origin Resource Sharing) 설정
    trace::TraceLayer,      // HTTP 요청/응답 로깅 미들웨어
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 초기화 유틸리티

// #[tokio::main]: 비동기 런타임을 시작하는 **어트리뷰트 매크로**
// Rust의 main() 함수는 기본적으로 동기(sync)이므로,
// async/await를 사용하려면 비동기 런타임(Tokio)이 필요합니다.
// 이 매크로가 내부적으로 tokio 런타임을 생성하고 main을 그 안에서 실행합니다.
#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .env 파일에서 환경변수를 읽어옵니다. (예: DATABASE_URL)
    // .ok()는 Result를 Option으로 변환하여, .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // tracing은 Rust 생태계의 표준 로깅 프레임워크입니다.
    // registry(): 로그 수집기를 만들고
    // .with(): 필터와 포맷터를 레이어처럼 쌓아올립니다 (데코레이터 패턴)
    tracing_subscriber::registry()
        .with(
            // EnvFilter: RUST_LOG 환경변수로 로그 레벨을 제어합니다.
            // 환경변수가 없으면 기본값으로 hellodb, tower_http, axum 모듈을 debug 레벨로 설정
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hellodb=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer()) // 로그를 터미널에 출력하는 포맷터 레이어
        .init(); // 전역 로거로 등록

    // ── 3단계: 설정 로딩 ──
    // Config::from_env()로 환경변수에서 설정을 읽어옵니다.
    // `?` 연산자: Result가 Err이면 즉시 함수에서 반환(에러 전파).
    //            Ok이면 내부 값을 꺼냅니다. try-catch 없이 에러를 처리하는 Rust의 방식입니다.
    let config = Config::from_env()?;
    // tracing::info!: 정보 수준의 로그를 출력하는 매크로
    // println!과 비슷하지만, 로그 레벨/타임스탬프/소스 위치 등 메타정보가 포함됩니다.
    tracing::info!("Starting hellodb server on {}:{}", config.host, config.port);

    // ── 4단계: 데이터베이스 클라이언트 생성 ──
    // 전역(global) 풀 대신, 여기서 **한 번** 명시적으로 생성한 클라이언트를
    // AppState를 통해 핸들러에 주입(dependency injection)합니다.
    // 내부적으로는 연결 풀(Connection Pool)이므로 "풀 하나, 요청 여럿" 구조는 그대로입니다.
    // 시작 시점에 연결할 수 없으면 서버를 띄우지 않고 바로 종료합니다.
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database client ready: {}", config.database_url);

    // ── 5단계: API 라우터 설정 ──
    // AppState: 모든 라우트 핸들러가 공유하는 데이터를 담는 구조체
    // Axum에서는 State를 통해 핸들러에 의존성을 주입합니다.
    // .clone(): Database는 내부적으로 Arc(참조 카운트 스마트 포인터) 기반 풀이므로
    //           clone해도 실제 연결이 복제되지 않고, 같은 풀을 가리킵니다.
    let state = AppState { db: db.clone() };

    // Router::new(): 빈 라우터를 생성합니다.
    // .route(): URL 패턴과 핸들러 함수를 연결합니다.
    // .with_state(): 이 라우터의 모든 핸들러에서 AppState를 사용할 수 있게 합니다.
    let api_routes = Router::new()
        // 데이터베이스 연결 확인 probe (이 서버의 유일한 엔드포인트)
        .route("/hello", get(routes::hello::hello))
        .with_state(state);

    // CORS: 브라우저의 보안 정책. 다른 도메인에서의 API 호출을 허용/차단합니다.
    // 개발 환경에서는 Any(모두 허용)로 설정합니다.
    // 프로덕션에서는 특정 도메인만 허용해야 합니다.
    let cors = CorsLayer::new()
        .allow_origin(Any) // 모든 출처(origin) 허용
        .allow_methods(Any) // 모든 HTTP 메서드 허용
        .allow_headers(Any); // 모든 헤더 허용

    let app = Router::new()
        // .nest(): API 라우트를 /api 경로 아래에 중첩시킵니다.
        // 예: /hello → /api/hello
        .nest("/api", api_routes)
        // .layer(): 미들웨어를 추가합니다. 미들웨어는 요청/응답을 가로채서 처리합니다.
        .layer(cors)
        .layer(TraceLayer::new_for_http()); // HTTP 요청/응답 자동 로깅

    // ── 6단계: 서버 시작 ──
    // format!: 문자열 포맷팅 매크로. Python의 f-string과 비슷합니다.
    let addr = format!("{}:{}", config.host, config.port);
    // TcpListener: TCP 연결을 수신 대기하는 소켓
    // .bind(): 지정된 주소에 바인딩 (해당 포트에서 요청 대기 시작)
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // axum::serve(): Axum 서버를 시작하고 요청을 처리합니다.
    // .with_graceful_shutdown(): 종료 시그널(Ctrl+C, SIGTERM)을 받으면
    //   새 연결 수락을 멈추고, 처리 중인 요청을 끝낸 뒤 serve가 반환됩니다.
    //   이렇게 해야 아래의 풀 종료 코드까지 실행됩니다.
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // ── 7단계: 데이터베이스 연결 풀 종료 ──
    // 서버 루프가 끝난 뒤, 풀의 모든 연결을 명시적으로 닫습니다.
    db.close().await;
    tracing::info!("Database pool closed, bye");

    // Ok(()): 성공을 나타내는 Result 값. ()는 "빈 값"(unit 타입)입니다.
    Ok(())
}

/// 프로세스가 받는 첫 종료 시그널에서 완료되는 future입니다.
///
/// - Unix: **SIGINT**(Ctrl+C, 로컬 개발용)와 **SIGTERM**(Docker/Kubernetes가
///   컨테이너를 멈출 때 보내는 시그널) 둘 다 기다립니다.
/// - Windows: Ctrl+C만 사용할 수 있습니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        // expect(): 시그널 핸들러 설치는 부팅 직후 단 한 번이므로,
        // 실패하면 복구할 방법이 없어 즉시 종료합니다.
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    // #[cfg(unix)]: 조건부 컴파일. Unix 계열 OS에서만 이 코드가 포함됩니다.
    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    // pending(): 절대 완료되지 않는 future.
    // Unix가 아닌 플랫폼에서는 SIGTERM 분기를 사실상 비활성화합니다.
    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    // tokio::select!: 여러 future 중 먼저 완료되는 하나를 기다립니다.
    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }
}
