//! Integration tests for the authentication and throttling middleware

mod common;

use actix_web::{http::StatusCode, test, web, App, HttpResponse};
use chrono::Duration;

use common::{bearer, TestContext};
use fc_api::middleware::{AuthContext, SessionAuth, Throttle};
use fc_core::services::ThrottleScope;
use fc_shared::config::{AppConfig, JwtConfig, ThrottleRule};

async fn generate(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({ "subject_id": auth.subject_id() }))
}

async fn open_endpoint() -> HttpResponse {
    HttpResponse::Ok().finish()
}

fn context() -> TestContext {
    let mut config = AppConfig::default();
    config.auth = JwtConfig::new(common::SECRET);
    config.rate_limit.ai_generation = ThrottleRule::new(2, 60);
    TestContext::with_config(config)
}

#[actix_web::test]
async fn test_rejected_token_does_not_block_public_routes() {
    let ctx = context();
    let app = test::init_service(
        App::new()
            .wrap(SessionAuth::new(ctx.sessions.clone()))
            .route("/open", web::get().to(open_endpoint)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/open")
        .insert_header(bearer("garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_per_subject_throttle() {
    let ctx = context();
    let (_alice, alice) = ctx.login("user", "alice@example.com").await;
    let (_bob, bob) = ctx.login("user", "bob@example.com").await;

    let app = test::init_service(
        App::new().wrap(SessionAuth::new(ctx.sessions.clone())).service(
            web::resource("/generate")
                .wrap(Throttle::per_subject(
                    ctx.sessions.clone(),
                    ThrottleScope::AiGeneration,
                ))
                .route(web::post().to(generate)),
        ),
    )
    .await;

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri("/generate")
            .insert_header(bearer(&alice.access_token))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri("/generate")
        .insert_header(bearer(&alice.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(resp.headers().get("retry-after").unwrap(), "60");

    // Other subjects have their own bucket
    let req = test::TestRequest::post()
        .uri("/generate")
        .insert_header(bearer(&bob.access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    // Whole-period refill
    ctx.clock.advance(Duration::seconds(60));
    let req = test::TestRequest::post()
        .uri("/generate")
        .insert_header(bearer(&alice.access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_unauthenticated_requests_skip_subject_throttle() {
    let ctx = context();
    let app = test::init_service(
        App::new().wrap(SessionAuth::new(ctx.sessions.clone())).service(
            web::resource("/generate")
                .wrap(Throttle::per_subject(
                    ctx.sessions.clone(),
                    ThrottleScope::AiGeneration,
                ))
                .route(web::post().to(generate)),
        ),
    )
    .await;

    for _ in 0..5 {
        let req = test::TestRequest::post().uri("/generate").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
    assert_eq!(ctx.sessions.limiter().bucket_count(), 0);
}

#[actix_web::test]
async fn test_per_ip_throttle_ignores_forwarding_headers_from_clients() {
    let ctx = context();
    let app = test::init_service(
        App::new().service(
            web::resource("/open")
                .wrap(Throttle::per_ip(
                    ctx.sessions.clone(),
                    ThrottleScope::AiGeneration,
                ))
                .route(web::post().to(open_endpoint)),
        ),
    )
    .await;
    let peer = "198.51.100.4:5000".parse().unwrap();

    for (i, expected) in [StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]
        .into_iter()
        .enumerate()
    {
        let req = test::TestRequest::post()
            .uri("/open")
            .peer_addr(peer)
            .insert_header(("x-forwarded-for", format!("10.0.0.{}", i)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), expected);
    }
}

#[actix_web::test]
async fn test_per_ip_throttle_trusts_configured_proxy() {
    let ctx = context();
    let app = test::init_service(
        App::new().service(
            web::resource("/open")
                .wrap(
                    Throttle::per_ip(ctx.sessions.clone(), ThrottleScope::AiGeneration)
                        .trust_proxies(vec!["192.0.2.1".to_string()]),
                )
                .route(web::post().to(open_endpoint)),
        ),
    )
    .await;
    let proxy = "192.0.2.1:443".parse().unwrap();

    for client in ["10.0.0.1", "10.0.0.1"] {
        let req = test::TestRequest::post()
            .uri("/open")
            .peer_addr(proxy)
            .insert_header(("x-forwarded-for", client))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::post()
        .uri("/open")
        .peer_addr(proxy)
        .insert_header(("x-forwarded-for", "10.0.0.1"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::TOO_MANY_REQUESTS
    );

    // A different client behind the same proxy has its own bucket
    let req = test::TestRequest::post()
        .uri("/open")
        .peer_addr(proxy)
        .insert_header(("x-forwarded-for", "10.0.0.2"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}
