pub mod admin;
pub mod api_cms;
pub mod api_leads;
pub mod api_pin;
pub mod api_site;
pub mod api_upload;
pub mod auth;
pub mod public;

use actix_web::web;

/// Every route except the 404 fallback, which `main` installs as the
/// default service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    public::configure(cfg);
    auth::configure(cfg);
    admin::configure(cfg);
    api_cms::configure(cfg);
    api_site::configure(cfg);
    api_leads::configure(cfg);
    api_pin::configure(cfg);
    api_upload::configure(cfg);
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, web, App};
    use serde_json::{json, Value};
    use sqlx::postgres::PgPoolOptions;
    use sqlx::PgPool;
    use std::collections::HashMap;
    use std::sync::Arc;

    use tradehouse::config::Config;
    use tradehouse::services::Mailer;

    use actix_web::cookie::Cookie;

    use crate::web::helpers::SESSION_COOKIE;
    use crate::web::middleware::SecurityHeaders;
    use crate::web::security::RateLimiter;
    use crate::web::state::AppState;
    use crate::web::{json_config, path_config};

    fn config_with(extra: &[(&str, &str)]) -> Config {
        let mut vars: HashMap<String, String> = HashMap::from([(
            "DATABASE_URL".to_string(),
            "postgres://localhost/unused".to_string(),
        )]);
        for (key, value) in extra {
            vars.insert(key.to_string(), value.to_string());
        }
        Config::from_lookup(move |key: &str| vars.get(key).cloned()).unwrap()
    }

    fn state_on(pool: PgPool, extra: &[(&str, &str)]) -> AppState {
        let config = config_with(extra);
        AppState {
            pool,
            mailer: Mailer::from_config(&config.mail).unwrap(),
            config: Arc::new(config),
            rate_limiter: Arc::new(RateLimiter::new()),
        }
    }

    /// State whose pool never connects; only routes that answer before
    /// touching the database are exercised with it.
    fn state_with(extra: &[(&str, &str)]) -> AppState {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        state_on(pool, extra)
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .app_data(json_config())
                    .app_data(path_config())
                    .wrap(SecurityHeaders)
                    .configure(super::configure)
                    .default_service(web::to(super::public::not_found)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn admin_api_requires_session() {
        let app = app!(state_with(&[]));

        let cases = [
            test::TestRequest::post()
                .uri("/api/cms/products")
                .set_json(json!({ "name": "Kit", "business_line": "bike_lpg" })),
            test::TestRequest::put()
                .uri("/api/cms/videos/order")
                .set_json(json!({ "ids": [] })),
            test::TestRequest::delete()
                .uri("/api/stats/00000000-0000-0000-0000-000000000000"),
            test::TestRequest::get().uri("/api/subscribers"),
            test::TestRequest::get().uri("/api/message?unread=true"),
        ];

        for req in cases {
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "Authentication required");
        }
    }

    #[actix_web::test]
    async fn garbage_session_cookie_is_anonymous() {
        let app = app!(state_with(&[]));
        let req = test::TestRequest::get()
            .uri("/api/subscribers")
            .cookie(Cookie::new(SESSION_COOKIE, "not-a-uuid"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn admin_pages_redirect_to_login() {
        let app = app!(state_with(&[]));

        for uri in ["/admin", "/admin/products", "/admin/messages?page=2"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(resp.headers().get("location").unwrap(), "/admin/login");
        }
    }

    #[actix_web::test]
    async fn login_form_renders() {
        let app = app!(state_with(&[]));
        let req = test::TestRequest::get()
            .uri("/admin/login?error=invalid")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Invalid email or password"));
    }

    #[actix_web::test]
    async fn unknown_business_line_is_rejected() {
        let app = app!(state_with(&[]));
        let req = test::TestRequest::get()
            .uri("/api/cms/products?business_line=bakery")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("bakery"));
    }

    #[actix_web::test]
    async fn malformed_json_is_a_json_400() {
        let app = app!(state_with(&[]));
        let req = test::TestRequest::post()
            .uri("/api/subscribers")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn bad_id_is_a_json_404() {
        let app = app!(state_with(&[]));
        let req = test::TestRequest::get()
            .uri("/api/cms/products/not-a-uuid")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].is_string());
    }

    #[actix_web::test]
    async fn subscribe_validates_then_rate_limits() {
        let app = app!(state_with(&[]));

        for _ in 0..5 {
            let req = test::TestRequest::post()
                .uri("/api/subscribers")
                .set_json(json!({ "email": "not-an-email" }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }

        let req = test::TestRequest::post()
            .uri("/api/subscribers")
            .set_json(json!({ "email": "not-an-email" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[actix_web::test]
    async fn message_requires_valid_email() {
        let app = app!(state_with(&[]));
        let req = test::TestRequest::post()
            .uri("/api/message")
            .set_json(json!({
                "name": "Ana",
                "email": "ana@",
                "business_line": "filling_station",
                "message": "Hello"
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn pin_flow_unavailable_without_target() {
        let app = app!(state_with(&[]));

        let req = test::TestRequest::post()
            .uri("/api/generate-pin")
            .set_json(json!({ "email": "buyer@example.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let req = test::TestRequest::post()
            .uri("/api/verify-pin")
            .set_json(json!({ "email": "buyer@example.com", "pin": "123456" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[actix_web::test]
    async fn pin_flow_validates_input() {
        let app = app!(state_with(&[(
            "SECURE_DOWNLOAD_URL",
            "https://files.example.com/catalogue.pdf"
        )]));

        let req = test::TestRequest::post()
            .uri("/api/generate-pin")
            .set_json(json!({ "email": "nobody" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/verify-pin")
            .set_json(json!({ "email": "buyer@example.com", "pin": "12ab" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn pin_outside_allow_list_gets_same_answer() {
        let app = app!(state_with(&[
            ("SECURE_DOWNLOAD_URL", "https://files.example.com/catalogue.pdf"),
            ("SECURE_DOWNLOAD_EMAILS", "dealer@example.com"),
        ]));

        let req = test::TestRequest::post()
            .uri("/api/generate-pin")
            .set_json(json!({ "email": "stranger@example.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["message"].is_string());
    }

    #[actix_web::test]
    async fn upload_requires_session() {
        let app = app!(state_with(&[]));
        let req = test::TestRequest::post()
            .uri("/api/upload")
            .insert_header(("content-type", "multipart/form-data; boundary=xyz"))
            .set_payload("--xyz--\r\n")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn static_pages_render_without_database() {
        let app = app!(state_with(&[
            ("DEVELOPER_NAME", "Studio North"),
            ("DEVELOPER_URL", "https://studio.example.com"),
        ]));

        let req = test::TestRequest::get().uri("/developers").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains("Studio North"));
        assert!(html.contains("image.thum.io"));

        let req = test::TestRequest::get().uri("/secure-download").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("content-security-policy"));
    }

    #[actix_web::test]
    async fn public_pages_render_when_queries_fail() {
        let pool = PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy("postgres://127.0.0.1:1/unreachable")
            .unwrap();
        let app = app!(state_on(pool, &[]));

        for uri in ["/", "/bike-lpg", "/about", "/contact"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        }
    }

    #[actix_web::test]
    async fn unmatched_routes_are_404() {
        let app = app!(state_with(&[]));

        let req = test::TestRequest::get().uri("/no-such-page").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let req = test::TestRequest::get().uri("/api/nothing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Not found");
    }

    const LIVE_SESSION: &str = "00000000-0000-0000-000e-000000000000";
    const HIDDEN_BANNER: &str = "00000000-0000-0000-0002-000000000001";
    const HIDDEN_REVIEW: &str = "00000000-0000-0000-0005-000000000001";
    const BOUNDARY: &str = "tradehouse-boundary";

    fn admin_cookie() -> Cookie<'static> {
        Cookie::new(SESSION_COOKIE, LIVE_SESSION)
    }

    #[sqlx::test(
        migrations = "./migrations",
        fixtures("../../../tests/fixtures/seed.sql")
    )]
    async fn hidden_rows_are_admin_only(pool: PgPool) {
        let app = app!(state_on(pool, &[]));

        for uri in [
            format!("/api/cms/banners/{HIDDEN_BANNER}"),
            format!("/api/cms/reviews/{HIDDEN_REVIEW}"),
        ] {
            let req = test::TestRequest::get().uri(&uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
            let body: Value = test::read_body_json(resp).await;
            assert!(body["error"].as_str().unwrap().contains("not found"));

            let req = test::TestRequest::get()
                .uri(&uri)
                .cookie(admin_cookie())
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK, "{uri}");
        }

        let req = test::TestRequest::get()
            .uri("/api/cms/banners/00000000-0000-0000-0002-000000000000")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], "Ride cheaper");
    }

    fn multipart_body(file_name: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(file_name: &str, bytes: &[u8]) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/api/upload")
            .cookie(admin_cookie())
            .insert_header((
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ))
            .set_payload(multipart_body(file_name, bytes))
    }

    #[sqlx::test(
        migrations = "./migrations",
        fixtures("../../../tests/fixtures/seed.sql")
    )]
    async fn upload_stores_and_rejects(pool: PgPool) {
        let dir = std::env::temp_dir()
            .join(format!("tradehouse-{}", uuid::Uuid::new_v4()));
        let dir_str = dir.to_str().unwrap().to_string();
        let app = app!(state_on(
            pool,
            &[
                ("UPLOAD_DIR", dir_str.as_str()),
                ("MAX_UPLOAD_BYTES", "16"),
                ("PUBLIC_BASE_URL", "https://shop.example.com"),
            ]
        ));

        let req = upload_request("logo.PNG", b"\x89PNG-tiny").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let url = body["url"].as_str().unwrap();
        let stored = url
            .strip_prefix("https://shop.example.com/uploads/")
            .expect("URL outside the uploads mount");
        assert!(stored.ends_with(".png"));
        assert_eq!(std::fs::read(dir.join(stored)).unwrap(), b"\x89PNG-tiny");

        let req = upload_request("setup.exe", b"MZ").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let req = upload_request("big.jpg", &[7u8; 64]).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("16"));

        let req = upload_request("empty.pdf", b"").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // Only the accepted file reached the disk.
        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 1);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
