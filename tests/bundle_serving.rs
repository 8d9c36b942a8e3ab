//! Endpoint-level tests for bundled static site serving

use actix_web::{App, test, web};
use embedgate::config::Config;
use embedgate::config::models::{BundleConfig, GatewayConfig};
use embedgate::server::routes;
use embedgate::server::state::AppState;
use std::io::Write;

fn bundle_fixture() -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();

    let mut index = std::fs::File::create(dir.path().join("index.html")).unwrap();
    index
        .write_all(
            br#"<html><head><link rel="stylesheet" href="styles.css"></head><body><img src="logo.png"><script src="script.js"></script></body></html>"#,
        )
        .unwrap();

    let mut css = std::fs::File::create(dir.path().join("styles.css")).unwrap();
    css.write_all(b"body { margin: 0; }").unwrap();

    let config = Config {
        gateway: GatewayConfig {
            bundles: BundleConfig {
                root: dir.path().to_str().unwrap().to_string(),
                ..Default::default()
            },
            ..Default::default()
        },
    };

    (dir, config)
}

macro_rules! bundle_app {
    ($config:expr) => {{
        let mount = $config.bundles().mount_path.clone();
        let state = web::Data::new(AppState::new($config).await.unwrap());
        test::init_service(App::new().app_data(state).route(
            &routes::bundle::route_pattern(&mount),
            web::get().to(routes::bundle::serve_bundle),
        ))
        .await
    }};
}

#[actix_web::test]
async fn html_pages_get_asset_paths_rewritten() {
    let (_dir, config) = bundle_fixture();
    let app = bundle_app!(config);

    let req = test::TestRequest::get().uri("/mounted/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains(r#"href="/mounted/styles.css""#));
    assert!(body.contains(r#"src="/mounted/logo.png""#));
    assert!(body.contains(r#"src="/mounted/script.js""#));
}

#[actix_web::test]
async fn non_html_assets_stream_unmodified() {
    let (_dir, config) = bundle_fixture();
    let app = bundle_app!(config);

    let req = test::TestRequest::get()
        .uri("/mounted/styles.css")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let body = test::read_body(resp).await;
    assert_eq!(&body[..], b"body { margin: 0; }");
}

#[actix_web::test]
async fn traversal_attempts_are_rejected() {
    let (_dir, config) = bundle_fixture();
    let app = bundle_app!(config);

    let req = test::TestRequest::get()
        .uri("/mounted/..%2F..%2Fetc%2Fpasswd")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn missing_bundle_file_is_not_found() {
    let (_dir, config) = bundle_fixture();
    let app = bundle_app!(config);

    let req = test::TestRequest::get()
        .uri("/mounted/absent.html")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
