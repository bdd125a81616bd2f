use actix_web::{test, web, web::ServiceConfig, App};
use price_sync_engine::PriceSyncApi;
use serde_json::json;

use crate::{
    data_objects::JsonResponse,
    endpoint_tests::mocks::{MockDirectory, MockSource, MockStore},
    errors::ServerError,
    routes::{health, update_prices},
};

type MockApi = PriceSyncApi<MockDirectory, MockSource, MockStore>;

/// A sync api whose collaborators tolerate any number of calls: the trigger runs the sync in the
/// background, so the endpoint tests must not depend on how far it gets.
fn quiet_api() -> MockApi {
    let mut directory = MockDirectory::new();
    directory.expect_resolve().returning(|_| Ok(vec![]));
    let mut store = MockStore::new();
    store.expect_delete_duplicate_prices().returning(|| Ok(()));
    PriceSyncApi::new(directory, MockSource::new(), store, 1)
}

fn configure(api: MockApi) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg: &mut ServiceConfig| {
        cfg.app_data(web::Data::new(api))
            .app_data(
                web::JsonConfig::default()
                    .error_handler(|err, _req| ServerError::InvalidRequestBody(err.to_string()).into()),
            )
            .service(health)
            .route(
                "/ozon_seller/update_prices",
                web::post().to(update_prices::<MockDirectory, MockSource, MockStore>),
            );
    }
}

#[actix_web::test]
async fn health_check_is_open() {
    let _ = env_logger::try_init().ok();
    let app = test::init_service(App::new().configure(configure(quiet_api()))).await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let response = test::call_service(&app, req).await;
    assert!(response.status().is_success());
}

#[actix_web::test]
async fn the_trigger_acknowledges_before_the_run_finishes() {
    let _ = env_logger::try_init().ok();
    let app = test::init_service(App::new().configure(configure(quiet_api()))).await;
    let req = test::TestRequest::post()
        .uri("/ozon_seller/update_prices")
        .set_json(json!({"client_id": "all"}))
        .to_request();
    let response: JsonResponse = test::call_and_read_body_json(&app, req).await;
    assert!(response.success);
    assert_eq!(response.message, "Price update started.");
}

#[actix_web::test]
async fn the_trigger_accepts_every_selector_form() {
    let _ = env_logger::try_init().ok();
    let app = test::init_service(App::new().configure(configure(quiet_api()))).await;
    for body in [json!({"client_id": 42}), json!({"client_id": [1, 2, 3]}), json!({"client_id": "all"})] {
        let req = test::TestRequest::post().uri("/ozon_seller/update_prices").set_json(body).to_request();
        let response = test::call_service(&app, req).await;
        assert!(response.status().is_success());
    }
}

#[actix_web::test]
async fn malformed_selectors_are_rejected() {
    let _ = env_logger::try_init().ok();
    let app = test::init_service(App::new().configure(configure(quiet_api()))).await;
    let req = test::TestRequest::post()
        .uri("/ozon_seller/update_prices")
        .set_json(json!({"client_id": "everything"}))
        .to_request();
    let response = test::call_service(&app, req).await;
    assert_eq!(response.status().as_u16(), 400);
}
