use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use price_sync_engine::{OzonFeed, PriceSyncApi, RestPriceStore, TomlAccountDirectory};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{health, update_prices},
};

/// The collaborator wiring used by the running service: TOML-backed account directory, live
/// seller API, REST storage backend.
pub type OpsSyncApi = PriceSyncApi<TomlAccountDirectory, OzonFeed, RestPriceStore>;

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let directory = TomlAccountDirectory::new(config.accounts_file.clone());
    let source = OzonFeed::new(config.ozon.clone());
    let store =
        RestPriceStore::new(config.storage_url.clone()).map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let api = PriceSyncApi::new(directory, source, store, config.shop_id);
    let srv = create_server_instance(&config, api)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(config: &ServerConfig, api: OpsSyncApi) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("ops::access_log"))
            .app_data(web::Data::new(api.clone()))
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                ServerError::InvalidRequestBody(err.to_string()).into()
            }))
            .service(health)
            .route(
                "/ozon_seller/update_prices",
                web::post().to(update_prices::<TomlAccountDirectory, OzonFeed, RestPriceStore>),
            )
    })
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
