//! Request handler definitions
//!
//! The trigger handler is generic over the engine's collaborator traits so the endpoint tests can
//! exercise it against mocks; the concrete wiring happens in [`crate::server`].

use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use price_sync_engine::{
    db_types::AccountSelector,
    traits::{AccountDirectory, PriceSource, PriceStore},
    PriceSyncApi,
};

use crate::data_objects::{JsonResponse, UpdatePricesRequest};

//----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Trigger  ---------------------------------------------------

/// Start one price sync run for the selected accounts and acknowledge immediately.
///
/// The caller never waits for the run to finish. Sync failures are absorbed inside the run and
/// observable through the logs only, so the acknowledgement carries no outcome.
pub async fn update_prices<D, P, S>(
    body: web::Json<UpdatePricesRequest>,
    api: web::Data<PriceSyncApi<D, P, S>>,
) -> HttpResponse
where
    D: AccountDirectory + 'static,
    P: PriceSource + 'static,
    S: PriceStore + 'static,
{
    let selector: AccountSelector = body.into_inner().client_id;
    info!("🔔️ Price update requested for clients: {selector}");
    let api = api.get_ref().clone();
    tokio::spawn(async move {
        match api.run(&selector).await {
            Ok(summary) => debug!(
                "🔔️ Background sync for clients {selector} finished. {} of {} account(s) complete.",
                summary.completed_count(),
                summary.reports.len()
            ),
            Err(e) => error!("🔔️ The sync run for clients {selector} could not start. {e}"),
        }
    });
    HttpResponse::Ok().json(JsonResponse::success("Price update started."))
}
