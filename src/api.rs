// HTTP routes, server setup

use crate::aggregator::ExchangeRateService;
use crate::config;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};

pub struct AppState {
    pub service: ExchangeRateService,
}

pub async fn get_all_market_prices(data: web::Data<AppState>) -> impl Responder {
    match data.service.get_all_market_prices() {
        Ok(prices) => HttpResponse::Ok().json(prices),
        Err(e) => {
            error!("Failed to aggregate market prices: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string(),
            }))
        }
    }
}

pub async fn get_version() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain")
        .body(env!("CARGO_PKG_VERSION"))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/getAllMarketPrices", web::get().to(get_all_market_prices))
        .route("/getVersion", web::get().to(get_version));
}

pub async fn start_server(service: ExchangeRateService) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState { service });
    let addr = config::get_server_addr();
    info!("Listening on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .configure(configure)
    })
    .bind(addr)?
    .run()
    .await
}
