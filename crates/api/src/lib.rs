mod booking;
mod credit;
mod error;
mod event;
mod promo_code;
mod shared;
mod status;
mod waitlist;

pub use error::StudioError;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use std::net::TcpListener;
use studio_booking_infra::StudioContext;
use tracing_actix_web::TracingLogger;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    booking::configure_routes(cfg);
    credit::configure_routes(cfg);
    event::configure_routes(cfg);
    promo_code::configure_routes(cfg);
    status::configure_routes(cfg);
    waitlist::configure_routes(cfg);
}

/// Malformed bodies and path parameters are reported like every other client error
fn extractor_config() -> (web::JsonConfig, web::PathConfig) {
    let json = web::JsonConfig::default()
        .error_handler(|err, _req| StudioError::BadClientData(err.to_string()).into());
    let path = web::PathConfig::default()
        .error_handler(|err, _req| StudioError::BadClientData(err.to_string()).into());
    (json, path)
}

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    pub async fn new(context: StudioContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context).await?;

        Ok(Self { server, port })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    async fn configure_server(context: StudioContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();
            let (json_config, path_config) = extractor_config();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .app_data(json_config)
                .app_data(path_config)
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
