use actix_web::{web, HttpResponse};
use studio_booking_api_structs::get_service_health::*;

async fn status() -> HttpResponse {
    HttpResponse::Ok().json(APIResponse {
        message: "Studio booking is up and running".into(),
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(status));
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn responds_ok() {
        let app = test::init_service(App::new().configure(configure_routes)).await;
        let req = test::TestRequest::get().uri("/").to_request();
        let res: APIResponse = test::call_and_read_body_json(&app, req).await;
        assert!(!res.message.is_empty());
    }
}
