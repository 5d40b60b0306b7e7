mod create_promo_code;
mod delete_promo_code;
pub mod evaluate;
mod get_promo_codes;
mod update_promo_code;
mod validate_promo_code;

use actix_web::web;
use create_promo_code::create_promo_code_controller;
use delete_promo_code::delete_promo_code_controller;
use get_promo_codes::get_promo_codes_controller;
use update_promo_code::update_promo_code_controller;
use validate_promo_code::validate_promo_code_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/promo-codes", web::post().to(create_promo_code_controller));
    cfg.route("/promo-codes", web::get().to(get_promo_codes_controller));
    cfg.route(
        "/promo-codes/validate",
        web::post().to(validate_promo_code_controller),
    );

    cfg.route(
        "/promo-codes/{promo_code_id}",
        web::put().to(update_promo_code_controller),
    );
    cfg.route(
        "/promo-codes/{promo_code_id}",
        web::delete().to(delete_promo_code_controller),
    );
}
