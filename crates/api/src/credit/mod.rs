mod get_credits;
mod grant_credits;

use actix_web::web;
use get_credits::get_credits_controller;
use grant_credits::grant_credits_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/users/{user_id}/credits",
        web::post().to(grant_credits_controller),
    );
    cfg.route(
        "/users/{user_id}/credits",
        web::get().to(get_credits_controller),
    );
}
