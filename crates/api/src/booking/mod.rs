mod create_booking;
mod delete_booking;
mod edit_booking;
mod get_booking;
mod get_booking_by_confirmation_number;
mod subscribers;
mod update_booking_status;

use actix_web::web;
use create_booking::create_booking_controller;
use delete_booking::delete_booking_controller;
use edit_booking::edit_booking_controller;
use get_booking::get_booking_controller;
use get_booking_by_confirmation_number::get_booking_by_confirmation_number_controller;
use update_booking_status::update_booking_status_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/bookings", web::post().to(create_booking_controller));
    cfg.route(
        "/bookings/confirmation/{confirmation_number}",
        web::get().to(get_booking_by_confirmation_number_controller),
    );

    cfg.route(
        "/bookings/{booking_id}",
        web::get().to(get_booking_controller),
    );
    cfg.route(
        "/bookings/{booking_id}",
        web::put().to(edit_booking_controller),
    );
    cfg.route(
        "/bookings/{booking_id}",
        web::delete().to(delete_booking_controller),
    );
    cfg.route(
        "/bookings/{booking_id}/status",
        web::patch().to(update_booking_status_controller),
    );
}
