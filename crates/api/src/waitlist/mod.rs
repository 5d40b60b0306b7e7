mod delete_waitlist_entry;
mod join_waitlist;
mod notify_next_on_waitlist;
mod subscribers;

use actix_web::web;
use delete_waitlist_entry::delete_waitlist_entry_controller;
use join_waitlist::join_waitlist_controller;
use notify_next_on_waitlist::notify_next_on_waitlist_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/waitlist", web::post().to(join_waitlist_controller));
    cfg.route(
        "/waitlist/notify/{event_id}",
        web::post().to(notify_next_on_waitlist_controller),
    );
    cfg.route(
        "/waitlist/{entry_id}",
        web::delete().to(delete_waitlist_entry_controller),
    );
}
