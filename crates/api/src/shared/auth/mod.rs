mod route_guards;

pub use route_guards::{get_identity, protect_admin_route, protect_route, Claims};
