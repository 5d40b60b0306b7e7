use studio_booking_utils::create_random_secret;
use tracing::{info, warn};

const DEFAULT_PORT: usize = 5000;

#[derive(Debug, Clone)]
pub struct Config {
    /// Key accepted in the `x-api-key` header on admin routes
    pub admin_api_key: String,
    /// Secret that the auth service signs its HS256 tokens with
    pub jwt_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// Booking and waitlist notifications are posted here when set,
    /// otherwise they are only logged
    pub notification_webhook_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let admin_api_key = match std::env::var("ADMIN_API_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find ADMIN_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(32);
                info!("Admin api key was generated and set to: {}", key);
                key
            }
        };
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                warn!("Did not find JWT_SECRET environment variable. Tokens from the auth service will be rejected.");
                create_random_secret(64)
            }
        };
        let port = match std::env::var("PORT") {
            Ok(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, DEFAULT_PORT
                    );
                    DEFAULT_PORT
                }
            },
            Err(_) => DEFAULT_PORT,
        };
        let notification_webhook_url = std::env::var("NOTIFICATION_WEBHOOK_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        Self {
            admin_api_key,
            jwt_secret,
            port,
            notification_webhook_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
