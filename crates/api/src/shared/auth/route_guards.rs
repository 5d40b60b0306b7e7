use crate::error::StudioError;
use actix_web::HttpRequest;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use studio_booking_domain::{Identity, Role, ID};
use studio_booking_infra::StudioContext;

const API_KEY_HEADER: &str = "x-api-key";

/// Claims of the HS256 tokens issued by the auth service
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub exp: usize,
    pub user_id: ID,
    pub role: Role,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .replace("Bearer", "")
        .replace("bearer", "")
        .trim()
        .to_string()
}

fn decode_token(token: &str, ctx: &StudioContext) -> anyhow::Result<Claims> {
    let decoding_key = DecodingKey::from_secret(ctx.config.jwt_secret.as_bytes());
    let claims = decode::<Claims>(token, &decoding_key, &Validation::new(Algorithm::HS256))?.claims;
    Ok(claims)
}

/// Identifies the caller from either the admin api key or a bearer token.
/// Anonymous callers get `None`, invalid credentials are rejected.
pub fn get_identity(req: &HttpRequest, ctx: &StudioContext) -> Result<Option<Identity>, StudioError> {
    if let Some(api_key) = req.headers().get(API_KEY_HEADER) {
        return match api_key.to_str() {
            Ok(api_key) if api_key == ctx.config.admin_api_key => Ok(Some(Identity::ApiKey)),
            _ => Err(StudioError::Unauthorized(format!(
                "Invalid api key provided in the {} header",
                API_KEY_HEADER
            ))),
        };
    }

    let token = match req.headers().get("authorization") {
        Some(token) => token,
        None => return Ok(None),
    };
    let token = token
        .to_str()
        .map(parse_authtoken_header)
        .map_err(|_| StudioError::Unauthorized("Malformed authorization header".into()))?;

    match decode_token(&token, ctx) {
        Ok(claims) => Ok(Some(Identity::User {
            user_id: claims.user_id,
            role: claims.role,
        })),
        Err(e) => Err(StudioError::Unauthorized(format!(
            "Unable to decode the provided token: {}",
            e
        ))),
    }
}

pub fn protect_route(req: &HttpRequest, ctx: &StudioContext) -> Result<Identity, StudioError> {
    match get_identity(req, ctx)? {
        Some(identity) => Ok(identity),
        None => Err(StudioError::Unauthorized(
            "Unable to find the credentials of the client".into(),
        )),
    }
}

pub fn protect_admin_route(req: &HttpRequest, ctx: &StudioContext) -> Result<Identity, StudioError> {
    let identity = protect_route(req, ctx)?;
    if !identity.is_admin() {
        return Err(StudioError::Forbidden(
            "Only administrators can perform this action".into(),
        ));
    }
    Ok(identity)
}

#[cfg(test)]
mod test {
    use super::*;
    use actix_web::test::TestRequest;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn token(ctx: &StudioContext, user_id: &ID, role: Role) -> String {
        let claims = Claims {
            exp: 10_000_000_000,
            user_id: user_id.clone(),
            role,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(ctx.config.jwt_secret.as_bytes()),
        )
        .expect("To encode token")
    }

    #[test]
    fn anonymous_requests_have_no_identity() {
        let ctx = StudioContext::create_inmemory();
        let req = TestRequest::default().to_http_request();
        assert_eq!(get_identity(&req, &ctx).expect("To be ok"), None);
        assert!(matches!(
            protect_route(&req, &ctx),
            Err(StudioError::Unauthorized(_))
        ));
    }

    #[test]
    fn accepts_admin_api_key() {
        let ctx = StudioContext::create_inmemory();
        let req = TestRequest::default()
            .insert_header(("x-api-key", ctx.config.admin_api_key.clone()))
            .to_http_request();
        assert_eq!(
            protect_admin_route(&req, &ctx).expect("To be admin"),
            Identity::ApiKey
        );

        let req = TestRequest::default()
            .insert_header(("x-api-key", "wrong"))
            .to_http_request();
        assert!(matches!(
            get_identity(&req, &ctx),
            Err(StudioError::Unauthorized(_))
        ));
    }

    #[test]
    fn decodes_bearer_tokens() {
        let ctx = StudioContext::create_inmemory();
        let user_id = ID::new();

        let req = TestRequest::default()
            .insert_header((
                "authorization",
                format!("Bearer {}", token(&ctx, &user_id, Role::Customer)),
            ))
            .to_http_request();
        let identity = protect_route(&req, &ctx).expect("To identify");
        assert_eq!(identity.user_id(), Some(&user_id));
        assert!(matches!(
            protect_admin_route(&req, &ctx),
            Err(StudioError::Forbidden(_))
        ));

        let req = TestRequest::default()
            .insert_header((
                "authorization",
                format!("Bearer {}", token(&ctx, &user_id, Role::Admin)),
            ))
            .to_http_request();
        assert!(protect_admin_route(&req, &ctx).is_ok());

        let req = TestRequest::default()
            .insert_header(("authorization", "Bearer not.a.token"))
            .to_http_request();
        assert!(matches!(
            protect_route(&req, &ctx),
            Err(StudioError::Unauthorized(_))
        ));
    }
}
