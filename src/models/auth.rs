//! Bearer-token authentication: claims, token issuing, and the request
//! extractor handlers take as a parameter.

use std::future::{Ready, ready};

use actix_web::error::ErrorUnauthorized;
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, http::header, web};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::rules::Actor;
use crate::domain::user::{User, UserRole};
use crate::models::config::ServerConfig;

/// Access tokens live an hour; clients refresh them with the longer-lived
/// refresh token.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;
pub const REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: Option<String>,
    pub kind: TokenKind,
    pub iat: i64,
    pub exp: i64,
}

/// Signs a token of the given kind for an approved user.
pub fn issue_token(
    user: &User,
    kind: TokenKind,
    ttl_secs: i64,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user.id.to_string(),
        email: user.email.clone(),
        name: user.full_name.clone(),
        role: user.role.map(|role| role.as_str().to_string()),
        kind,
        iat: now,
        exp: now + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validates signature and expiry, returning the embedded claims.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

/// The authenticated requester, reconstructed from a valid access token.
/// Only approved users ever receive tokens, so holding one implies approval.
#[derive(Clone, Debug, Serialize)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub email: String,
    pub full_name: String,
    pub role: Option<UserRole>,
}

impl AuthenticatedUser {
    /// The identity facts the rules engine runs on.
    pub fn actor(&self) -> Actor<'_> {
        Actor::new(self.role, &self.full_name)
    }
}

impl TryFrom<Claims> for AuthenticatedUser {
    type Error = ();

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let id = claims.sub.parse::<i32>().map_err(|_| ())?;
        let role = match claims.role {
            Some(value) => Some(value.parse::<UserRole>().map_err(|_| ())?),
            None => None,
        };
        Ok(Self {
            id,
            email: claims.email,
            full_name: claims.name,
            role,
        })
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = (|| {
            let config = req
                .app_data::<web::Data<ServerConfig>>()
                .ok_or_else(|| ErrorUnauthorized("server configuration missing"))?;
            let token =
                bearer_token(req).ok_or_else(|| ErrorUnauthorized("missing bearer token"))?;
            let claims = decode_token(token, &config.secret).map_err(|e| {
                log::debug!("Rejected token: {e}");
                ErrorUnauthorized("invalid or expired token")
            })?;
            if claims.kind != TokenKind::Access {
                return Err(ErrorUnauthorized("access token required"));
            }
            AuthenticatedUser::try_from(claims)
                .map_err(|_| ErrorUnauthorized("invalid or expired token"))
        })();
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user(role: Option<UserRole>) -> User {
        let now = chrono::Utc::now().naive_utc();
        User {
            id: 42,
            full_name: "Jane Sales".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: "hash".to_string(),
            role,
            approved: true,
            assigned_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn issued_access_token_round_trips() {
        let user = sample_user(Some(UserRole::SalesRepresentative));
        let token = issue_token(&user, TokenKind::Access, ACCESS_TOKEN_TTL_SECS, "secret")
            .expect("token should sign");
        let claims = decode_token(&token, "secret").expect("token should decode");
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.kind, TokenKind::Access);

        let authenticated = AuthenticatedUser::try_from(claims).expect("claims should convert");
        assert_eq!(authenticated.id, 42);
        assert_eq!(authenticated.role, Some(UserRole::SalesRepresentative));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let user = sample_user(None);
        let token = issue_token(&user, TokenKind::Access, ACCESS_TOKEN_TTL_SECS, "secret")
            .expect("token should sign");
        assert!(decode_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let user = sample_user(None);
        let token =
            issue_token(&user, TokenKind::Access, -120, "secret").expect("token should sign");
        assert!(decode_token(&token, "secret").is_err());
    }
}
