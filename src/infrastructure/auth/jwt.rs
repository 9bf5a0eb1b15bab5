use jsonwebtoken::{encode, Header, decode, Validation, TokenData, Algorithm};
use chrono::{Utc, Duration};

use crate::entities::token::Claims;
use crate::entities::user::User;
use crate::repositories::token::TokenService;
use crate::settings::{AppConfig, JwtKeys};
use crate::errors::AuthError;

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    access_expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            access_expiration: Duration::minutes(config.jwt_expiration_minutes),
        }
    }
}

impl TokenService for JwtService {
    fn create_jwt(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = (now + self.access_expiration).timestamp() as usize;

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            exp,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign access token");
            AuthError::TokenCreation
        })
    }

    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }

    fn expires_in(&self) -> i64 {
        self.access_expiration.num_seconds()
    }
}
