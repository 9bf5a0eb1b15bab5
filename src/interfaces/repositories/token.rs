use jsonwebtoken::TokenData;

use crate::{entities::{token::Claims, user::User}, errors::AuthError};

pub trait TokenService: Send + Sync {
    /// Signs an access token for the user
    fn create_jwt(&self, user: &User) -> Result<String, AuthError>;

    /// Verifies signature and expiry, returning the claims
    fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError>;

    /// Lifetime of issued access tokens, in seconds
    fn expires_in(&self) -> i64;
}
