use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLIENT: &str = "client";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // "admin" or client id
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expires_in: i64,
}

impl JwtService {
    pub fn new(secret: &str, token_expires_in: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expires_in,
        }
    }

    pub fn generate_admin_token(&self) -> AppResult<String> {
        self.generate_token("admin", ROLE_ADMIN)
    }

    pub fn generate_client_token(&self, client_id: i64) -> AppResult<String> {
        self.generate_token(&client_id.to_string(), ROLE_CLIENT)
    }

    fn generate_token(&self, sub: &str, role: &str) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.token_expires_in);

        let claims = Claims {
            sub: sub.to_string(),
            role: role.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AppError::JwtError)
    }

    pub fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(AppError::JwtError)
    }

    pub fn verify_admin_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.verify_token(token)?;

        if claims.role != ROLE_ADMIN {
            return Err(AppError::AuthError("Admin token required".to_string()));
        }

        Ok(claims)
    }

    pub fn verify_client_token(&self, token: &str) -> AppResult<i64> {
        let claims = self.verify_token(token)?;

        if claims.role != ROLE_CLIENT {
            return Err(AppError::AuthError("Client token required".to_string()));
        }

        claims
            .sub
            .parse::<i64>()
            .map_err(|_| AppError::AuthError("Malformed client token".to_string()))
    }

    pub fn get_token_expires_in(&self) -> i64 {
        self.token_expires_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_token_round_trip() {
        let jwt = JwtService::new("test-secret", 3600);
        let token = jwt.generate_admin_token().unwrap();

        let claims = jwt.verify_admin_token(&token).unwrap();
        assert_eq!(claims.sub, "admin");
        assert_eq!(claims.role, ROLE_ADMIN);
    }

    #[test]
    fn test_client_token_round_trip() {
        let jwt = JwtService::new("test-secret", 3600);
        let token = jwt.generate_client_token(42).unwrap();

        assert_eq!(jwt.verify_client_token(&token).unwrap(), 42);
    }

    #[test]
    fn test_role_mismatch_rejected() {
        let jwt = JwtService::new("test-secret", 3600);
        let client_token = jwt.generate_client_token(7).unwrap();
        let admin_token = jwt.generate_admin_token().unwrap();

        assert!(jwt.verify_admin_token(&client_token).is_err());
        assert!(jwt.verify_client_token(&admin_token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let jwt = JwtService::new("test-secret", 3600);
        let other = JwtService::new("other-secret", 3600);
        let token = jwt.generate_admin_token().unwrap();

        assert!(other.verify_token(&token).is_err());
    }
}
