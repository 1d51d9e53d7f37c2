use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// User id
    pub sub: i32,
    pub username: String,
    pub is_staff: bool,
    pub iat: i64,
    pub exp: i64,
}

pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn create_token(
        &self,
        user_id: i32,
        username: &str,
        is_staff: bool,
        expires_in: i64,
    ) -> anyhow::Result<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            sub: user_id,
            username: username.to_string(),
            is_staff,
            iat: now,
            exp: now + expires_in,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    pub fn decode_token(&self, token: &str) -> anyhow::Result<TokenClaims> {
        let data = decode::<TokenClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_decodes_to_same_identity() {
        let manager = JwtManager::new("test-secret");
        let token = manager.create_token(7, "mwangi", true, 3600).unwrap();

        let claims = manager.decode_token(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "mwangi");
        assert!(claims.is_staff);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtManager::new("secret-a")
            .create_token(1, "teacher", false, 3600)
            .unwrap();

        assert!(JwtManager::new("secret-b").decode_token(&token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let manager = JwtManager::new("test-secret");
        // Past the default 60s leeway
        let token = manager.create_token(1, "teacher", false, -3600).unwrap();

        assert!(manager.decode_token(&token).is_err());
    }
}
