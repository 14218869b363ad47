//! Admin sign-in and stateless session tokens.
//!
//! Accounts are configured, not stored: each carries an Argon2id PHC hash.
//! A successful sign-in yields an HS256 JWT that admin routes verify on
//! every request. There is no server-side session table.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const FALLBACK_DISPLAY_NAME: &str = "Admin";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid or expired session")]
    InvalidToken,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error("token signing failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

/// The signed-in administrator as the admin UI sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
}

impl AdminUser {
    /// Display name falls back to the email, then to a fixed label.
    pub fn new(id: Uuid, email: &str, display_name: Option<&str>) -> Self {
        let display_name = display_name
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .or_else(|| Some(email.trim()).filter(|e| !e.is_empty()))
            .unwrap_or(FALLBACK_DISPLAY_NAME)
            .to_string();
        Self {
            id,
            email: email.to_string(),
            display_name,
        }
    }
}

/// A configured administrator.
#[derive(Debug, Clone)]
pub struct AdminAccount {
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
}

impl AdminAccount {
    /// Stable id derived from the email so tokens survive restarts.
    pub fn id(&self) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_OID, self.email.to_ascii_lowercase().as_bytes())
    }

    pub fn user(&self) -> AdminUser {
        AdminUser::new(self.id(), &self.email, self.display_name.as_deref())
    }
}

/// Hash a plaintext password into an Argon2id PHC string.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hash(e.to_string()))?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AuthError::Hash(e.to_string())),
    }
}

/// Checks credentials against the configured accounts.
#[derive(Debug, Clone, Default)]
pub struct Authenticator {
    accounts: Vec<AdminAccount>,
}

impl Authenticator {
    pub fn new(accounts: Vec<AdminAccount>) -> Self {
        Self { accounts }
    }

    pub fn sign_in(&self, email: &str, password: &str) -> Result<AdminUser, AuthError> {
        let Some(account) = self
            .accounts
            .iter()
            .find(|a| a.email.eq_ignore_ascii_case(email.trim()))
        else {
            tracing::info!("sign-in rejected: unknown account");
            return Err(AuthError::InvalidCredentials);
        };

        if !verify_password(password, &account.password_hash)? {
            tracing::info!(email = %account.email, "sign-in rejected: wrong password");
            return Err(AuthError::InvalidCredentials);
        }
        tracing::info!(email = %account.email, "admin signed in");
        Ok(account.user())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    email: String,
    name: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKeys")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// An issued token and when it stops being accepted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub expires_at: chrono::DateTime<Utc>,
    pub user: AdminUser,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, user: &AdminUser) -> Result<Session, AuthError> {
        let now = Utc::now();
        let expires_at = now + self.ttl;
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            name: user.display_name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        Ok(Session {
            token,
            expires_at,
            user: user.clone(),
        })
    }

    /// Any signature, format or expiry problem is [`AuthError::InvalidToken`].
    pub fn verify(&self, token: &str) -> Result<AdminUser, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default()).map_err(|e| {
            tracing::debug!(error = %e, "session token rejected");
            AuthError::InvalidToken
        })?;
        let claims = data.claims;
        Ok(AdminUser {
            id: claims.sub,
            email: claims.email,
            display_name: claims.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(password: &str) -> AdminAccount {
        AdminAccount {
            email: "admin@example.com".into(),
            password_hash: hash_password(password).unwrap(),
            display_name: None,
        }
    }

    #[test]
    fn display_name_falls_back_to_email_then_label() {
        let id = Uuid::new_v4();
        assert_eq!(AdminUser::new(id, "a@b.c", Some("山田")).display_name, "山田");
        assert_eq!(AdminUser::new(id, "a@b.c", Some("  ")).display_name, "a@b.c");
        assert_eq!(AdminUser::new(id, "", None).display_name, "Admin");
    }

    #[test]
    fn sign_in_checks_the_password() {
        let auth = Authenticator::new(vec![account("correct-horse")]);

        let user = auth.sign_in("ADMIN@example.com", "correct-horse").unwrap();
        assert_eq!(user.email, "admin@example.com");
        assert!(matches!(
            auth.sign_in("admin@example.com", "wrong"),
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.sign_in("other@example.com", "correct-horse"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn account_id_is_stable() {
        let a = account("x");
        assert_eq!(a.id(), a.id());
        assert_eq!(a.user().id, a.id());
    }

    #[test]
    fn issued_token_verifies() {
        let keys = SessionKeys::new("secret", Duration::hours(1));
        let user = AdminUser::new(Uuid::new_v4(), "admin@example.com", Some("管理者"));

        let session = keys.issue(&user).unwrap();
        assert_eq!(keys.verify(&session.token).unwrap(), user);
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let user = AdminUser::new(Uuid::new_v4(), "admin@example.com", None);
        let session = SessionKeys::new("one", Duration::hours(1)).issue(&user).unwrap();

        let other = SessionKeys::new("two", Duration::hours(1));
        assert!(matches!(other.verify(&session.token), Err(AuthError::InvalidToken)));
        assert!(matches!(other.verify("not-a-jwt"), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = SessionKeys::new("secret", Duration::hours(-2));
        let user = AdminUser::new(Uuid::new_v4(), "admin@example.com", None);
        let session = keys.issue(&user).unwrap();
        assert!(matches!(keys.verify(&session.token), Err(AuthError::InvalidToken)));
    }
}
