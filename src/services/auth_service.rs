use std::sync::Arc;

use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::{
    config::AppConfig,
    dto::auth::LoginForm,
    error::{AppError, AppResult},
    session::Session,
};

/// Checks a submitted username/password pair against the admin account.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Plain string comparison against a configured account.
#[derive(Debug, Clone)]
pub struct StaticCredential {
    username: String,
    password: String,
}

impl StaticCredential {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl CredentialVerifier for StaticCredential {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// Argon2 PHC hash comparison against a configured account.
#[derive(Debug, Clone)]
pub struct HashedCredential {
    username: String,
    password_hash: String,
}

impl HashedCredential {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
        }
    }
}

impl CredentialVerifier for HashedCredential {
    fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }
        let parsed_hash = match PasswordHash::new(&self.password_hash) {
            Ok(hash) => hash,
            Err(err) => {
                tracing::error!(error = %err, "configured admin password hash is invalid");
                return false;
            }
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

pub fn verifier_from_config(config: &AppConfig) -> Arc<dyn CredentialVerifier> {
    match &config.admin_password_hash {
        Some(hash) => Arc::new(HashedCredential::new(&config.admin_username, hash)),
        None => Arc::new(StaticCredential::new(
            &config.admin_username,
            &config.admin_password,
        )),
    }
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(password_hash)
}

/// Verify the login form and, on success, promote the session to admin.
pub fn login_admin(
    verifier: &dyn CredentialVerifier,
    session: &mut Session,
    form: &LoginForm,
) -> AppResult<()> {
    let username = form.username.as_deref().unwrap_or_default().trim();
    let password = form.password.as_deref().unwrap_or_default().trim();

    if !verifier.verify(username, password) {
        tracing::warn!(username = %username, "admin login rejected");
        return Err(AppError::InvalidCredentials);
    }

    session.grant_admin();
    tracing::info!(sid = %session.sid(), "admin logged in");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(username: &str, password: &str) -> LoginForm {
        LoginForm {
            username: Some(username.into()),
            password: Some(password.into()),
        }
    }

    #[test]
    fn static_credential_is_exact_and_case_sensitive() {
        let verifier = StaticCredential::new("admin", "mgl12345");
        assert!(verifier.verify("admin", "mgl12345"));
        assert!(!verifier.verify("Admin", "mgl12345"));
        assert!(!verifier.verify("admin", "MGL12345"));
        assert!(!verifier.verify("", ""));
    }

    #[test]
    fn hashed_credential_accepts_only_the_hashed_password() {
        let hash = hash_password("s3cret").unwrap();
        let verifier = HashedCredential::new("admin", hash);
        assert!(verifier.verify("admin", "s3cret"));
        assert!(!verifier.verify("admin", "wrong"));
        assert!(!verifier.verify("root", "s3cret"));
    }

    #[test]
    fn malformed_hash_never_verifies() {
        let verifier = HashedCredential::new("admin", "not-a-phc-string");
        assert!(!verifier.verify("admin", "not-a-phc-string"));
    }

    #[test]
    fn config_hash_selects_hashed_verifier() {
        let mut config = AppConfig::default();
        assert!(verifier_from_config(&config).verify("admin", "mgl12345"));

        config.admin_password_hash = Some(hash_password("rotated").unwrap());
        let verifier = verifier_from_config(&config);
        assert!(!verifier.verify("admin", "mgl12345"));
        assert!(verifier.verify("admin", "rotated"));
    }

    #[test]
    fn login_trims_input_and_sets_admin_flag() {
        let verifier = StaticCredential::new("admin", "mgl12345");
        let mut session = Session::anonymous();

        login_admin(&verifier, &mut session, &form("  admin ", "mgl12345\n")).unwrap();
        assert!(session.is_admin());
    }

    #[test]
    fn failed_login_leaves_session_anonymous() {
        let verifier = StaticCredential::new("admin", "mgl12345");
        let mut session = Session::anonymous();

        let err = login_admin(&verifier, &mut session, &form("admin", "nope")).unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
        assert!(!session.is_admin());

        let missing = LoginForm {
            username: None,
            password: None,
        };
        assert!(login_admin(&verifier, &mut session, &missing).is_err());
    }
}
