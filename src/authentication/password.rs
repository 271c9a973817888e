use anyhow::{anyhow, Context, Error};
use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};

use super::AuthError;
use crate::domain::User;
use crate::repository::Repository;
use crate::telemetry::spawn_blocking_with_tracing;

// Verified against when the email is unknown, so both paths cost one argon2 run.
// Parameters must match `Argon2::default()` used by `compute_password_hash`.
const FALLBACK_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$\
    gZiVfM1gPc22ElAP/Jh1Hw$xZ/1Fqt/MQv9G8RMtqa2neFSdR/kUI49goiHYO/FrLw";

#[derive(serde::Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[tracing::instrument(name = "Validate credentials", skip(credentials, repository), fields(email = %credentials.email))]
pub async fn validate_credentials(
    credentials: Credentials,
    repository: &dyn Repository,
) -> Result<User, AuthError> {
    let mut user = None;
    let mut expected_password_hash = FALLBACK_PASSWORD_HASH.to_string();

    if let Some(stored_user) = repository
        .find_user_by_email(&credentials.email)
        .await
        .context("Failed to perform a query to retrieve stored credentials.")?
    {
        expected_password_hash = stored_user.password_hash.clone();
        user = Some(stored_user);
    }

    spawn_blocking_with_tracing(move || {
        verify_password_hash(expected_password_hash, credentials.password)
    })
    .await
    .context("Failed to spawn blocking task.")??;

    let user = user.ok_or_else(|| AuthError::InvalidCredentials(anyhow!("Unknown email.")))?;
    if user.lifecycle.is_discarded() {
        return Err(AuthError::InvalidCredentials(anyhow!(
            "User has been discarded."
        )));
    }
    if !user.is_active {
        return Err(AuthError::Inactive);
    }
    Ok(user)
}

#[tracing::instrument(
    name = "Verify password hash",
    skip(expected_password_hash, password_candidate)
)]
fn verify_password_hash(
    expected_password_hash: String,
    password_candidate: String,
) -> Result<(), AuthError> {
    let expected_password_hash = PasswordHash::new(&expected_password_hash)
        .map_err(|e| AuthError::UnexpectedError(anyhow!("Failed to parse hash: {e}")))?;

    Argon2::default()
        .verify_password(password_candidate.as_bytes(), &expected_password_hash)
        .map_err(|e| AuthError::InvalidCredentials(anyhow!("Invalid password: {e}")))
}

pub fn compute_password_hash(password: String) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(Error::msg)?
        .to_string();

    Ok(password_hash)
}
