use actix_web::{dev::Payload, web, FromRequest, HttpMessage, HttpRequest};
use anyhow::{anyhow, Context};
use futures_util::future::{FutureExt, LocalBoxFuture};

use super::{AuthError, Claims};
use crate::domain::User;
use crate::repository::Repository;

/// The user behind the bearer token accepted by [`super::JwtMiddleware`].
/// Only usable on routes wrapped by that middleware.
#[derive(Debug)]
pub struct CurrentUser(pub User);

impl FromRequest for CurrentUser {
    type Error = AuthError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let repository = req.app_data::<web::Data<dyn Repository>>().cloned();

        async move {
            let claims = claims.ok_or(AuthError::MissingToken)?;
            let repository =
                repository.ok_or_else(|| anyhow!("Repository is not registered as app data."))?;

            let user = repository
                .find_user_by_email(&claims.sub)
                .await
                .context("Failed to load the authenticated user.")?
                .ok_or_else(|| AuthError::InvalidToken(anyhow!("Token subject does not exist.")))?;

            if user.lifecycle.is_discarded() {
                return Err(AuthError::InvalidToken(anyhow!(
                    "Token subject has been discarded."
                )));
            }
            if !user.is_active {
                return Err(AuthError::Inactive);
            }
            Ok(CurrentUser(user))
        }
        .boxed_local()
    }
}

impl CurrentUser {
    /// Unwraps the caller when `user_id` names them; anyone else is `Forbidden`.
    pub fn ensure_is(self, user_id: i64) -> Result<User, AuthError> {
        if self.0.id == user_id {
            Ok(self.0)
        } else {
            Err(AuthError::Forbidden)
        }
    }
}
