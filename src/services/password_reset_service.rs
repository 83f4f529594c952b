use chrono::{Duration, NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};

use crate::errors::AppError;
use crate::models::dto::ResetPasswordRequest;
use crate::models::users;
use crate::services::crud;
use crate::services::mail_service::{self, Mailer};
use crate::utils::{password, reset_token};

pub struct PasswordResetService;

impl PasswordResetService {
    /// Stores the digest of a fresh reset token on the account and returns
    /// the plaintext, which is never persisted.
    pub async fn issue_reset_token(
        db: &DatabaseConnection,
        user: &users::Model,
        ttl: Duration,
    ) -> Result<String, AppError> {
        let (token, digest) = reset_token::generate();

        users::ActiveModel {
            user_id: Set(user.user_id),
            reset_token: Set(Some(digest)),
            reset_token_expiry: Set(Some((Utc::now() + ttl).naive_utc())),
            ..Default::default()
        }
        .update(db)
        .await?;

        Ok(token)
    }

    /// Mails a reset token to the account owning `email`. Unknown addresses
    /// succeed silently, so callers cannot tell which addresses have accounts.
    pub async fn request_reset(
        db: &DatabaseConnection,
        mailer: &dyn Mailer,
        backend_url: &str,
        ttl: Duration,
        email: &str,
    ) -> Result<(), AppError> {
        let Some(user) = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(db)
            .await?
        else {
            tracing::debug!("password reset requested for unknown email");
            return Ok(());
        };

        let token = Self::issue_reset_token(db, &user, ttl).await?;
        let body = mail_service::reset_request_body(&user.username, &token, backend_url);

        mailer
            .send(&user.email, "Password Reset Request", &body)
            .await
            .map_err(|e| {
                tracing::error!(user_id = user.user_id, error = %e, "reset mail failed");
                AppError::Mail("Failed to send email".to_string())
            })?;

        tracing::info!(user_id = user.user_id, "password reset token issued");
        Ok(())
    }

    /// Replaces the password of the account holding `token` and clears the
    /// token. The clearing update is conditional on the token still being
    /// there, so a token can be redeemed once.
    pub async fn redeem(
        db: &DatabaseConnection,
        mailer: &dyn Mailer,
        token: Option<&str>,
        body: ResetPasswordRequest,
    ) -> Result<(), AppError> {
        let token = token.ok_or_else(|| AppError::Validation("Reset token is required".to_string()))?;
        crud::validate_request(&body)?;

        let digest = reset_token::digest(token);
        let now = Utc::now().naive_utc();

        let user = users::Entity::find()
            .filter(users::Column::ResetToken.eq(digest.as_str()))
            .filter(users::Column::ResetTokenExpiry.gt(now))
            .one(db)
            .await?
            .ok_or(AppError::InvalidOrExpiredToken)?;

        let hashed = password::hash_password(body.new_password.clone()).await?;

        if !Self::consume_token(db, user.user_id, &digest, now, hashed).await? {
            return Err(AppError::InvalidOrExpiredToken);
        }

        tracing::info!(user_id = user.user_id, "password reset");

        let body = mail_service::password_changed_body(&user.username);
        if let Err(e) = mailer
            .send(&user.email, "Password Changed Successfully", &body)
            .await
        {
            tracing::warn!(user_id = user.user_id, error = %e, "confirmation mail failed");
        }

        Ok(())
    }

    /// Swaps in the new password and clears the token in one conditional
    /// write. Only a row still holding `digest` unexpired at `now` matches, so
    /// a token that was redeemed or expired since the lookup is refused.
    async fn consume_token(
        db: &DatabaseConnection,
        user_id: i32,
        digest: &str,
        now: NaiveDateTime,
        hashed_password: String,
    ) -> Result<bool, AppError> {
        let result = users::Entity::update_many()
            .set(users::ActiveModel {
                password: Set(hashed_password),
                reset_token: Set(None),
                reset_token_expiry: Set(None),
                ..Default::default()
            })
            .filter(users::Column::UserId.eq(user_id))
            .filter(users::Column::ResetToken.eq(digest))
            .filter(users::Column::ResetTokenExpiry.gt(now))
            .exec(db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
