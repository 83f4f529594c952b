use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::AppError;
use crate::models::dto::{AccountSummary, LoginRequest, SignupRequest, UpdateProfileRequest};
use crate::models::roles::Role;
use crate::models::users;
use crate::services::crud::{self, provided};
use crate::utils::jwt::TokenService;
use crate::utils::password;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub struct AccountService;

impl AccountService {
    /// Registers an account. The role defaults to Customer.
    pub async fn signup(
        db: &DatabaseConnection,
        body: SignupRequest,
    ) -> Result<users::Model, AppError> {
        crud::validate_request(&body)?;
        Self::ensure_unique(db, Some(&body.username), Some(&body.email), None).await?;

        let hashed = password::hash_password(body.password.clone()).await?;
        let role = body.role_id.unwrap_or(Role::Customer);

        let user = users::ActiveModel {
            username: Set(body.username),
            email: Set(body.email),
            phone_no: Set(body.phone_no),
            password: Set(hashed),
            role_id: Set(role.id()),
            reset_token: Set(None),
            reset_token_expiry: Set(None),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(db)
        .await?;

        tracing::info!(user_id = user.user_id, role = %role, "account registered");
        Ok(user)
    }

    /// Checks credentials and issues a bearer token. Unknown usernames and
    /// wrong passwords fail the same way.
    pub async fn login(
        db: &DatabaseConnection,
        tokens: &TokenService,
        body: LoginRequest,
    ) -> Result<(String, AccountSummary), AppError> {
        crud::validate_request(&body)?;

        let user = users::Entity::find()
            .filter(users::Column::Username.eq(body.username.as_str()))
            .one(db)
            .await?
            .ok_or_else(|| AppError::Unauthenticated(INVALID_CREDENTIALS.to_string()))?;

        let matches = password::verify_password(body.password, user.password.clone())
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(user_id = user.user_id, error = %e, "stored password hash is unreadable");
                false
            });
        if !matches {
            tracing::info!(user_id = user.user_id, "login rejected");
            return Err(AppError::Unauthenticated(INVALID_CREDENTIALS.to_string()));
        }

        let role = Role::try_from(user.role_id).map_err(AppError::Internal)?;
        let token = tokens.issue(user.user_id, &user.email, role)?;

        tracing::info!(user_id = user.user_id, "login successful");
        Ok((
            token,
            AccountSummary {
                id: user.user_id,
                username: user.username,
                email: user.email,
                role_id: user.role_id,
            },
        ))
    }

    pub async fn get(db: &DatabaseConnection, user_id: i32) -> Result<users::Model, AppError> {
        crud::find_by_id::<users::Entity, _>(db, user_id).await
    }

    pub async fn update_profile(
        db: &DatabaseConnection,
        user_id: i32,
        body: UpdateProfileRequest,
    ) -> Result<(), AppError> {
        crud::validate_request(&body)?;

        let password = match body.password.clone() {
            Some(plain) => Some(password::hash_password(plain).await?),
            None => None,
        };

        let changes = users::ActiveModel {
            username: provided(body.username.clone()),
            email: provided(body.email.clone()),
            phone_no: provided(body.phone_no),
            password: provided(password),
            ..Default::default()
        };
        crud::ensure_changes(&changes)?;
        Self::ensure_unique(
            db,
            body.username.as_deref(),
            body.email.as_deref(),
            Some(user_id),
        )
        .await?;

        crud::update_by_id::<users::Entity, _, _>(db, user_id, changes).await
    }

    pub async fn delete(db: &DatabaseConnection, user_id: i32) -> Result<(), AppError> {
        crud::delete_by_id::<users::Entity, _>(db, user_id).await?;
        tracing::info!(user_id, "account deleted");
        Ok(())
    }

    pub async fn list_customers(db: &DatabaseConnection) -> Result<Vec<users::Model>, AppError> {
        let customers = users::Entity::find()
            .filter(users::Column::RoleId.eq(Role::Customer.id()))
            .order_by_asc(users::Column::UserId)
            .all(db)
            .await?;

        if customers.is_empty() {
            return Err(AppError::NotFound("No customers found!".to_string()));
        }
        Ok(customers)
    }

    /// Fails with `Conflict` when another account already uses the username
    /// or email.
    async fn ensure_unique(
        db: &DatabaseConnection,
        username: Option<&str>,
        email: Option<&str>,
        except: Option<i32>,
    ) -> Result<(), AppError> {
        if username.is_none() && email.is_none() {
            return Ok(());
        }

        let mut taken = Condition::any();
        if let Some(username) = username {
            taken = taken.add(users::Column::Username.eq(username));
        }
        if let Some(email) = email {
            taken = taken.add(users::Column::Email.eq(email));
        }

        let mut query = users::Entity::find().filter(taken);
        if let Some(user_id) = except {
            query = query.filter(users::Column::UserId.ne(user_id));
        }

        if query.one(db).await?.is_some() {
            return Err(AppError::Conflict(
                "Username or email already exists".to_string(),
            ));
        }
        Ok(())
    }
}
