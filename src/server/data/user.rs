use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::{
    identity::{Identity, Role},
    user::User,
};

pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<User>, DbErr> {
        let user = entity::prelude::User::find_by_id(user_id).one(self.db).await?;

        Ok(user.map(User::from_entity))
    }

    /// Finds a user by email. Emails are stored lowercased, so lookups are case-insensitive.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbErr> {
        let user = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(normalize_email(email)))
            .one(self.db)
            .await?;

        Ok(user.map(User::from_entity))
    }

    pub async fn get_roles(&self, user_id: i32) -> Result<BTreeSet<Role>, DbErr> {
        let roles = entity::prelude::UserRole::find()
            .filter(entity::user_role::Column::UserId.eq(user_id))
            .all(self.db)
            .await?;

        Ok(roles
            .into_iter()
            .map(|row| Role::from_entity(row.role))
            .collect())
    }

    /// Loads the user's current identity.
    ///
    /// # Returns
    /// - `Ok(Some(Identity))` - User exists, with whatever roles it holds now
    /// - `Ok(None)` - User no longer exists
    /// - `Err(DbErr)` - Database error
    pub async fn find_identity(&self, user_id: i32) -> Result<Option<Identity>, DbErr> {
        if self.find_by_id(user_id).await?.is_none() {
            return Ok(None);
        }

        let roles = self.get_roles(user_id).await?;

        Ok(Some(Identity { user_id, roles }))
    }

    pub async fn set_password_hash(&self, user_id: i32, password_hash: String) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .col_expr(entity::user::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::user::Column::Id.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Marks the user's email verified. Keeps the original timestamp when already verified.
    pub async fn mark_email_verified(&self, user_id: i32) -> Result<(), DbErr> {
        let now = Utc::now();

        entity::prelude::User::update_many()
            .col_expr(entity::user::Column::EmailVerifiedAt, Expr::value(now))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(now))
            .filter(entity::user::Column::Id.eq(user_id))
            .filter(entity::user::Column::EmailVerifiedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(())
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
