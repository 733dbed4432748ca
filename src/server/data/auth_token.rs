use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter,
};

use crate::server::model::auth_token::{AuthToken, RequestMeta, TokenType};

pub struct AuthTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuthTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Stores a token by its hash. The plaintext never reaches this layer.
    pub async fn create(
        &self,
        user_id: i32,
        token_type: TokenType,
        token_hash: String,
        expires_at: DateTime<Utc>,
        meta: RequestMeta,
    ) -> Result<AuthToken, DbErr> {
        let now = Utc::now();

        let model = entity::auth_token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            r#type: ActiveValue::Set(token_type.into_entity()),
            token_hash: ActiveValue::Set(token_hash),
            expires_at: ActiveValue::Set(expires_at),
            consumed_at: ActiveValue::Set(None),
            request_ip: ActiveValue::Set(meta.ip),
            user_agent: ActiveValue::Set(meta.user_agent),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(AuthToken::from_entity(model))
    }

    /// Finds a token by hash, only under the given type.
    pub async fn find_by_hash(
        &self,
        token_hash: &str,
        token_type: TokenType,
    ) -> Result<Option<AuthToken>, DbErr> {
        let model = entity::prelude::AuthToken::find()
            .filter(entity::auth_token::Column::TokenHash.eq(token_hash))
            .filter(entity::auth_token::Column::Type.eq(token_type.into_entity()))
            .one(self.db)
            .await?;

        Ok(model.map(AuthToken::from_entity))
    }

    /// Marks a token consumed if nobody consumed it first.
    ///
    /// # Returns
    /// - `Ok(true)` - This call consumed the token
    /// - `Ok(false)` - Token was already consumed
    /// - `Err(DbErr)` - Database error
    pub async fn mark_consumed(&self, id: i32, consumed_at: DateTime<Utc>) -> Result<bool, DbErr> {
        let result = entity::prelude::AuthToken::update_many()
            .col_expr(entity::auth_token::Column::ConsumedAt, Expr::value(consumed_at))
            .col_expr(entity::auth_token::Column::UpdatedAt, Expr::value(consumed_at))
            .filter(entity::auth_token::Column::Id.eq(id))
            .filter(entity::auth_token::Column::ConsumedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Consumes every unconsumed, unexpired token of one type for a user.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of tokens invalidated
    /// - `Err(DbErr)` - Database error
    pub async fn invalidate_outstanding(
        &self,
        user_id: i32,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        let result = entity::prelude::AuthToken::update_many()
            .col_expr(entity::auth_token::Column::ConsumedAt, Expr::value(now))
            .col_expr(entity::auth_token::Column::UpdatedAt, Expr::value(now))
            .filter(entity::auth_token::Column::UserId.eq(user_id))
            .filter(entity::auth_token::Column::Type.eq(token_type.into_entity()))
            .filter(entity::auth_token::Column::ConsumedAt.is_null())
            .filter(entity::auth_token::Column::ExpiresAt.gte(now))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes tokens that were consumed, or expired, before `cutoff`.
    pub async fn delete_stale(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::AuthToken::delete_many()
            .filter(
                Condition::any()
                    .add(entity::auth_token::Column::ConsumedAt.lt(cutoff))
                    .add(entity::auth_token::Column::ExpiresAt.lt(cutoff)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
