use sea_orm::DatabaseConnection;

use crate::server::{
    data::court::CourtRepository,
    error::AppError,
    model::{court::Court, identity::Identity, scope::ResourceKind},
    service::scope::AccessScopeResolver,
};

pub struct CourtService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CourtService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets the courts the identity manages.
    ///
    /// # Returns
    /// - `Ok(Vec<Court>)` - Every court for admins, courts of owned venues for owners
    /// - `Err(AppError::Forbidden)` - Identity holds no venue-side role
    pub async fn list(&self, identity: &Identity) -> Result<Vec<Court>, AppError> {
        let scope = AccessScopeResolver::new(self.db)
            .resolve_list(identity, ResourceKind::Court)
            .await?;

        Ok(CourtRepository::new(self.db).find_in_scope(&scope).await?)
    }
}
