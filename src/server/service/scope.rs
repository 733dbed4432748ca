//! Access scope resolution.
//!
//! Decides which reservations, blocks, courts and cancellations an identity may read or
//! change.
//! Administrators are unrestricted. Owners reach everything on courts of venues they own,
//! customers reach their own reservations and cancellations. All lookups go through
//! [`OwnershipRepository`].

use sea_orm::DatabaseConnection;

use crate::server::{
    data::ownership::OwnershipRepository,
    error::AppError,
    model::{
        identity::{Identity, Role},
        scope::{CreateSubject, ResourceKind, ResourceOwnership, Scope, WriteAction},
    },
};

pub struct AccessScopeResolver<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccessScopeResolver<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves the scope an identity lists `kind` under.
    ///
    /// # Returns
    /// - `Ok(Scope::Unrestricted)` - Administrator
    /// - `Ok(Scope::Restricted { .. })` - Owner and/or customer, possibly matching nothing
    /// - `Err(AppError::Forbidden)` - No role grants any access to `kind`
    pub async fn resolve_list(
        &self,
        identity: &Identity,
        kind: ResourceKind,
    ) -> Result<Scope, AppError> {
        if identity.is_admin() {
            return Ok(Scope::Unrestricted);
        }

        if !grants_access(identity, kind) {
            return Err(AppError::Forbidden(format!(
                "User {} has no role with access to {} resources",
                identity.user_id,
                kind.label()
            )));
        }

        self.restricted_scope(identity, kind).await
    }

    /// Resolves a single resource and checks the identity may access it.
    ///
    /// Existence is checked before ownership, so a missing resource is reported as missing
    /// to everyone, administrators included.
    ///
    /// # Returns
    /// - `Ok(ResourceOwnership)` - Resource exists and is in scope
    /// - `Err(AppError::NotFound)` - Resource does not exist
    /// - `Err(AppError::Forbidden)` - Resource exists outside the identity's scope
    pub async fn resolve_single(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        id: i32,
    ) -> Result<ResourceOwnership, AppError> {
        let ownership = self.load_ownership(kind, id).await?;

        if identity.is_admin() {
            return Ok(ownership);
        }

        let scope = self.restricted_scope(identity, kind).await?;
        if !scope.permits(&ownership) {
            return Err(AppError::Forbidden(format!(
                "{} {} is outside the scope of user {}",
                kind.label(),
                id,
                identity.user_id
            )));
        }

        Ok(ownership)
    }

    /// Checks the identity may perform `action` on `kind`.
    ///
    /// # Returns
    /// - `Ok(())` - Action permitted
    /// - `Err(AppError::NotFound)` - Target court or resource does not exist
    /// - `Err(AppError::Forbidden)` - Action not permitted
    pub async fn authorize_write(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        action: WriteAction,
    ) -> Result<(), AppError> {
        match action {
            WriteAction::Create(subject) => self.authorize_create(identity, kind, subject).await,
            WriteAction::Update(id) | WriteAction::Delete(id) => {
                self.resolve_single(identity, kind, id).await.map(|_| ())
            }
            WriteAction::Approve(id) => {
                let ownership = self.load_ownership(kind, id).await?;

                if identity.is_admin() {
                    return Ok(());
                }

                let venue_ids = self.owned_venues(identity).await?;
                if !venue_ids.contains(&ownership.venue_id) {
                    return Err(AppError::Forbidden(format!(
                        "User {} cannot approve {} {}",
                        identity.user_id,
                        kind.label(),
                        id
                    )));
                }

                Ok(())
            }
        }
    }

    async fn authorize_create(
        &self,
        identity: &Identity,
        kind: ResourceKind,
        subject: CreateSubject,
    ) -> Result<(), AppError> {
        let repo = OwnershipRepository::new(self.db);

        let Some(venue_id) = repo.venue_of_court(subject.court_id).await? else {
            return Err(AppError::NotFound(format!(
                "Court {} not found",
                subject.court_id
            )));
        };

        if let Some(customer_id) = subject.customer_id {
            if !repo.customer_exists(customer_id).await? {
                return Err(AppError::NotFound(format!(
                    "Customer {} not found",
                    customer_id
                )));
            }
        }

        if identity.is_admin() {
            return Ok(());
        }

        let permitted = match kind {
            ResourceKind::Reservation => {
                identity.has_role(Role::Customer)
                    && subject.customer_id.is_some()
                    && repo.customer_id_for_user(identity.user_id).await? == subject.customer_id
            }
            ResourceKind::Block => {
                identity.has_role(Role::Owner)
                    && self.owned_venues(identity).await?.contains(&venue_id)
            }
            ResourceKind::Court | ResourceKind::Cancellation => false,
        };

        if !permitted {
            return Err(AppError::Forbidden(format!(
                "User {} cannot create {} on court {}",
                identity.user_id,
                kind.label(),
                subject.court_id
            )));
        }

        Ok(())
    }

    /// Builds the restricted scope from every role the identity holds.
    async fn restricted_scope(
        &self,
        identity: &Identity,
        kind: ResourceKind,
    ) -> Result<Scope, AppError> {
        let repo = OwnershipRepository::new(self.db);
        let mut venue_ids = Vec::new();
        let mut customer_id = None;

        for role in &identity.roles {
            match role {
                Role::Admin => return Ok(Scope::Unrestricted),
                Role::Owner => venue_ids = repo.venue_ids_owned_by_user(identity.user_id).await?,
                Role::Customer => {
                    if kind.customer_visible() {
                        customer_id = repo.customer_id_for_user(identity.user_id).await?;
                    }
                }
            }
        }

        Ok(Scope::Restricted {
            venue_ids,
            customer_id,
        })
    }

    async fn owned_venues(&self, identity: &Identity) -> Result<Vec<i32>, AppError> {
        if !identity.has_role(Role::Owner) {
            return Ok(Vec::new());
        }

        Ok(OwnershipRepository::new(self.db)
            .venue_ids_owned_by_user(identity.user_id)
            .await?)
    }

    async fn load_ownership(
        &self,
        kind: ResourceKind,
        id: i32,
    ) -> Result<ResourceOwnership, AppError> {
        let repo = OwnershipRepository::new(self.db);

        let ownership = match kind {
            ResourceKind::Reservation => repo.reservation_ownership(id).await?,
            ResourceKind::Block => repo.block_ownership(id).await?,
            ResourceKind::Court => repo.court_ownership(id).await?,
            ResourceKind::Cancellation => repo.cancellation_ownership(id).await?,
        };

        ownership.ok_or_else(|| AppError::NotFound(format!("{} {} not found", kind.label(), id)))
    }
}

/// Whether any role held by the identity can reach `kind` at all.
fn grants_access(identity: &Identity, kind: ResourceKind) -> bool {
    identity.roles.iter().any(|role| match role {
        Role::Admin | Role::Owner => true,
        Role::Customer => kind.customer_visible(),
    })
}
