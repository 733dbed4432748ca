//! Authenticated principals and their roles.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A role granted to a user.
///
/// Serialized with the wire names used in tokens and API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    /// Venue owner
    #[serde(rename = "DUENIO")]
    Owner,
    #[serde(rename = "CLIENTE")]
    Customer,
}

impl Role {
    pub fn from_entity(role: entity::sea_orm_active_enums::Role) -> Self {
        use entity::sea_orm_active_enums::Role as EntityRole;

        match role {
            EntityRole::Admin => Self::Admin,
            EntityRole::Duenio => Self::Owner,
            EntityRole::Cliente => Self::Customer,
        }
    }

    pub fn into_entity(self) -> entity::sea_orm_active_enums::Role {
        use entity::sea_orm_active_enums::Role as EntityRole;

        match self {
            Self::Admin => EntityRole::Admin,
            Self::Owner => EntityRole::Duenio,
            Self::Customer => EntityRole::Cliente,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Owner => "DUENIO",
            Self::Customer => "CLIENTE",
        }
    }
}

/// The principal a request acts as.
///
/// Built from the database, never from token claims alone, so revoked roles take effect
/// on the next request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
    pub roles: BTreeSet<Role>,
}

impl Identity {
    pub fn new(user_id: i32, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            user_id,
            roles: roles.into_iter().collect(),
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn into_dto(self) -> crate::model::auth::IdentityDto {
        crate::model::auth::IdentityDto {
            user_id: self.user_id,
            roles: self.roles.iter().map(|r| r.as_str().to_string()).collect(),
        }
    }
}
