//! Access scoping vocabulary.
//!
//! A [`Scope`] describes which rows of a resource type a caller may see. It is a plain
//! value; the data layer turns it into a query predicate for each resource type, and the
//! scope resolver checks single resources against it through [`ResourceOwnership`].

/// Resource types subject to access scoping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Reservation,
    Block,
    Court,
    Cancellation,
}

impl ResourceKind {
    /// Whether a customer can reach this resource type through their own customer record.
    ///
    /// Blocks and courts have no customer, so customers never see them.
    pub fn customer_visible(&self) -> bool {
        match self {
            Self::Reservation | Self::Cancellation => true,
            Self::Block | Self::Court => false,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Reservation => "Reservation",
            Self::Block => "Block",
            Self::Court => "Court",
            Self::Cancellation => "Cancellation",
        }
    }
}

/// Rows a caller may read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Every row, including other owners' venues.
    Unrestricted,
    /// Rows on courts of the listed venues, plus rows belonging to the customer.
    ///
    /// An empty venue list with no customer matches nothing.
    Restricted {
        venue_ids: Vec<i32>,
        customer_id: Option<i32>,
    },
}

impl Scope {
    /// Whether a single resource falls inside this scope.
    pub fn permits(&self, ownership: &ResourceOwnership) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::Restricted {
                venue_ids,
                customer_id,
            } => {
                venue_ids.contains(&ownership.venue_id)
                    || (customer_id.is_some() && *customer_id == ownership.customer_id)
            }
        }
    }
}

/// Where a single resource belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceOwnership {
    pub venue_id: i32,
    /// `None` for blocks and courts
    pub customer_id: Option<i32>,
}

/// The subject of a create, known before any row exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateSubject {
    pub court_id: i32,
    pub customer_id: Option<i32>,
}

/// A mutation to be authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteAction {
    Create(CreateSubject),
    Update(i32),
    Delete(i32),
    /// Move a pending reservation to confirmed. Reserved for the venue side.
    Approve(i32),
}
