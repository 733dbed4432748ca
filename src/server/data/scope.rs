//! Query predicates derived from an access [`Scope`].

use sea_orm::{
    sea_query::{Expr, SelectStatement},
    ColumnTrait, Condition, EntityTrait, QueryFilter, QuerySelect, QueryTrait,
};

use crate::server::model::scope::Scope;

/// An entity that can be filtered down to a caller's scope.
pub trait ScopedEntity: EntityTrait {
    /// Builds the predicate selecting the rows `scope` allows.
    fn scope_condition(scope: &Scope) -> Condition;
}

/// Selects ids of courts that belong to any of `venue_ids`.
fn courts_in_venues(venue_ids: &[i32]) -> SelectStatement {
    entity::prelude::Court::find()
        .select_only()
        .column(entity::court::Column::Id)
        .filter(entity::court::Column::VenueId.is_in(venue_ids.to_vec()))
        .into_query()
}

/// Builds `venue OR customer`, matching nothing when neither side applies.
fn venue_or_customer(venue: Option<Condition>, customer: Option<Condition>) -> Condition {
    let mut condition = Condition::any();
    let mut matchable = false;

    for part in [venue, customer].into_iter().flatten() {
        condition = condition.add(part);
        matchable = true;
    }

    if !matchable {
        condition = condition.add(Expr::cust("1 = 0"));
    }

    condition
}

impl ScopedEntity for entity::reservation::Entity {
    fn scope_condition(scope: &Scope) -> Condition {
        use entity::reservation::Column;

        match scope {
            Scope::Unrestricted => Condition::all(),
            Scope::Restricted {
                venue_ids,
                customer_id,
            } => venue_or_customer(
                (!venue_ids.is_empty()).then(|| {
                    Condition::all().add(Column::CourtId.in_subquery(courts_in_venues(venue_ids)))
                }),
                customer_id.map(|id| Condition::all().add(Column::CustomerId.eq(id))),
            ),
        }
    }
}

impl ScopedEntity for entity::block::Entity {
    fn scope_condition(scope: &Scope) -> Condition {
        use entity::block::Column;

        match scope {
            Scope::Unrestricted => Condition::all(),
            Scope::Restricted { venue_ids, .. } => venue_or_customer(
                (!venue_ids.is_empty()).then(|| {
                    Condition::all().add(Column::CourtId.in_subquery(courts_in_venues(venue_ids)))
                }),
                None,
            ),
        }
    }
}

impl ScopedEntity for entity::court::Entity {
    fn scope_condition(scope: &Scope) -> Condition {
        use entity::court::Column;

        match scope {
            Scope::Unrestricted => Condition::all(),
            Scope::Restricted { venue_ids, .. } => venue_or_customer(
                (!venue_ids.is_empty())
                    .then(|| Condition::all().add(Column::VenueId.is_in(venue_ids.to_vec()))),
                None,
            ),
        }
    }
}

impl ScopedEntity for entity::cancellation::Entity {
    fn scope_condition(scope: &Scope) -> Condition {
        use entity::cancellation::Column;

        match scope {
            Scope::Unrestricted => Condition::all(),
            Scope::Restricted {
                venue_ids,
                customer_id,
            } => venue_or_customer(
                (!venue_ids.is_empty()).then(|| {
                    let reservations = entity::prelude::Reservation::find()
                        .select_only()
                        .column(entity::reservation::Column::Id)
                        .filter(
                            entity::reservation::Column::CourtId
                                .in_subquery(courts_in_venues(venue_ids)),
                        )
                        .into_query();

                    Condition::all().add(Column::ReservationId.in_subquery(reservations))
                }),
                customer_id.map(|id| Condition::all().add(Column::CustomerId.eq(id))),
            ),
        }
    }
}
