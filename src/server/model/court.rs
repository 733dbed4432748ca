use crate::model::court::CourtDto;

#[derive(Debug, Clone, PartialEq)]
pub struct Court {
    pub id: i32,
    pub venue_id: i32,
    pub name: String,
}

impl Court {
    pub fn from_entity(entity: entity::court::Model) -> Self {
        Self {
            id: entity.id,
            venue_id: entity.venue_id,
            name: entity.name,
        }
    }

    pub fn into_dto(self) -> CourtDto {
        CourtDto {
            id: self.id,
            venue_id: self.venue_id,
            name: self.name,
        }
    }
}
