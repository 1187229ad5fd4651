use crate::domain::model::EntityId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored developer record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Developer {
    #[schema(value_type = String, format = Uuid)]
    pub id: EntityId,
    /// Display name, also the lookup key for the games-by-developer query.
    pub name: String,
    pub headquarters: String,
}

/// Developer attributes supplied by a caller on create and update.
///
/// Any `id` in the request body is ignored: ids are assigned by the store on
/// insert and taken from the path on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperInput {
    pub name: String,
    pub headquarters: String,
}

impl DeveloperInput {
    pub fn into_developer(self, id: EntityId) -> Developer {
        Developer {
            id,
            name: self.name,
            headquarters: self.headquarters,
        }
    }
}
