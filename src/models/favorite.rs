use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of catalog entity a favorite can point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavoriteKind {
    Character,
    Planet,
    Vehicle,
}

impl FavoriteKind {
    /// Resource name used when the catalog entity itself is missing,
    /// e.g. "Planet" -> "Planet not found".
    pub fn entity_name(self) -> &'static str {
        match self {
            FavoriteKind::Character => "Character",
            FavoriteKind::Planet => "Planet",
            FavoriteKind::Vehicle => "Vehicle",
        }
    }

    /// Resource name used when no matching favorite exists for deletion.
    pub fn favorite_name(self) -> &'static str {
        match self {
            FavoriteKind::Character => "Favorite",
            FavoriteKind::Planet => "Favorite planet",
            FavoriteKind::Vehicle => "Favorite vehicle",
        }
    }

    /// Confirmation message returned after a successful deletion.
    pub fn deleted_message(self) -> &'static str {
        match self {
            FavoriteKind::Character => "Favorite deleted",
            FavoriteKind::Planet => "Favorite planet deleted",
            FavoriteKind::Vehicle => "Favorite vehicle deleted",
        }
    }

    pub fn target(self, id: i32) -> FavoriteTarget {
        match self {
            FavoriteKind::Character => FavoriteTarget::Character(id),
            FavoriteKind::Planet => FavoriteTarget::Planet(id),
            FavoriteKind::Vehicle => FavoriteTarget::Vehicle(id),
        }
    }
}

impl fmt::Display for FavoriteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FavoriteKind::Character => "character",
            FavoriteKind::Planet => "planet",
            FavoriteKind::Vehicle => "vehicle",
        };
        f.write_str(name)
    }
}

/// The single catalog entity a favorite refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FavoriteTarget {
    Character(i32),
    Planet(i32),
    Vehicle(i32),
}

impl FavoriteTarget {
    pub fn kind(&self) -> FavoriteKind {
        match self {
            FavoriteTarget::Character(_) => FavoriteKind::Character,
            FavoriteTarget::Planet(_) => FavoriteKind::Planet,
            FavoriteTarget::Vehicle(_) => FavoriteKind::Vehicle,
        }
    }

    pub fn id(&self) -> i32 {
        match *self {
            FavoriteTarget::Character(id) | FavoriteTarget::Planet(id) | FavoriteTarget::Vehicle(id) => id,
        }
    }

    /// Splits the target into the `(character_id, planet_id, vehicle_id)`
    /// column triple used by storage and the JSON wire format.
    pub fn columns(&self) -> (Option<i32>, Option<i32>, Option<i32>) {
        match *self {
            FavoriteTarget::Character(id) => (Some(id), None, None),
            FavoriteTarget::Planet(id) => (None, Some(id), None),
            FavoriteTarget::Vehicle(id) => (None, None, Some(id)),
        }
    }

    /// Rebuilds a target from the column triple. Exactly one column must be set.
    pub fn from_columns(
        character_id: Option<i32>,
        planet_id: Option<i32>,
        vehicle_id: Option<i32>,
    ) -> Option<Self> {
        match (character_id, planet_id, vehicle_id) {
            (Some(id), None, None) => Some(FavoriteTarget::Character(id)),
            (None, Some(id), None) => Some(FavoriteTarget::Planet(id)),
            (None, None, Some(id)) => Some(FavoriteTarget::Vehicle(id)),
            _ => None,
        }
    }
}

/// A user's favorite catalog item.
///
/// Serializes to the flat row shape `{id, user_id, character_id, planet_id,
/// vehicle_id}` with exactly one of the three target columns non-null;
/// deserializing a payload that breaks that rule fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FavoriteRecord", into = "FavoriteRecord")]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub target: FavoriteTarget,
}

/// Flat column representation of a favorite row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: i32,
    pub user_id: i32,
    pub character_id: Option<i32>,
    pub planet_id: Option<i32>,
    pub vehicle_id: Option<i32>,
}

impl Favorite {
    pub fn new(id: i32, user_id: i32, target: FavoriteTarget) -> Self {
        Favorite { id, user_id, target }
    }

    pub fn matches(&self, user_id: i32, target: FavoriteTarget) -> bool {
        self.user_id == user_id && self.target == target
    }
}

impl From<Favorite> for FavoriteRecord {
    fn from(favorite: Favorite) -> Self {
        let (character_id, planet_id, vehicle_id) = favorite.target.columns();
        FavoriteRecord {
            id: favorite.id,
            user_id: favorite.user_id,
            character_id,
            planet_id,
            vehicle_id,
        }
    }
}

impl TryFrom<FavoriteRecord> for Favorite {
    type Error = String;

    fn try_from(record: FavoriteRecord) -> Result<Self, Self::Error> {
        let target = FavoriteTarget::from_columns(record.character_id, record.planet_id, record.vehicle_id)
            .ok_or_else(|| {
                format!(
                    "favorite {} must reference exactly one of character_id, planet_id, vehicle_id",
                    record.id
                )
            })?;

        Ok(Favorite::new(record.id, record.user_id, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_columns_are_exclusive() {
        assert_eq!(FavoriteTarget::Character(4).columns(), (Some(4), None, None));
        assert_eq!(FavoriteTarget::Planet(2).columns(), (None, Some(2), None));
        assert_eq!(FavoriteTarget::Vehicle(9).columns(), (None, None, Some(9)));
    }

    #[test]
    fn test_from_columns_rejects_ambiguous_rows() {
        assert_eq!(FavoriteTarget::from_columns(None, None, None), None);
        assert_eq!(FavoriteTarget::from_columns(Some(1), Some(2), None), None);
        assert_eq!(FavoriteTarget::from_columns(Some(1), Some(2), Some(3)), None);
        assert_eq!(
            FavoriteTarget::from_columns(None, Some(7), None),
            Some(FavoriteTarget::Planet(7))
        );
    }

    #[test]
    fn test_kind_builds_matching_target() {
        for kind in [FavoriteKind::Character, FavoriteKind::Planet, FavoriteKind::Vehicle] {
            let target = kind.target(11);
            assert_eq!(target.kind(), kind);
            assert_eq!(target.id(), 11);
        }
    }

    #[test]
    fn test_favorite_serialization() {
        let favorite = Favorite::new(3, 1, FavoriteTarget::Planet(5));

        let json = serde_json::to_string(&favorite).expect("Failed to serialize favorite");
        let expected = r#"{"id":3,"user_id":1,"character_id":null,"planet_id":5,"vehicle_id":null}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_favorite_deserialization() {
        let json = r#"{"id":8,"user_id":1,"character_id":2,"planet_id":null,"vehicle_id":null}"#;

        let favorite: Favorite = serde_json::from_str(json).expect("Failed to deserialize favorite");

        assert_eq!(favorite.id, 8);
        assert_eq!(favorite.user_id, 1);
        assert_eq!(favorite.target, FavoriteTarget::Character(2));
    }

    #[test]
    fn test_favorite_deserialization_rejects_two_targets() {
        let json = r#"{"id":8,"user_id":1,"character_id":2,"planet_id":4,"vehicle_id":null}"#;

        let result: Result<Favorite, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_matches_requires_same_user_and_target() {
        let favorite = Favorite::new(1, 1, FavoriteTarget::Character(2));

        assert!(favorite.matches(1, FavoriteTarget::Character(2)));
        assert!(!favorite.matches(2, FavoriteTarget::Character(2)));
        assert!(!favorite.matches(1, FavoriteTarget::Planet(2)));
    }

    #[test]
    fn test_kind_messages() {
        assert_eq!(FavoriteKind::Planet.entity_name(), "Planet");
        assert_eq!(FavoriteKind::Planet.favorite_name(), "Favorite planet");
        assert_eq!(FavoriteKind::Character.favorite_name(), "Favorite");
        assert_eq!(FavoriteKind::Character.deleted_message(), "Favorite deleted");
        assert_eq!(FavoriteKind::Vehicle.to_string(), "vehicle");
    }
}
