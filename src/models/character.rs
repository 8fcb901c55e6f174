use serde::{Deserialize, Serialize};

use super::favorite::Favorite;

/// Catalog character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: i32,
    pub name: String,
    pub gender: Option<String>,
    pub birth_year: Option<String>,
    pub eye_color: Option<String>,
    pub hair_color: Option<String>,
}

/// Response body of `GET /characters/:id`: the character plus every
/// favorite that points at it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDetail {
    pub character: Character,
    pub favorites: Vec<Favorite>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::favorite::FavoriteTarget;

    fn luke() -> Character {
        Character {
            id: 1,
            name: "Luke Skywalker".to_string(),
            gender: Some("male".to_string()),
            birth_year: Some("19BBY".to_string()),
            eye_color: Some("blue".to_string()),
            hair_color: None,
        }
    }

    #[test]
    fn test_character_serialization_keeps_null_fields() {
        let json = serde_json::to_string(&luke()).expect("Failed to serialize character");
        let expected = r#"{"id":1,"name":"Luke Skywalker","gender":"male","birth_year":"19BBY","eye_color":"blue","hair_color":null}"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_character_detail_shape() {
        let detail = CharacterDetail {
            character: luke(),
            favorites: vec![Favorite::new(4, 1, FavoriteTarget::Character(1))],
        };

        let value = serde_json::to_value(&detail).expect("Failed to serialize detail");
        assert_eq!(value["character"]["name"], "Luke Skywalker");
        assert_eq!(value["favorites"][0]["character_id"], 1);
        assert!(value["favorites"][0]["planet_id"].is_null());
    }
}
