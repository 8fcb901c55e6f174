//! Fixed starter catalog loaded into empty tables at startup.

use crate::models::{Character, Planet, User, Vehicle, CURRENT_USER_ID};

/// Rows inserted by `CatalogRepository::seed`. Ids are explicit so the
/// fixed current user always resolves.
#[derive(Debug, Clone)]
pub struct SeedCatalog {
    pub users: Vec<User>,
    pub characters: Vec<Character>,
    pub planets: Vec<Planet>,
    pub vehicles: Vec<Vehicle>,
}

fn text(value: &str) -> Option<String> {
    Some(value.to_string())
}

impl SeedCatalog {
    pub fn starter() -> Self {
        let users = vec![User::new(CURRENT_USER_ID, "luke@rebellion.test")];

        let characters = [
            (1, "Luke Skywalker", "male", "19BBY", "blue", "blond"),
            (2, "Leia Organa", "female", "19BBY", "brown", "brown"),
            (3, "Darth Vader", "male", "41.9BBY", "yellow", "none"),
        ]
        .into_iter()
        .map(|(id, name, gender, birth_year, eye_color, hair_color)| Character {
            id,
            name: name.to_string(),
            gender: text(gender),
            birth_year: text(birth_year),
            eye_color: text(eye_color),
            hair_color: text(hair_color),
        })
        .collect();

        let planets = [
            (1, "Tatooine", "arid", "desert", 200_000),
            (2, "Alderaan", "temperate", "grasslands, mountains", 2_000_000_000),
            (3, "Hoth", "frozen", "tundra, ice caves", 0),
        ]
        .into_iter()
        .map(|(id, name, climate, terrain, population)| Planet {
            id,
            name: name.to_string(),
            climate: text(climate),
            terrain: text(terrain),
            population: Some(population),
        })
        .collect();

        let vehicles = [
            (1, "Sand Crawler", "Digger Crawler", "Corellia Mining Corporation"),
            (2, "X-34 landspeeder", "X-34 landspeeder", "SoroSuub Corporation"),
        ]
        .into_iter()
        .map(|(id, name, model, manufacturer)| Vehicle {
            id,
            name: name.to_string(),
            model: text(model),
            manufacturer: text(manufacturer),
        })
        .collect();

        SeedCatalog {
            users,
            characters,
            planets,
            vehicles,
        }
    }
}
