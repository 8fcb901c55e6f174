// Models module

pub mod character;
pub mod favorite;
pub mod planet;
pub mod user;
pub mod vehicle;

// Re-export commonly used types
pub use character::{Character, CharacterDetail};
pub use favorite::{Favorite, FavoriteKind, FavoriteRecord, FavoriteTarget};
pub use planet::Planet;
pub use user::{User, CURRENT_USER_ID};
pub use vehicle::Vehicle;
