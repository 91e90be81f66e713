pub mod decks;
pub mod filter;
pub mod models;
pub mod quick_add;

pub use decks::deck_names;
pub use models::*;
pub use quick_add::QuickAdd;
