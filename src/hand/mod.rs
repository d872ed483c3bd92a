//! Hand and deck management over the shared card catalog.

pub mod manager;

pub use manager::DeckManager;
