//! Card system: templates, instances, catalog and display projections.
//!
//! ## Key Types
//!
//! - `CardId`: String identifier of a template (`"bash"`)
//! - `CardTemplate`: Immutable catalog data, shared via `Arc`
//! - `CardInstance`: Template plus per-battle runtime state
//! - `CardCatalog`: Template lookup in registration order
//! - `DisplayStats`: Base or runtime numbers for a rendering layer

pub mod accuracy;
pub mod catalog;
pub mod definition;
pub mod display;
pub mod instance;
pub mod registry;

pub use accuracy::{effective_accuracy, AccuracyCheck};
pub use catalog::default_catalog;
pub use definition::{ActivationCount, CardId, CardTemplate};
pub use display::{element_color, element_emoji, ActivationDisplay, DisplayContext, DisplayStats};
pub use instance::{ActivationRoll, CardInstance, CardRuntimeState, ResolvedCount};
pub use registry::CardCatalog;
