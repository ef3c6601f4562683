//! Card system: definitions, instances and the catalog.
//!
//! - `CardDefinition`: static catalog data (cost, mana cost, effect, value)
//! - `Card`: an instance with a unique per-game id
//! - `CardCatalog`: lookup table keyed by catalog id

pub mod catalog;
pub mod definition;
pub mod instance;

pub use catalog::CardCatalog;
pub use definition::{CardCategory, CardDefinition, EffectKind};
pub use instance::Card;
