/// Application state module
///
/// This module holds all session state:
/// - Card fields and orientation (card.rs)
/// - Background selection: gradient presets or an uploaded image (background.rs)
/// - The crop modal's state machine and session (crop.rs)
///
/// Nothing here is persisted; every field lives and dies with the session.

pub mod background;
pub mod card;
pub mod crop;
