/// UI building blocks
///
/// View helpers for the three form areas:
/// - Profile fields and the date list (form.rs)
/// - Background swatches and the blur slider (background.rs)
/// - The crop modal (cropper.rs)
///
/// All of them emit `crate::Message` values handled by the main update loop.

pub mod background;
pub mod cropper;
pub mod form;
