/// Crop modal: shown over the main view while a freshly uploaded photo is
/// being framed. Offsets slide the fixed 1:1 selection across the source;
/// zoom shrinks it. Apply hands the cropped JPEG back to the form state.

use iced::widget::{button, column, container, horizontal_space, image as iced_image, row, slider, text};
use iced::{Alignment, Element};

use crate::state::crop::{CropModal, ZOOM_MAX, ZOOM_MIN};
use crate::Message;

/// Build the modal contents, or None while the modal is closed.
pub fn crop_modal<'a>(
    modal: &'a CropModal,
    source: Option<&iced_image::Handle>,
) -> Option<Element<'a, Message>> {
    let session = modal.session()?;
    let applying = modal.is_applying();

    let preview: Element<Message> = match source {
        Some(handle) => iced_image(handle.clone()).width(360).into(),
        None => text("Loading image...").into(),
    };

    let rect = session.rect();
    let apply = if applying {
        button(text("Applying...").size(14))
    } else {
        button(text("Apply").size(14)).on_press(Message::ApplyCrop)
    };

    Some(
        container(
            column![
                row![
                    text("Crop Image").size(20),
                    horizontal_space(),
                    button(text("Close").size(12))
                        .on_press(Message::CancelCrop)
                        .style(button::text),
                ]
                .align_y(Alignment::Center),
                preview,
                text(format!(
                    "Selection: {}x{} at ({}, {})",
                    rect.width, rect.height, rect.x, rect.y
                ))
                .size(13),
                text("Horizontal position").size(13),
                slider(-1.0..=1.0, session.offset_x, Message::CropOffsetX).step(0.01),
                text("Vertical position").size(13),
                slider(-1.0..=1.0, session.offset_y, Message::CropOffsetY).step(0.01),
                text(format!("Zoom: {:.1}x", session.zoom)).size(13),
                slider(ZOOM_MIN..=ZOOM_MAX, session.zoom, Message::CropZoom).step(0.1),
                row![horizontal_space(), apply],
            ]
            .spacing(12)
            .padding(20),
        )
        .width(420)
        .style(container::rounded_box)
        .into(),
    )
}
