/// Background selector: a wrapping row of gradient swatches plus an upload
/// slot, and the blur slider shown only while an uploaded image is active.

use iced::widget::{button, column, slider, text, tooltip};
use iced::{gradient, Border, Color, Element, Gradient, Radians, Theme};
use iced_aw::Wrap;

use crate::state::background::{Background, GradientId, BLUR_MAX};
use crate::Message;

const SWATCH_SIZE: f32 = 48.0;

pub fn background_section(background: &Background) -> Element<'_, Message> {
    let mut swatches: Vec<Element<Message>> = Vec::new();
    for id in GradientId::ALL {
        let selected = matches!(background, Background::Gradient(current) if *current == id);
        swatches.push(swatch(id, selected));
    }
    swatches.push(upload_slot(background.is_image()));

    let mut section = column![
        text("Background Style").size(14),
        Wrap::with_elements(swatches).spacing(10.0),
    ]
    .spacing(8);

    if let Background::Image { blur, .. } = background {
        section = section
            .push(text(format!("Background Blur: {blur}px")).size(14))
            .push(slider(0..=BLUR_MAX, *blur, Message::BlurChanged));
    }

    section.into()
}

/// One gradient preset as a square swatch; the selection is shown as a ring.
fn swatch<'a>(id: GradientId, selected: bool) -> Element<'a, Message> {
    let content = button("")
        .width(SWATCH_SIZE)
        .height(SWATCH_SIZE)
        .on_press(Message::GradientPicked(id))
        .style(move |_theme: &Theme, _status| {
            let (start, end) = id.stops();
            // Painted top-left to bottom-right, like the card itself
            let linear = gradient::Linear::new(Radians(3.0 * std::f32::consts::FRAC_PI_4))
                .add_stop(0.0, rgb8(start))
                .add_stop(1.0, rgb8(end));
            button::Style {
                background: Some(iced::Background::Gradient(Gradient::Linear(linear))),
                border: ring(selected),
                ..button::Style::default()
            }
        });

    tooltip(content, text(id.name()).size(12), tooltip::Position::Top).into()
}

/// The "upload a background image" slot at the end of the swatch row.
fn upload_slot<'a>(selected: bool) -> Element<'a, Message> {
    let content = button(text("img").size(12))
        .width(SWATCH_SIZE)
        .height(SWATCH_SIZE)
        .on_press(Message::PickBackgroundImage)
        .style(move |_theme: &Theme, _status| button::Style {
            background: Some(iced::Background::Color(Color::from_rgb8(0xF3, 0xF4, 0xF6))),
            text_color: Color::from_rgb8(0x6B, 0x72, 0x80),
            border: ring(selected),
            ..button::Style::default()
        });

    tooltip(
        content,
        text("Upload background image").size(12),
        tooltip::Position::Top,
    )
    .into()
}

fn ring(selected: bool) -> Border {
    Border {
        color: if selected {
            Color::from_rgb8(0x4F, 0x46, 0xE5)
        } else {
            Color::from_rgb8(0xE5, 0xE7, 0xEB)
        },
        width: if selected { 3.0 } else { 1.0 },
        radius: 8.0.into(),
    }
}

fn rgb8(rgb: [u8; 3]) -> Color {
    Color::from_rgb8(rgb[0], rgb[1], rgb[2])
}
