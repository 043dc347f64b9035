/// Profile form widgets: photo upload, name, bio, location, and the
/// editable availability-date list.

use iced::widget::{
    button, column, container, image as iced_image, row, text, text_editor, text_input,
};
use iced::{Alignment, Element, Length};

use crate::format::format_date;
use crate::state::card::CardData;
use crate::Message;

/// Photo preview + upload button, followed by the three text fields.
pub fn profile_section<'a>(
    card: &'a CardData,
    bio: &'a text_editor::Content,
    photo: Option<&iced_image::Handle>,
) -> Element<'a, Message> {
    let photo_widget: Element<Message> = match photo {
        Some(handle) => iced_image(handle.clone())
            .width(80)
            .height(80)
            .into(),
        None => container(text("no photo").size(12))
            .width(80)
            .height(80)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(container::rounded_box)
            .into(),
    };

    column![
        text("Profile Photo").size(14),
        row![
            photo_widget,
            button("Upload photo...").on_press(Message::PickPhoto).padding(10),
        ]
        .spacing(16)
        .align_y(Alignment::Center),
        text("Name/Title").size(14),
        text_input("Your name", &card.name)
            .on_input(Message::NameChanged)
            .padding(10),
        text("Description").size(14),
        text_editor(bio)
            .placeholder("Brief description about yourself")
            .on_action(Message::BioEdited)
            .height(90),
        text("Location").size(14),
        text_input("City, Country", &card.location)
            .on_input(Message::LocationChanged)
            .padding(10),
    ]
    .spacing(8)
    .into()
}

/// The editable date list. Each non-empty entry shows its formatted form
/// next to the input — the exact same string the preview renders.
pub fn dates_section(card: &CardData) -> Element<'_, Message> {
    let removable = card.availability_dates.len() > 1;

    let mut list = column![].spacing(10);
    for (index, date) in card.availability_dates.iter().enumerate() {
        let mut entry = row![text_input("YYYY-MM-DD", date)
            .on_input(move |value| Message::DateChanged(index, value))
            .width(160)
            .padding(10)]
        .spacing(12)
        .align_y(Alignment::Center);

        if !date.is_empty() {
            entry = entry.push(text(format_date(date)).size(14));
        }
        if removable {
            entry = entry.push(
                button(text("Remove").size(12))
                    .on_press(Message::DateRemoved(index))
                    .style(button::text),
            );
        }
        list = list.push(entry);
    }

    column![
        text("Available Dates").size(14),
        list,
        button(text("+ Add another date").size(14))
            .on_press(Message::DateAdded)
            .style(button::text),
    ]
    .spacing(8)
    .into()
}
