use chrono::{DateTime, Local};
use iced::widget::{
    button, center, column, container, image as iced_image, opaque, row, scrollable, stack, text,
    text_editor,
};
use iced::{Alignment, Color, Element, Length, Task, Theme};
use rfd::FileDialog;
use std::path::PathBuf;

mod format;
mod render;
mod state;
mod ui;

use render::export::ExportOutcome;
use render::raster::Raster;
use state::background::{Background, GradientId};
use state::card::{CardData, Orientation};
use state::crop::{CropModal, CropSession, LoadedImage};

/// A card exported earlier in this session. Kept in memory only; history
/// does not survive a restart.
#[derive(Debug, Clone)]
struct HistoryEntry {
    thumbnail: iced_image::Handle,
    created_at: DateTime<Local>,
    path: PathBuf,
}

/// Main application state
struct CardStudio {
    /// User-entered card fields
    card: CardData,
    /// Editor buffer backing the bio field
    bio: text_editor::Content,
    /// Gradient preset or uploaded image
    background: Background,
    orientation: Orientation,
    /// Crop modal state machine
    crop: CropModal,
    /// Display handle for the crop modal's source image
    crop_handle: Option<iced_image::Handle>,
    /// Display handle for the cropped profile photo
    photo_handle: Option<iced_image::Handle>,
    /// Latest rendered preview
    preview: Option<iced_image::Handle>,
    /// Monotonic counter; stale preview renders are discarded
    preview_epoch: u64,
    /// In-flight guard: no second export while one is pending
    exporting: bool,
    /// Cards exported this session
    history: Vec<HistoryEntry>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    NameChanged(String),
    BioEdited(text_editor::Action),
    LocationChanged(String),
    DateAdded,
    DateRemoved(usize),
    DateChanged(usize, String),

    PickPhoto,
    PhotoLoaded(Result<LoadedImage, String>),
    CropOffsetX(f32),
    CropOffsetY(f32),
    CropZoom(f32),
    ApplyCrop,
    CropApplied(Result<Vec<u8>, String>),
    CancelCrop,

    GradientPicked(GradientId),
    PickBackgroundImage,
    BackgroundLoaded(Result<LoadedImage, String>),
    BlurChanged(u8),

    OrientationPicked(Orientation),
    Export,
    ExportFinished(Result<ExportOutcome, String>),
    PreviewReady(u64, Result<Raster, String>),
}

impl CardStudio {
    fn new() -> (Self, Task<Message>) {
        let mut app = CardStudio {
            card: CardData::new(),
            bio: text_editor::Content::new(),
            background: Background::default(),
            orientation: Orientation::default(),
            crop: CropModal::Closed,
            crop_handle: None,
            photo_handle: None,
            preview: None,
            preview_epoch: 0,
            exporting: false,
            history: Vec::new(),
            status: "Ready.".to_string(),
        };
        let initial_render = app.refresh_preview();
        (app, initial_render)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NameChanged(name) => {
                self.card.set_name(name);
                self.refresh_preview()
            }
            Message::BioEdited(action) => {
                self.bio.perform(action);
                let bio = self.bio.text();
                self.card.set_bio(bio.trim_end_matches('\n').to_string());
                self.refresh_preview()
            }
            Message::LocationChanged(location) => {
                self.card.set_location(location);
                self.refresh_preview()
            }
            Message::DateAdded => {
                self.card.add_date_slot();
                self.refresh_preview()
            }
            Message::DateRemoved(index) => {
                self.card.remove_date_slot(index);
                self.refresh_preview()
            }
            Message::DateChanged(index, value) => {
                self.card.set_date_slot(index, value);
                self.refresh_preview()
            }

            Message::PickPhoto => {
                if let Some(path) = pick_image_file("Select Profile Photo") {
                    return Task::perform(load_image(path), Message::PhotoLoaded);
                }
                Task::none()
            }
            Message::PhotoLoaded(Ok(image)) => {
                self.crop_handle = Some(iced_image::Handle::from_bytes(image.bytes.clone()));
                self.crop = CropModal::open(image);
                Task::none()
            }
            Message::PhotoLoaded(Err(error)) => {
                log::warn!("photo load failed: {error}");
                self.status = format!("⚠️  Could not load photo: {error}");
                Task::none()
            }
            Message::CropOffsetX(value) => {
                if let Some(session) = self.crop.session_mut() {
                    session.set_offset_x(value);
                }
                Task::none()
            }
            Message::CropOffsetY(value) => {
                if let Some(session) = self.crop.session_mut() {
                    session.set_offset_y(value);
                }
                Task::none()
            }
            Message::CropZoom(value) => {
                if let Some(session) = self.crop.session_mut() {
                    session.set_zoom(value);
                }
                Task::none()
            }
            Message::ApplyCrop => match std::mem::take(&mut self.crop) {
                CropModal::Open(session) => {
                    self.crop = CropModal::Applying(session.clone());
                    Task::perform(apply_crop(session), Message::CropApplied)
                }
                // Closed, or an apply already in flight
                other => {
                    self.crop = other;
                    Task::none()
                }
            },
            Message::CropApplied(Ok(jpeg)) => {
                self.photo_handle = Some(iced_image::Handle::from_bytes(jpeg.clone()));
                self.card.set_photo(jpeg);
                self.crop = CropModal::Closed;
                self.crop_handle = None;
                self.status = "✅ Photo updated.".to_string();
                self.refresh_preview()
            }
            Message::CropApplied(Err(error)) => {
                // Keep the modal open with the session intact so the user
                // can retry or cancel; the prior photo stays in place
                log::error!("crop failed: {error}");
                self.status = format!("⚠️  Crop failed: {error}");
                if let CropModal::Applying(session) = std::mem::take(&mut self.crop) {
                    self.crop = CropModal::Open(session);
                }
                Task::none()
            }
            Message::CancelCrop => {
                self.crop = CropModal::Closed;
                self.crop_handle = None;
                Task::none()
            }

            Message::GradientPicked(id) => {
                self.background.select_gradient(id);
                self.refresh_preview()
            }
            Message::PickBackgroundImage => {
                if let Some(path) = pick_image_file("Select Background Image") {
                    return Task::perform(load_image(path), Message::BackgroundLoaded);
                }
                Task::none()
            }
            Message::BackgroundLoaded(Ok(image)) => {
                // Uploading implies switching to image mode
                self.background.set_image(image.bytes);
                self.refresh_preview()
            }
            Message::BackgroundLoaded(Err(error)) => {
                log::warn!("background load failed: {error}");
                self.status = format!("⚠️  Could not load background: {error}");
                Task::none()
            }
            Message::BlurChanged(amount) => {
                self.background.set_blur(amount);
                self.refresh_preview()
            }

            Message::OrientationPicked(orientation) => {
                self.orientation = orientation;
                self.refresh_preview()
            }
            Message::Export => {
                if self.exporting {
                    log::warn!("export already in flight, ignoring trigger");
                    return Task::none();
                }
                self.exporting = true;
                self.status = "Exporting...".to_string();

                let card = self.card.clone();
                let background = self.background.clone();
                let orientation = self.orientation;
                Task::perform(
                    export_card(card, background, orientation),
                    Message::ExportFinished,
                )
            }
            Message::ExportFinished(Ok(outcome)) => {
                self.exporting = false;
                self.status = format!("✅ Exported to {}", outcome.path.display());
                self.history.push(HistoryEntry {
                    thumbnail: iced_image::Handle::from_bytes(outcome.png),
                    created_at: Local::now(),
                    path: outcome.path,
                });
                Task::none()
            }
            Message::ExportFinished(Err(error)) => {
                self.exporting = false;
                log::error!("export failed: {error}");
                self.status = format!("⚠️  Export failed: {error}");
                Task::none()
            }
            Message::PreviewReady(epoch, result) => {
                if epoch != self.preview_epoch {
                    // A newer edit superseded this render
                    return Task::none();
                }
                match result {
                    Ok(raster) => {
                        self.preview = Some(iced_image::Handle::from_rgba(
                            raster.width,
                            raster.height,
                            raster.rgba,
                        ));
                    }
                    Err(error) => {
                        log::error!("preview render failed: {error}");
                        self.status = format!("⚠️  Preview failed: {error}");
                    }
                }
                Task::none()
            }
        }
    }

    /// Kick off an async re-render of the preview for the current state.
    fn refresh_preview(&mut self) -> Task<Message> {
        self.preview_epoch += 1;
        let epoch = self.preview_epoch;
        let card = self.card.clone();
        let background = self.background.clone();
        let orientation = self.orientation;

        Task::perform(
            async move {
                tokio::task::spawn_blocking(move || {
                    render::export::render_preview(&card, &background, orientation)
                        .map_err(|e| e.to_string())
                })
                .await
                .map_err(|e| format!("preview task failed: {e}"))?
            },
            move |result| Message::PreviewReady(epoch, result),
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let (preview_w, _) = self.orientation.preview_size();
        let preview: Element<Message> = match &self.preview {
            Some(handle) => iced_image(handle.clone()).width(preview_w as f32).into(),
            None => text("Rendering preview...").size(16).into(),
        };

        let export = if self.exporting {
            button(text("Exporting...").size(16))
        } else {
            button(text("Export Image").size(16)).on_press(Message::Export)
        };

        let mut content = column![
            text("Availability Card Generator").size(32),
            ui::form::profile_section(&self.card, &self.bio, self.photo_handle.as_ref()),
            ui::form::dates_section(&self.card),
            ui::background::background_section(&self.background),
            self.orientation_toggle(),
            text("Preview").size(24),
            preview,
            export.padding([12.0, 24.0]),
        ]
        .spacing(20)
        .padding(30)
        .align_x(Alignment::Center)
        .max_width(700);

        if !self.history.is_empty() {
            let mut thumbnails = row![].spacing(12);
            for entry in &self.history {
                thumbnails = thumbnails.push(
                    column![
                        iced_image(entry.thumbnail.clone()).width(120),
                        text(format!("Created: {}", entry.created_at.format("%m/%d/%Y")))
                            .size(12),
                    ]
                    .spacing(4)
                    .align_x(Alignment::Center),
                );
            }
            content = content
                .push(text("Your Card History").size(24))
                .push(thumbnails);
        }

        content = content.push(text(&self.status).size(14));

        let base = scrollable(
            container(content)
                .width(Length::Fill)
                .center_x(Length::Fill),
        );

        match ui::cropper::crop_modal(&self.crop, self.crop_handle.as_ref()) {
            Some(modal) => stack![
                base,
                opaque(center(modal).style(|_theme: &Theme| container::Style {
                    background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.75).into()),
                    ..container::Style::default()
                })),
            ]
            .into(),
            None => base.into(),
        }
    }

    fn orientation_toggle(&self) -> Element<Message> {
        let choice = |label: &'static str, orientation: Orientation| {
            let style = if orientation == self.orientation {
                button::primary
            } else {
                button::secondary
            };
            button(text(label).size(14))
                .on_press(Message::OrientationPicked(orientation))
                .style(style)
                .padding([8.0, 16.0])
        };

        row![
            choice("Square", Orientation::Square),
            choice("Vertical", Orientation::Vertical),
        ]
        .spacing(10)
        .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    env_logger::init();

    iced::application("Card Studio", CardStudio::update, CardStudio::view)
        .theme(CardStudio::theme)
        .centered()
        .run_with(CardStudio::new)
}

/// Show the native image picker. Blocking, like the folder picker flows
/// this app grew out of; the subsequent load runs async.
fn pick_image_file(title: &str) -> Option<PathBuf> {
    FileDialog::new()
        .add_filter("images", &["png", "jpg", "jpeg", "webp", "bmp", "gif"])
        .set_title(title)
        .pick_file()
}

/// Read and decode an image file off the UI thread.
async fn load_image(path: PathBuf) -> Result<LoadedImage, String> {
    tokio::task::spawn_blocking(move || {
        render::crop::load_source(&path).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("image load task failed: {e}"))?
}

/// Run the crop off the UI thread.
async fn apply_crop(session: CropSession) -> Result<Vec<u8>, String> {
    tokio::task::spawn_blocking(move || {
        render::crop::apply(&session).map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("crop task failed: {e}"))?
}

/// Render and save the card off the UI thread.
async fn export_card(
    card: CardData,
    background: Background,
    orientation: Orientation,
) -> Result<ExportOutcome, String> {
    tokio::task::spawn_blocking(move || {
        render::export::export_to_downloads(&card, &background, orientation)
            .map_err(|e| e.to_string())
    })
    .await
    .map_err(|e| format!("export task failed: {e}"))?
}
