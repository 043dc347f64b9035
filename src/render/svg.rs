/// Card view composition
///
/// The card is composed as a single SVG document. The live preview and the
/// export pipeline both rasterize this exact document, so what the user sees
/// is what gets exported — there is no second layout path to drift.
///
/// Layout mirrors the card design: rounded corners, optional circular photo
/// with a white ring, bold name, wrapped bio, and pill chips for the location
/// and each non-empty availability date, all centered as one block.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use std::fmt::Write;

use crate::format::format_date;
use crate::state::background::Background;
use crate::state::card::{CardData, Orientation};

const CORNER_RADIUS: f32 = 24.0;
const PADDING: f32 = 32.0;

const PHOTO_SIZE: f32 = 160.0;
const PHOTO_RING_WIDTH: f32 = 4.0;
const PHOTO_MARGIN: f32 = 32.0;

const NAME_SIZE: f32 = 36.0;
const NAME_LINE: f32 = 40.0;
const NAME_MARGIN: f32 = 16.0;

const BIO_SIZE: f32 = 20.0;
const BIO_LINE: f32 = 28.0;
const BIO_MARGIN: f32 = 32.0;

const CHIP_TEXT_SIZE: f32 = 18.0;
const CHIP_HEIGHT: f32 = 48.0;
const CHIP_PAD_X: f32 = 24.0;
const LOCATION_MARGIN: f32 = 24.0;
const DATE_SPACING: f32 = 12.0;

/// Rough glyph advance as a fraction of the font size, for centering pills
/// and wrapping the bio without shaping the text.
const CHAR_WIDTH: f32 = 0.55;

/// The fixed darkening overlay painted on uploaded background images.
const OVERLAY_OPACITY: f32 = 0.5;

/// Compose the card SVG for the current form state.
pub fn card_svg(card: &CardData, background: &Background, orientation: Orientation) -> String {
    let (w, h) = orientation.preview_size();
    let (w, h) = (w as f32, h as f32);

    let mut defs = String::new();
    let mut body = String::new();

    background_markup(background, w, h, &mut defs, &mut body);
    content_markup(card, w, h, &mut defs, &mut body);

    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
         width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\
         <defs>{defs}</defs>{body}</svg>"
    )
}

fn background_markup(background: &Background, w: f32, h: f32, defs: &mut String, body: &mut String) {
    match background {
        Background::Gradient(id) => {
            let (start, end) = id.stops();
            let _ = write!(
                defs,
                "<linearGradient id=\"bg-grad\" x1=\"0\" y1=\"0\" x2=\"1\" y2=\"1\">\
                 <stop offset=\"0\" stop-color=\"{}\"/>\
                 <stop offset=\"1\" stop-color=\"{}\"/>\
                 </linearGradient>",
                hex(start),
                hex(end)
            );
            let _ = write!(
                body,
                "<rect width=\"{w}\" height=\"{h}\" rx=\"{CORNER_RADIUS}\" fill=\"url(#bg-grad)\"/>"
            );
        }
        Background::Image { png, blur } => {
            let _ = write!(
                defs,
                "<clipPath id=\"card-clip\">\
                 <rect width=\"{w}\" height=\"{h}\" rx=\"{CORNER_RADIUS}\"/>\
                 </clipPath>"
            );
            // CSS blur(Npx) maps to a Gaussian std deviation of roughly N/2
            let filter_attr = if *blur > 0 {
                let _ = write!(
                    defs,
                    "<filter id=\"bg-blur\">\
                     <feGaussianBlur stdDeviation=\"{}\"/>\
                     </filter>",
                    *blur as f32 / 2.0
                );
                " filter=\"url(#bg-blur)\""
            } else {
                ""
            };
            let _ = write!(
                body,
                "<g clip-path=\"url(#card-clip)\">\
                 <image width=\"{w}\" height=\"{h}\" preserveAspectRatio=\"xMidYMid slice\" \
                 xlink:href=\"{}\"{filter_attr}/>\
                 <rect width=\"{w}\" height=\"{h}\" fill=\"#000000\" fill-opacity=\"{OVERLAY_OPACITY}\"/>\
                 </g>",
                data_uri("image/png", png)
            );
        }
    }
}

fn content_markup(card: &CardData, w: f32, h: f32, defs: &mut String, body: &mut String) {
    let max_text_width = w * 0.8;
    let bio_chars = (max_text_width / (BIO_SIZE * CHAR_WIDTH)).max(8.0) as usize;
    let bio_lines: Vec<String> = if card.bio.is_empty() {
        Vec::new()
    } else {
        wrap_text(&card.bio, bio_chars)
    };

    let dates: Vec<&String> = card
        .availability_dates
        .iter()
        .filter(|d| !d.is_empty())
        .collect();

    // Measure the content block so it can be vertically centered.
    let mut blocks: Vec<(f32, f32)> = Vec::new(); // (height, margin after)
    if card.photo.is_some() {
        blocks.push((PHOTO_SIZE, PHOTO_MARGIN));
    }
    if !card.name.is_empty() {
        blocks.push((NAME_LINE, NAME_MARGIN));
    }
    if !bio_lines.is_empty() {
        blocks.push((bio_lines.len() as f32 * BIO_LINE, BIO_MARGIN));
    }
    if !card.location.is_empty() {
        blocks.push((CHIP_HEIGHT, LOCATION_MARGIN));
    }
    if !dates.is_empty() {
        let height = dates.len() as f32 * CHIP_HEIGHT + (dates.len() - 1) as f32 * DATE_SPACING;
        blocks.push((height, 0.0));
    }
    if blocks.is_empty() {
        return;
    }

    let total: f32 = blocks
        .iter()
        .map(|(height, margin)| height + margin)
        .sum::<f32>()
        - blocks.last().map(|(_, margin)| *margin).unwrap_or(0.0);

    let cx = w / 2.0;
    let mut y = ((h - total) / 2.0).max(PADDING);

    if let Some(photo) = &card.photo {
        let r = PHOTO_SIZE / 2.0;
        let cy = y + r;
        let _ = write!(
            defs,
            "<clipPath id=\"photo-clip\"><circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\"/></clipPath>"
        );
        let _ = write!(
            body,
            "<image x=\"{}\" y=\"{y}\" width=\"{PHOTO_SIZE}\" height=\"{PHOTO_SIZE}\" \
             preserveAspectRatio=\"xMidYMid slice\" clip-path=\"url(#photo-clip)\" \
             xlink:href=\"{}\"/>\
             <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{}\" fill=\"none\" stroke=\"#FFFFFF\" \
             stroke-opacity=\"0.8\" stroke-width=\"{PHOTO_RING_WIDTH}\"/>",
            cx - r,
            data_uri("image/jpeg", photo),
            r - PHOTO_RING_WIDTH / 2.0,
        );
        y += PHOTO_SIZE + PHOTO_MARGIN;
    }

    if !card.name.is_empty() {
        let _ = write!(
            body,
            "<text x=\"{cx}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{NAME_SIZE}\" \
             font-weight=\"bold\" fill=\"#FFFFFF\" text-anchor=\"middle\">{}</text>",
            y + NAME_SIZE,
            escape(&card.name)
        );
        y += NAME_LINE + NAME_MARGIN;
    }

    if !bio_lines.is_empty() {
        for line in &bio_lines {
            let _ = write!(
                body,
                "<text x=\"{cx}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{BIO_SIZE}\" \
                 fill=\"#FFFFFF\" fill-opacity=\"0.9\" text-anchor=\"middle\">{}</text>",
                y + BIO_SIZE,
                escape(line)
            );
            y += BIO_LINE;
        }
        y += BIO_MARGIN;
    }

    if !card.location.is_empty() {
        chip(body, cx, y, &card.location, max_text_width);
        y += CHIP_HEIGHT + LOCATION_MARGIN;
    }

    for date in dates {
        // Same formatter the editable list uses, so preview and list agree
        chip(body, cx, y, &format_date(date), max_text_width);
        y += CHIP_HEIGHT + DATE_SPACING;
    }
}

/// A white/20% pill with centered text, like the location and date chips.
fn chip(body: &mut String, cx: f32, y: f32, label: &str, max_width: f32) {
    let text_width = label.chars().count() as f32 * CHIP_TEXT_SIZE * CHAR_WIDTH;
    let width = (text_width + CHIP_PAD_X * 2.0).min(max_width);
    let _ = write!(
        body,
        "<rect x=\"{}\" y=\"{y}\" width=\"{width}\" height=\"{CHIP_HEIGHT}\" rx=\"{}\" \
         fill=\"#FFFFFF\" fill-opacity=\"0.2\"/>\
         <text x=\"{cx}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{CHIP_TEXT_SIZE}\" \
         fill=\"#FFFFFF\" text-anchor=\"middle\">{}</text>",
        cx - width / 2.0,
        CHIP_HEIGHT / 2.0,
        y + CHIP_HEIGHT / 2.0 + CHIP_TEXT_SIZE * 0.35,
        escape(label)
    );
}

/// Greedy word wrap. Honors explicit newlines; words longer than the limit
/// get a line of their own.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.chars().count() + 1 + word.chars().count() <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}

fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime, BASE64.encode(bytes))
}

fn hex(rgb: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2])
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::background::GradientId;

    fn empty_card() -> CardData {
        CardData::new()
    }

    #[test]
    fn test_empty_card_renders_background_only() {
        let svg = card_svg(&empty_card(), &Background::default(), Orientation::Square);
        assert!(svg.contains("linearGradient"));
        assert!(!svg.contains("<text"));
        assert!(!svg.contains("<image"));
        // No chips either
        assert!(!svg.contains("fill-opacity=\"0.2\""));
    }

    #[test]
    fn test_gradient_stops_match_preset() {
        let bg = Background::Gradient(GradientId::SunsetRose);
        let svg = card_svg(&empty_card(), &bg, Orientation::Square);
        assert!(svg.contains("#F43F5E"));
        assert!(svg.contains("#EC4899"));
    }

    #[test]
    fn test_name_is_rendered_escaped() {
        let mut card = empty_card();
        card.set_name("<Alex & Co>".into());
        let svg = card_svg(&card, &Background::default(), Orientation::Square);
        assert!(svg.contains("&lt;Alex &amp; Co&gt;"));
        assert!(!svg.contains("<Alex"));
    }

    #[test]
    fn test_preview_date_matches_list_formatter() {
        let mut card = empty_card();
        card.set_date_slot(0, "2024-03-15".into());
        let svg = card_svg(&card, &Background::default(), Orientation::Vertical);
        // The chip embeds exactly what the editable list shows
        assert!(svg.contains(&format_date("2024-03-15")));
        assert!(svg.contains("Friday, March 15, 2024"));
    }

    #[test]
    fn test_empty_date_slots_render_nothing() {
        let mut card = empty_card();
        card.add_date_slot();
        card.add_date_slot();
        let svg = card_svg(&card, &Background::default(), Orientation::Square);
        assert!(!svg.contains("<text"));
    }

    #[test]
    fn test_image_background_has_overlay_and_blur() {
        let mut bg = Background::default();
        bg.set_image(vec![0u8; 8]);
        bg.set_blur(5);
        let svg = card_svg(&empty_card(), &bg, Orientation::Square);
        assert!(svg.contains("data:image/png;base64,"));
        assert!(svg.contains("xMidYMid slice"));
        assert!(svg.contains("fill-opacity=\"0.5\""));
        assert!(svg.contains("feGaussianBlur stdDeviation=\"2.5\""));
    }

    #[test]
    fn test_zero_blur_emits_no_filter() {
        let mut bg = Background::default();
        bg.set_image(vec![0u8; 8]);
        bg.set_blur(0);
        let svg = card_svg(&empty_card(), &bg, Orientation::Square);
        assert!(!svg.contains("feGaussianBlur"));
    }

    #[test]
    fn test_photo_is_clipped_to_circle() {
        let mut card = empty_card();
        card.set_photo(vec![1, 2, 3]);
        let svg = card_svg(&card, &Background::default(), Orientation::Square);
        assert!(svg.contains("photo-clip"));
        assert!(svg.contains("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_wrap_text_is_greedy_and_keeps_order() {
        let lines = wrap_text("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn test_wrap_text_honors_newlines_and_long_words() {
        let lines = wrap_text("short\nsupercalifragilistic word", 10);
        assert_eq!(lines, vec!["short", "supercalifragilistic", "word"]);
    }

    #[test]
    fn test_document_size_follows_orientation() {
        let square = card_svg(&empty_card(), &Background::default(), Orientation::Square);
        assert!(square.contains("viewBox=\"0 0 600 600\""));
        let vertical = card_svg(&empty_card(), &Background::default(), Orientation::Vertical);
        assert!(vertical.contains("viewBox=\"0 0 390 844\""));
    }
}
