/// Crop modal state machine
///
/// Closed → Open (photo selected) → Applying (user confirmed) → Closed.
/// Cancel goes straight back to Closed without committing anything. A failed
/// apply returns to Open so the user can retry or cancel; the prior photo is
/// untouched either way.

/// Zoom bounds of the crop view.
pub const ZOOM_MIN: f32 = 1.0;
pub const ZOOM_MAX: f32 = 3.0;

/// An uploaded image held in memory, normalized to PNG.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// The 1:1 crop rectangle, in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Live state of an open crop modal.
///
/// The rectangle is never stored: it is derived from the center offsets and
/// zoom on demand, so it is always initialized and always within bounds —
/// applying without touching any control crops the centered full square.
#[derive(Debug, Clone, PartialEq)]
pub struct CropSession {
    pub source: LoadedImage,
    /// Horizontal center offset, -1.0 (left edge) to 1.0 (right edge).
    pub offset_x: f32,
    /// Vertical center offset, -1.0 (top edge) to 1.0 (bottom edge).
    pub offset_y: f32,
    /// Zoom factor, ZOOM_MIN..=ZOOM_MAX.
    pub zoom: f32,
}

impl CropSession {
    pub fn new(source: LoadedImage) -> Self {
        Self {
            source,
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: ZOOM_MIN,
        }
    }

    pub fn set_offset_x(&mut self, value: f32) {
        self.offset_x = value.clamp(-1.0, 1.0);
    }

    pub fn set_offset_y(&mut self, value: f32) {
        self.offset_y = value.clamp(-1.0, 1.0);
    }

    pub fn set_zoom(&mut self, value: f32) {
        self.zoom = value.clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// Derive the crop rectangle for the current offsets and zoom.
    ///
    /// The side is the largest square that fits the source, shrunk by the
    /// zoom factor; the offsets then slide it across the leftover range.
    pub fn rect(&self) -> CropRect {
        let w = self.source.width;
        let h = self.source.height;
        let max_side = w.min(h).max(1);

        let side = ((max_side as f32 / self.zoom).round() as u32)
            .clamp(1, max_side);

        let slack_x = (w - side) as f32;
        let slack_y = (h - side) as f32;
        let x = (slack_x / 2.0 * (1.0 + self.offset_x)).round() as u32;
        let y = (slack_y / 2.0 * (1.0 + self.offset_y)).round() as u32;

        CropRect {
            x: x.min(w - side),
            y: y.min(h - side),
            width: side,
            height: side,
        }
    }
}

/// The crop modal's lifecycle.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CropModal {
    #[default]
    Closed,
    Open(CropSession),
    Applying(CropSession),
}

impl CropModal {
    pub fn open(source: LoadedImage) -> Self {
        CropModal::Open(CropSession::new(source))
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, CropModal::Closed)
    }

    pub fn is_applying(&self) -> bool {
        matches!(self, CropModal::Applying(_))
    }

    pub fn session(&self) -> Option<&CropSession> {
        match self {
            CropModal::Closed => None,
            CropModal::Open(session) | CropModal::Applying(session) => Some(session),
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut CropSession> {
        match self {
            // Adjustments while an apply is in flight are ignored
            CropModal::Closed | CropModal::Applying(_) => None,
            CropModal::Open(session) => Some(session),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(width: u32, height: u32) -> LoadedImage {
        LoadedImage {
            bytes: Vec::new(),
            width,
            height,
        }
    }

    #[test]
    fn test_untouched_session_crops_centered_full_square() {
        let session = CropSession::new(source(200, 100));
        assert_eq!(
            session.rect(),
            CropRect {
                x: 50,
                y: 0,
                width: 100,
                height: 100
            }
        );
    }

    #[test]
    fn test_square_source_at_zoom_one_is_full_frame() {
        let session = CropSession::new(source(128, 128));
        assert_eq!(
            session.rect(),
            CropRect {
                x: 0,
                y: 0,
                width: 128,
                height: 128
            }
        );
    }

    #[test]
    fn test_rect_stays_in_bounds_at_extremes() {
        let mut session = CropSession::new(source(300, 180));
        for &(ox, oy, zoom) in &[
            (-1.0, -1.0, ZOOM_MIN),
            (1.0, 1.0, ZOOM_MIN),
            (-1.0, 1.0, ZOOM_MAX),
            (1.0, -1.0, ZOOM_MAX),
            (0.3, -0.7, 1.7),
        ] {
            session.set_offset_x(ox);
            session.set_offset_y(oy);
            session.set_zoom(zoom);

            let rect = session.rect();
            assert_eq!(rect.width, rect.height, "aspect must stay 1:1");
            assert!(rect.x + rect.width <= 300);
            assert!(rect.y + rect.height <= 180);
        }
    }

    #[test]
    fn test_zoom_and_offsets_are_clamped() {
        let mut session = CropSession::new(source(100, 100));
        session.set_zoom(10.0);
        assert_eq!(session.zoom, ZOOM_MAX);
        session.set_zoom(0.2);
        assert_eq!(session.zoom, ZOOM_MIN);
        session.set_offset_x(5.0);
        assert_eq!(session.offset_x, 1.0);
        session.set_offset_y(-5.0);
        assert_eq!(session.offset_y, -1.0);
    }

    #[test]
    fn test_modal_transitions() {
        let mut modal = CropModal::open(source(10, 10));
        assert!(modal.session().is_some());
        assert!(modal.session_mut().is_some());

        let session = modal.session().cloned().unwrap();
        modal = CropModal::Applying(session);
        assert!(modal.is_applying());
        // No adjustments once the apply is in flight
        assert!(modal.session_mut().is_none());

        modal = CropModal::Closed;
        assert!(modal.is_closed());
    }
}
