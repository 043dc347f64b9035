/// Background selection state
///
/// The background is a tagged union: either one of five fixed gradient
/// presets, or an uploaded image with a blur amount. Modeling it as a single
/// enum means "image selected but gradient fields populated" (and the other
/// invalid combinations) cannot be represented at all.

/// Upper bound of the blur slider, in CSS-style pixels.
pub const BLUR_MAX: u8 = 20;

/// Blur applied to a freshly uploaded background image.
pub const BLUR_DEFAULT: u8 = 5;

/// The five fixed gradient presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientId {
    IndigoPurple,
    OceanBlue,
    SunsetRose,
    Forest,
    Sunrise,
}

impl GradientId {
    pub const ALL: [GradientId; 5] = [
        GradientId::IndigoPurple,
        GradientId::OceanBlue,
        GradientId::SunsetRose,
        GradientId::Forest,
        GradientId::Sunrise,
    ];

    /// Human-readable preset name, shown as the swatch tooltip.
    pub fn name(self) -> &'static str {
        match self {
            GradientId::IndigoPurple => "Indigo Purple",
            GradientId::OceanBlue => "Ocean Blue",
            GradientId::SunsetRose => "Sunset Rose",
            GradientId::Forest => "Forest",
            GradientId::Sunrise => "Sunrise",
        }
    }

    /// Gradient stops as (start, end) sRGB triples, painted top-left to
    /// bottom-right.
    pub fn stops(self) -> ([u8; 3], [u8; 3]) {
        match self {
            GradientId::IndigoPurple => ([0x4F, 0x46, 0xE5], [0x93, 0x33, 0xEA]),
            GradientId::OceanBlue => ([0x25, 0x63, 0xEB], [0x06, 0xB6, 0xD4]),
            GradientId::SunsetRose => ([0xF4, 0x3F, 0x5E], [0xEC, 0x48, 0x99]),
            GradientId::Forest => ([0x10, 0xB9, 0x81], [0x14, 0xB8, 0xA6]),
            GradientId::Sunrise => ([0xF5, 0x9E, 0x0B], [0xF9, 0x73, 0x16]),
        }
    }
}

/// Current background choice.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Gradient(GradientId),
    Image {
        /// Uploaded image, normalized to PNG on load.
        png: Vec<u8>,
        /// Gaussian blur amount, 0..=BLUR_MAX.
        blur: u8,
    },
}

impl Default for Background {
    fn default() -> Self {
        Background::Gradient(GradientId::IndigoPurple)
    }
}

impl Background {
    /// Select a gradient preset, replacing the background wholesale.
    /// Any previously uploaded image and its blur are dropped with it.
    pub fn select_gradient(&mut self, id: GradientId) {
        *self = Background::Gradient(id);
    }

    /// Switch to an uploaded image. Uploading implies selecting image mode;
    /// the blur carries over when already in image mode, otherwise it starts
    /// at the default.
    pub fn set_image(&mut self, png: Vec<u8>) {
        let blur = match self {
            Background::Image { blur, .. } => *blur,
            Background::Gradient(_) => BLUR_DEFAULT,
        };
        *self = Background::Image { png, blur };
    }

    /// Adjust the blur amount. Meaningless (and ignored) in gradient mode.
    pub fn set_blur(&mut self, amount: u8) {
        if let Background::Image { blur, .. } = self {
            *blur = amount.min(BLUR_MAX);
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Background::Image { .. })
    }

    pub fn blur(&self) -> Option<u8> {
        match self {
            Background::Image { blur, .. } => Some(*blur),
            Background::Gradient(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_indigo_purple() {
        assert_eq!(
            Background::default(),
            Background::Gradient(GradientId::IndigoPurple)
        );
    }

    #[test]
    fn test_upload_switches_to_image_mode() {
        let mut bg = Background::default();
        bg.set_image(vec![1, 2, 3]);
        assert!(bg.is_image());
        assert_eq!(bg.blur(), Some(BLUR_DEFAULT));
    }

    #[test]
    fn test_gradient_selection_replaces_image_wholesale() {
        let mut bg = Background::default();
        bg.set_image(vec![1, 2, 3]);
        bg.set_blur(12);

        bg.select_gradient(GradientId::Forest);

        // No residual image bytes or blur survive the switch
        assert_eq!(bg, Background::Gradient(GradientId::Forest));
        assert_eq!(bg.blur(), None);
    }

    #[test]
    fn test_reupload_keeps_blur() {
        let mut bg = Background::default();
        bg.set_image(vec![1]);
        bg.set_blur(12);

        bg.set_image(vec![2]);

        assert_eq!(bg.blur(), Some(12));
    }

    #[test]
    fn test_blur_is_clamped() {
        let mut bg = Background::default();
        bg.set_image(vec![1]);
        bg.set_blur(200);
        assert_eq!(bg.blur(), Some(BLUR_MAX));
    }

    #[test]
    fn test_blur_ignored_in_gradient_mode() {
        let mut bg = Background::default();
        bg.set_blur(10);
        assert_eq!(bg.blur(), None);
    }
}
