/// Card form state
///
/// `CardData` holds everything the user types into the form. All fields are
/// free text; the only enforced invariant is that at least one availability
/// date slot always exists, so the date list in the UI never collapses to
/// nothing. Mutations go through methods rather than raw field access so the
/// invariant lives in exactly one place.

/// Export orientation, selected via the Square/Vertical toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Square,
    Vertical,
}

impl Orientation {
    /// Fixed pixel dimensions of the exported PNG.
    pub fn export_size(self) -> (u32, u32) {
        match self {
            Orientation::Square => (2048, 2048),
            Orientation::Vertical => (1242, 2688),
        }
    }

    /// On-screen size of the live preview card.
    pub fn preview_size(self) -> (u32, u32) {
        match self {
            Orientation::Square => (600, 600),
            Orientation::Vertical => (390, 844),
        }
    }
}

/// All user-entered card fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CardData {
    pub name: String,
    pub bio: String,
    pub location: String,
    /// Date strings as typed; empty slots render nothing. Never empty.
    pub availability_dates: Vec<String>,
    /// Encoded photo (JPEG from the crop pipeline), or None before upload.
    pub photo: Option<Vec<u8>>,
}

impl Default for CardData {
    fn default() -> Self {
        Self {
            name: String::new(),
            bio: String::new(),
            location: String::new(),
            // The form always starts with one empty date slot
            availability_dates: vec![String::new()],
            photo: None,
        }
    }
}

impl CardData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn set_bio(&mut self, bio: String) {
        self.bio = bio;
    }

    pub fn set_location(&mut self, location: String) {
        self.location = location;
    }

    pub fn set_photo(&mut self, photo: Vec<u8>) {
        self.photo = Some(photo);
    }

    /// Append a new empty date slot.
    pub fn add_date_slot(&mut self) {
        self.availability_dates.push(String::new());
    }

    /// Remove the slot at `index`. A no-op when only one slot remains or
    /// when the index is out of range — the list never drops below one slot.
    pub fn remove_date_slot(&mut self, index: usize) {
        if self.availability_dates.len() > 1 && index < self.availability_dates.len() {
            self.availability_dates.remove(index);
        }
    }

    pub fn set_date_slot(&mut self, index: usize, value: String) {
        if let Some(slot) = self.availability_dates.get_mut(index) {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_with_one_empty_slot() {
        let card = CardData::new();
        assert_eq!(card.availability_dates, vec![String::new()]);
        assert!(card.photo.is_none());
    }

    #[test]
    fn test_remove_last_slot_is_noop() {
        let mut card = CardData::new();
        card.set_date_slot(0, "2024-03-15".into());

        card.remove_date_slot(0);

        assert_eq!(card.availability_dates, vec!["2024-03-15".to_string()]);
    }

    #[test]
    fn test_add_then_remove_preserves_order() {
        let mut card = CardData::new();
        card.set_date_slot(0, "a".into());
        for value in ["b", "c", "d"] {
            card.add_date_slot();
            let last = card.availability_dates.len() - 1;
            card.set_date_slot(last, value.into());
        }
        assert_eq!(card.availability_dates.len(), 4);

        card.remove_date_slot(1);
        card.remove_date_slot(1);

        assert_eq!(
            card.availability_dates,
            vec!["a".to_string(), "d".to_string()]
        );
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut card = CardData::new();
        card.add_date_slot();

        card.remove_date_slot(5);

        assert_eq!(card.availability_dates.len(), 2);
    }

    #[test]
    fn test_set_slot_out_of_range_is_noop() {
        let mut card = CardData::new();
        card.set_date_slot(3, "2024-01-01".into());
        assert_eq!(card.availability_dates, vec![String::new()]);
    }

    #[test]
    fn test_export_sizes_are_fixed() {
        assert_eq!(Orientation::Square.export_size(), (2048, 2048));
        assert_eq!(Orientation::Vertical.export_size(), (1242, 2688));
    }
}
