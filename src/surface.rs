use crate::digits::DigitField;

/// One split-flap card: the face in front, the face revealed behind it, and
/// the rotation of the front face while a flip is running.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlipCard {
    front: u32,
    back: u32,
    rotation: Option<f32>,
}

impl FlipCard {
    pub fn front(&self) -> u32 {
        self.front
    }

    pub fn back(&self) -> u32 {
        self.back
    }

    /// Rotation about the horizontal axis in degrees, `None` when at rest.
    pub fn rotation(&self) -> Option<f32> {
        self.rotation
    }

    pub fn is_animating(&self) -> bool {
        self.rotation.is_some()
    }

    /// Puts `value` on both faces and stops any rotation.
    pub fn show(&mut self, value: u32) {
        self.front = value;
        self.back = value;
        self.rotation = None;
    }

    pub fn set_front(&mut self, value: u32) {
        self.front = value;
    }

    pub fn set_back(&mut self, value: u32) {
        self.back = value;
    }

    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = Some(degrees);
    }

    pub fn clear_rotation(&mut self) {
        self.rotation = None;
    }
}

/// Anything that can show hours, minutes and seconds as flip cards.
///
/// A surface may lack a card; callers treat that as "nothing to draw on".
pub trait DigitSurface {
    fn card(&self, field: DigitField) -> Option<&FlipCard>;

    fn card_mut(&mut self, field: DigitField) -> Option<&mut FlipCard>;

    fn has_all_cards(&self) -> bool {
        DigitField::ALL.iter().all(|field| self.card(*field).is_some())
    }
}

/// The widget's board: always has all three cards.
#[derive(Clone, Debug, Default)]
pub struct FlipBoard {
    hours: FlipCard,
    minutes: FlipCard,
    seconds: FlipCard,
}

impl DigitSurface for FlipBoard {
    fn card(&self, field: DigitField) -> Option<&FlipCard> {
        Some(match field {
            DigitField::Hours => &self.hours,
            DigitField::Minutes => &self.minutes,
            DigitField::Seconds => &self.seconds,
        })
    }

    fn card_mut(&mut self, field: DigitField) -> Option<&mut FlipCard> {
        Some(match field {
            DigitField::Hours => &mut self.hours,
            DigitField::Minutes => &mut self.minutes,
            DigitField::Seconds => &mut self.seconds,
        })
    }
}
