use std::fmt;

/// What the clock face is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// Local wall-clock time in 12-hour form.
    #[default]
    Now,
    /// Time left until the next local `hour:00:00`.
    CountdownTo(u32),
}

impl DisplayMode {
    pub const FIVE_PM: DisplayMode = DisplayMode::CountdownTo(17);
    pub const SIX_PM: DisplayMode = DisplayMode::CountdownTo(18);

    /// The mode a toggle switches to: `Now -> 5PM -> 6PM -> Now`.
    pub fn next(self) -> Self {
        match self {
            DisplayMode::Now => DisplayMode::FIVE_PM,
            DisplayMode::CountdownTo(17) => DisplayMode::SIX_PM,
            DisplayMode::CountdownTo(_) => DisplayMode::Now,
        }
    }

    /// Key stored in the preference file.
    pub fn key(self) -> String {
        self.label().to_lowercase()
    }

    /// Parses a stored key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim() {
            "now" => Some(DisplayMode::Now),
            "5pm" => Some(DisplayMode::FIVE_PM),
            "6pm" => Some(DisplayMode::SIX_PM),
            _ => None,
        }
    }

    /// Text of the mode button.
    pub fn label(self) -> String {
        match self {
            DisplayMode::Now => "NOW".to_owned(),
            DisplayMode::CountdownTo(hour) => format_hour(hour),
        }
    }

    /// Hover text of the mode button.
    pub fn tooltip(self) -> String {
        let next = match self.next() {
            DisplayMode::Now => "show current time".to_owned(),
            DisplayMode::CountdownTo(hour) => format!("show {} countdown", format_hour(hour)),
        };
        match self {
            DisplayMode::Now => format!("Showing current time (Click to {next})"),
            DisplayMode::CountdownTo(hour) => {
                format!("Showing time until {} (Click to {next})", format_hour(hour))
            }
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayMode::Now => write!(f, "now"),
            DisplayMode::CountdownTo(hour) => write!(f, "countdown to {hour:02}:00"),
        }
    }
}

fn format_hour(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let h = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{h}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_three_times_returns_to_now() {
        let mode = DisplayMode::Now;
        assert_eq!(mode.next(), DisplayMode::CountdownTo(17));
        assert_eq!(mode.next().next(), DisplayMode::CountdownTo(18));
        assert_eq!(mode.next().next().next(), DisplayMode::Now);
    }

    #[test]
    fn keys_parse_back() {
        for mode in [DisplayMode::Now, DisplayMode::FIVE_PM, DisplayMode::SIX_PM] {
            assert_eq!(DisplayMode::from_key(&mode.key()), Some(mode));
        }
        assert_eq!(DisplayMode::from_key("7pm"), None);
        assert_eq!(DisplayMode::from_key(""), None);
    }

    #[test]
    fn labels_match_button_text() {
        assert_eq!(DisplayMode::Now.label(), "NOW");
        assert_eq!(DisplayMode::FIVE_PM.label(), "5PM");
        assert_eq!(DisplayMode::SIX_PM.label(), "6PM");
        assert_eq!(
            DisplayMode::FIVE_PM.tooltip(),
            "Showing time until 5PM (Click to show 6PM countdown)"
        );
        assert_eq!(
            DisplayMode::SIX_PM.tooltip(),
            "Showing time until 6PM (Click to show current time)"
        );
    }
}
