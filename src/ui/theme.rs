use crate::event::{MarkKind, MessageLevel, PointerTint};
use ratatui::style::Color;

pub struct Theme {
    #[allow(dead_code)] // Background color field for future use
    pub bg: Color,
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub warning: Color,   // Yellow
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub bar: Color,          // Idle array bars
    pub comparing: Color,    // Yellow for compared pairs
    pub swapping: Color,     // Red for swapped pairs
    pub sorted: Color,       // Green for settled elements
    pub visited: Color,      // Grey for examined-and-passed
    pub pivot: Color,        // Mauve for the partition pivot
    pub found: Color,        // Pink for search hits
    pub minimum: Color,      // Teal for the running minimum
    pub boundary: Color,     // Blue for range edges
    pub current: Color,      // Orange for the element in hand
    pub tint_blue: Color,
    pub tint_orange: Color,
    pub tint_green: Color,
    pub tint_red: Color,
    pub tint_purple: Color,
}

impl Theme {
    /// Bar color for a marked index.
    pub fn mark(&self, kind: MarkKind) -> Color {
        match kind {
            MarkKind::Comparing => self.comparing,
            MarkKind::Swapping => self.swapping,
            MarkKind::Sorted => self.sorted,
            MarkKind::Visited => self.visited,
            MarkKind::Pivot => self.pivot,
            MarkKind::Found => self.found,
            MarkKind::Minimum => self.minimum,
            MarkKind::Boundary => self.boundary,
            MarkKind::Current => self.current,
        }
    }

    /// Color for a pointer label and its arrow.
    pub fn tint(&self, tint: PointerTint) -> Color {
        match tint {
            PointerTint::Blue => self.tint_blue,
            PointerTint::Orange => self.tint_orange,
            PointerTint::Green => self.tint_green,
            PointerTint::Red => self.tint_red,
            PointerTint::Purple => self.tint_purple,
        }
    }

    /// Foreground color for a narration message.
    pub fn level(&self, level: Option<MessageLevel>) -> Color {
        match level {
            Some(MessageLevel::Success) => self.success,
            Some(MessageLevel::Warning) => self.warning,
            Some(MessageLevel::Error) => self.error,
            Some(MessageLevel::Info) | None => self.fg,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    bg: Color::Rgb(30, 30, 46),
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    warning: Color::Rgb(249, 226, 175),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    string: Color::Rgb(250, 179, 135),         // Orange for strings
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    bar: Color::Rgb(127, 132, 156),            // Neutral bar fill
    comparing: Color::Rgb(249, 226, 175),
    swapping: Color::Rgb(243, 139, 168),
    sorted: Color::Rgb(166, 227, 161),
    visited: Color::Rgb(108, 112, 134),
    pivot: Color::Rgb(203, 166, 247),
    found: Color::Rgb(245, 194, 231),
    minimum: Color::Rgb(148, 226, 213),
    boundary: Color::Rgb(137, 180, 250),
    current: Color::Rgb(250, 179, 135),
    tint_blue: Color::Rgb(137, 180, 250),
    tint_orange: Color::Rgb(250, 179, 135),
    tint_green: Color::Rgb(166, 227, 161),
    tint_red: Color::Rgb(243, 139, 168),
    tint_purple: Color::Rgb(203, 166, 247),
};
