use ratatui::style::Color;

use crate::model::{ModelKind, PickerItem};

/// Presentation of a single row: glyph and accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconAndColor {
    pub icon: &'static str,
    pub color: Color,
}

/// Theme data structure containing all colors used by the picker
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    pub active_border: Color,

    // Rows
    pub cursor_bg: Color,
    pub cursor_fg: Color,
    pub selected_marker: Color,
    pub navigable_only: Color,
    pub root: Color,
    pub collection: Color,
    pub card: Color,
    pub dataset: Color,
    pub metric: Color,
    pub dashboard: Color,
    pub snippet: Color,

    // Breadcrumbs and search
    pub crumb: Color,
    pub crumb_current: Color,
    pub search_text: Color,
    pub placeholder: Color,

    // Status bar
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            active_border: Color::Yellow,

            cursor_bg: Color::White,
            cursor_fg: Color::Black,
            selected_marker: Color::Green,
            navigable_only: Color::DarkGray,
            root: Color::Cyan,
            collection: Color::Blue,
            card: Color::Yellow,
            dataset: Color::Magenta,
            metric: Color::LightGreen,
            dashboard: Color::LightBlue,
            snippet: Color::Gray,

            crumb: Color::Gray,
            crumb_current: Color::White,
            search_text: Color::Yellow,
            placeholder: Color::DarkGray,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
        }
    }
}

impl Theme {
    pub fn resolve(&self, item: &PickerItem) -> IconAndColor {
        if item.is_root() {
            return IconAndColor { icon: "⌂", color: self.root };
        }
        match item.model() {
            ModelKind::Collection => IconAndColor { icon: "▣", color: self.collection },
            ModelKind::Card => IconAndColor { icon: "≡", color: self.card },
            ModelKind::Dataset => IconAndColor { icon: "◫", color: self.dataset },
            ModelKind::Metric => IconAndColor { icon: "∿", color: self.metric },
            ModelKind::Dashboard => IconAndColor { icon: "▦", color: self.dashboard },
            ModelKind::Snippet => IconAndColor { icon: "¶", color: self.snippet },
        }
    }
}
