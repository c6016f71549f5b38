//! A channel or server message and its display-ready rendered form.
//!
//! `Message` is an immutable log entry (text plus creation timestamp) with
//! optional icon and palette-color decoration. Rendering produces a
//! [`StyledLine`] of spans which is computed once and cached; the widget-level
//! [`LayoutJob`] is rebuilt on every call so font-size changes still apply.

use chrono::{DateTime, Local, Timelike};
use egui::text::LayoutJob;
use egui::{Color32, FontId, TextFormat};

use crate::settings::DisplaySettings;

/// Foreground color applied at the widget level, independent of any
/// per-message palette color.
const WIDGET_TEXT_COLOR: Color32 = Color32::from_rgb(0xee, 0xee, 0xee);

/// Identifier into the UI layer's icon resource set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IconId(pub u32);

/// Maps an icon identifier to a display glyph from the UI's icon font.
///
/// Owned and implemented by the platform UI layer; the model only carries the
/// identifier.
pub trait IconResolver {
    fn glyph(&self, icon: IconId) -> Option<char>;
}

/// Fixed display palette for message lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageColor {
    Green,
    Red,
    Blue,
    Yellow,
    Grey,
}

impl MessageColor {
    /// The exact palette values used for message decoration.
    pub fn color32(self) -> Color32 {
        match self {
            MessageColor::Green => Color32::from_rgb(0x45, 0x85, 0x09),
            MessageColor::Red => Color32::from_rgb(0xcc, 0x00, 0x00),
            MessageColor::Blue => Color32::from_rgb(0x72, 0x9f, 0xcf),
            MessageColor::Yellow => Color32::from_rgb(0xbe, 0x9b, 0x01),
            MessageColor::Grey => Color32::from_rgb(0xaa, 0xaa, 0xaa),
        }
    }
}

/// A styled span of rendered message text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub fg_color: Option<Color32>,
    /// Set on the placeholder span that stands in for an icon glyph.
    pub icon: Option<IconId>,
}

/// The decorated, display-ready form of a message: icon placeholder,
/// timestamp, then the text, in that order.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct StyledLine {
    pub spans: Vec<TextSpan>,
}

impl StyledLine {
    /// Concatenated span text without styling.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// A single immutable log entry in a conversation.
#[derive(Clone, Debug)]
pub struct Message {
    text: String,
    timestamp: DateTime<Local>,
    icon: Option<IconId>,
    color: Option<MessageColor>,
    /// One-shot render cache. Never invalidated: settings changes after the
    /// first render are not reflected in the spans.
    rendered: Option<StyledLine>,
}

impl Message {
    /// Create a new message, capturing the current wall-clock time.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_timestamp(text, Local::now())
    }

    /// Create a message with an explicit timestamp, for callers replaying
    /// logged events.
    pub fn with_timestamp(text: impl Into<String>, timestamp: DateTime<Local>) -> Self {
        Self {
            text: text.into(),
            timestamp,
            icon: None,
            color: None,
            rendered: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Set the message's icon. Only effective before the first render; the
    /// cached spans are not rebuilt afterwards.
    pub fn set_icon(&mut self, icon: IconId) {
        self.icon = Some(icon);
    }

    pub fn icon(&self) -> Option<IconId> {
        self.icon
    }

    /// Set the message's palette color. Only effective before the first
    /// render, like `set_icon`.
    pub fn set_color(&mut self, color: MessageColor) {
        self.color = Some(color);
    }

    pub fn color(&self) -> Option<MessageColor> {
        self.color
    }

    /// Render the message into styled spans.
    ///
    /// The first call builds the line from the message attributes and the
    /// given settings and caches it; later calls return the cached spans
    /// unchanged, even if the settings differ.
    pub fn render(&mut self, settings: &DisplaySettings, icons: &dyn IconResolver) -> &StyledLine {
        if self.rendered.is_none() {
            self.rendered = Some(self.build_line(settings, icons));
        }
        self.rendered.as_ref().expect("render cache filled above")
    }

    fn build_line(&self, settings: &DisplaySettings, icons: &dyn IconResolver) -> StyledLine {
        let fg_color = match (self.color, settings.show_colors) {
            (Some(color), true) => Some(color.color32()),
            _ => None,
        };

        let mut spans = Vec::new();

        if settings.show_icons {
            if let Some(icon) = self.icon {
                // A resolver miss renders no icon span.
                if let Some(glyph) = icons.glyph(icon) {
                    spans.push(TextSpan {
                        text: format!("{} ", glyph),
                        fg_color,
                        icon: Some(icon),
                    });
                }
            }
        }

        if settings.show_timestamp {
            spans.push(TextSpan {
                text: generate_timestamp(self.timestamp, settings.use_24h_format),
                fg_color,
                icon: None,
            });
        }

        spans.push(TextSpan {
            text: self.text.clone(),
            fg_color,
            icon: None,
        });

        StyledLine { spans }
    }

    /// Render the message as a ready-to-paint monospace [`LayoutJob`].
    ///
    /// The span content comes from the `render` cache, but the font size is
    /// read from the settings on every call, so widget-level formatting can
    /// change even when the content is frozen.
    pub fn render_layout_job(
        &mut self,
        settings: &DisplaySettings,
        icons: &dyn IconResolver,
    ) -> LayoutJob {
        let font_id = FontId::monospace(settings.font_size);
        let line = self.render(settings, icons);

        let mut job = LayoutJob::default();
        for span in &line.spans {
            let format = TextFormat {
                font_id: font_id.clone(),
                color: span.fg_color.unwrap_or(WIDGET_TEXT_COLOR),
                ..Default::default()
            };
            job.append(&span.text, 0.0, format);
        }
        job
    }
}

/// Format a timestamp as `"[HH:MM] "` with a trailing space.
///
/// In 12-hour mode the hour is mapped through `|12 - h|` with 12 folded to 0,
/// yielding values 0-11 rather than the conventional 1-12. Kept bug-for-bug
/// compatible with existing logs and tests.
pub fn generate_timestamp(timestamp: DateTime<Local>, use_24h_format: bool) -> String {
    let mut hours = timestamp.hour() as i32;
    let minutes = timestamp.minute();

    if !use_24h_format {
        hours = (12 - hours).abs();
        if hours == 12 {
            hours = 0;
        }
    }

    format!("[{:02}:{:02}] ", hours, minutes)
}
