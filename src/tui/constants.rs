//! TUI constants: colors, timing, and scroll amounts.

use std::time::Duration;

use ratatui::style::Color;

/// Accent blue (#3B82F6), the assistant's brand color.
pub(super) const ACCENT: Color = Color::Rgb(59, 130, 246);

/// Secondary accent: soft cyan (#7EC8E3), used for assistant borders and links.
pub(super) const ACCENT_SECONDARY: Color = Color::Rgb(126, 200, 227);

/// Price highlight (#22C55E).
pub(super) const PRICE: Color = Color::Rgb(34, 197, 94);

/// Event poll timeout in milliseconds (main loop).
pub(crate) const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Scroll amount for arrow keys and mouse wheel.
pub(crate) const SCROLL_LINES_SMALL: usize = 3;

/// Scroll amount for PageUp/PageDown.
pub(crate) const SCROLL_LINES_PAGE: usize = 10;

/// How long a toast stays visible.
pub(crate) const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Minimalist logo when idle (single character).
pub(super) const LOGO_IDLE: &str = "◆";

/// Spinner frames for the typing indicator (braille pattern, 4 frames).
pub(super) const LOGO_THINKING: &[&str] = &["⠋", "⠙", "⠹", "⠸"];

/// Frame duration of the typing spinner.
pub(super) const SPINNER_FRAME_MS: u128 = 80;
