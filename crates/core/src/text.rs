/// Text metrics supplied by the surface that will draw the text.
pub trait TextMeasure {
    /// Narrowest width worth trying to fit any text into.
    fn min_width(&self) -> f64;

    /// `text` shortened to fit `max_width`, or `None` when nothing fits.
    fn fitted_text(&self, text: &str, max_width: f64) -> Option<String>;

    fn text_width(&self, text: &str) -> f64;
}

const ELLIPSIS: char = '…';

/// Fixed-advance metrics: every char, including the ellipsis, is
/// `char_width` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    char_width: f64,
}

impl MonospaceMeasure {
    pub fn new(char_width: f64) -> Self {
        Self { char_width }
    }

    /// Approximate advance for a proportional UI font of `font_size`.
    pub fn for_font_size(font_size: f64) -> Self {
        Self::new(font_size * 0.6)
    }
}

impl TextMeasure for MonospaceMeasure {
    fn min_width(&self) -> f64 {
        // One char plus the ellipsis.
        2.0 * self.char_width
    }

    fn fitted_text(&self, text: &str, max_width: f64) -> Option<String> {
        if self.text_width(text) <= max_width {
            return Some(text.to_string());
        }
        if max_width < self.min_width() {
            return None;
        }
        let keep = ((max_width / self.char_width).floor() as usize).saturating_sub(1);
        let mut fitted: String = text.chars().take(keep).collect();
        fitted.push(ELLIPSIS);
        Some(fitted)
    }

    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_whole_text() {
        let m = MonospaceMeasure::new(5.0);
        assert_eq!(m.text_width("abcd"), 20.0);
        assert_eq!(m.fitted_text("abcd", 20.0).as_deref(), Some("abcd"));
    }

    #[test]
    fn truncates_with_ellipsis() {
        let m = MonospaceMeasure::new(5.0);
        assert_eq!(m.fitted_text("DOMContentLoaded", 26.0).as_deref(), Some("DOMC…"));
        assert_eq!(m.fitted_text("DOMContentLoaded", 10.0).as_deref(), Some("D…"));
    }

    #[test]
    fn nothing_fits_below_min_width() {
        let m = MonospaceMeasure::new(5.0);
        assert_eq!(m.fitted_text("DOMContentLoaded", 9.0), None);
        assert_eq!(m.fitted_text("", 0.0).as_deref(), Some(""));
    }
}
