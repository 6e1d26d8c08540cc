use super::metrics::{Font, TextMeasure};

/// Greedy word-wrap of `text` into lines no wider than `max_width` points.
///
/// A single word wider than `max_width` is truncated with an ellipsis rather
/// than left overflowing. Empty input yields an empty vec.
pub fn wrap_text(
    text: &str,
    font: Font,
    size: f32,
    max_width: f32,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for word in text.split_whitespace() {
        let test_line = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current.join(" "), word)
        };

        if measure.text_width(&test_line, font, size) <= max_width {
            current.push(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(current.join(" "));
            current.clear();
        }

        if measure.text_width(word, font, size) > max_width {
            lines.push(truncate_text(word, font, size, max_width, measure));
        } else {
            current.push(word);
        }
    }

    if !current.is_empty() {
        lines.push(current.join(" "));
    }

    lines
}

/// Shrink `text` until it fits `max_width`, appending "..." if anything was
/// cut. Text that already fits is returned unchanged.
pub fn truncate_text(
    text: &str,
    font: Font,
    size: f32,
    max_width: f32,
    measure: &dyn TextMeasure,
) -> String {
    if measure.text_width(text, font, size) <= max_width {
        return text.to_string();
    }

    const SUFFIX: &str = "...";
    let available = max_width - measure.text_width(SUFFIX, font, size);

    let chars: Vec<char> = text.chars().collect();
    for end in (1..=chars.len()).rev() {
        let prefix: String = chars[..end].iter().collect();
        if measure.text_width(&prefix, font, size) <= available {
            return format!("{}{}", prefix.trim_end(), SUFFIX);
        }
    }

    SUFFIX.to_string()
}

/// Find the largest size in `[min_size, max_size]` (0.5pt steps) at which
/// `text` fits on a single line of `max_width`. If even `min_size` is too
/// wide the text is truncated at `min_size`.
pub fn fit_text_to_width(
    text: &str,
    font: Font,
    max_size: f32,
    min_size: f32,
    max_width: f32,
    measure: &dyn TextMeasure,
) -> (f32, String) {
    const STEP: f32 = 0.5;

    let mut size = max_size;
    while size >= min_size {
        if measure.text_width(text, font, size) <= max_width {
            return (size, text.to_string());
        }
        size -= STEP;
    }

    let truncated = truncate_text(text, font, min_size, max_width, measure);
    (min_size, truncated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::metrics::CoreFontMetrics;

    const M: CoreFontMetrics = CoreFontMetrics;

    #[test]
    fn test_empty_input_yields_no_lines() {
        assert!(wrap_text("", Font::Helvetica, 8.0, 100.0, &M).is_empty());
        assert!(wrap_text("   ", Font::Helvetica, 8.0, 100.0, &M).is_empty());
    }

    #[test]
    fn test_short_text_single_line() {
        let lines = wrap_text("Keep away from heat", Font::Helvetica, 8.0, 200.0, &M);
        assert_eq!(lines, vec!["Keep away from heat"]);
    }

    #[test]
    fn test_every_line_within_width_bound() {
        let text = "Keep away from heat, hot surfaces, sparks, open flames and other ignition sources. No smoking.";
        let max_width = 90.0;
        let lines = wrap_text(text, Font::Helvetica, 7.0, max_width, &M);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(
                M.text_width(line, Font::Helvetica, 7.0) <= max_width,
                "line '{}' exceeds width",
                line
            );
        }
    }

    #[test]
    fn test_wrap_reconstruction_preserves_words() {
        let text = "Wash hands thoroughly after handling this product";
        let lines = wrap_text(text, Font::Helvetica, 7.0, 80.0, &M);
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_whitespace_normalized_in_reconstruction() {
        let lines = wrap_text("use   only  outdoors", Font::Helvetica, 7.0, 400.0, &M);
        assert_eq!(lines.join(" "), "use only outdoors");
    }

    #[test]
    fn test_oversized_word_truncated_with_suffix() {
        let word = "supercalifragilisticexpialidocious";
        let max_width = 40.0;
        let lines = wrap_text(word, Font::Helvetica, 8.0, max_width, &M);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with("..."));
        assert!(M.text_width(&lines[0], Font::Helvetica, 8.0) <= max_width);
    }

    #[test]
    fn test_truncate_noop_when_fits() {
        assert_eq!(truncate_text("ok", Font::Helvetica, 8.0, 100.0, &M), "ok");
    }

    #[test]
    fn test_fit_text_to_width_returns_max_when_it_fits() {
        let (size, text) = fit_text_to_width("Acetone", Font::HelveticaBold, 20.0, 14.0, 300.0, &M);
        assert_eq!(size, 20.0);
        assert_eq!(text, "Acetone");
    }

    #[test]
    fn test_fit_text_to_width_shrinks() {
        let name = "Hydrochloric Acid Technical Grade";
        let max_width = 150.0;
        let (size, text) = fit_text_to_width(name, Font::HelveticaBold, 20.0, 14.0, max_width, &M);
        assert!(size < 20.0);
        assert!(size >= 14.0);
        assert!(M.text_width(&text, Font::HelveticaBold, size) <= max_width);
    }

    #[test]
    fn test_fit_text_to_width_truncates_at_floor() {
        let name = "Extremely Long Product Name That Cannot Possibly Fit";
        let (size, text) = fit_text_to_width(name, Font::HelveticaBold, 20.0, 14.0, 60.0, &M);
        assert_eq!(size, 14.0);
        assert!(text.ends_with("..."));
    }
}
