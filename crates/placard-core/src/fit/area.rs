use super::metrics::{Font, TextMeasure};
use super::wrap::wrap_text;

/// Size decrement between fitting attempts.
const SIZE_STEP: f32 = 0.25;

/// Line height in points for a font size and spacing multiplier.
pub fn line_height(size: f32, spacing: f32) -> f32 {
    size * spacing
}

/// Find the largest font size in `[min_size, max_size]` at which every
/// statement, wrapped independently to `width`, fits within `height`.
///
/// Statements never merge across wrap boundaries. If the text volume exceeds
/// the area even at `min_size`, the result degrades to `min_size` with
/// trailing lines silently dropped beyond the line budget -- label space is
/// physically fixed, so some renderable output is always produced. Callers
/// can detect truncation by comparing the returned line count against a
/// full wrap at the returned size.
pub fn fit_statements_to_area(
    statements: &[String],
    font: Font,
    max_size: f32,
    min_size: f32,
    width: f32,
    height: f32,
    line_spacing: f32,
    measure: &dyn TextMeasure,
) -> (f32, Vec<String>) {
    let mut size = max_size;

    while size >= min_size {
        let mut all_lines = Vec::new();
        for statement in statements {
            all_lines.extend(wrap_text(statement, font, size, width, measure));
        }

        let total_height = all_lines.len() as f32 * line_height(size, line_spacing);
        if total_height <= height {
            return (size, all_lines);
        }

        size -= SIZE_STEP;
    }

    // Even min_size overflows: keep min_size and drop lines past the budget.
    let budget = (height / line_height(min_size, line_spacing)).floor() as usize;
    let mut all_lines = Vec::new();

    for statement in statements {
        if all_lines.len() >= budget {
            break;
        }
        let lines = wrap_text(statement, font, min_size, width, measure);
        let remaining = budget - all_lines.len();
        all_lines.extend(lines.into_iter().take(remaining));
    }

    // Floor guarantee: non-empty input never yields an empty result, even
    // when the area cannot hold a single line.
    if all_lines.is_empty() {
        if let Some(first) = statements.iter().find(|s| !s.trim().is_empty()) {
            let mut lines = wrap_text(first, font, min_size, width, measure);
            if !lines.is_empty() {
                all_lines.push(lines.remove(0));
            }
        }
    }

    (min_size, all_lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::metrics::CoreFontMetrics;

    const M: CoreFontMetrics = CoreFontMetrics;

    fn statements(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_small_text_keeps_max_size() {
        let stmts = statements(&["Keep container tightly closed."]);
        let (size, lines) =
            fit_statements_to_area(&stmts, Font::Helvetica, 7.0, 4.5, 200.0, 100.0, 1.15, &M);
        assert_eq!(size, 7.0);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_statements_wrap_independently() {
        let stmts = statements(&["Short one.", "Another short one."]);
        let (_, lines) =
            fit_statements_to_area(&stmts, Font::Helvetica, 7.0, 4.5, 300.0, 100.0, 1.15, &M);
        // Two statements, both fitting on one line each, never merge.
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_size_shrinks_under_pressure() {
        let stmts = statements(&[
            "IF ON SKIN (or hair): Take off immediately all contaminated clothing. Rinse skin with water or shower.",
            "Keep away from heat, hot surfaces, sparks, open flames and other ignition sources. No smoking.",
            "Store in a well-ventilated place. Keep container tightly closed.",
        ]);
        let (size, lines) =
            fit_statements_to_area(&stmts, Font::Helvetica, 7.0, 4.5, 150.0, 60.0, 1.15, &M);
        assert!(size < 7.0);
        assert!(!lines.is_empty());
        let total = lines.len() as f32 * line_height(size, 1.15);
        if size > 4.5 {
            assert!(total <= 60.0);
        }
    }

    #[test]
    fn test_monotonic_in_text_volume() {
        let base = statements(&[
            "Wear protective gloves, protective clothing, eye protection, face protection.",
        ]);
        let mut more = base.clone();
        more.push("Keep away from heat, hot surfaces, sparks, open flames. No smoking.".into());
        more.push("IF IN EYES: Rinse cautiously with water for several minutes.".into());

        let (size_few, _) =
            fit_statements_to_area(&base, Font::Helvetica, 7.0, 4.5, 150.0, 80.0, 1.15, &M);
        let (size_many, _) =
            fit_statements_to_area(&more, Font::Helvetica, 7.0, 4.5, 150.0, 80.0, 1.15, &M);
        assert!(size_many <= size_few);
    }

    #[test]
    fn test_extreme_overflow_truncates_never_errors() {
        let long = "Call a POISON CENTER or doctor if you feel unwell. Rinse mouth. Do NOT induce vomiting. ".repeat(20);
        let stmts = statements(&[&long, &long, &long]);
        let (size, lines) =
            fit_statements_to_area(&stmts, Font::Helvetica, 6.0, 4.5, 150.0, 40.0, 1.15, &M);

        assert_eq!(size, 4.5);
        // Truncation is detectable: returned lines are fewer than a full wrap.
        let full: usize = stmts
            .iter()
            .map(|s| wrap_text(s, Font::Helvetica, 4.5, 150.0, &M).len())
            .sum();
        assert!(lines.len() < full);
        // And the truncated set still honors the height budget.
        let budget = (40.0 / line_height(4.5, 1.15)).floor() as usize;
        assert!(lines.len() <= budget);
    }

    #[test]
    fn test_floor_guarantee_nonempty_output() {
        let stmts = statements(&["Some precaution text that matters."]);
        // Height too small for even one line at min size.
        let (size, lines) =
            fit_statements_to_area(&stmts, Font::Helvetica, 6.0, 4.5, 100.0, 2.0, 1.15, &M);
        assert_eq!(size, 4.5);
        assert!(!lines.is_empty());
    }

    #[test]
    fn test_never_below_min_size() {
        let long = "x ".repeat(500);
        let stmts = statements(&[&long]);
        let (size, _) =
            fit_statements_to_area(&stmts, Font::Helvetica, 6.0, 4.5, 50.0, 10.0, 1.15, &M);
        assert!(size >= 4.5);
    }

    #[test]
    fn test_empty_statement_list() {
        let (size, lines) =
            fit_statements_to_area(&[], Font::Helvetica, 7.0, 4.5, 100.0, 50.0, 1.15, &M);
        assert_eq!(size, 7.0);
        assert!(lines.is_empty());
    }
}
