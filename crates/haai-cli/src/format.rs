//! Table formatting helpers

/// Cut `text` to at most `width` characters, marking the cut with `...`
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let keep = width.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Compact count: `1.2M`, `3.4K`, or the plain number
#[allow(clippy::cast_precision_loss)]
pub(crate) fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1e6)
    } else if n >= 1_000 {
        format!("{:.1}K", n as f64 / 1e3)
    } else {
        n.to_string()
    }
}

/// Minutes as hours with one decimal
pub(crate) fn hours(minutes: u32) -> String {
    format!("{:.1}", f64::from(minutes) / 60.0)
}

/// Horizontal rule
pub(crate) fn rule(ch: char, width: usize) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// Timeline label of an AGI wave
pub(crate) fn wave_timeline(wave: u8) -> &'static str {
    match wave {
        1 => "2024-2026",
        2 => "2026-2028",
        3 => "2028-2032",
        4 => "2032+",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("short", 40), "short");
        assert_eq!(truncate("abcdefghij", 8), "abcde...");
        assert_eq!(truncate("abcdefgh", 8), "abcdefgh");
        assert_eq!(truncate("ééééééééé", 5), "éé...");
    }

    #[test]
    fn numbers_compact() {
        assert_eq!(format_number(950), "950");
        assert_eq!(format_number(12_500), "12.5K");
        assert_eq!(format_number(161_000_000), "161.0M");
    }

    #[test]
    fn hours_and_timelines() {
        assert_eq!(hours(90), "1.5");
        assert_eq!(wave_timeline(3), "2028-2032");
        assert_eq!(wave_timeline(9), "");
        assert_eq!(rule('-', 3), "---");
    }
}
