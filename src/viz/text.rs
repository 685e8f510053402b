//! Text measurement and fitting for legend entries and tooltips.

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Shorten `text` with a trailing ellipsis until it fits `max_px`.
pub fn fit_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    for keep in (0..chars.len()).rev() {
        let candidate: String = chars[..keep].iter().chain(std::iter::once(&'…')).collect();
        if estimate_text_width_px(&candidate, font_px) <= max_px {
            return candidate;
        }
    }
    String::new()
}

/// Widest line of a multi-line label.
pub fn block_width_px(text: &str, font_px: u32) -> u32 {
    text.lines()
        .map(|l| estimate_text_width_px(l, font_px))
        .max()
        .unwrap_or(0)
}
