//! Font weight keywords and combined style strings ("Bold Italic").

/// Keyword → numeric weight, 100 (Thin) through 1000 (Ultra). Keys are
/// normalized: lowercase, no spaces/dashes/underscores.
const WEIGHT_TABLE: &[(&str, u16)] = &[
    ("extrablack", 950),
    ("ultrablack", 950),
    ("extralight", 200),
    ("ultralight", 200),
    ("extrabold", 800),
    ("ultrabold", 800),
    ("semibold", 600),
    ("demibold", 600),
    ("hairline", 100),
    ("regular", 400),
    ("medium", 500),
    ("normal", 400),
    ("black", 900),
    ("heavy", 900),
    ("light", 300),
    ("ultra", 1000),
    ("thin", 100),
    ("book", 400),
    ("bold", 700),
];

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Map a single weight token, numeric (`"700"`) or keyword (`"Bold"`),
/// to its numeric weight.
pub fn weight_of(token: &str) -> Option<f64> {
    let token = token.trim();
    if let Ok(n) = token.parse::<f64>() {
        return (1.0..=1000.0).contains(&n).then_some(n);
    }
    let norm = normalize(token);
    if norm.is_empty() {
        return None;
    }
    WEIGHT_TABLE
        .iter()
        .find(|(kw, _)| norm == *kw)
        .map(|(_, w)| f64::from(*w))
}

/// A combined style string split into weight and italic-ness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedStyle {
    pub weight: Option<f64>,
    pub italic: bool,
}

/// Parse a combined style string such as `"Semi Bold Italic"`, `"Italic"`,
/// or `"700 Italic"`.
///
/// The italic qualifier (`Italic` / `Oblique`) is stripped first; what is
/// left is the weight token. A bare `"Italic"` means regular weight.
pub fn parse_style(style: &str) -> ParsedStyle {
    let mut italic = false;
    let kept: Vec<&str> = style
        .split_whitespace()
        .filter(|w| {
            let is_italic = w.eq_ignore_ascii_case("italic") || w.eq_ignore_ascii_case("oblique");
            italic |= is_italic;
            !is_italic
        })
        .collect();

    let rest = kept.join(" ");
    let weight = if rest.is_empty() {
        italic.then_some(400.0)
    } else {
        weight_of(&rest).or_else(|| {
            // "BoldItalic" without a separator.
            let norm = normalize(&rest);
            norm.strip_suffix("italic").and_then(|w| {
                italic = true;
                if w.is_empty() { Some(400.0) } else { weight_of(w) }
            })
        })
    };
    ParsedStyle { weight, italic }
}

/// Variable-name pattern marking a weight value (`fontWeight`, `…Weight`).
pub fn is_weight_name(path: &str) -> bool {
    crate::model::variable::leaf_of(path)
        .to_ascii_lowercase()
        .contains("weight")
}
