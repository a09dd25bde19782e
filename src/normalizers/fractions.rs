/// Unicode vulgar fraction glyphs and their ASCII spelling.
const UNICODE_FRACTIONS: [(char, &str); 5] = [
    ('½', "1/2"),
    ('¼', "1/4"),
    ('¾', "3/4"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
];

/// Rewrites unicode fraction glyphs (½, ¼, ¾, ⅓, ⅔) as `n/d` text.
///
/// Every other character passes through untouched, so the function is
/// idempotent.
pub fn normalize_fractions(text: &str) -> String {
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        match UNICODE_FRACTIONS.iter().find(|(glyph, _)| *glyph == c) {
            Some((_, ascii)) => result.push_str(ascii),
            None => result.push(c),
        }
    }

    result
}
