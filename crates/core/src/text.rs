//! Text helpers shared by the quiz screens.

use rand::Rng;
use rand::seq::SliceRandom;

/// Decodes HTML character references (`&quot;`, `&#039;`, `&eacute;`, ...).
#[must_use]
pub fn decode_html(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

/// Shuffles `items` in place; every permutation is equally likely.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}

/// Progress through a batch, counting the current question as reached.
#[must_use]
pub fn progress_percentage(current_index: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let pct = (current_index as f64 + 1.0) / total as f64 * 100.0;
    pct
}

/// Letter shown next to an answer option (`A`, `B`, ...).
#[must_use]
pub fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|offset| b'A'.checked_add(offset))
        .map_or('?', char::from)
}
