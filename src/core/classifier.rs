use super::category::{Category, KEYWORDS};

/// First category, in table declaration order, one of whose keywords the
/// normalized input contains as a substring. `None` when nothing matches.
///
/// This is a deliberate, simple substring search, not ranked scoring: the
/// first declared category/keyword pair wins every tie, and identical input
/// always yields the identical category. The dispatcher performs its own
/// authoritative threat check before consulting this.
#[must_use]
pub fn classify(normalized: &str) -> Option<Category> {
    for (category, keywords) in KEYWORDS {
        if keywords.iter().any(|keyword| normalized.contains(keyword)) {
            return Some(*category);
        }
    }
    None
}
