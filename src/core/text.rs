/// Canonical matching form of raw user input: lowercased, every character
/// outside Unicode letters/digits/whitespace replaced with one space, then
/// trimmed at both ends.
///
/// Total and idempotent; empty input yields an empty string.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let replaced: String = lowered
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    replaced.trim().to_string()
}
