//! Classification unpacking.

/// Picks the code of `system` out of an activity's classification list.
///
/// Returns the value of the first `(system, value)` pair whose system
/// matches, with `": "` normalised to `":"` so the result can be used as a
/// classification tree key. Returns `None` if the activity is not classified
/// under `system`.
pub fn unpack_classification(classifications: &[(String, String)], system: &str) -> Option<String> {
    classifications
        .iter()
        .find(|(s, _)| s == system)
        .map(|(_, value)| value.replace(": ", ":"))
}
