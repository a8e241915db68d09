use crate::models::fallback::POPULAR_LOCATIONS;
use crate::models::space::Space;

/// Popular locations containing `term`, in list order. An empty term suggests nothing.
pub fn suggest_locations(term: &str) -> Vec<&'static str> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    POPULAR_LOCATIONS
        .iter()
        .copied()
        .filter(|location| location.to_lowercase().contains(&needle))
        .collect()
}

/// Keeps spaces whose title or location contains `term`, ignoring case.
pub fn filter_spaces(spaces: Vec<Space>, term: &str) -> Vec<Space> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return spaces;
    }
    spaces
        .into_iter()
        .filter(|space| {
            space.title.to_lowercase().contains(&needle)
                || space.location.to_lowercase().contains(&needle)
        })
        .collect()
}
