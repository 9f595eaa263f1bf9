//! Static mood to genre table.

use std::collections::BTreeSet;

/// Label meaning "no filter" for both moods and genres.
pub const ANY: &str = "Any";

/// Moods in display order, each with the TMDB genre names it stands for.
const MOOD_GENRES: &[(&str, &[&str])] = &[
    ("Happy", &["Comedy", "Family", "Adventure"]),
    ("Sad", &["Drama", "Romance"]),
    ("Romantic", &["Romance"]),
    ("Excited", &["Action", "Thriller"]),
    ("Scared", &["Horror", "Mystery"]),
    ("Thoughtful", &["Documentary", "Science Fiction"]),
];

/// Genre names for a mood. Empty for "Any" and for unknown moods.
pub fn genres_for_mood(mood: &str) -> BTreeSet<&'static str> {
    MOOD_GENRES
        .iter()
        .find(|(label, _)| *label == mood)
        .map(|(_, genres)| genres.iter().copied().collect())
        .unwrap_or_default()
}

/// Mood labels in display order.
pub fn mood_labels() -> impl Iterator<Item = &'static str> {
    MOOD_GENRES.iter().map(|(label, _)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_maps_to_three_genres() {
        let genres = genres_for_mood("Happy");
        assert_eq!(
            genres,
            BTreeSet::from(["Comedy", "Family", "Adventure"])
        );
    }

    #[test]
    fn any_and_unknown_are_empty() {
        assert!(genres_for_mood(ANY).is_empty());
        assert!(genres_for_mood("Bored").is_empty());
        assert!(genres_for_mood("").is_empty());
        // lookup is case-sensitive
        assert!(genres_for_mood("happy").is_empty());
    }

    #[test]
    fn labels_keep_display_order() {
        let labels: Vec<_> = mood_labels().collect();
        assert_eq!(
            labels,
            vec!["Happy", "Sad", "Romantic", "Excited", "Scared", "Thoughtful"]
        );
    }
}
