use crate::models::{MovieRecord, StorylineChoice};

/// Picks the text that describes a movie to the model.
///
/// A non-empty synopsis always wins, however short. Otherwise the first plot
/// entry is used and later entries are ignored.
pub fn select(record: &MovieRecord) -> StorylineChoice {
    if let Some(synopsis) = record.synopsis.as_deref().filter(|s| !s.is_empty()) {
        return StorylineChoice::Synopsis(synopsis.to_string());
    }

    match record.plot.first() {
        Some(plot) => StorylineChoice::Plot(plot.clone()),
        None => StorylineChoice::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(synopsis: Option<&str>, plot: &[&str]) -> MovieRecord {
        MovieRecord {
            synopsis: synopsis.map(String::from),
            plot: plot.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_synopsis_preferred_over_plot() {
        let choice = select(&record(Some("Long synopsis."), &["Short plot."]));
        assert_eq!(choice, StorylineChoice::Synopsis("Long synopsis.".to_string()));
    }

    #[test]
    fn test_short_synopsis_still_wins() {
        let choice = select(&record(
            Some("Dreams."),
            &["A much longer and more descriptive plot summary of the film."],
        ));
        assert_eq!(choice, StorylineChoice::Synopsis("Dreams.".to_string()));
    }

    #[test]
    fn test_empty_synopsis_falls_back_to_plot() {
        let choice = select(&record(Some(""), &["A thief steals secrets via dreams."]));
        assert_eq!(
            choice,
            StorylineChoice::Plot("A thief steals secrets via dreams.".to_string())
        );
    }

    #[test]
    fn test_only_first_plot_entry_used() {
        let choice = select(&record(None, &["First.", "Second.", "Third."]));
        assert_eq!(choice, StorylineChoice::Plot("First.".to_string()));
    }

    #[test]
    fn test_nothing_available() {
        assert_eq!(select(&record(None, &[])), StorylineChoice::Unavailable);
        assert_eq!(select(&record(Some(""), &[])), StorylineChoice::Unavailable);
    }
}
