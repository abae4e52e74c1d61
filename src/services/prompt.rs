use crate::models::{RecommendationPrompt, StorylineBasis};

/// Rendered in place of a missing rating
pub const RATING_NOT_AVAILABLE: &str = "Not available";

/// Fills the recommendation template for the given storyline basis.
///
/// A synopsis asks for 10 similar movies, a plot for 3. Both ask for title,
/// year, country, rating, storyline and a similarity explanation per movie.
pub fn compose(
    basis: StorylineBasis,
    storyline: &str,
    rating: Option<f64>,
    genres: &[String],
) -> RecommendationPrompt {
    let (noun, heading) = match basis {
        StorylineBasis::Synopsis => ("synopsis", "Synopsis"),
        StorylineBasis::Plot => ("plot", "Plot"),
    };
    let count = basis.result_count();
    let rating = render_rating(rating);
    let genres = render_genres(genres);

    let text = format!(
        "You are a knowledgeable movie recommendation assistant specializing in global cinema.
Based on the user's provided movie's {noun} and genres, find {count} similar movies from the entire IMDb database,
including their titles, years, countries of origin, storylines, IMDb ratings, and explain why each of the movies is similar to the provided movie.

Movie {heading}:
{storyline}

Movie IMDb Rating:
{rating}

Movie Genres:
{genres}

Your Response:
Provide a list of {count} movies with their titles, years, countries, IMDb ratings, storylines, and explain the similarity of each movie with the provided movie's storyline."
    );

    RecommendationPrompt::new(basis, text)
}

/// Renders the rating exactly as given; whole numbers keep one decimal (`7.0`)
pub fn render_rating(rating: Option<f64>) -> String {
    match rating {
        Some(rating) if rating.is_finite() && rating.fract() == 0.0 => format!("{:.1}", rating),
        Some(rating) => rating.to_string(),
        None => RATING_NOT_AVAILABLE.to_string(),
    }
}

pub fn render_genres(genres: &[String]) -> String {
    genres.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genres(values: &[&str]) -> Vec<String> {
        values.iter().map(|g| g.to_string()).collect()
    }

    #[test]
    fn test_plot_template() {
        let prompt = compose(
            StorylineBasis::Plot,
            "A thief steals secrets via dreams.",
            Some(8.8),
            &genres(&["Sci-Fi", "Thriller"]),
        );
        let text = prompt.text();

        assert_eq!(prompt.basis(), StorylineBasis::Plot);
        assert!(text.contains("find 3 similar movies"));
        assert!(text.contains("Provide a list of 3 movies"));
        assert!(text.contains("Movie Plot:\nA thief steals secrets via dreams.\n"));
        assert!(text.contains("Movie IMDb Rating:\n8.8\n"));
        assert!(text.contains("Movie Genres:\nSci-Fi, Thriller\n"));
        assert!(!text.contains("Synopsis"));
    }

    #[test]
    fn test_synopsis_template() {
        let prompt = compose(
            StorylineBasis::Synopsis,
            "Dom Cobb is a thief with a rare ability.",
            Some(8.8),
            &genres(&["Action"]),
        );
        let text = prompt.text();

        assert_eq!(prompt.basis(), StorylineBasis::Synopsis);
        assert!(text.contains("movie's synopsis and genres, find 10 similar movies"));
        assert!(text.contains("Provide a list of 10 movies"));
        assert!(text.contains("Movie Synopsis:\nDom Cobb is a thief with a rare ability.\n"));
    }

    #[test]
    fn test_both_templates_request_the_same_fields() {
        for basis in [StorylineBasis::Synopsis, StorylineBasis::Plot] {
            let text = compose(basis, "x", None, &[]).text().to_string();
            for field in ["titles", "years", "countries", "IMDb ratings", "storylines", "similarity"] {
                assert!(text.contains(field), "{:?} template missing {}", basis, field);
            }
        }
    }

    #[test]
    fn test_missing_rating_and_genres() {
        let prompt = compose(StorylineBasis::Plot, "Plot.", None, &[]);
        let text = prompt.text();

        assert!(text.contains("Movie IMDb Rating:\nNot available\n"));
        assert!(text.contains("Movie Genres:\n\n"));
    }

    #[test]
    fn test_storyline_inserted_verbatim() {
        let storyline = "  Braces {rating} and \"quotes\" survive.  ";
        let prompt = compose(StorylineBasis::Plot, storyline, Some(7.0), &[]);

        assert!(prompt.text().contains(storyline));
        assert!(prompt.text().contains("Movie IMDb Rating:\n7.0\n"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let a = compose(StorylineBasis::Synopsis, "Same.", Some(6.5), &genres(&["Drama"]));
        let b = compose(StorylineBasis::Synopsis, "Same.", Some(6.5), &genres(&["Drama"]));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rating_is_not_rounded() {
        assert_eq!(render_rating(Some(8.8)), "8.8");
        assert_eq!(render_rating(Some(7.0)), "7.0");
        assert_eq!(render_rating(Some(7.25)), "7.25");
        assert_eq!(render_rating(Some(6.125)), "6.125");
        assert_eq!(render_rating(None), "Not available");
    }
}
