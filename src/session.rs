//! Interactive terminal session.
//!
//! Asks for the completion credential once, then loops over title/year
//! prompts. Every failure is printed as its user-facing message and the
//! session goes back to the title prompt.

use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    error::{AppError, AppResult},
    models::{latest_release_year, ApiKey, MovieQuery, Recommendation, EARLIEST_RELEASE_YEAR},
    services::Recommender,
};

const QUIT_WORDS: [&str; 2] = ["quit", "exit"];

pub struct Session<R, W> {
    input: R,
    output: W,
    recommender: Recommender,
    credential: Option<ApiKey>,
}

impl<R, W> Session<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    /// `credential` pre-seeds the session and skips the key prompt
    pub fn new(input: R, output: W, recommender: Recommender, credential: Option<ApiKey>) -> Self {
        Self {
            input,
            output,
            recommender,
            credential,
        }
    }

    /// Runs until end of input or a quit word at the title prompt
    pub async fn run(mut self) -> io::Result<()> {
        writeln!(self.output, "Similar Movie Recommendation Assistant")?;
        writeln!(self.output)?;

        let credential = match self.credential.take() {
            Some(credential) => credential,
            None => match self.ask_credential().await? {
                Some(credential) => credential,
                None => return Ok(()),
            },
        };

        writeln!(self.output, "Step 2: Provide Movie Details")?;
        loop {
            let Some(title) = self.prompt("Enter Movie Name: ").await? else {
                break;
            };
            if QUIT_WORDS.contains(&title.trim().to_lowercase().as_str()) {
                break;
            }

            let year_label = format!(
                "Enter Movie Year ({}-{}): ",
                EARLIEST_RELEASE_YEAR,
                latest_release_year()
            );
            let Some(year) = self.prompt(&year_label).await? else {
                break;
            };

            let outcome = match MovieQuery::parse(&title, &year) {
                Ok(query) => self.recommender.recommend(&query, &credential).await,
                Err(e) => Err(e),
            };
            render_outcome(&mut self.output, &outcome)?;
            writeln!(self.output)?;
        }

        Ok(())
    }

    /// Re-prompts until a non-blank key is entered; `None` on end of input
    async fn ask_credential(&mut self) -> io::Result<Option<ApiKey>> {
        writeln!(self.output, "Step 1: Enter API Key")?;
        loop {
            let Some(line) = self.prompt("Enter your API Key: ").await? else {
                return Ok(None);
            };
            if let Some(credential) = ApiKey::new(&line) {
                writeln!(self.output)?;
                return Ok(Some(credential));
            }
            writeln!(self.output, "{}", AppError::MissingCredential)?;
        }
    }

    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Prints a finished request: the recommendations, or the error message
pub fn render_outcome<W: Write>(output: &mut W, outcome: &AppResult<Recommendation>) -> io::Result<()> {
    match outcome {
        Ok(recommendation) => {
            let movie = &recommendation.movie;
            match movie.year {
                Some(year) => writeln!(output, "Found: {} ({})", movie.title, year)?,
                None => writeln!(output, "Found: {}", movie.title)?,
            }
            writeln!(output)?;
            writeln!(output, "{}", recommendation.basis.heading())?;
            writeln!(output, "{}", recommendation.recommendations)
        }
        Err(e) => writeln!(output, "Error: {}", e),
    }
}
