//! Two-line movie card used by the slide view.

use super::text_fit::fit_to_width;
use crate::catalog::Movie;

/// Left margin before the rank column.
const INDENT: &str = "  ";
/// Width of the rank column including the trailing ". ".
const RANK_COLUMN: usize = 5;

/// Context for rendering one card.
#[derive(Debug, Clone, Copy)]
pub struct MovieCardViewContext<'a> {
    /// Movie to draw.
    pub movie: &'a Movie,
    /// Chart rank, or the one-based position when the source has none.
    pub rank: usize,
    /// Maximum line width in columns.
    pub max_width: usize,
}

/// Renders a movie as a title line and a detail line.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovieCardComponent;

impl MovieCardComponent {
    /// Renders the card, each line terminated by a newline.
    #[must_use]
    pub fn view(ctx: &MovieCardViewContext<'_>) -> String {
        let text_width = ctx
            .max_width
            .saturating_sub(INDENT.len())
            .saturating_sub(RANK_COLUMN);
        let title = fit_to_width(&ctx.movie.title, text_width);
        let details = fit_to_width(&card_details(ctx.movie), text_width);
        let padding = " ".repeat(RANK_COLUMN);

        format!(
            "{INDENT}{rank:>3}. {title}\n{INDENT}{padding}{details}\n",
            rank = ctx.rank
        )
    }
}

fn card_details(movie: &Movie) -> String {
    let release = movie
        .release_date
        .as_deref()
        .map_or_else(|| "Release date TBA".to_owned(), |date| format!("Opens {date}"));
    if movie.poster_url.is_some() {
        format!("{release}  [poster]")
    } else {
        release
    }
}
