//! One-line-per-movie list used by the list view.

use super::text_fit::fit_to_width;
use crate::catalog::Movie;

/// Context for rendering the list view.
#[derive(Debug, Clone, Copy)]
pub struct MovieListViewContext<'a> {
    /// Every loaded movie of the active dataset.
    pub movies: &'a [Movie],
    /// First row to show.
    pub scroll_offset: usize,
    /// Rows available.
    pub visible_height: usize,
    /// Maximum line width in columns.
    pub max_width: usize,
}

/// Renders a scrollable list of movies.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovieListComponent;

impl MovieListComponent {
    /// Renders the visible rows, each terminated by a newline.
    #[must_use]
    pub fn view(ctx: &MovieListViewContext<'_>) -> String {
        if ctx.movies.is_empty() {
            return "  Nothing to show.\n".to_owned();
        }

        ctx.movies
            .iter()
            .enumerate()
            .skip(ctx.scroll_offset)
            .take(ctx.visible_height.max(1))
            .map(|(index, movie)| {
                let line = format_row(movie.display_rank(index.saturating_add(1)), movie);
                let mut row = fit_to_width(&line, ctx.max_width);
                row.push('\n');
                row
            })
            .collect()
    }
}

fn format_row(rank: usize, movie: &Movie) -> String {
    match movie.release_date.as_deref() {
        Some(date) => format!("  {rank:>3}. {} ({date})", movie.title),
        None => format!("  {rank:>3}. {}", movie.title),
    }
}
