//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use marquee::{CatalogError, Movie};

/// Writes search matches to stdout.
pub fn write_search_results(title: &str, movies: &[Movie]) -> Result<(), CatalogError> {
    let mut stdout = io::stdout().lock();
    write_search_results_to(&mut stdout, title, movies)
}

/// Writes search matches to the given writer.
pub fn write_search_results_to<W: Write>(
    writer: &mut W,
    title: &str,
    movies: &[Movie],
) -> Result<(), CatalogError> {
    if movies.is_empty() {
        return writeln!(writer, "No movies match \"{title}\".").map_err(|e| io_error(&e));
    }

    writeln!(writer, "Movies matching \"{title}\":").map_err(|e| io_error(&e))?;
    writeln!(writer).map_err(|e| io_error(&e))?;

    for movie in movies {
        let released = movie.release_date.as_deref().unwrap_or("unknown");
        writeln!(
            writer,
            "  #{} {} ({released})",
            identity_label(movie),
            movie.title
        )
        .map_err(|e| io_error(&e))?;
    }

    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "{} result(s)", movies.len()).map_err(|e| io_error(&e))
}

/// Writes a movie detail record to stdout.
pub fn write_movie_detail(movie: &Movie) -> Result<(), CatalogError> {
    let mut stdout = io::stdout().lock();
    write_movie_detail_to(&mut stdout, movie)
}

/// Writes a movie detail record to the given writer.
pub fn write_movie_detail_to<W: Write>(writer: &mut W, movie: &Movie) -> Result<(), CatalogError> {
    let released = movie
        .release_date
        .as_deref()
        .unwrap_or("no release date provided");
    let poster = movie
        .poster_url
        .as_deref()
        .unwrap_or("no poster provided");
    let message = format!(
        "Movie #{}: {}\nReleased: {released}\nPoster: {poster}",
        identity_label(movie),
        movie.title
    );

    writeln!(writer, "{message}").map_err(|e| io_error(&e))
}

fn identity_label(movie: &Movie) -> String {
    movie.identity().unwrap_or_else(|| "?".to_owned())
}

/// Converts an I/O error to a [`CatalogError::Io`].
pub(crate) fn io_error(error: &io::Error) -> CatalogError {
    CatalogError::Io {
        message: error.to_string(),
    }
}
