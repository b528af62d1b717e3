//! UI components for the box-office TUI.
//!
//! Each component renders from a borrowed view context and keeps no state of
//! its own.

mod movie_card;
mod movie_list;
mod text_fit;

pub use movie_card::{MovieCardComponent, MovieCardViewContext};
pub use movie_list::{MovieListComponent, MovieListViewContext};
pub(crate) use text_fit::fit_to_width;
