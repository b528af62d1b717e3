//! Rendering logic for the box-office TUI application.
//!
//! These are pure query methods that read controller state without
//! modification.

use super::BoxofficeApp;
use crate::carousel::{Dataset, LoadMoreAffordance, ViewMode};
use crate::catalog::DatasetKey;
use crate::tui::components::{
    MovieCardComponent, MovieCardViewContext, MovieListComponent, MovieListViewContext,
    fit_to_width,
};

impl BoxofficeApp {
    /// Renders the header with dataset label, range and loading indicator.
    pub(super) fn render_header(&self) -> String {
        let (label, range) = self
            .controller
            .active_dataset()
            .map(|dataset| (dataset.label(), dataset.range_info()))
            .unwrap_or_default();
        let range = if range.is_empty() {
            String::new()
        } else {
            format!("  ({range})")
        };
        let loading = if self.controller.is_busy() {
            " [Loading...]"
        } else {
            ""
        };
        format!("Marquee - {label}{range}{loading}\n")
    }

    /// Renders the dataset tabs, highlighting the active one.
    pub(super) fn render_tabs(&self) -> String {
        let Some(active) = self.controller.affordances().active_tab else {
            return "\n".to_owned();
        };

        let tabs: Vec<String> = DatasetKey::ALL
            .iter()
            .zip(1..)
            .map(|(dataset, number)| {
                let label = self
                    .controller
                    .switchboard()
                    .dataset(*dataset)
                    .map_or_else(|| dataset.default_label(), Dataset::label);
                if *dataset == active {
                    format!("[{number}:{label}]")
                } else {
                    format!(" {number}:{label} ")
                }
            })
            .collect();
        format!("{}\n", tabs.join(" "))
    }

    /// Renders the cards of the current window, or the whole list.
    pub(super) fn render_body(&self) -> String {
        let max_width = usize::from(self.width.max(1));
        let body_height = self.body_height();

        match self.controller.view_state().view_mode {
            ViewMode::List => MovieListComponent::view(&MovieListViewContext {
                movies: self.controller.items(),
                scroll_offset: self.list_scroll,
                visible_height: body_height,
                max_width,
            }),
            ViewMode::Slide => self.render_window(max_width, body_height),
        }
    }

    fn render_window(&self, max_width: usize, body_height: usize) -> String {
        let movies = self.controller.visible_items();
        if movies.is_empty() {
            return "  Nothing to show.\n".to_owned();
        }

        let offset = self.controller.window_offset();
        let mut output: String = movies
            .iter()
            .enumerate()
            .map(|(index, movie)| {
                MovieCardComponent::view(&MovieCardViewContext {
                    movie,
                    rank: movie
                        .display_rank(offset.saturating_add(index).saturating_add(1)),
                    max_width,
                })
            })
            .collect();

        let line_count = output.lines().count();
        if body_height > 0 && line_count > body_height {
            output = output
                .lines()
                .take(body_height)
                .map(|line| format!("{line}\n"))
                .collect();
        }
        output
    }

    /// Renders the navigation or load-more footer plus key hints.
    pub(super) fn render_footer(&self) -> String {
        let affordances = self.controller.affordances();
        let position = match affordances.view_mode {
            ViewMode::Slide => {
                let current = self.controller.current_window().saturating_add(1);
                let total = self.controller.window_count();
                if affordances.navigation_visible {
                    format!("< h  {current}/{total}  l >")
                } else {
                    format!("{current}/{total}")
                }
            }
            ViewMode::List => {
                let count = self.controller.items().len();
                let more = render_load_more(&affordances.load_more);
                format!("{count} items{more}")
            }
        };
        let hints = if affordances.controls_enabled {
            "1-3:dataset  v:view  ?:help  q:quit"
        } else {
            "please wait..."
        };
        let line = format!("{position}  |  {hints}");
        format!("{}\n", fit_to_width(&line, usize::from(self.width.max(1))))
    }

    /// Renders the latest status message, or an empty line.
    pub(super) fn render_status_line(&self) -> String {
        self.status_message()
            .map_or_else(|| "\n".to_owned(), |message| format!("{message}\n"))
    }

    /// Renders the help overlay.
    pub(super) fn render_help_overlay(&self) -> String {
        if !self.show_help {
            return String::new();
        }

        let help_text = r"
=== Keyboard Shortcuts ===

Datasets:
  1          Daily box office
  2          Now playing
  3          Coming soon

Slide view:
  h, Left    Previous window
  l, Right   Next window

List view:
  j, Down    Scroll down
  k, Up      Scroll up
  m, Enter   Load more (now playing and coming soon)

Other:
  v, Tab     Toggle slide/list view
  s          Slide view
  L          List view
  ?          Toggle this help
  q          Quit

Press any key to close this help.
";
        help_text.to_owned()
    }
}

fn render_load_more(affordance: &LoadMoreAffordance) -> String {
    if !affordance.visible {
        return String::new();
    }
    if affordance.enabled {
        format!("  [m] {}", affordance.label)
    } else {
        format!("  ({})", affordance.label)
    }
}
