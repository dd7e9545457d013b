use popcorn_core::{AppViewModel, DetailView, SearchView, WatchlistSummary, MAX_USER_RATING};

use super::constants::*;

const RULE: &str = "----------------------------------------";

/// Renders the whole view as terminal lines, top to bottom.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("== {} ==", view.heading));
    render_search(&view.query, &view.search, &mut lines);
    lines.push(RULE.to_string());

    match &view.detail {
        Some(detail) => render_detail(detail, &mut lines),
        None => render_watched(view, &mut lines),
    }

    lines
}

fn render_search(query: &str, search: &SearchView, lines: &mut Vec<String>) {
    lines.push(format!(
        "Search: {:?} | Found {} results",
        query,
        search.result_count()
    ));

    if search.is_loading {
        lines.push("Loading...".to_string());
        return;
    }
    if let Some(error) = &search.error {
        lines.push(format!("! {}", error));
        return;
    }
    for (index, result) in search.results.iter().enumerate() {
        lines.push(format!(
            "{:>3}. {} ({})",
            index + 1,
            result.title,
            result.release_year
        ));
    }
}

fn render_detail(detail: &DetailView, lines: &mut Vec<String>) {
    let Some(movie) = &detail.movie else {
        if detail.is_loading {
            lines.push("Loading...".to_string());
        } else {
            lines.push(format!("No details for {}", detail.movie_id));
        }
        lines.push(format!("{}{} to close", COMMAND_PREFIX, CMD_BACK));
        return;
    };

    lines.push(movie.title.clone());
    lines.push(format!("{} \u{2022} {}", movie.release_date, movie.runtime_label));
    lines.push(movie.genre.clone());
    lines.push(format!("IMDb rating: {}", format_rating(movie.critic_rating)));

    match detail.already_rated {
        Some(rating) => lines.push(format!("Already rated {}", rating)),
        None => {
            let chosen = detail.pending_rating.unwrap_or(0);
            lines.push(format!("Your rating: {}", stars(chosen)));
            if detail.can_add {
                lines.push(format!(
                    "{}{} to save your rating of {}",
                    COMMAND_PREFIX, CMD_ADD, chosen
                ));
            } else {
                lines.push(format!(
                    "{}{} N to rate from 1 to {}",
                    COMMAND_PREFIX, CMD_RATE, MAX_USER_RATING
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push(movie.plot_summary.clone());
    lines.push(format!("Starring {}", movie.cast));
    lines.push(format!("Directed by {}", movie.director));
}

fn render_watched(view: &AppViewModel, lines: &mut Vec<String>) {
    lines.push(summary_line(&view.summary));
    for (index, entry) in view.watched.iter().enumerate() {
        lines.push(format!(
            "{:>3}. {} | imdb {} | you {} | {}",
            index + 1,
            entry.title,
            format_rating(entry.critic_rating),
            entry.user_rating.value(),
            entry
                .runtime_minutes
                .map_or_else(|| "? min".to_string(), |m| format!("{} min", m))
        ));
    }
}

fn summary_line(summary: &WatchlistSummary) -> String {
    format!(
        "Movies you watched: {} | imdb {:.2} | you {:.2} | {:.0} min",
        summary.count,
        summary.mean_critic_rating,
        summary.mean_user_rating,
        summary.mean_runtime_minutes
    )
}

fn format_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| "N/A".to_string(), |r| format!("{:.1}", r))
}

fn stars(filled: u8) -> String {
    let filled = usize::from(filled.min(MAX_USER_RATING));
    let empty = usize::from(MAX_USER_RATING) - filled;
    format!("{}{}", "*".repeat(filled), ".".repeat(empty))
}
