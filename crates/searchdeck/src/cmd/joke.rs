//! Random jokes on an auto-refresh timer.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use searchdeck_core::{AutoRefresh, QueryController};
use searchdeck_sources::Joke;

use crate::render::render_state;

/// The joke API ignores the query; this one is only shown in messages.
const JOKE_QUERY: &str = "random";

/// Show `count` jokes, fetching a new one every `period`.
///
/// Returns `false` if any fetch failed.
pub async fn run(controller: QueryController<Joke>, count: usize, period: Duration) -> Result<bool> {
    show_jokes(controller, count, period, &mut io::stdout()).await
}

async fn show_jokes(
    controller: QueryController<Joke>,
    count: usize,
    period: Duration,
    out: &mut dyn Write,
) -> Result<bool> {
    let controller = Arc::new(controller);
    let mut states = controller.subscribe();

    let refresh = AutoRefresh::start(period, {
        let controller = Arc::clone(&controller);
        move || controller.search_now(JOKE_QUERY)
    });
    tracing::debug!(count, period = ?refresh.period(), "showing jokes");

    let mut shown = 0;
    let mut all_ok = true;
    while shown < count {
        states
            .changed()
            .await
            .context("controller closed before the joke arrived")?;
        let state = states.borrow_and_update().clone();
        if state.is_pending() {
            continue;
        }

        render_state(&state, out).context("failed to write joke")?;
        all_ok &= state.error().is_none();
        shown += 1;
        if shown < count {
            writeln!(out, "Next joke in {} seconds...", refresh.countdown_secs())?;
        }
        out.flush()?;
    }

    drop(refresh);
    controller.dispose();
    Ok(all_ok)
}
