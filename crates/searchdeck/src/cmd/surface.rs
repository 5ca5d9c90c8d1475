//! Running a search surface against its controller.
//!
//! A surface is one source, one [`QueryController`] and a [`Presenter`]
//! holding whatever view state the surface keeps on top of the fetched
//! data (sort order, page cursor, row limit).

use std::io;
use std::sync::Arc;

use anyhow::{Context, Result};
use searchdeck_core::{ControllerConfig, QueryController, ResultState};
use searchdeck_sources::{fetcher, SearchSource};

use super::live;
use crate::render::{render_state, Render};

/// How input lines reach the controller in live mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Each line restarts the debounce window (search as you type).
    Debounced,
    /// Each line is an explicit submission (search button).
    Submit,
}

/// Result of a surface-specific `:command`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Not a command this surface knows.
    Unknown,
    /// Handled; any visible change arrives as a state transition.
    Handled,
    /// Handled; re-render the current state.
    Rerender,
    /// Handled without effect; show this line to the user.
    Notice(String),
}

/// Surface-specific view state around a controller.
pub trait Presenter<T> {
    /// Called with each typed line before it is submitted.
    fn on_input(&mut self, _line: &str) {}

    /// Handle `:name args`.
    fn command(&mut self, _name: &str, _args: &str, _controller: &QueryController<T>) -> Action {
        Action::Unknown
    }

    /// Adjust a state before it is rendered.
    fn present(&mut self, state: ResultState<T>) -> ResultState<T> {
        state
    }

    /// Usage lines for the surface's commands.
    fn help(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Renders states unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl<T> Presenter<T> for Plain {}

/// Build a controller backed by a blocking source.
pub fn controller_for<S>(source: Arc<S>, config: ControllerConfig) -> QueryController<S::Output>
where
    S: SearchSource,
    S::Output: Clone + Sync,
{
    QueryController::new(fetcher(source), config)
}

/// Fetch `query` once, print the settled state and dispose the controller.
///
/// Returns `false` if the fetch failed.
pub async fn run_once<T, P>(
    controller: &QueryController<T>,
    query: String,
    presenter: &mut P,
) -> Result<bool>
where
    T: Render + Clone + Send + Sync + 'static,
    P: Presenter<T>,
{
    let mut states = controller.subscribe();
    controller.search_now(query);
    let settled = states
        .wait_for(ResultState::is_settled)
        .await
        .context("controller closed before the request settled")?
        .clone();
    controller.dispose();

    let settled = presenter.present(settled);
    render_state(&settled, &mut io::stdout().lock()).context("failed to write results")?;
    Ok(settled.error().is_none())
}

/// Run one-shot when `query` is given, live otherwise.
pub async fn run<T, P>(
    controller: QueryController<T>,
    query: Option<String>,
    mode: InputMode,
    mut presenter: P,
) -> Result<bool>
where
    T: Render + Clone + Send + Sync + 'static,
    P: Presenter<T>,
{
    match query {
        Some(query) => run_once(&controller, query, &mut presenter).await,
        None => {
            live::run(&controller, mode, &mut presenter).await?;
            Ok(true)
        }
    }
}
