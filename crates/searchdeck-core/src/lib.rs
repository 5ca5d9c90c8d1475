//! Core building blocks for searchdeck.
//!
//! This crate provides the one piece of logic every search surface shares:
//!
//! - [`QueryController`] - Debounces query input, dispatches a fetch for the
//!   last settled query and publishes a single [`ResultState`]
//! - [`RequestToken`] - Monotonic tag used to discard stale responses
//! - [`FetchError`] - The error taxonomy surfaced in [`ResultState::Failure`]
//! - [`AutoRefresh`] - Periodic re-fetch with a countdown and manual refresh
//! - [`PageCursor`] - Page navigation over fixed-size result pages
//!
//! # Example
//!
//! ```no_run
//! use searchdeck_core::{ControllerConfig, FetchError, QueryController, ResultState};
//!
//! # async fn demo() {
//! let controller = QueryController::new(
//!     |query: String| async move { Ok::<_, FetchError>(query.len()) },
//!     ControllerConfig::default(),
//! );
//!
//! controller.submit_query("r");
//! controller.submit_query("ru");
//! controller.submit_query("rust");
//!
//! // Only "rust" reaches the fetch function, 500ms after the last keystroke.
//! let mut states = controller.subscribe();
//! let settled = states
//!     .wait_for(|s| matches!(s, ResultState::Success { .. }))
//!     .await
//!     .unwrap()
//!     .clone();
//! assert_eq!(settled.data(), Some(&4));
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod controller;
pub mod error;
pub mod fetch;
pub mod paging;
pub mod refresh;
pub mod state;
pub mod token;

pub use controller::{ControllerConfig, QueryController, DEFAULT_DEBOUNCE};
pub use error::FetchError;
pub use fetch::{Fetch, FetchFuture};
pub use paging::{page_count, paginate, sort_stable, PageCursor};
pub use refresh::AutoRefresh;
pub use state::{ResultState, View};
pub use token::{RequestToken, TokenCounter};
