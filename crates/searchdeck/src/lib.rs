//! searchdeck command-line tool.
//!
//! One subcommand per search surface. Given a query, a subcommand fetches
//! once and prints the result; without one it enters live mode, where each
//! input line is a new query fed through the debounced controller:
//!
//! ```bash
//! searchdeck words rus                # one-shot
//! searchdeck posts                    # live, debounced
//! printf 'a\nab\nabc\n' | searchdeck words
//! searchdeck github octocat
//! searchdeck joke --count 3 --period 10
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
pub mod config;
pub mod logging;
pub mod render;
