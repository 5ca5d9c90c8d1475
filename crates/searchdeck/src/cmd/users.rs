//! User search with a client-side sort order.

use clap::ValueEnum;
use searchdeck_core::{QueryController, ResultState};
use searchdeck_sources::{sort_users, User, UserSort};

use super::surface::{Action, Presenter};

/// Sort order accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Case-insensitive name.
    #[default]
    Name,
    /// Numeric id.
    Id,
}

impl From<SortBy> for UserSort {
    fn from(sort: SortBy) -> Self {
        match sort {
            SortBy::Name => Self::Name,
            SortBy::Id => Self::Id,
        }
    }
}

/// Sorts fetched users without refetching when the order changes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortedUsers {
    order: UserSort,
}

impl SortedUsers {
    /// Start with `order`.
    pub fn new(order: impl Into<UserSort>) -> Self {
        Self {
            order: order.into(),
        }
    }
}

impl Presenter<Vec<User>> for SortedUsers {
    fn command(&mut self, name: &str, args: &str, _: &QueryController<Vec<User>>) -> Action {
        if name != "sort" {
            return Action::Unknown;
        }
        match SortBy::from_str(args, true) {
            Ok(sort) => {
                self.order = sort.into();
                Action::Rerender
            }
            Err(_) => Action::Notice("usage: :sort name|id".to_string()),
        }
    }

    fn present(&mut self, state: ResultState<Vec<User>>) -> ResultState<Vec<User>> {
        state.map(|mut users| {
            sort_users(&mut users, self.order);
            users
        })
    }

    fn help(&self) -> &'static [&'static str] {
        &[":sort name|id  change the sort order"]
    }
}
