//! Coin market listing.

use searchdeck_core::{page_count, paginate, ResultState};
use searchdeck_sources::Coin;

use super::surface::Presenter;

/// Shows one page of `limit` rows of the market listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TopCoins {
    limit: Option<usize>,
    page: usize,
}

impl TopCoins {
    /// Show page `page` (1-based) of `limit` rows, or every row.
    pub const fn new(limit: Option<usize>, page: usize) -> Self {
        Self { limit, page }
    }
}

impl Presenter<Vec<Coin>> for TopCoins {
    fn present(&mut self, state: ResultState<Vec<Coin>>) -> ResultState<Vec<Coin>> {
        let Some(limit) = self.limit else {
            return state;
        };
        let requested = self.page;
        state.map(|coins| {
            // Past the end shows the last page instead of nothing.
            let page = requested.clamp(1, page_count(coins.len(), limit).max(1));
            paginate(&coins, page, limit).to_vec()
        })
    }
}
