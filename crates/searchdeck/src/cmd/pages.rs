//! Paginated post search.

use std::sync::Arc;

use searchdeck_core::{PageCursor, QueryController, ResultState};
use searchdeck_sources::placeholder::POSTS_PER_PAGE;
use searchdeck_sources::{PagedPostSearch, PostPage};

use super::surface::{Action, Presenter};

/// Keeps the page cursor in step with the source.
///
/// A new query goes back to page 1; `:next` and `:prev` refetch the current
/// query at the adjacent page.
#[derive(Debug)]
pub struct Pager {
    cursor: PageCursor,
    source: Arc<PagedPostSearch>,
}

impl Pager {
    /// Page through `source`, starting at its current page.
    pub fn new(source: Arc<PagedPostSearch>) -> Self {
        let mut cursor = PageCursor::new(POSTS_PER_PAGE);
        for _ in 1..source.page() {
            cursor.record_fetch(POSTS_PER_PAGE as usize);
            cursor.next_page();
        }
        Self { cursor, source }
    }

    /// The cursor position.
    pub const fn cursor(&self) -> &PageCursor {
        &self.cursor
    }

    fn turn(
        &mut self,
        page: Option<u32>,
        controller: &QueryController<PostPage>,
        end: &str,
    ) -> Action {
        match page {
            Some(page) => {
                self.source.set_page(page);
                controller.search_now(controller.query());
                Action::Handled
            }
            None => Action::Notice(format!("no {end} page")),
        }
    }
}

impl Presenter<PostPage> for Pager {
    fn on_input(&mut self, _line: &str) {
        self.cursor.reset();
        self.source.set_page(1);
    }

    fn command(&mut self, name: &str, _args: &str, controller: &QueryController<PostPage>) -> Action {
        match name {
            "next" | "n" => {
                let page = self.cursor.next_page();
                self.turn(page, controller, "next")
            }
            "prev" | "p" => {
                let page = self.cursor.prev_page();
                self.turn(page, controller, "previous")
            }
            _ => Action::Unknown,
        }
    }

    fn present(&mut self, state: ResultState<PostPage>) -> ResultState<PostPage> {
        if let ResultState::Success { data, .. } = &state {
            if data.page == self.cursor.page() {
                self.cursor.record_fetch(data.posts.len());
            }
        }
        state
    }

    fn help(&self) -> &'static [&'static str] {
        &[":next, :n     fetch the next page", ":prev, :p     fetch the previous page"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use searchdeck_core::{ControllerConfig, FetchError};
    use searchdeck_sources::{HttpClient, Post, SourceConfig};

    fn page(page: u32, len: u64) -> ResultState<PostPage> {
        ResultState::Success {
            query: "qui".to_string(),
            data: PostPage {
                page,
                posts: (0..len)
                    .map(|id| Post {
                        id,
                        user_id: 1,
                        title: String::new(),
                        body: String::new(),
                    })
                    .collect(),
            },
        }
    }

    fn source() -> Arc<PagedPostSearch> {
        let config = SourceConfig::default();
        Arc::new(PagedPostSearch::new(HttpClient::new(&config), &config))
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_and_prev_move_the_source() {
        let source = source();
        let controller = QueryController::new(
            |_: String| async { Err::<PostPage, _>(FetchError::Unknown("offline".to_string())) },
            ControllerConfig::default(),
        );
        let mut pager = Pager::new(Arc::clone(&source));

        // Nothing fetched yet, so there is no next page.
        assert_eq!(
            pager.command("next", "", &controller),
            Action::Notice("no next page".to_string())
        );
        assert_eq!(source.page(), 1);
        assert_eq!(
            pager.command("p", "", &controller),
            Action::Notice("no previous page".to_string())
        );

        pager.present(page(1, 10));
        assert_eq!(pager.command("next", "", &controller), Action::Handled);
        assert_eq!(source.page(), 2);
        assert_eq!(pager.cursor().page(), 2);

        // A short page ends the listing.
        pager.present(page(2, 4));
        pager.command("n", "", &controller);
        assert_eq!(source.page(), 2);

        pager.command("prev", "", &controller);
        assert_eq!(source.page(), 1);

        pager.command("next", "", &controller);
        pager.on_input("new query");
        assert_eq!(source.page(), 1);
        assert_eq!(pager.cursor().page(), 1);
    }

    #[test]
    fn test_starts_at_source_page() {
        let source = source();
        source.set_page(3);
        let pager = Pager::new(source);
        assert_eq!(pager.cursor().page(), 3);
        assert!(pager.cursor().has_prev());
    }
}
