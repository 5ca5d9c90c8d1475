//! Text rendering of search results.
//!
//! [`render_state`] picks exactly one of the idle placeholder, the loading
//! line, the error line, the empty-state line or the data view for a
//! [`ResultState`], and delegates the data view to the payload's
//! [`Render`] impl.

use std::io::{self, Write};

use searchdeck_core::{ResultState, View};
use searchdeck_sources::{
    format_market_cap, Article, ChartPoint, Coin, Comment, GithubProfile, Joke, Movie, Pokemon,
    Post, PostPage, Suggestion, User, Weather,
};

/// Width of the price bars in the chart view.
const CHART_WIDTH: usize = 40;

/// A payload that can be printed as the data view.
pub trait Render {
    /// Write the data view.
    fn render(&self, out: &mut dyn Write) -> io::Result<()>;

    /// Whether the payload should be shown as the empty state instead.
    fn is_empty(&self) -> bool {
        false
    }
}

/// Write the single view that matches `state`.
pub fn render_state<T: Render>(state: &ResultState<T>, out: &mut dyn Write) -> io::Result<()> {
    match (state.view(Render::is_empty), state) {
        (View::Placeholder, _) => writeln!(out, "Type a query to search."),
        (View::Loading, ResultState::Pending { query }) => {
            writeln!(out, "Searching for \"{query}\"...")
        }
        (View::Error, ResultState::Failure { query, reason }) => {
            writeln!(out, "error ({}): \"{query}\": {}", reason.kind(), reason.message())
        }
        (View::Empty, ResultState::Success { query, .. }) => {
            writeln!(out, "No results for \"{query}\".")
        }
        (View::Data, ResultState::Success { data, .. }) => data.render(out),
        // view() is derived from the state, so the pairs above are exhaustive.
        _ => Ok(()),
    }
}

impl Render for Vec<Post> {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        for post in self {
            writeln!(out, "#{:<4} {}", post.id, post.title)?;
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl Render for PostPage {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        self.posts.render(out)?;
        let mut hints = Vec::new();
        if self.page > 1 {
            hints.push(":prev");
        }
        if self.has_more() {
            hints.push(":next");
        }
        if hints.is_empty() {
            writeln!(out, "-- page {} --", self.page)
        } else {
            writeln!(out, "-- page {} ({}) --", self.page, hints.join(", "))
        }
    }

    fn is_empty(&self) -> bool {
        self.posts.is_empty() && self.page == 1
    }
}

impl Render for Vec<User> {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{:<4} {:<26} {:<18} Email", "ID", "Name", "Username")?;
        for user in self {
            writeln!(
                out,
                "{:<4} {:<26} {:<18} {}",
                user.id, user.name, user.username, user.email
            )?;
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl Render for Vec<Comment> {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        for comment in self {
            writeln!(out, "{} (post #{})", comment.name, comment.post_id)?;
            writeln!(out, "  by {}", comment.email)?;
            for line in comment.body.lines() {
                writeln!(out, "  {line}")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl Render for Vec<Suggestion> {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        for suggestion in self {
            writeln!(out, "{}", suggestion.word)?;
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl Render for GithubProfile {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        let user = &self.user;
        match &user.name {
            Some(name) => writeln!(out, "{name} (@{})", user.login)?,
            None => writeln!(out, "@{}", user.login)?,
        }
        if let Some(bio) = &user.bio {
            writeln!(out, "{bio}")?;
        }
        if let Some(location) = &user.location {
            writeln!(out, "Location: {location}")?;
        }
        writeln!(
            out,
            "Repos: {}  Followers: {}  Following: {}",
            user.public_repos, user.followers, user.following
        )?;
        writeln!(out, "{}", user.html_url)?;

        if self.repos.is_empty() {
            return Ok(());
        }
        writeln!(out)?;
        writeln!(out, "Recently updated:")?;
        for repo in &self.repos {
            let language = repo.language.as_deref().unwrap_or("-");
            writeln!(
                out,
                "  {:<30} {:<12} \u{2605} {}",
                repo.name, language, repo.stargazers_count
            )?;
            if let Some(description) = &repo.description {
                writeln!(out, "    {description}")?;
            }
        }
        Ok(())
    }
}

impl Render for Vec<Coin> {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "{:>4} {:<20} {:<6} {:>14} {:>8} {:>10}",
            "#", "Name", "Symbol", "Price", "24h", "Mkt Cap"
        )?;
        for coin in self {
            let rank = coin
                .market_cap_rank
                .map_or_else(|| "-".to_string(), |r| r.to_string());
            let change = coin
                .price_change_percentage_24h
                .map_or_else(|| "-".to_string(), |c| format!("{c:+.2}%"));
            writeln!(
                out,
                "{:>4} {:<20} {:<6} {:>14.2} {:>8} {:>10}",
                rank,
                coin.name,
                coin.symbol.to_uppercase(),
                coin.current_price,
                change,
                format_market_cap(coin.market_cap)
            )?;
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl Render for Vec<ChartPoint> {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        let (min, max) = self.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.price), hi.max(p.price))
        });
        for point in self {
            let bar = "#".repeat(bar_width(point.price, min, max));
            writeln!(out, "{} {:>12.2} {bar}", point.date.format("%b %d"), point.price)?;
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

/// Bar length for `value` scaled into `1..=CHART_WIDTH`.
fn bar_width(value: f64, min: f64, max: f64) -> usize {
    if max <= min {
        return CHART_WIDTH;
    }
    let scaled = (value - min) / (max - min) * (CHART_WIDTH - 1) as f64;
    scaled.round() as usize + 1
}

impl Render for Weather {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}, {}", self.name, self.sys.country)?;
        if let Some(condition) = self.weather.first() {
            writeln!(out, "{} ({})", condition.main, condition.description)?;
        }
        writeln!(
            out,
            "Temperature: {:.1}\u{b0}C (feels like {:.1}\u{b0}C)",
            self.main.temp, self.main.feels_like
        )?;
        writeln!(out, "Humidity: {}%", self.main.humidity)?;
        writeln!(out, "Wind: {:.1} m/s", self.wind.speed)?;
        writeln!(out, "Lat/Lon: {:.2}, {:.2}", self.coord.lat, self.coord.lon)
    }
}

impl Render for Vec<Movie> {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        for movie in self {
            match movie.year() {
                Some(year) => write!(out, "{} ({year})", movie.title)?,
                None => write!(out, "{}", movie.title)?,
            }
            writeln!(out, "  \u{2605} {:.1}", movie.vote_average)?;
            if !movie.overview.is_empty() {
                writeln!(out, "  {}", movie.overview)?;
            }
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl Render for Joke {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.setup)?;
        writeln!(out, "  {}", self.punchline)
    }
}

impl Render for Pokemon {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "#{} {}", self.id, self.name)?;
        let types: Vec<&str> = self.types.iter().map(|t| t.kind.name.as_str()).collect();
        writeln!(out, "Type: {}", types.join(", "))?;
        // PokeAPI reports decimetres and hectograms.
        writeln!(
            out,
            "Height: {:.1} m  Weight: {:.1} kg",
            f64::from(self.height) / 10.0,
            f64::from(self.weight) / 10.0
        )?;
        let abilities: Vec<String> = self
            .abilities
            .iter()
            .map(|a| {
                if a.is_hidden {
                    format!("{} (hidden)", a.ability.name)
                } else {
                    a.ability.name.clone()
                }
            })
            .collect();
        writeln!(out, "Abilities: {}", abilities.join(", "))?;
        for stat in &self.stats {
            writeln!(out, "  {:<16} {:>3}", stat.stat.name, stat.base_stat)?;
        }
        Ok(())
    }
}

impl Render for Vec<Article> {
    fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        for article in self {
            writeln!(out, "{}", article.title)?;
            writeln!(
                out,
                "  {} \u{b7} {}",
                article.source.name,
                article.published_label()
            )?;
            if let Some(description) = &article.description {
                writeln!(out, "  {description}")?;
            }
            writeln!(out, "  {}", article.url)?;
        }
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use searchdeck_core::FetchError;

    fn render_to_string<T: Render>(state: &ResultState<T>) -> String {
        let mut out = Vec::new();
        render_state(state, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn word(w: &str) -> Suggestion {
        Suggestion {
            word: w.to_string(),
            score: 1,
        }
    }

    #[test]
    fn test_each_state_renders_one_view() {
        let idle: ResultState<Vec<Suggestion>> = ResultState::Idle;
        assert_eq!(render_to_string(&idle), "Type a query to search.\n");

        let pending: ResultState<Vec<Suggestion>> = ResultState::Pending {
            query: "rus".to_string(),
        };
        assert_eq!(render_to_string(&pending), "Searching for \"rus\"...\n");

        let failed: ResultState<Vec<Suggestion>> = ResultState::Failure {
            query: "rus".to_string(),
            reason: FetchError::Network("connection refused".to_string()),
        };
        assert_eq!(
            render_to_string(&failed),
            "error (network): \"rus\": connection refused\n"
        );

        let empty: ResultState<Vec<Suggestion>> = ResultState::Success {
            query: "zzz".to_string(),
            data: Vec::new(),
        };
        assert_eq!(render_to_string(&empty), "No results for \"zzz\".\n");

        let data = ResultState::Success {
            query: "rus".to_string(),
            data: vec![word("rust"), word("russia")],
        };
        assert_eq!(render_to_string(&data), "rust\nrussia\n");
    }

    #[test]
    fn test_user_table() {
        let users = vec![User {
            id: 1,
            name: "Leanne Graham".to_string(),
            username: "Bret".to_string(),
            email: "Sincere@april.biz".to_string(),
            phone: String::new(),
        }];
        let mut out = Vec::new();
        users.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[1].contains("Leanne Graham"));
        assert!(lines[1].ends_with("Sincere@april.biz"));
    }

    #[test]
    fn test_post_page_hints() {
        let posts: Vec<Post> = (1..=10)
            .map(|id| Post {
                id,
                user_id: 1,
                title: format!("post {id}"),
                body: String::new(),
            })
            .collect();
        let page = PostPage { page: 2, posts };
        let mut out = Vec::new();
        page.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("-- page 2 (:prev, :next) --\n"));

        // An empty page past the first still shows the footer so :prev works.
        let past_end = PostPage {
            page: 3,
            posts: Vec::new(),
        };
        assert!(!Render::is_empty(&past_end));
    }

    #[test]
    fn test_chart_bars_scale() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        let points = vec![
            ChartPoint {
                date: day(1),
                price: 100.0,
            },
            ChartPoint {
                date: day(2),
                price: 200.0,
            },
        ];
        let mut out = Vec::new();
        points.render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("Jan 01"));
        assert_eq!(lines[0].matches('#').count(), 1);
        assert_eq!(lines[1].matches('#').count(), CHART_WIDTH);
    }

    #[test]
    fn test_flat_chart_uses_full_width() {
        assert_eq!(bar_width(5.0, 5.0, 5.0), CHART_WIDTH);
    }
}
