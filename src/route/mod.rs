//! Fragment routing.
//!
//! The location fragment is the only addressable UI state:
//! `#projects`, `#articles` or `#articles/<id>`.

pub mod history;

pub use history::SessionHistory;

const PROJECTS: &str = "projects";
const ARTICLES: &str = "articles";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Projects,
    Articles,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            View::Projects => "Projects",
            View::Articles => "Articles",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteState {
    pub view: View,
    /// Only ever set when `view` is `Articles`.
    pub article_id: Option<String>,
}

impl RouteState {
    pub fn projects() -> Self {
        Self {
            view: View::Projects,
            article_id: None,
        }
    }

    pub fn articles(article_id: Option<String>) -> Self {
        Self {
            view: View::Articles,
            article_id,
        }
    }
}

/// Parse a location fragment. Unrecognized input falls back to Projects.
pub fn parse(fragment: &str) -> RouteState {
    let path = fragment.strip_prefix('#').unwrap_or(fragment);
    let path = path.strip_prefix('/').unwrap_or(path);
    let mut segments = path.split('/');

    match segments.next() {
        Some(ARTICLES) => {
            let article_id = segments
                .next()
                .filter(|id| !id.is_empty())
                .map(str::to_string);
            RouteState::articles(article_id)
        }
        Some(PROJECTS) | Some("") | None => RouteState::projects(),
        Some(other) => {
            log::debug!("unrecognized route `{}`, showing projects", other);
            RouteState::projects()
        }
    }
}

/// Canonical fragment for `state`, without the leading `#`.
pub fn serialize(state: &RouteState) -> String {
    match (state.view, &state.article_id) {
        (View::Projects, _) => PROJECTS.to_string(),
        (View::Articles, None) => ARTICLES.to_string(),
        (View::Articles, Some(id)) => format!("{}/{}", ARTICLES, id),
    }
}

/// Host location the router reads from and writes to.
pub trait Location {
    /// Current fragment, with or without the leading `#`.
    fn fragment(&self) -> String;

    /// Overwrite the current fragment without adding a history entry.
    fn replace_fragment(&mut self, fragment: &str);
}

/// Holds the current route and keeps the location in sync with it.
#[derive(Debug, Default)]
pub struct Router {
    current: RouteState,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &RouteState {
        &self.current
    }

    /// UI-driven navigation: record `state` and rewrite the fragment in place.
    pub fn navigate(&mut self, state: RouteState, location: &mut dyn Location) {
        let fragment = serialize(&state);
        if parse(&location.fragment()) != state {
            log::info!("navigate #{}", fragment);
            location.replace_fragment(&fragment);
        }
        self.current = state;
    }

    /// Externally driven change (startup, back/forward). Never writes back.
    pub fn observe(&mut self, fragment: &str) -> RouteState {
        self.current = parse(fragment);
        self.current.clone()
    }
}
