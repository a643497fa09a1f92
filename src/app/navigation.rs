//! Navigation methods for `FolioApp`.
//!
//! Back/forward and typed fragments go through `SessionHistory` and reach
//! the session as external location changes. Page events (tab and header
//! clicks, finished transitions) are handed to the session after drawing.

use super::{FolioApp, PageEvent};

impl FolioApp {
    /// Step one entry back in history.
    pub fn go_back(&mut self) {
        if let Some(fragment) = self.history.back().map(str::to_string) {
            self.location_changed(&fragment);
        }
    }

    /// Step one entry forward in history.
    pub fn go_forward(&mut self) {
        if let Some(fragment) = self.history.forward().map(str::to_string) {
            self.location_changed(&fragment);
        }
    }

    /// Push the typed fragment to history and follow it.
    pub fn navigate(&mut self) {
        self.history.push(&self.fragment_input);
        let fragment = self.history.current().to_string();
        self.location_changed(&fragment);
    }

    fn location_changed(&mut self, fragment: &str) {
        self.fragment_input = fragment.to_string();
        if let Some(session) = self.session.as_mut() {
            session.on_location_change(fragment, &mut self.surface);
        }
    }

    /// Hand the events collected while drawing to the session.
    pub fn handle_events(&mut self) {
        if self.events.is_empty() {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            self.events.clear();
            return;
        };

        let mut moved = false;
        for event in std::mem::take(&mut self.events) {
            match event {
                PageEvent::Tab(view) => {
                    session.click_tab(view, &mut self.history, &mut self.surface);
                    moved = true;
                }
                PageEvent::Article(id) => {
                    session.click_article(&id, &mut self.history, &mut self.surface);
                    moved = true;
                }
                PageEvent::TransitionEnd(region) => {
                    if self.surface.finish_transition(&region) {
                        session.on_transition_end(&region, &mut self.surface);
                    }
                }
            }
        }

        if moved {
            self.fragment_input = self.history.current().to_string();
        }
    }
}
