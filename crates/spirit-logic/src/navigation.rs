//! Screen navigation: a plain route stack rooted at `Home`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Registered screens. Routes carry no parameters beyond their name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    Home,
    Sanctuary,
    MiniGame,
    #[serde(rename = "AR")]
    Ar,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::Sanctuary, Route::MiniGame, Route::Ar];

    pub fn name(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Sanctuary => "Sanctuary",
            Route::MiniGame => "MiniGame",
            Route::Ar => "AR",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, NavigationError> {
        Route::ALL
            .into_iter()
            .find(|r| r.name() == name)
            .ok_or_else(|| NavigationError::UnknownRoute(name.to_string()))
    }
}

impl FromStr for Route {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Route::from_name(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("no screen registered for route {0:?}")]
    UnknownRoute(String),
}

/// Stack navigator. The bottom entry is always `Home`.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            stack: vec![Route::Home],
        }
    }

    pub fn current(&self) -> Route {
        self.stack.last().copied().unwrap_or(Route::Home)
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, route: Route) {
        self.stack.push(route);
    }

    /// Navigate by name, as screens do from their buttons.
    pub fn push_named(&mut self, name: &str) -> Result<Route, NavigationError> {
        let route = Route::from_name(name)?;
        self.push(route);
        Ok(route)
    }

    /// Pop the top screen. Returns `false` when already at the root.
    pub fn pop(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_home() {
        let nav = Navigator::new();
        assert_eq!(nav.current(), Route::Home);
        assert_eq!(nav.depth(), 1);
    }

    #[test]
    fn push_and_back() {
        let mut nav = Navigator::new();
        nav.push(Route::Sanctuary);
        nav.push(Route::MiniGame);
        assert_eq!(nav.current(), Route::MiniGame);
        assert!(nav.pop());
        assert_eq!(nav.current(), Route::Sanctuary);
        assert!(nav.pop());
        assert!(!nav.pop());
        assert_eq!(nav.current(), Route::Home);
    }

    #[test]
    fn names_roundtrip() {
        for r in Route::ALL {
            assert_eq!(Route::from_name(r.name()), Ok(r));
        }
        assert_eq!("AR".parse::<Route>(), Ok(Route::Ar));
    }

    #[test]
    fn unregistered_routes_rejected() {
        let mut nav = Navigator::new();
        for name in ["Customize", "Feed", "Play", "Speak", "home"] {
            assert_eq!(
                nav.push_named(name),
                Err(NavigationError::UnknownRoute(name.to_string()))
            );
        }
        assert_eq!(nav.depth(), 1);
    }
}
