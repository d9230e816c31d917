//! Host collaborators: what the session and screens need from the platform.
//!
//! None of these are implemented here for a real device. The viewer, the FFI
//! host, and tests each supply their own.

use spirit_logic::navigation::{Navigator, Route};
use thiserror::Error;

use crate::scene::SceneFrame;

/// Accepts one scene description per frame.
pub trait RenderSurface {
    fn present(&mut self, frame: &SceneFrame);
}

/// Maps route names to screens. Routes carry no parameters.
pub trait NavigationController {
    fn navigate(&mut self, route: Route);
    /// Returns `false` when there is nothing to go back to.
    fn go_back(&mut self) -> bool;
    fn current(&self) -> Route;
}

impl NavigationController for Navigator {
    fn navigate(&mut self, route: Route) {
        self.push(route);
    }

    fn go_back(&mut self) -> bool {
        self.pop()
    }

    fn current(&self) -> Route {
        Navigator::current(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Camera permission prompt.
pub trait PermissionGate {
    fn request_camera(&mut self) -> Permission;
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio clip not found: {0}")]
    ClipNotFound(String),
    #[error("audio playback failed: {0}")]
    Playback(String),
}

/// Fire-and-forget sound effects.
pub trait AudioTrigger {
    fn play(&mut self, clip: &str) -> Result<(), AudioError>;
}

/// Surface that keeps the most recent frame; handy for headless hosts.
#[derive(Debug, Default)]
pub struct LastFrame {
    pub frame: Option<SceneFrame>,
    pub frames_presented: u64,
}

impl RenderSurface for LastFrame {
    fn present(&mut self, frame: &SceneFrame) {
        self.frame = Some(frame.clone());
        self.frames_presented += 1;
    }
}

/// Audio sink for hosts without sound.
#[derive(Debug, Default)]
pub struct Silent;

impl AudioTrigger for Silent {
    fn play(&mut self, _clip: &str) -> Result<(), AudioError> {
        Ok(())
    }
}
