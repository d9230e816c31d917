//! Presentation components for the non-game screens.
//!
//! `Sanctuary` owns the spirit's mood and cosmetic timers; `ArView` owns the
//! camera access state and tap placement. Both are frame-driven like the
//! session and never block.

use log::{debug, warn};
use spirit_logic::ar::Placement;
use spirit_logic::companion::{CosmeticTimers, Mood, SpiritProfile, Touch};
use spirit_logic::constants::clips;

use crate::host::{AudioTrigger, Permission, PermissionGate};

/// The 3D sanctuary where the spirit reacts to touches.
#[derive(Debug, Clone, Default)]
pub struct Sanctuary {
    pub profile: SpiritProfile,
    mood: Mood,
    timers: CosmeticTimers,
}

impl Sanctuary {
    pub fn new(profile: SpiritProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// React to a touch at model-space height `y`.
    pub fn touch(&mut self, y: f32, audio: &mut dyn AudioTrigger) -> Touch {
        let touch = Touch::from_height(y);
        self.mood = touch.mood();
        self.timers.react(touch);
        self.profile.record_interaction();

        if touch == Touch::Pet {
            if let Err(e) = audio.play(clips::PURR) {
                warn!("could not play {}: {}", clips::PURR, e);
            }
        }

        debug!("spirit {:?}, now {}", touch, self.mood.label());
        touch
    }

    pub fn update(&mut self, dt: f32) {
        self.timers.tick(dt);
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// "Your Spirit is feeling happy", while the indicator is up.
    pub fn mood_message(&self) -> Option<String> {
        self.timers
            .mood_indicator
            .is_active()
            .then(|| format!("Your Spirit is feeling {}", self.mood.label()))
    }

    pub fn is_petted(&self) -> bool {
        self.timers.petted.is_active()
    }

    pub fn is_tickled(&self) -> bool {
        self.timers.tickled.is_active()
    }

    pub fn is_glowing(&self) -> bool {
        self.timers.is_glowing()
    }

    /// Leaving the screen drops any pending reactions.
    pub fn leave(&mut self) {
        self.timers.cancel_all();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CameraAccess {
    #[default]
    Requesting,
    Granted,
    NoAccess,
}

/// Simulated AR: tap anywhere to drop the spirit overlay there.
#[derive(Debug, Clone, Default)]
pub struct ArView {
    access: CameraAccess,
    placement: Placement,
}

impl ArView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, gate: &mut dyn PermissionGate) -> CameraAccess {
        self.access = match gate.request_camera() {
            Permission::Granted => CameraAccess::Granted,
            Permission::Denied => {
                warn!("camera permission denied");
                CameraAccess::NoAccess
            }
        };
        self.access
    }

    pub fn access(&self) -> CameraAccess {
        self.access
    }

    /// Returns false when the camera is not available.
    pub fn tap(&mut self, x: f32, y: f32) -> bool {
        if self.access != CameraAccess::Granted {
            return false;
        }
        self.placement.place(x, y);
        true
    }

    pub fn reset(&mut self) {
        self.placement.reset();
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn status_text(&self) -> Option<&'static str> {
        match self.access {
            CameraAccess::Requesting => Some("Requesting camera permission..."),
            CameraAccess::NoAccess => Some("No access to camera"),
            CameraAccess::Granted => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::AudioError;

    #[derive(Default)]
    struct RecordingAudio {
        played: Vec<String>,
        fail: bool,
    }

    impl AudioTrigger for RecordingAudio {
        fn play(&mut self, clip: &str) -> Result<(), AudioError> {
            if self.fail {
                return Err(AudioError::ClipNotFound(clip.to_string()));
            }
            self.played.push(clip.to_string());
            Ok(())
        }
    }

    struct Gate(Permission);

    impl PermissionGate for Gate {
        fn request_camera(&mut self) -> Permission {
            self.0
        }
    }

    #[test]
    fn test_pet_plays_purr() {
        let mut sanctuary = Sanctuary::default();
        let mut audio = RecordingAudio::default();
        assert_eq!(sanctuary.touch(0.8, &mut audio), Touch::Pet);
        assert_eq!(audio.played, vec!["purr"]);
        assert_eq!(sanctuary.mood(), Mood::Happy);
        assert!(sanctuary.is_petted());
        assert_eq!(
            sanctuary.mood_message().as_deref(),
            Some("Your Spirit is feeling happy")
        );
    }

    #[test]
    fn test_tickle_is_silent() {
        let mut sanctuary = Sanctuary::default();
        let mut audio = RecordingAudio::default();
        assert_eq!(sanctuary.touch(0.1, &mut audio), Touch::Tickle);
        assert!(audio.played.is_empty());
        assert_eq!(sanctuary.mood(), Mood::Playful);
        assert!(sanctuary.is_tickled());
    }

    #[test]
    fn test_audio_failure_does_not_block() {
        let mut sanctuary = Sanctuary::default();
        let mut audio = RecordingAudio {
            fail: true,
            ..Default::default()
        };
        sanctuary.touch(0.9, &mut audio);
        assert!(sanctuary.is_petted());
        assert_eq!(sanctuary.mood(), Mood::Happy);
    }

    #[test]
    fn test_reactions_expire() {
        let mut sanctuary = Sanctuary::default();
        sanctuary.touch(0.9, &mut crate::host::Silent);
        sanctuary.update(2.0);
        assert!(!sanctuary.is_glowing());
        assert!(sanctuary.mood_message().is_some());
        sanctuary.update(1.0);
        assert!(sanctuary.mood_message().is_none());
        // mood sticks after the indicator hides
        assert_eq!(sanctuary.mood(), Mood::Happy);
    }

    #[test]
    fn test_leave_cancels_timers() {
        let mut sanctuary = Sanctuary::default();
        sanctuary.touch(0.0, &mut crate::host::Silent);
        sanctuary.leave();
        assert!(!sanctuary.is_tickled());
        assert!(sanctuary.mood_message().is_none());
    }

    #[test]
    fn test_ar_denied_shows_no_access() {
        let mut ar = ArView::new();
        assert_eq!(ar.status_text(), Some("Requesting camera permission..."));
        assert_eq!(ar.request(&mut Gate(Permission::Denied)), CameraAccess::NoAccess);
        assert_eq!(ar.status_text(), Some("No access to camera"));
        assert!(!ar.tap(10.0, 10.0));
        assert!(!ar.placement().is_placed());
    }

    #[test]
    fn test_ar_place_and_reset() {
        let mut ar = ArView::new();
        ar.request(&mut Gate(Permission::Granted));
        assert!(ar.status_text().is_none());
        assert!(ar.tap(180.0, 400.0));
        assert_eq!(ar.placement().overlay_origin(), Some((105.0, 325.0)));
        ar.reset();
        assert!(!ar.placement().is_placed());
    }
}
