//! Companion logic: spirit profile, moods, touch reactions, cosmetic timers.
//!
//! Cosmetic flags (petted, tickled, mood indicator) are independent countdown
//! timers owned by the presentation layer. Re-triggering restarts the
//! countdown; expiry simply clears the flag. None of this feeds gameplay.

use serde::{Deserialize, Serialize};

use crate::constants::companion::{HEAD_HEIGHT, MOOD_INDICATOR_SECS, PETTED_SECS, TICKLED_SECS};

/// Dashboard stats for the player's spirit guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpiritProfile {
    pub name: String,
    pub level: u32,
    /// 0-100
    pub happiness: u8,
    /// 0-100
    pub energy: u8,
    /// Seconds since the last interaction.
    pub idle_secs: u64,
}

impl Default for SpiritProfile {
    fn default() -> Self {
        Self {
            name: "Lumina".to_string(),
            level: 3,
            happiness: 85,
            energy: 70,
            idle_secs: 0,
        }
    }
}

impl SpiritProfile {
    pub fn new(name: impl Into<String>, level: u32, happiness: u8, energy: u8) -> Self {
        Self {
            name: name.into(),
            level,
            happiness: happiness.min(100),
            energy: energy.min(100),
            idle_secs: 0,
        }
    }

    pub fn title(&self) -> String {
        format!("Level {} Spirit Guide", self.level)
    }

    pub fn last_seen(&self) -> String {
        format_time_ago(self.idle_secs)
    }

    pub fn record_interaction(&mut self) {
        self.idle_secs = 0;
    }
}

/// Human-readable "time ago" with the largest whole unit.
pub fn format_time_ago(secs: u64) -> String {
    let minutes = secs / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let (n, unit) = if days > 0 {
        (days, "day")
    } else if hours > 0 {
        (hours, "hour")
    } else if minutes > 0 {
        (minutes, "minute")
    } else {
        return "Just now".to_string();
    };

    let plural = if n > 1 { "s" } else { "" };
    format!("{n} {unit}{plural} ago")
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    #[default]
    Content,
    Happy,
    Playful,
}

impl Mood {
    pub fn label(self) -> &'static str {
        match self {
            Mood::Content => "content",
            Mood::Happy => "happy",
            Mood::Playful => "playful",
        }
    }
}

/// Where the spirit was touched decides how it reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Touch {
    /// Head pat.
    Pet,
    /// Body tickle.
    Tickle,
}

impl Touch {
    pub fn from_height(y: f32) -> Self {
        if y > HEAD_HEIGHT {
            Touch::Pet
        } else {
            Touch::Tickle
        }
    }

    pub fn mood(self) -> Mood {
        match self {
            Touch::Pet => Mood::Happy,
            Touch::Tickle => Mood::Playful,
        }
    }
}

/// Single cancellable countdown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: Option<f32>,
}

impl Countdown {
    pub fn trigger(&mut self, secs: f32) {
        self.remaining = Some(secs);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.unwrap_or(0.0)
    }

    /// Returns true on the tick the countdown expires.
    ///
    /// A negative or non-finite `dt` counts as no time passing.
    pub fn tick(&mut self, dt: f32) -> bool {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        match self.remaining {
            Some(left) if left - dt <= 0.0 => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - dt);
                false
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CosmeticTimers {
    pub petted: Countdown,
    pub tickled: Countdown,
    pub mood_indicator: Countdown,
}

impl CosmeticTimers {
    pub fn react(&mut self, touch: Touch) {
        match touch {
            Touch::Pet => self.petted.trigger(PETTED_SECS),
            Touch::Tickle => self.tickled.trigger(TICKLED_SECS),
        }
        self.mood_indicator.trigger(MOOD_INDICATOR_SECS);
    }

    pub fn tick(&mut self, dt: f32) {
        self.petted.tick(dt);
        self.tickled.tick(dt);
        self.mood_indicator.tick(dt);
    }

    pub fn cancel_all(&mut self) {
        self.petted.cancel();
        self.tickled.cancel();
        self.mood_indicator.cancel();
    }

    /// Glow while any reaction animation is playing.
    pub fn is_glowing(&self) -> bool {
        self.petted.is_active() || self.tickled.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_ago_units_and_plurals() {
        assert_eq!(format_time_ago(0), "Just now");
        assert_eq!(format_time_ago(59), "Just now");
        assert_eq!(format_time_ago(60), "1 minute ago");
        assert_eq!(format_time_ago(150), "2 minutes ago");
        assert_eq!(format_time_ago(3600), "1 hour ago");
        assert_eq!(format_time_ago(3 * 3600 + 59), "3 hours ago");
        assert_eq!(format_time_ago(86_400), "1 day ago");
        assert_eq!(format_time_ago(5 * 86_400), "5 days ago");
    }

    #[test]
    fn profile_defaults_and_clamp() {
        let p = SpiritProfile::default();
        assert_eq!(p.name, "Lumina");
        assert_eq!(p.title(), "Level 3 Spirit Guide");
        let p = SpiritProfile::new("Ember", 1, 250, 40);
        assert_eq!(p.happiness, 100);
        assert_eq!(p.energy, 40);
    }

    #[test]
    fn touch_height_split() {
        assert_eq!(Touch::from_height(0.6), Touch::Pet);
        assert_eq!(Touch::from_height(0.5), Touch::Tickle);
        assert_eq!(Touch::from_height(-0.3), Touch::Tickle);
        assert_eq!(Touch::Pet.mood(), Mood::Happy);
        assert_eq!(Touch::Tickle.mood().label(), "playful");
    }

    #[test]
    fn countdown_expires_once() {
        let mut c = Countdown::default();
        c.trigger(2.0);
        assert!(!c.tick(1.5));
        assert!(c.is_active());
        assert!(c.tick(0.5));
        assert!(!c.is_active());
        assert!(!c.tick(1.0));
    }

    #[test]
    fn bad_frame_time_leaves_countdown_alone() {
        let mut c = Countdown::default();
        c.trigger(2.0);
        assert!(!c.tick(f32::NAN));
        assert!(!c.tick(-5.0));
        assert!(!c.tick(f32::INFINITY));
        assert_eq!(c.remaining(), 2.0);
        assert!(c.tick(2.0));
        assert!(!c.is_active());
    }

    #[test]
    fn retrigger_restarts_countdown() {
        let mut c = Countdown::default();
        c.trigger(2.0);
        c.tick(1.5);
        c.trigger(2.0);
        c.tick(1.5);
        assert!(c.is_active());
        c.cancel();
        assert!(!c.is_active());
    }

    #[test]
    fn timers_are_independent() {
        let mut t = CosmeticTimers::default();
        t.react(Touch::Pet);
        t.tick(1.0);
        t.react(Touch::Tickle);
        t.tick(1.0);
        // petted expired at 2s, tickled still has 1s, indicator restarted at 1s
        assert!(!t.petted.is_active());
        assert!(t.tickled.is_active());
        assert!(t.mood_indicator.is_active());
        assert!(t.is_glowing());
        t.tick(1.0);
        assert!(!t.is_glowing());
        assert!(t.mood_indicator.is_active());
        t.tick(1.0);
        assert!(!t.mood_indicator.is_active());
    }
}
