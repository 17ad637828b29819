//! Animation identities.
//!
//! Each [`Animation`] tag maps to a [`MotionProfile`]: a declarative,
//! endlessly repeating keyframe description that the host applies to the
//! element wrapping the avatar. Profiles carry no playback state; switching
//! tags simply replaces the profile.

use serde::Serialize;

use crate::config::Animation;

/// Animated property of the wrapping element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionProperty {
    /// Horizontal offset in pixels.
    X,
    /// Vertical offset in pixels.
    Y,
    /// Rotation in degrees.
    Rotate,
    /// Uniform scale factor.
    Scale,
}

impl MotionProperty {
    /// Value of the property when nothing animates it.
    pub fn rest_value(self) -> f64 {
        match self {
            Self::Scale => 1.0,
            _ => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    Linear,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`, applied to every keyframe segment.
    EaseInOut,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseInOut => cubic_bezier(0.42, 0.58, t),
        }
    }
}

/// Evaluates a cubic bezier easing with control points `(x1, 0)` and `(x2, 1)`.
fn cubic_bezier(x1: f64, x2: f64, t: f64) -> f64 {
    if t <= 0.0 || t >= 1.0 {
        return t;
    }

    let curve = |p1: f64, p2: f64, s: f64| {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    };

    // x(s) is monotonic for x1, x2 in [0, 1]
    let (mut lo, mut hi) = (0.0, 1.0);
    for _ in 0..40 {
        let mid = (lo + hi) / 2.0;
        if curve(x1, x2, mid) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    curve(0.0, 1.0, (lo + hi) / 2.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Repeat {
    Infinite,
}

/// Keyframes for one property, evenly spaced over the profile duration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MotionTrack {
    pub property: MotionProperty,
    pub keyframes: &'static [f64],
}

impl MotionTrack {
    /// Value at `progress` (0..=1) through one cycle.
    pub fn value_at(&self, progress: f64, ease: Ease) -> f64 {
        let frames = self.keyframes;
        match frames.len() {
            0 => return self.property.rest_value(),
            1 => return frames[0],
            _ => {}
        }

        let segments = (frames.len() - 1) as f64;
        let position = progress.clamp(0.0, 1.0) * segments;
        let index = (position.floor() as usize).min(frames.len() - 2);
        let local = ease.apply(position - index as f64);
        frames[index] + (frames[index + 1] - frames[index]) * local
    }
}

/// A named, endlessly repeating motion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MotionProfile {
    /// The tag this profile was resolved for.
    pub animation: &'static str,
    pub tracks: Vec<MotionTrack>,
    pub duration_secs: f64,
    pub repeat: Repeat,
    pub ease: Ease,
}

impl MotionProfile {
    /// Resolves the profile for a tag. Unknown tags idle.
    pub fn for_animation(animation: &Animation) -> Self {
        let (name, tracks, duration_secs, ease): (_, &[MotionTrack], _, _) = match animation {
            Animation::Walk => ("walk", &WALK, 0.5, Ease::EaseInOut),
            Animation::Run => ("run", &RUN, 0.3, Ease::EaseInOut),
            Animation::Thinking => ("thinking", &THINKING, 2.0, Ease::EaseInOut),
            Animation::Studying => ("studying", &STUDYING, 1.5, Ease::EaseInOut),
            Animation::Celebrating => ("celebrating", &CELEBRATING, 0.8, Ease::EaseInOut),
            Animation::Idle => ("idle", &IDLE, 2.0, Ease::EaseInOut),
            Animation::Other(tag) => {
                tracing::debug!(tag = tag.as_str(), "unknown animation, idling");
                ("idle", &IDLE, 2.0, Ease::EaseInOut)
            }
        };

        Self {
            animation: name,
            tracks: tracks.to_vec(),
            duration_secs,
            repeat: Repeat::Infinite,
            ease,
        }
    }

    pub fn track(&self, property: MotionProperty) -> Option<&MotionTrack> {
        self.tracks.iter().find(|t| t.property == property)
    }

    /// Samples every property at `elapsed_secs`, looping forever.
    pub fn sample(&self, elapsed_secs: f64) -> MotionSample {
        let progress = if self.duration_secs > 0.0 {
            elapsed_secs.rem_euclid(self.duration_secs) / self.duration_secs
        } else {
            0.0
        };

        let value = |property: MotionProperty| {
            self.track(property)
                .map_or(property.rest_value(), |t| t.value_at(progress, self.ease))
        };

        MotionSample {
            x: value(MotionProperty::X),
            y: value(MotionProperty::Y),
            rotate: value(MotionProperty::Rotate),
            scale: value(MotionProperty::Scale),
        }
    }
}

const IDLE: [MotionTrack; 1] = [MotionTrack {
    property: MotionProperty::Y,
    keyframes: &[0.0, -5.0, 0.0],
}];

const WALK: [MotionTrack; 1] = [MotionTrack {
    property: MotionProperty::X,
    keyframes: &[-5.0, 5.0, -5.0],
}];

const RUN: [MotionTrack; 1] = [MotionTrack {
    property: MotionProperty::X,
    keyframes: &[-10.0, 10.0, -10.0],
}];

const THINKING: [MotionTrack; 1] = [MotionTrack {
    property: MotionProperty::Rotate,
    keyframes: &[0.0, 5.0, 0.0, -5.0, 0.0],
}];

const STUDYING: [MotionTrack; 1] = [MotionTrack {
    property: MotionProperty::Scale,
    keyframes: &[1.0, 1.05, 1.0],
}];

const CELEBRATING: [MotionTrack; 2] = [
    MotionTrack {
        property: MotionProperty::Y,
        keyframes: &[0.0, -20.0, 0.0],
    },
    MotionTrack {
        property: MotionProperty::Rotate,
        keyframes: &[0.0, 10.0, 0.0, -10.0, 0.0],
    },
];

/// Property values at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionSample {
    pub x: f64,
    pub y: f64,
    pub rotate: f64,
    pub scale: f64,
}

impl Default for MotionSample {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotate: 0.0,
            scale: 1.0,
        }
    }
}

impl MotionSample {
    /// SVG `transform` value, rotating and scaling about the canvas center.
    pub fn to_svg_transform(&self) -> String {
        format!(
            "translate({:.2} {:.2}) rotate({:.2} 50 50) translate(50 50) scale({:.3}) translate(-50 -50)",
            self.x, self.y, self.rotate, self.scale
        )
    }
}

// ============================================================================
// Animator
// ============================================================================

/// Holds the currently selected profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Animator {
    animation: Animation,
    profile: MotionProfile,
}

impl Default for Animator {
    fn default() -> Self {
        Self::new(Animation::Idle)
    }
}

impl Animator {
    pub fn new(animation: Animation) -> Self {
        let profile = MotionProfile::for_animation(&animation);
        Self { animation, profile }
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn profile(&self) -> &MotionProfile {
        &self.profile
    }

    /// Switches to another animation. Returns true if the profile changed.
    pub fn select(&mut self, animation: Animation) -> bool {
        if animation == self.animation {
            return false;
        }
        self.profile = MotionProfile::for_animation(&animation);
        self.animation = animation;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_profile_loops_forever() {
        for animation in Animation::KNOWN {
            let profile = MotionProfile::for_animation(animation);
            assert_eq!(profile.repeat, Repeat::Infinite);
            assert!(profile.duration_secs > 0.0);
            assert!(!profile.tracks.is_empty());
            assert_eq!(profile.animation, animation.as_str());
        }
    }

    #[test]
    fn profile_table() {
        let idle = MotionProfile::for_animation(&Animation::Idle);
        assert_eq!(idle.track(MotionProperty::Y).unwrap().keyframes, [0.0, -5.0, 0.0]);
        assert_eq!(idle.ease, Ease::EaseInOut);

        let walk = MotionProfile::for_animation(&Animation::Walk);
        let run = MotionProfile::for_animation(&Animation::Run);
        assert!(run.duration_secs < walk.duration_secs);
        assert!(walk.track(MotionProperty::X).is_some());

        let celebrating = MotionProfile::for_animation(&Animation::Celebrating);
        assert!(celebrating.track(MotionProperty::Y).is_some());
        assert!(celebrating.track(MotionProperty::Rotate).is_some());

        let studying = MotionProfile::for_animation(&Animation::Studying);
        assert_eq!(studying.track(MotionProperty::Scale).unwrap().keyframes, [1.0, 1.05, 1.0]);
    }

    #[test]
    fn unknown_animation_idles() {
        let profile = MotionProfile::for_animation(&Animation::from("moonwalk"));
        assert_eq!(profile, MotionProfile::for_animation(&Animation::Idle));
    }

    #[test]
    fn sampling_hits_keyframes() {
        let walk = MotionProfile::for_animation(&Animation::Walk);
        assert_eq!(walk.sample(0.0).x, -5.0);
        assert!((walk.sample(0.25).x - 5.0).abs() < 1e-9);
        // loops
        assert!((walk.sample(0.5).x - walk.sample(0.0).x).abs() < 1e-9);
        assert!((walk.sample(10.25).x - 5.0).abs() < 1e-9);

        let idle = MotionProfile::for_animation(&Animation::Idle);
        let s = idle.sample(1.0);
        assert!((s.y + 5.0).abs() < 1e-9);
        assert_eq!(s.x, 0.0);
        assert_eq!(s.scale, 1.0);
    }

    #[test]
    fn ease_endpoints_are_stable() {
        for ease in [Ease::Linear, Ease::EaseInOut] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
            assert!(ease.apply(0.25) < ease.apply(0.75));
        }
        assert!((Ease::EaseInOut.apply(0.5) - 0.5).abs() < 1e-9);
        assert!((Ease::EaseInOut.apply(0.25) - 0.129_162).abs() < 1e-5);
    }

    #[test]
    fn every_profile_eases_in_and_out() {
        for animation in Animation::KNOWN {
            assert_eq!(MotionProfile::for_animation(animation).ease, Ease::EaseInOut);
        }
    }

    #[test]
    fn walk_eases_between_keyframes() {
        let walk = MotionProfile::for_animation(&Animation::Walk);
        // a quarter of the way into the first segment; linear would give -2.5
        let x = walk.sample(0.0625).x;
        assert!((x + 3.708).abs() < 1e-2, "x = {x}");

        let run = MotionProfile::for_animation(&Animation::Run);
        assert!((run.sample(0.075).x - walk.sample(0.125).x * 2.0).abs() < 1e-9);
    }

    #[test]
    fn animator_swaps_profiles_atomically() {
        let mut animator = Animator::default();
        assert_eq!(animator.profile().animation, "idle");

        assert!(animator.select(Animation::Thinking));
        assert_eq!(animator.animation(), &Animation::Thinking);
        assert_eq!(animator.profile().animation, "thinking");

        assert!(!animator.select(Animation::Thinking));
    }

    #[test]
    fn rest_sample_transform() {
        assert_eq!(
            MotionSample::default().to_svg_transform(),
            "translate(0.00 0.00) rotate(0.00 50 50) translate(50 50) scale(1.000) translate(-50 -50)"
        );
    }
}
