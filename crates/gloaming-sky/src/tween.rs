//! Eased interpolation of rendered body state between ticks.

use glam::Vec2;
use gloaming_core::config::MotionConfig;
use gloaming_core::math::{progress, Easing};
use gloaming_core::Millis;

/// Values a tween can interpolate.
pub trait Lerp: Copy {
    fn lerp_to(self, target: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp_to(self, target: Self, t: f32) -> Self {
        self + (target - self) * t
    }
}

impl Lerp for Vec2 {
    fn lerp_to(self, target: Self, t: f32) -> Self {
        self.lerp(target, t)
    }
}

/// One interpolation task: start value, target, start time, duration, easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    start: Millis,
    duration: Millis,
    easing: Easing,
}

impl<T: Lerp> Tween<T> {
    /// A tween already at rest on `value`.
    pub fn settled(value: T, easing: Easing) -> Self {
        Self {
            from: value,
            to: value,
            start: 0.0,
            duration: 0.0,
            easing,
        }
    }

    pub fn sample(&self, now: Millis) -> T {
        let t = self.easing.apply(progress(now, self.start, self.duration));
        self.from.lerp_to(self.to, t)
    }

    pub fn is_done(&self, now: Millis) -> bool {
        progress(now, self.start, self.duration) >= 1.0
    }

    pub fn target(&self) -> T {
        self.to
    }

    /// Head for `target`, starting from wherever the tween is at `now`.
    pub fn retarget(&mut self, target: T, now: Millis, duration: Millis) {
        self.from = self.sample(now);
        self.to = target;
        self.start = now;
        self.duration = duration;
    }
}

/// What the render surface draws for one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFrame {
    /// x: horizontal percent, y: vertical offset in vh.
    pub position: Vec2,
    pub opacity: f32,
}

/// Position and opacity tweens for one body.
#[derive(Debug, Clone, Copy)]
pub struct BodyTween {
    position: Tween<Vec2>,
    opacity: Tween<f32>,
    position_ms: Millis,
    opacity_ms: Millis,
}

impl BodyTween {
    pub fn new(initial: BodyFrame, motion: &MotionConfig) -> Self {
        Self {
            position: Tween::settled(initial.position, motion.position_easing),
            opacity: Tween::settled(initial.opacity, motion.opacity_easing),
            position_ms: motion.position_tween_ms,
            opacity_ms: motion.opacity_tween_ms,
        }
    }

    pub fn retarget(&mut self, target: BodyFrame, now: Millis) {
        self.position.retarget(target.position, now, self.position_ms);
        self.opacity.retarget(target.opacity, now, self.opacity_ms);
    }

    pub fn sample(&self, now: Millis) -> BodyFrame {
        BodyFrame {
            position: self.position.sample(now),
            opacity: self.opacity.sample(now),
        }
    }

    pub fn target(&self) -> BodyFrame {
        BodyFrame {
            position: self.position.target(),
            opacity: self.opacity.target(),
        }
    }

    pub fn is_done(&self, now: Millis) -> bool {
        self.position.is_done(now) && self.opacity.is_done(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(x: f32, y: f32, opacity: f32) -> BodyFrame {
        BodyFrame {
            position: Vec2::new(x, y),
            opacity,
        }
    }

    #[test]
    fn test_settled_tween_holds_value() {
        let tween = Tween::settled(3.0_f32, Easing::QuadOut);
        assert_eq!(tween.sample(0.0), 3.0);
        assert_eq!(tween.sample(1e9), 3.0);
        assert!(tween.is_done(0.0));
    }

    #[test]
    fn test_tween_eases_and_completes() {
        let mut tween = Tween::settled(0.0_f32, Easing::QuadOut);
        tween.retarget(1.0, 1000.0, 500.0);
        assert_eq!(tween.sample(1000.0), 0.0);
        let mid = tween.sample(1250.0);
        assert!((mid - 0.75).abs() < 1e-6, "{mid}");
        assert_eq!(tween.sample(1500.0), 1.0);
        assert!(tween.is_done(1500.0));
    }

    #[test]
    fn test_retarget_midway_is_continuous() {
        let mut tween = Tween::settled(0.0_f32, Easing::Linear);
        tween.retarget(10.0, 0.0, 100.0);
        let before = tween.sample(50.0);
        tween.retarget(-10.0, 50.0, 100.0);
        assert!((tween.sample(50.0) - before).abs() < 1e-6);
        assert!((tween.sample(150.0) + 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_body_tween_finishes_within_tick() {
        let motion = MotionConfig::default();
        let mut body = BodyTween::new(frame(50.0, 50.0, 0.0), &motion);
        body.retarget(frame(20.0, -10.0, 1.0), 0.0);

        // opacity settles long before position
        let early = body.sample(motion.opacity_tween_ms);
        assert_eq!(early.opacity, 1.0);
        assert!(early.position.x > 20.0);
        assert!(!body.is_done(motion.opacity_tween_ms));

        let done = body.sample(motion.position_tween_ms);
        assert_eq!(done, frame(20.0, -10.0, 1.0));
        assert!(body.is_done(motion.position_tween_ms));
        assert_eq!(body.target(), done);
    }
}
