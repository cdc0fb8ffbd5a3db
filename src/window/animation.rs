use crate::config::AnimationSpeeds;
use crate::constants::ANIMATION_EPSILON;
use crate::geometry::{Point, Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationKind {
    Open,
    Close,
    Minimize,
    Restore,
}

impl AnimationKind {
    pub fn speed(self, speeds: &AnimationSpeeds) -> f32 {
        match self {
            AnimationKind::Open => speeds.open,
            AnimationKind::Close => speeds.close,
            AnimationKind::Minimize => speeds.minimize,
            AnimationKind::Restore => speeds.restore,
        }
    }

    /// Map linear progress to interpolation weight.
    pub fn curve(self, t: f32) -> f32 {
        match self {
            AnimationKind::Open | AnimationKind::Close => t.clamp(0.0, 1.0),
            AnimationKind::Minimize => ease_in(t),
            AnimationKind::Restore => ease_out(t),
        }
    }
}

/// Cubic ease-in: starts slow and accelerates toward the target.
pub fn ease_in(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Mirror of [`ease_in`]: leaves fast and settles into the target.
pub fn ease_out(t: f32) -> f32 {
    1.0 - ease_in(1.0 - t)
}

/// An in-flight geometric transition between two rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub kind: AnimationKind,
    pub start: Rect,
    pub target: Rect,
    pub progress: f32,
}

impl Animation {
    pub fn new(kind: AnimationKind, start: Rect, target: Rect) -> Self {
        Self {
            kind,
            start,
            target,
            progress: 0.0,
        }
    }

    /// Scale 0 → 1 about the center of `rect`.
    pub fn open(rect: Rect) -> Self {
        Self::new(
            AnimationKind::Open,
            Rect::centered(rect.center(), Size::ZERO),
            rect,
        )
    }

    /// Scale 1 → 0 about the center of `rect`.
    pub fn close(rect: Rect) -> Self {
        Self::new(
            AnimationKind::Close,
            rect,
            Rect::centered(rect.center(), Size::ZERO),
        )
    }

    pub fn start_position(&self) -> Point {
        self.start.position()
    }

    pub fn start_size(&self) -> Size {
        self.start.size()
    }

    pub fn target_position(&self) -> Point {
        self.target.position()
    }

    pub fn target_size(&self) -> Size {
        self.target.size()
    }

    /// Advance by `speed * dt`. Returns `true` once progress reaches 1.
    pub fn advance(&mut self, dt: f32, speeds: &AnimationSpeeds) -> bool {
        let step = self.kind.speed(speeds) * dt.max(0.0);
        if step.is_finite() {
            self.progress = (self.progress + step).min(1.0);
        } else {
            self.progress = 1.0;
        }
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0 - ANIMATION_EPSILON
    }

    /// Rectangle to draw at the current progress.
    pub fn current(&self) -> Rect {
        Rect::lerp(self.start, self.target, self.kind.curve(self.progress))
    }

    /// Uniform scale factor for open/close, where the rectangle shrinks about
    /// its center. Other kinds report 1.
    pub fn scale(&self) -> f32 {
        match self.kind {
            AnimationKind::Open => self.kind.curve(self.progress),
            AnimationKind::Close => 1.0 - self.kind.curve(self.progress),
            _ => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curves_hit_endpoints() {
        for kind in [
            AnimationKind::Open,
            AnimationKind::Close,
            AnimationKind::Minimize,
            AnimationKind::Restore,
        ] {
            assert_eq!(kind.curve(0.0), 0.0);
            assert_eq!(kind.curve(1.0), 1.0);
        }
    }

    #[test]
    fn minimize_accelerates_restore_decelerates() {
        assert!(ease_in(0.25) < 0.25);
        assert!(ease_out(0.25) > 0.25);
        assert!((ease_in(0.3) - (1.0 - ease_out(0.7))).abs() < 1e-6);
    }

    #[test]
    fn duration_depends_on_kind_not_distance() {
        let speeds = AnimationSpeeds::default();
        let near = Rect::new(0.0, 0.0, 10.0, 10.0);
        let far = Rect::new(1500.0, 900.0, 10.0, 10.0);
        let nudged = Rect::new(5.0, 5.0, 10.0, 10.0);
        let mut a = Animation::new(AnimationKind::Minimize, near, nudged);
        let mut b = Animation::new(AnimationKind::Minimize, near, far);
        let dt = 0.05;
        let mut frames_a = 0;
        while !a.advance(dt, &speeds) {
            frames_a += 1;
        }
        let mut frames_b = 0;
        while !b.advance(dt, &speeds) {
            frames_b += 1;
        }
        assert_eq!(frames_a, frames_b);
    }

    #[test]
    fn open_scales_about_center() {
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        let mut anim = Animation::open(rect);
        assert_eq!(anim.current().center(), rect.center());
        assert_eq!(anim.current().size(), Size::ZERO);
        anim.progress = 0.5;
        assert_eq!(anim.current(), Rect::new(150.0, 125.0, 100.0, 50.0));
        assert_eq!(anim.scale(), 0.5);
    }

    #[test]
    fn non_finite_step_completes() {
        let speeds = AnimationSpeeds::default();
        let mut anim = Animation::close(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(anim.advance(f32::INFINITY, &speeds));
        assert_eq!(anim.progress, 1.0);
    }
}
