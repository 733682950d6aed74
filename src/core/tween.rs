use glam::Vec3;

/// Camera placement plus overlay opacity; the quantities a scene transition animates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScenePose {
    pub eye: Vec3,
    pub look_at: Vec3,
    pub overlay_opacity: f32,
}

impl ScenePose {
    pub fn lerp(&self, other: &ScenePose, t: f32) -> ScenePose {
        ScenePose {
            eye: self.eye.lerp(other.eye, t),
            look_at: self.look_at.lerp(other.look_at, t),
            overlay_opacity: self.overlay_opacity
                + (other.overlay_opacity - self.overlay_opacity) * t,
        }
    }
}

/// Power-2 ease in/out over `t` in [0, 1].
#[inline]
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

/// Fixed-duration eased interpolation between two poses.
#[derive(Clone, Copy, Debug)]
pub struct PoseTween {
    pub from: ScenePose,
    pub to: ScenePose,
    pub started_at: f64,
    pub duration: f64,
}

impl PoseTween {
    pub fn progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0) as f32
    }

    pub fn sample(&self, now: f64) -> ScenePose {
        self.from.lerp(&self.to, ease_in_out(self.progress(now)))
    }

    pub fn is_done(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }
}
