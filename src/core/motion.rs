use glam::Vec2;

/// Depth band for the stage tunnel: objects travel toward `far` and re-enter
/// at `near` on the tick they cross it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DepthWrap {
    pub near: f32,
    pub far: f32,
}

impl DepthWrap {
    pub fn advance(&self, z: f32, distance: f32) -> f32 {
        let z = z.max(self.near) + distance.max(0.0);
        if z > self.far {
            self.near
        } else {
            z
        }
    }

    pub fn contains(&self, z: f32) -> bool {
        z >= self.near && z <= self.far
    }
}

/// Rising embers: move up, snap back to `floor` once past `ceiling`.
#[inline]
pub fn rise_and_wrap(y: f32, speed: f32, dt: f32, floor: f32, ceiling: f32) -> f32 {
    let y = y + speed * dt;
    if y > ceiling {
        floor
    } else {
        y
    }
}

/// Exponentially damped follow of a target offset.
#[derive(Clone, Copy, Debug)]
pub struct LookOffset {
    pub current: Vec2,
    pub target: Vec2,
    pub tau_sec: f32,
}

impl LookOffset {
    pub fn new(tau_sec: f32) -> Self {
        Self {
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            tau_sec,
        }
    }

    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    pub fn step(&mut self, dt_sec: f32) -> Vec2 {
        let alpha = if self.tau_sec <= 0.0 {
            1.0
        } else {
            1.0 - (-dt_sec.max(0.0) / self.tau_sec).exp()
        };
        self.current += (self.target - self.current) * alpha;
        self.current
    }
}
