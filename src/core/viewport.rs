use crate::constants::MAX_PIXEL_RATIO;
use crate::core::camera::Camera;

/// CSS-pixel viewport as reported by the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub css_width: f64,
    pub css_height: f64,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    /// Renderer pixel ratio, capped to keep fill rate sane on dense displays.
    pub fn pixel_ratio(&self) -> f64 {
        if self.device_pixel_ratio.is_finite() && self.device_pixel_ratio > 0.0 {
            self.device_pixel_ratio.min(MAX_PIXEL_RATIO)
        } else {
            1.0
        }
    }

    pub fn aspect(&self) -> f32 {
        (self.css_width.max(1.0) / self.css_height.max(1.0)) as f32
    }

    /// Backing-store size of the drawing surface.
    pub fn backing_size(&self) -> (u32, u32) {
        let pr = self.pixel_ratio();
        (
            ((self.css_width * pr) as u32).max(1),
            ((self.css_height * pr) as u32).max(1),
        )
    }
}

/// Surface state derived from the latest viewport.
#[derive(Clone, Debug, Default)]
pub struct Surface {
    viewport: Option<Viewport>,
}

impl Surface {
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Apply a resize to the cameras. Returns false when nothing changed.
    pub fn resize(&mut self, next: Viewport, cameras: &mut [&mut Camera]) -> bool {
        if self.viewport == Some(next) {
            return false;
        }
        self.viewport = Some(next);
        let aspect = next.aspect();
        for camera in cameras.iter_mut() {
            camera.aspect = aspect;
        }
        true
    }
}
