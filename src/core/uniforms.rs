use crate::constants::{DEFAULT_AMPLITUDE, SPECTRUM_UNIFORM_LEN};
use crate::core::theme::ShaderTheme;
use glam::{Mat4, Vec3};

/// Per-frame values shared by every shader-backed mesh in the active scene.
///
/// The render loop is the only writer; all pipelines read the packed
/// [`FrameUniforms`] from bind group 0.
#[derive(Clone, Debug)]
pub struct UniformBundle {
    pub time: f32,
    pub amplitude: f32,
    pub spectrum: [f32; SPECTRUM_UNIFORM_LEN],
}

impl Default for UniformBundle {
    fn default() -> Self {
        Self {
            time: 0.0,
            amplitude: DEFAULT_AMPLITUDE,
            spectrum: [0.0; SPECTRUM_UNIFORM_LEN],
        }
    }
}

impl UniformBundle {
    /// Copy the leading analyser bins; missing bins read as silence.
    pub fn push_spectrum(&mut self, bins: &[u8]) {
        for (i, slot) in self.spectrum.iter_mut().enumerate() {
            *slot = bins.get(i).copied().unwrap_or(0) as f32;
        }
    }

    pub fn clear_spectrum(&mut self) {
        self.spectrum = [0.0; SPECTRUM_UNIFORM_LEN];
    }

    pub fn pack(&self, view_proj: Mat4, camera_right: Vec3, camera_up: Vec3) -> FrameUniforms {
        let mut spectrum = [[0.0_f32; 4]; SPECTRUM_UNIFORM_LEN / 4];
        for (i, v) in self.spectrum.iter().enumerate() {
            spectrum[i / 4][i % 4] = *v;
        }
        FrameUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            camera_right: camera_right.extend(0.0).to_array(),
            camera_up: camera_up.extend(0.0).to_array(),
            time: self.time,
            amplitude: self.amplitude,
            _pad: [0.0; 2],
            spectrum,
        }
    }
}

/// GPU layout of the shared bundle (group 0, binding 0 in every WGSL file).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    pub time: f32,
    pub amplitude: f32,
    pub _pad: [f32; 2],
    // array<vec4<f32>, 16> keeps the 16-byte element stride uniforms require
    pub spectrum: [[f32; 4]; SPECTRUM_UNIFORM_LEN / 4],
}

/// Per-batch theme parameters for `plane.wgsl` (group 1).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ThemeUniforms {
    pub divisor: f32,
    pub threshold: f32,
    pub palette: u32,
    pub _pad: u32,
}

impl From<&ShaderTheme> for ThemeUniforms {
    fn from(theme: &ShaderTheme) -> Self {
        Self {
            divisor: theme.divisor,
            threshold: theme.threshold,
            palette: theme.palette as u32,
            _pad: 0,
        }
    }
}
