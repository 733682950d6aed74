use crate::constants::SPECTRUM_UNIFORM_LEN;

/// Stage themes selectable per track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeName {
    #[default]
    Base,
    Rave,
    Blue,
    Green,
    Violet,
}

impl ThemeName {
    pub const ALL: [ThemeName; 5] = [
        ThemeName::Base,
        ThemeName::Rave,
        ThemeName::Blue,
        ThemeName::Green,
        ThemeName::Violet,
    ];

    /// Resolve a track's shader key. Unknown or absent keys fall back to
    /// [`ThemeName::Base`].
    pub fn from_key(key: Option<&str>) -> Self {
        let Some(key) = key else {
            return ThemeName::Base;
        };
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(key))
            .unwrap_or_default()
    }

    pub fn key(self) -> &'static str {
        match self {
            ThemeName::Base => "base",
            ThemeName::Rave => "rave",
            ThemeName::Blue => "blue",
            ThemeName::Green => "green",
            ThemeName::Violet => "violet",
        }
    }

    pub fn theme(self) -> &'static ShaderTheme {
        match self {
            ThemeName::Base => &BASE,
            ThemeName::Rave => &RAVE,
            ThemeName::Blue => &BLUE,
            ThemeName::Green => &GREEN,
            ThemeName::Violet => &VIOLET,
        }
    }
}

/// Fragment coloring rule. Discriminants are the `palette` ids in WGSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum Palette {
    Intro = 0,
    Base = 1,
    Violet = 2,
    Green = 3,
    Rave = 4,
    Blue = 5,
}

/// Plane program data. `displace` and `color` mirror `shaders/plane.wgsl`
/// formula for formula.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderTheme {
    pub palette: Palette,
    pub divisor: f32,
    pub threshold: f32,
    pub particle_tint: [f32; 3],
}

/// Program used by the stage's single middle plane before the verse.
pub const INTRO_PLANE: ShaderTheme = ShaderTheme {
    palette: Palette::Intro,
    divisor: 50.0,
    threshold: 3.0,
    particle_tint: [1.0, 1.0, 1.0],
};

pub const BASE: ShaderTheme = ShaderTheme {
    palette: Palette::Base,
    divisor: 30.0,
    threshold: 3.0,
    particle_tint: [1.0, 0.9, 0.75],
};

pub const VIOLET: ShaderTheme = ShaderTheme {
    palette: Palette::Violet,
    divisor: 30.0,
    threshold: 3.0,
    particle_tint: [0.7, 0.4, 1.0],
};

pub const GREEN: ShaderTheme = ShaderTheme {
    palette: Palette::Green,
    divisor: 30.0,
    threshold: 3.0,
    particle_tint: [0.35, 1.0, 0.5],
};

pub const RAVE: ShaderTheme = ShaderTheme {
    palette: Palette::Rave,
    divisor: 30.0,
    threshold: 2.9,
    particle_tint: [1.0, 0.2, 0.1],
};

pub const BLUE: ShaderTheme = ShaderTheme {
    palette: Palette::Blue,
    divisor: 30.0,
    threshold: 2.9,
    particle_tint: [0.3, 0.55, 1.0],
};

/// Spectrum index sampled for a plane coordinate (round half up on |coord|).
#[inline]
pub fn sample_index(coord: f32) -> usize {
    (coord.abs() + 0.5).floor() as usize
}

/// Spectrum magnitude for a plane coordinate; indices past the uniform read 0.
#[inline]
pub fn spectrum_sample(spectrum: &[f32; SPECTRUM_UNIFORM_LEN], coord: f32) -> f32 {
    spectrum.get(sample_index(coord)).copied().unwrap_or(0.0)
}

impl ShaderTheme {
    /// Height of a plane vertex at local `(x, y)`.
    pub fn displace(
        &self,
        x: f32,
        y: f32,
        spectrum: &[f32; SPECTRUM_UNIFORM_LEN],
        amplitude: f32,
    ) -> f32 {
        let k = self.divisor;
        (spectrum_sample(spectrum, x) / k + spectrum_sample(spectrum, y) / k).sin() * amplitude
    }

    /// Fragment color at local `(x, y)` for displaced height `z`.
    pub fn color(&self, x: f32, y: f32, z: f32) -> [f32; 3] {
        if z <= self.threshold {
            return [0.0, 0.0, 0.0];
        }
        let (x, y) = (x.abs(), y.abs());
        let diag = ((x + y).abs() / 2.0) / 32.0;
        let rgb = match self.palette {
            Palette::Intro => [(32.0 - x) / 32.0, (32.0 - y) / 32.0, diag],
            Palette::Base => [z.abs(), (32.0 - y) / 32.0, diag],
            Palette::Violet => [diag, (32.0 - y) / 32.0, z.abs()],
            Palette::Green => [diag, z.abs(), (32.0 - y) / 32.0],
            Palette::Rave => [(y + z).abs(), (32.0 - y) / 64.0, 0.0],
            Palette::Blue => {
                let r = if y == 0.0 { 1.0 } else { (z / y).abs() / 32.0 };
                [r, (32.0 - y) / 64.0, (y + z).abs()]
            }
        };
        rgb.map(|c| c.clamp(0.0, 1.0))
    }
}
