use crate::constants::*;
use crate::core::motion::{rise_and_wrap, DepthWrap};
use crate::core::state::SceneState;
use crate::core::theme::ThemeName;
use crate::core::tween::ScenePose;
use glam::{Mat4, Vec3};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub speed: f32,
    pub size: f32,
}

/// Placement of one deformable plane; the plane lies flat on XZ around `offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaneInstance {
    pub offset: Vec3,
    pub scale: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLights {
    pub ambient: f32,
    pub spot_position: Vec3,
    pub spot_intensity: f32,
    pub color: [f32; 3],
}

impl Default for SceneLights {
    fn default() -> Self {
        Self {
            ambient: 0.7,
            spot_position: Vec3::new(0.0, 80.0, 10.0),
            spot_intensity: 0.55,
            color: [1.0, 1.0, 1.0],
        }
    }
}

/// Camera pose and overlay opacity each state settles into.
pub fn pose_for(state: SceneState) -> ScenePose {
    match state {
        SceneState::Intro => ScenePose {
            eye: Vec3::new(0.0, 2.0, 14.0),
            look_at: Vec3::new(0.0, 1.0, 0.0),
            overlay_opacity: 1.0,
        },
        SceneState::Menu => ScenePose {
            eye: Vec3::new(0.0, 6.0, 26.0),
            look_at: Vec3::new(0.0, 2.0, 0.0),
            overlay_opacity: 0.6,
        },
        SceneState::Stage => ScenePose {
            eye: Vec3::new(0.0, 22.0, 60.0),
            look_at: Vec3::new(0.0, 0.0, -120.0),
            overlay_opacity: 0.0,
        },
    }
}

pub struct IntroScene {
    pub lights: SceneLights,
    pub model_transform: Mat4,
    pub embers: Vec<Particle>,
    pub ember_tint: [f32; 3],
}

impl IntroScene {
    pub fn build<R: Rng>(rng: &mut R) -> Self {
        let embers = (0..EMBER_COUNT)
            .map(|_| Particle {
                position: Vec3::new(
                    rng.gen_range(-30.0..30.0),
                    rng.gen_range(EMBER_FLOOR..EMBER_CEILING),
                    rng.gen_range(-30.0..5.0),
                ),
                speed: rng.gen_range(EMBER_SPEED_MIN..EMBER_SPEED_MAX),
                size: rng.gen_range(0.05..0.18),
            })
            .collect();
        Self {
            lights: SceneLights::default(),
            model_transform: Mat4::from_translation(Vec3::new(0.0, -2.0, -6.0)),
            embers,
            ember_tint: EMBER_TINT,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        for p in &mut self.embers {
            p.position.y = rise_and_wrap(p.position.y, p.speed, dt, EMBER_FLOOR, EMBER_CEILING);
        }
    }
}

pub struct StageScene {
    pub theme: ThemeName,
    pub lights: SceneLights,
    pub middle_plane: PlaneInstance,
    pub middle_visible: bool,
    pub verse_planes: Vec<PlaneInstance>,
    pub verse_visible: bool,
    pub particles: Vec<Particle>,
    pub particle_tint: [f32; 3],
    pub wrap: DepthWrap,
}

impl StageScene {
    pub fn build<R: Rng>(theme: ThemeName, rng: &mut R) -> Self {
        let wrap = DepthWrap {
            near: DEPTH_NEAR,
            far: DEPTH_FAR,
        };
        let row_spacing = (wrap.far - wrap.near) / VERSE_ROWS as f32;
        let half_cols = (VERSE_COLUMNS as f32 - 1.0) / 2.0;
        let mut verse_planes = Vec::with_capacity(VERSE_COLUMNS * VERSE_ROWS);
        for row in 0..VERSE_ROWS {
            for col in 0..VERSE_COLUMNS {
                verse_planes.push(PlaneInstance {
                    offset: Vec3::new(
                        (col as f32 - half_cols) * VERSE_COLUMN_SPACING,
                        VERSE_PLANE_Y,
                        wrap.near + row as f32 * row_spacing,
                    ),
                    scale: 1.0,
                });
            }
        }
        let particles = (0..STAGE_PARTICLE_COUNT)
            .map(|_| Particle {
                position: Vec3::new(
                    rng.gen_range(-220.0..220.0),
                    rng.gen_range(5.0..120.0),
                    rng.gen_range(wrap.near..wrap.far),
                ),
                speed: rng.gen_range(STAGE_PARTICLE_SPEED_MIN..STAGE_PARTICLE_SPEED_MAX),
                size: rng.gen_range(0.4..1.2),
            })
            .collect();
        Self {
            theme,
            lights: SceneLights::default(),
            middle_plane: PlaneInstance {
                offset: MIDDLE_PLANE_OFFSET,
                scale: 1.0,
            },
            middle_visible: true,
            verse_planes,
            verse_visible: false,
            particles,
            particle_tint: theme.theme().particle_tint,
            wrap,
        }
    }

    /// Depth-advance particles and verse planes.
    pub fn advance(&mut self, dt: f32) {
        let wrap = self.wrap;
        for p in &mut self.particles {
            p.position.z = wrap.advance(p.position.z, p.speed * dt);
        }
        for plane in &mut self.verse_planes {
            plane.offset.z = wrap.advance(plane.offset.z, VERSE_PLANE_SPEED * dt);
        }
    }

    /// Swap the middle plane for the verse grid. Returns false if already done.
    pub fn reveal_verse(&mut self) -> bool {
        if self.verse_visible {
            return false;
        }
        self.middle_visible = false;
        self.verse_visible = true;
        true
    }
}
