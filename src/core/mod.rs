pub mod ambience;
pub mod camera;
pub mod carousel;
pub mod error;
pub mod geometry;
pub mod input;
pub mod loader;
pub mod model;
pub mod motion;
pub mod playback;
pub mod route;
pub mod scene;
pub mod session;
pub mod stage;
pub mod state;
pub mod theme;
pub mod track;
pub mod tween;
pub mod uniforms;
pub mod viewport;

pub use error::{ConfigError, ModelError, TransitionError};
pub use session::{Effect, FrameOutcome, RenderPath, Session, UiAction};
pub use state::{SceneAction, SceneState};
pub use theme::{ShaderTheme, ThemeName};
pub use track::{Selection, Track};

// Shaders bundled as string constants
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
pub static PLANE_WGSL: &str = include_str!("../../shaders/plane.wgsl");
pub static PARTICLES_WGSL: &str = include_str!("../../shaders/particles.wgsl");
pub static MODEL_WGSL: &str = include_str!("../../shaders/model.wgsl");

// Static per-track configuration
pub static TRACKS_JSON: &str = include_str!("../../assets/tracks.json");
