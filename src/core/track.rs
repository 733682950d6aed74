use crate::core::error::ConfigError;
use crate::core::theme::ThemeName;
use serde::Deserialize;

/// One carousel entry from the static track configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub cover: String,
    pub src: String,
    #[serde(default)]
    pub verse_start: f32,
    #[serde(default)]
    pub shader: Option<String>,
}

impl Track {
    pub fn theme(&self) -> ThemeName {
        ThemeName::from_key(self.shader.as_deref())
    }

    pub fn selection(&self) -> Selection {
        Selection {
            src: self.src.clone(),
            verse_start: self.verse_start,
            theme: self.theme(),
        }
    }

    fn validate(&self, index: usize) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::MissingTitle { index });
        }
        if self.src.trim().is_empty() {
            return Err(ConfigError::MissingSource {
                index,
                title: self.title.clone(),
            });
        }
        if !self.verse_start.is_finite() || self.verse_start < 0.0 {
            return Err(ConfigError::InvalidVerseStart {
                index,
                title: self.title.clone(),
                value: self.verse_start,
            });
        }
        Ok(())
    }
}

/// Parse and validate the track list.
pub fn parse_tracks(json: &str) -> Result<Vec<Track>, ConfigError> {
    let tracks: Vec<Track> = serde_json::from_str(json)?;
    if tracks.is_empty() {
        return Err(ConfigError::NoTracks);
    }
    for (i, t) in tracks.iter().enumerate() {
        t.validate(i)?;
    }
    Ok(tracks)
}

/// What the stage needs from the centered slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub src: String,
    pub verse_start: f32,
    pub theme: ThemeName,
}

impl Selection {
    /// Build a selection from a slide's `data-src`, `data-verse-start` and
    /// `data-shader` attributes.
    pub fn from_attributes(
        src: Option<&str>,
        verse_start: Option<&str>,
        shader: Option<&str>,
    ) -> Result<Self, ConfigError> {
        let src = src
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingAttribute { name: "data-src" })?;
        let verse_start = match verse_start.map(str::trim) {
            None | Some("") => 0.0,
            Some(raw) => raw
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(|| ConfigError::MalformedAttribute {
                    name: "data-verse-start",
                    value: raw.to_string(),
                })?,
        };
        Ok(Self {
            src: src.to_string(),
            verse_start,
            theme: ThemeName::from_key(shader),
        })
    }
}
