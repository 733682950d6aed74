/// Track playback as seen from the page, including blocked autoplay.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    /// `play()` issued, promise not settled yet.
    Pending { src: String },
    /// The browser refused to start without a user gesture.
    Blocked { src: String },
    Playing { src: String },
    Paused { src: String },
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackGate {
    state: PlaybackState,
}

impl PlaybackGate {
    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn request(&mut self, src: &str) {
        self.state = PlaybackState::Pending {
            src: src.to_string(),
        };
    }

    /// The play promise resolved. Ignored if the request was superseded.
    pub fn started(&mut self, src: &str) {
        if matches!(&self.state, PlaybackState::Pending { src: s } | PlaybackState::Blocked { src: s } if s == src)
        {
            self.state = PlaybackState::Playing {
                src: src.to_string(),
            };
        }
    }

    /// The play promise rejected. Ignored if the request was superseded.
    pub fn blocked(&mut self, src: &str) {
        if matches!(&self.state, PlaybackState::Pending { src: s } if s == src) {
            self.state = PlaybackState::Blocked {
                src: src.to_string(),
            };
        }
    }

    pub fn pause(&mut self) {
        let src = match &self.state {
            PlaybackState::Playing { src }
            | PlaybackState::Pending { src }
            | PlaybackState::Blocked { src } => src.clone(),
            _ => return,
        };
        self.state = PlaybackState::Paused { src };
    }

    /// Source to resume, if playback was paused.
    pub fn resume(&mut self) -> Option<String> {
        let PlaybackState::Paused { src } = &self.state else {
            return None;
        };
        let src = src.clone();
        self.request(&src);
        Some(src)
    }

    pub fn stop(&mut self) {
        self.state = PlaybackState::Idle;
    }

    /// On a user gesture: the blocked source to retry, if any.
    pub fn take_retry(&mut self) -> Option<String> {
        let PlaybackState::Blocked { src } = &self.state else {
            return None;
        };
        let src = src.clone();
        self.request(&src);
        Some(src)
    }
}
