/// Elapsed-playback clock for one stage lifetime, owning the one-shot verse flag.
#[derive(Clone, Debug)]
pub struct StageClock {
    elapsed: f32,
    verse_start: f32,
    verse_revealed: bool,
    paused: bool,
}

impl StageClock {
    pub fn new(verse_start: f32) -> Self {
        Self {
            elapsed: 0.0,
            verse_start: verse_start.max(0.0),
            verse_revealed: false,
            paused: false,
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn verse_start(&self) -> f32 {
        self.verse_start
    }

    pub fn verse_revealed(&self) -> bool {
        self.verse_revealed
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Advance by `dt` seconds. Returns true on the single tick the verse starts.
    pub fn advance(&mut self, dt: f32) -> bool {
        if self.paused {
            return false;
        }
        self.elapsed += dt.max(0.0);
        self.check_verse()
    }

    /// Follow the media element's playback position instead of frame time.
    pub fn advance_to(&mut self, playback_time: f32) -> bool {
        if self.paused {
            return false;
        }
        self.elapsed = playback_time.max(0.0);
        self.check_verse()
    }

    fn check_verse(&mut self) -> bool {
        if self.verse_revealed || self.elapsed < self.verse_start {
            return false;
        }
        self.verse_revealed = true;
        true
    }
}
