use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AssetState {
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadStatus {
    Loading { progress: f32 },
    Ready,
    /// Everything that can load has; these assets failed and await retry/skip.
    Failed { assets: Vec<String> },
}

/// Progress over the named startup assets.
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    assets: BTreeMap<String, AssetState>,
    skipped: bool,
}

impl LoadTracker {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            assets: names
                .into_iter()
                .map(|n| (n.into(), AssetState::Pending))
                .collect(),
            skipped: false,
        }
    }

    pub fn loaded(&mut self, name: &str) {
        if let Some(s) = self.assets.get_mut(name) {
            *s = AssetState::Loaded;
        }
    }

    pub fn failed(&mut self, name: &str) {
        if let Some(s) = self.assets.get_mut(name) {
            *s = AssetState::Failed;
        }
    }

    pub fn progress(&self) -> f32 {
        if self.assets.is_empty() {
            return 1.0;
        }
        let done = self
            .assets
            .values()
            .filter(|s| **s == AssetState::Loaded)
            .count();
        done as f32 / self.assets.len() as f32
    }

    pub fn status(&self) -> LoadStatus {
        if self.skipped || self.assets.values().all(|s| *s == AssetState::Loaded) {
            return LoadStatus::Ready;
        }
        if self.assets.values().any(|s| *s == AssetState::Pending) {
            return LoadStatus::Loading {
                progress: self.progress(),
            };
        }
        LoadStatus::Failed {
            assets: self.names_in(AssetState::Failed),
        }
    }

    /// Reset failed assets to pending and return their names for refetching.
    pub fn retry(&mut self) -> Vec<String> {
        let names = self.names_in(AssetState::Failed);
        for n in &names {
            self.assets.insert(n.clone(), AssetState::Pending);
        }
        names
    }

    pub fn pending(&self) -> Vec<String> {
        self.names_in(AssetState::Pending)
    }

    /// Continue without the failed assets.
    pub fn skip(&mut self) {
        self.skipped = true;
    }

    fn names_in(&self, state: AssetState) -> Vec<String> {
        self.assets
            .iter()
            .filter(|(_, s)| **s == state)
            .map(|(n, _)| n.clone())
            .collect()
    }
}
