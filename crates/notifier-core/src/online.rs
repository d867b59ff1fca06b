use std::collections::HashSet;

/// Live-channel membership carried from one poll to the next.
///
/// Starts empty, so the first poll of a process reports every live channel
/// as newly online. Nothing here is persisted.
#[derive(Debug, Default, Clone)]
pub struct OnlineTracker {
    previous: HashSet<String>,
}

impl OnlineTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Channels in `current` that were not live during the previous poll.
    ///
    /// The previous set is replaced by `current` unconditionally, so a
    /// channel that drops offline and returns is reported again.
    pub fn diff(&mut self, current: &[String]) -> Vec<String> {
        let newly_online = current
            .iter()
            .filter(|name| !self.previous.contains(*name))
            .cloned()
            .collect();
        self.previous = current.iter().cloned().collect();
        newly_online
    }

    pub fn previous(&self) -> &HashSet<String> {
        &self.previous
    }
}
