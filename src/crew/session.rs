use std::collections::HashSet;

/// Candidates already given a recommendation during one ranking pass.
/// Create a fresh session for every pass; never share one between lineups.
#[derive(Debug, Clone, Default)]
pub struct RankingSession {
    used: HashSet<String>,
}

impl RankingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_used(&self, symbol: &str) -> bool {
        self.used.contains(symbol)
    }

    /// Returns false when the candidate was already marked.
    pub fn mark_used(&mut self, symbol: &str) -> bool {
        self.used.insert(symbol.to_string())
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}
