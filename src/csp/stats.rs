//! Search statistics.

use std::fmt;
use std::time::Duration;

/// Counters collected by propagation and the search drivers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search nodes entered.
    pub nodes: u64,
    /// Nodes abandoned after exhausting their values.
    pub backtracks: u64,
    /// Arc revisions performed by AC-3.
    pub revisions: u64,
    /// Values removed by AC-3.
    pub pruned: u64,
    /// Complete assignments reached.
    pub solutions: u64,
    /// Deepest assignment length reached.
    pub max_depth: u64,
    /// Wall-clock time of the solve.
    pub time_total: Duration,
}

impl SearchStats {
    #[inline]
    pub fn on_node_explored(&mut self, depth: usize) {
        self.nodes = self.nodes.saturating_add(1);
        self.max_depth = self.max_depth.max(depth as u64);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_revision(&mut self, removed: usize) {
        self.revisions = self.revisions.saturating_add(1);
        self.pruned = self.pruned.saturating_add(removed as u64);
    }

    #[inline]
    pub fn on_solution(&mut self) {
        self.solutions = self.solutions.saturating_add(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Search Statistics:")?;
        writeln!(f, "  Nodes explored: {}", self.nodes)?;
        writeln!(f, "  Backtracks:     {}", self.backtracks)?;
        writeln!(f, "  Max depth:      {}", self.max_depth)?;
        writeln!(f, "  Revisions:      {}", self.revisions)?;
        writeln!(f, "  Values pruned:  {}", self.pruned)?;
        writeln!(f, "  Solutions:      {}", self.solutions)?;
        write!(f, "  Total time:     {:.3?}", self.time_total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = SearchStats::default();
        stats.on_node_explored(3);
        stats.on_node_explored(1);
        stats.on_backtrack();
        stats.on_revision(4);
        stats.on_revision(0);
        stats.on_solution();

        assert_eq!(stats.nodes, 2);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.backtracks, 1);
        assert_eq!(stats.revisions, 2);
        assert_eq!(stats.pruned, 4);
        assert_eq!(stats.solutions, 1);
    }

    #[test]
    fn test_saturation() {
        let mut stats = SearchStats {
            nodes: u64::MAX,
            ..Default::default()
        };
        stats.on_node_explored(0);
        assert_eq!(stats.nodes, u64::MAX);
    }

    #[test]
    fn test_display() {
        let mut stats = SearchStats::default();
        stats.set_total_time(Duration::from_millis(5));
        let text = stats.to_string();
        assert!(text.starts_with("Search Statistics:"));
        assert!(text.contains("Nodes explored: 0"));
    }
}
