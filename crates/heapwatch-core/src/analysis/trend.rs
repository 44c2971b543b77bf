//! Consecutive-growth leak detection.
//!
//! One detector lives per monitored session. Each of the six resource
//! categories has an independent streak counter: it increments every
//! time the category's count strictly exceeds the previous snapshot's,
//! and resets to zero otherwise. A streak at or above the threshold
//! produces a warning on every observation until it breaks — the
//! detector does not silence itself after the first warning.

use tracing::debug;

use super::ResourceCounts;
use crate::classify::ResourceKind;

/// Consecutive increases required before a category is flagged.
pub const DEFAULT_LEAK_THRESHOLD: u32 = 3;

/// A suspected leak in one resource category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeakWarning {
    pub kind: ResourceKind,
    /// Number of consecutive snapshots the count has increased.
    pub streak: u32,
}

/// Per-session growth-streak state machine.
pub struct LeakDetector {
    threshold: u32,
    streaks: [u32; ResourceKind::ALL.len()],
    previous: Option<ResourceCounts>,
}

impl Default for LeakDetector {
    fn default() -> Self {
        Self::new(DEFAULT_LEAK_THRESHOLD)
    }
}

impl LeakDetector {
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            streaks: [0; ResourceKind::ALL.len()],
            previous: None,
        }
    }

    /// Feeds the counts from one completed analysis.
    ///
    /// The first observation only seeds the comparison baseline and
    /// produces no warnings. Callers must not feed results of failed
    /// captures; skipping an interval leaves streaks and the baseline
    /// untouched.
    pub fn observe(&mut self, counts: &ResourceCounts) -> Vec<LeakWarning> {
        let Some(previous) = &self.previous else {
            self.previous = Some(counts.clone());
            return Vec::new();
        };

        let mut warnings = Vec::new();
        for (lane, kind) in ResourceKind::ALL.into_iter().enumerate() {
            let current = counts.get(kind);
            let prior = previous.get(kind);

            if current > prior {
                self.streaks[lane] += 1;
                debug!(
                    "{} count increased ({} -> {}), streak {}",
                    kind.label(),
                    prior,
                    current,
                    self.streaks[lane]
                );
            } else {
                if self.streaks[lane] > 0 {
                    debug!("{} count did not increase, resetting streak", kind.label());
                }
                self.streaks[lane] = 0;
            }

            if self.streaks[lane] >= self.threshold {
                warnings.push(LeakWarning {
                    kind,
                    streak: self.streaks[lane],
                });
            }
        }

        self.previous = Some(counts.clone());
        warnings
    }

    /// Current streak length for one category.
    pub fn streak(&self, kind: ResourceKind) -> u32 {
        self.streaks[kind as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh_counts(n: u64) -> ResourceCounts {
        ResourceCounts {
            mesh_count: n,
            ..ResourceCounts::default()
        }
    }

    #[test]
    fn first_observation_seeds_without_warning() {
        let mut detector = LeakDetector::new(3);
        assert!(detector.observe(&mesh_counts(10)).is_empty());
        assert_eq!(detector.streak(ResourceKind::Mesh), 0);
    }

    #[test]
    fn streak_sequence_and_warning_point() {
        // Counts 10, 11, 12, 13, 12 with threshold 3: streaks run
        // 1, 2, 3, 0 across the four comparisons. The warning fires
        // exactly when the streak reaches 3 and not after the drop.
        let mut detector = LeakDetector::new(3);
        assert!(detector.observe(&mesh_counts(10)).is_empty());
        assert!(detector.observe(&mesh_counts(11)).is_empty());
        assert!(detector.observe(&mesh_counts(12)).is_empty());

        let warnings = detector.observe(&mesh_counts(13));
        assert_eq!(
            warnings,
            vec![LeakWarning {
                kind: ResourceKind::Mesh,
                streak: 3
            }]
        );

        assert!(detector.observe(&mesh_counts(12)).is_empty());
        assert_eq!(detector.streak(ResourceKind::Mesh), 0);
    }

    #[test]
    fn warnings_repeat_while_streak_holds() {
        let mut detector = LeakDetector::new(2);
        detector.observe(&mesh_counts(1));
        assert!(detector.observe(&mesh_counts(2)).is_empty());
        assert_eq!(detector.observe(&mesh_counts(3)).len(), 1);
        // Still growing: warns again with a longer streak.
        let warnings = detector.observe(&mesh_counts(4));
        assert_eq!(warnings[0].streak, 3);
    }

    #[test]
    fn equal_counts_reset_the_streak() {
        let mut detector = LeakDetector::new(2);
        detector.observe(&mesh_counts(5));
        detector.observe(&mesh_counts(6));
        assert_eq!(detector.streak(ResourceKind::Mesh), 1);
        // Not strictly greater: resets.
        detector.observe(&mesh_counts(6));
        assert_eq!(detector.streak(ResourceKind::Mesh), 0);
    }

    #[test]
    fn lanes_are_independent() {
        let mut detector = LeakDetector::new(2);
        let mut counts = ResourceCounts::default();
        detector.observe(&counts);

        counts.mesh_count = 1;
        counts.texture_count = 1;
        detector.observe(&counts);

        // Textures keep growing, meshes plateau.
        counts.texture_count = 2;
        let warnings = detector.observe(&counts);
        assert_eq!(
            warnings,
            vec![LeakWarning {
                kind: ResourceKind::Texture,
                streak: 2
            }]
        );
        assert_eq!(detector.streak(ResourceKind::Mesh), 0);
    }
}
