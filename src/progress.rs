//! Elapsed/remaining time for the current phase, recomputed on every sample.

use crate::{catalog::CountdownDuration, sequencer::Phase};

/// Where the current phase started and how long it lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownProgress {
    pub phase: Phase,
    pub phase_start_ms: u64,
    pub phase_duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSample {
    pub phase: Phase,
    pub elapsed_ms: u64,
    pub phase_duration_ms: u64,
    /// `elapsed / phase_duration`, clamped to [0, 1]. Zero for untimed phases.
    pub progress: f64,
}

impl CountdownProgress {
    pub fn idle() -> Self {
        Self { phase: Phase::Idle, phase_start_ms: 0, phase_duration_ms: 0 }
    }

    pub fn sample(&self, now_ms: u64) -> ProgressSample {
        let elapsed_ms = now_ms.saturating_sub(self.phase_start_ms);
        let progress = if self.phase_duration_ms == 0 {
            0.0
        } else {
            (elapsed_ms as f64 / self.phase_duration_ms as f64).clamp(0.0, 1.0)
        };
        ProgressSample {
            phase: self.phase,
            elapsed_ms,
            phase_duration_ms: self.phase_duration_ms,
            progress,
        }
    }
}

impl ProgressSample {
    pub fn remaining_ms(&self) -> u64 {
        self.phase_duration_ms.saturating_sub(self.elapsed_ms)
    }
}

/// The number shown on the countdown: rounded up, so the full duration shows
/// at the start and 0 only once the run is over.
pub fn remaining_seconds(sample: &ProgressSample, duration: CountdownDuration) -> u32 {
    match sample.phase {
        Phase::Idle | Phase::Committing => duration.secs(),
        Phase::Finished => 0,
        Phase::Running => {
            let secs = sample.remaining_ms().div_ceil(1000);
            secs.min(u64::from(duration.secs())) as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::DurationCatalog;

    fn five() -> CountdownDuration {
        DurationCatalog::new().duration_at(1).unwrap()
    }

    fn running(start: u64, duration: CountdownDuration) -> CountdownProgress {
        CountdownProgress {
            phase: Phase::Running,
            phase_start_ms: start,
            phase_duration_ms: duration.as_millis(),
        }
    }

    #[test]
    fn test_sample_clamps() {
        let p = running(1_000, five());
        assert_eq!(p.sample(500).progress, 0.0);
        assert_eq!(p.sample(1_000).progress, 0.0);
        assert_eq!(p.sample(3_500).progress, 0.5);
        assert_eq!(p.sample(6_000).progress, 1.0);
        assert_eq!(p.sample(60_000).progress, 1.0);
    }

    #[test]
    fn test_sample_is_pure() {
        let p = running(0, five());
        let a = p.sample(2_345);
        let _ = p.sample(4_000);
        assert_eq!(p.sample(2_345), a);
    }

    #[test]
    fn test_idle_sample() {
        let s = CountdownProgress::idle().sample(12_345);
        assert_eq!(s.progress, 0.0);
        assert_eq!(s.remaining_ms(), 0);
    }

    #[test]
    fn test_remaining_seconds_for_five() {
        let p = running(0, five());
        assert_eq!(remaining_seconds(&p.sample(0), five()), 5);
        assert_eq!(remaining_seconds(&p.sample(1), five()), 5);
        assert_eq!(remaining_seconds(&p.sample(1_000), five()), 4);
        assert_eq!(remaining_seconds(&p.sample(4_001), five()), 1);
        assert_eq!(remaining_seconds(&p.sample(5_000), five()), 0);
        assert_eq!(remaining_seconds(&p.sample(9_000), five()), 0);
    }

    #[test]
    fn test_remaining_seconds_non_increasing() {
        let p = running(0, five());
        let mut last = u32::MAX;
        for now in (0..=5_000).step_by(7) {
            let r = remaining_seconds(&p.sample(now), five());
            assert!(r <= last);
            assert!(r <= 5);
            last = r;
        }
    }

    #[test]
    fn test_remaining_seconds_outside_running() {
        let committing = CountdownProgress {
            phase: Phase::Committing,
            phase_start_ms: 0,
            phase_duration_ms: 300,
        };
        assert_eq!(remaining_seconds(&committing.sample(150), five()), 5);
        let finished = CountdownProgress { phase: Phase::Finished, ..committing };
        assert_eq!(remaining_seconds(&finished.sample(150), five()), 0);
    }
}
