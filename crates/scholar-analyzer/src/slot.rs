//! Shared "current analysis" slot
//!
//! Holds the running flag and the last completed result. The mutex is only
//! held for short critical sections, never across an `.await`.

use scholar_domain::ScoredAnalysis;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Snapshot of the slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisStatus {
    /// An analysis is in flight
    pub running: bool,
    /// Last completed result, if any
    pub result: Option<ScoredAnalysis>,
}

#[derive(Debug, Default)]
struct SlotState {
    running: bool,
    result: Option<ScoredAnalysis>,
}

/// Single-flight guard plus last result
#[derive(Debug, Default, Clone)]
pub struct AnalysisSlot {
    state: Arc<Mutex<SlotState>>,
}

impl AnalysisSlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot; `None` if an analysis is already running
    ///
    /// Claiming clears the previous result.
    pub fn try_claim(&self) -> Option<FlightGuard> {
        let mut state = self.lock();
        if state.running {
            return None;
        }
        state.running = true;
        state.result = None;
        Some(FlightGuard {
            slot: self.clone(),
            released: false,
        })
    }

    /// Current status
    pub fn status(&self) -> AnalysisStatus {
        let state = self.lock();
        AnalysisStatus {
            running: state.running,
            result: state.result.clone(),
        }
    }

    /// True while an analysis is in flight
    pub fn is_running(&self) -> bool {
        self.lock().running
    }

    /// Forget the last result; has no effect on a running analysis
    pub fn reset(&self) {
        self.lock().result = None;
    }

    fn lock(&self) -> MutexGuard<'_, SlotState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases the running flag when dropped
///
/// Completing with a result stores it; dropping without one (error, panic,
/// cancellation) only clears the flag.
#[derive(Debug)]
pub struct FlightGuard {
    slot: AnalysisSlot,
    released: bool,
}

impl FlightGuard {
    /// Store the result and release the flag in one step
    pub fn complete(mut self, result: ScoredAnalysis) {
        let mut state = self.slot.lock();
        state.result = Some(result);
        state.running = false;
        self.released = true;
    }
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        if !self.released {
            self.slot.lock().running = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholar_domain::ParsedAnalysis;

    fn sample() -> ScoredAnalysis {
        ScoredAnalysis::from_parsed(ParsedAnalysis::new("s", "m", "b", "g"))
    }

    #[test]
    fn test_claim_is_exclusive() {
        let slot = AnalysisSlot::new();
        let guard = slot.try_claim().unwrap();
        assert!(slot.is_running());
        assert!(slot.try_claim().is_none());
        drop(guard);
        assert!(!slot.is_running());
        assert!(slot.try_claim().is_some());
    }

    #[test]
    fn test_complete_stores_result() {
        let slot = AnalysisSlot::new();
        slot.try_claim().unwrap().complete(sample());
        let status = slot.status();
        assert!(!status.running);
        assert_eq!(status.result, Some(sample()));
    }

    #[test]
    fn test_claim_clears_previous_result() {
        let slot = AnalysisSlot::new();
        slot.try_claim().unwrap().complete(sample());
        let guard = slot.try_claim().unwrap();
        assert_eq!(slot.status(), AnalysisStatus { running: true, result: None });
        drop(guard);
        assert_eq!(slot.status(), AnalysisStatus::default());
    }

    #[test]
    fn test_reset() {
        let slot = AnalysisSlot::new();
        slot.try_claim().unwrap().complete(sample());
        slot.reset();
        assert!(slot.status().result.is_none());
    }

    #[test]
    fn test_flag_released_on_panic() {
        let slot = AnalysisSlot::new();
        let inner = slot.clone();
        let outcome = std::thread::spawn(move || {
            let _guard = inner.try_claim().unwrap();
            panic!("analysis blew up");
        })
        .join();
        assert!(outcome.is_err());
        assert!(!slot.is_running());
    }
}
