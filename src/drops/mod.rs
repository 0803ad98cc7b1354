//! Drop-phase gate.
//!
//! Issuance runs in phases. Each phase closes automatically once the global
//! issuance count reaches its cumulative boundary; an administrator then
//! reopens minting, which advances to the next phase. Administrators may
//! also pause and resume at any time without changing the phase.
//!
//! ```text
//!            Issued{total >= B(p)}                Resume
//! Open(p) ───────────────────────────> Paused(p, PhaseBoundary) ──────> Open(p+1)
//!    │                Pause                               Resume
//!    └─────────────────────────────────> Paused(p, Operator) ──────────> Open(p)
//! ```
//!
//! Past the final boundary the gate never pauses on its own.

pub mod tiers;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{EngineError, Result};
use crate::rarity::{Ladder, RankedLabel};

pub use tiers::{StatusTiers, DEFAULT_STATUS_LABELS};

/// Size of the first phase in the default schedule.
pub const DEFAULT_FIRST_PHASE_SIZE: u64 = 200;
/// Each default phase is this many times larger than the previous one.
pub const DEFAULT_PHASE_GROWTH: u64 = 9;

/// Why the gate is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseReason {
    /// The phase reached its boundary; resuming advances the phase.
    PhaseBoundary,
    /// An administrator paused minting; resuming keeps the phase.
    Operator,
}

/// Gate state: the phase index and whether minting is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DropState {
    Open { phase: u32 },
    Paused { phase: u32, reason: PauseReason },
}

impl Default for DropState {
    fn default() -> Self {
        DropState::Open { phase: 0 }
    }
}

impl DropState {
    pub fn phase(&self) -> u32 {
        match self {
            DropState::Open { phase } | DropState::Paused { phase, .. } => *phase,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, DropState::Open { .. })
    }
}

/// Inputs to the gate state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// A pass was issued; `total` is the global count including it.
    Issued { total: u64 },
    /// Administrator pause.
    Pause,
    /// Administrator resume.
    Resume,
}

/// Apply `signal` to `state`.
///
/// The single place gate transitions happen.
pub fn transition(state: DropState, signal: Signal, schedule: &PhaseSchedule) -> DropState {
    match (state, signal) {
        (DropState::Open { phase }, Signal::Issued { total }) => match schedule.boundary(phase) {
            Some(boundary) if total >= boundary => DropState::Paused {
                phase,
                reason: PauseReason::PhaseBoundary,
            },
            _ => state,
        },
        (DropState::Open { phase }, Signal::Pause) => DropState::Paused {
            phase,
            reason: PauseReason::Operator,
        },
        (
            DropState::Paused {
                phase,
                reason: PauseReason::PhaseBoundary,
            },
            Signal::Resume,
        ) => DropState::Open { phase: phase + 1 },
        (
            DropState::Paused {
                phase,
                reason: PauseReason::Operator,
            },
            Signal::Resume,
        ) => DropState::Open { phase },
        (state, _) => state,
    }
}

/// Cumulative phase boundaries and the status label of each phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseSchedule {
    boundaries: Vec<u64>,
    tiers: StatusTiers,
}

impl Default for PhaseSchedule {
    fn default() -> Self {
        let labels: Vec<String> = DEFAULT_STATUS_LABELS.iter().map(|s| s.to_string()).collect();
        let boundaries = geometric_boundaries(
            DEFAULT_FIRST_PHASE_SIZE,
            DEFAULT_PHASE_GROWTH,
            labels.len() - 1,
        );
        Self {
            boundaries,
            tiers: StatusTiers::new(labels),
        }
    }
}

impl PhaseSchedule {
    /// Build a schedule from cumulative boundaries and status labels.
    ///
    /// Boundaries must be non-zero and strictly increasing. There must be a
    /// label for every phase, including the open-ended one after the final
    /// boundary.
    pub fn new(boundaries: Vec<u64>, labels: Vec<String>) -> Result<Self> {
        if boundaries.first() == Some(&0) {
            return Err(EngineError::InvalidSchedule(
                "phase boundaries must be positive".to_string(),
            ));
        }
        if boundaries.windows(2).any(|pair| pair[1] <= pair[0]) {
            return Err(EngineError::InvalidSchedule(
                "phase boundaries must be strictly increasing".to_string(),
            ));
        }
        if labels.len() < boundaries.len() + 1 {
            return Err(EngineError::InvalidSchedule(format!(
                "{} boundaries need at least {} status labels, got {}",
                boundaries.len(),
                boundaries.len() + 1,
                labels.len()
            )));
        }
        Ok(Self {
            boundaries,
            tiers: StatusTiers::new(labels),
        })
    }

    /// Every phase holds `size` passes; one phase per label, the last open-ended.
    pub fn uniform(size: u64, labels: Vec<String>) -> Result<Self> {
        let phases = labels.len().saturating_sub(1) as u64;
        let boundaries = (1..=phases).map(|n| size.saturating_mul(n)).collect();
        Self::new(boundaries, labels)
    }

    /// Phase sizes grow by `ratio`: `first`, `first * ratio`, ...
    pub fn geometric(first: u64, ratio: u64, labels: Vec<String>) -> Result<Self> {
        let boundaries = geometric_boundaries(first, ratio, labels.len().saturating_sub(1));
        Self::new(boundaries, labels)
    }

    /// Cumulative boundary closing `phase`, if one is configured.
    pub fn boundary(&self, phase: u32) -> Option<u64> {
        self.boundaries.get(phase as usize).copied()
    }

    pub fn boundaries(&self) -> &[u64] {
        &self.boundaries
    }

    pub fn tiers(&self) -> &StatusTiers {
        &self.tiers
    }
}

fn geometric_boundaries(first: u64, ratio: u64, phases: usize) -> Vec<u64> {
    let mut boundaries = Vec::with_capacity(phases);
    let mut size = first;
    let mut total = 0u64;
    for _ in 0..phases {
        total = total.saturating_add(size);
        boundaries.push(total);
        size = size.saturating_mul(ratio);
    }
    boundaries
}

/// Gate state plus the global issuance counter.
#[derive(Debug, Clone, Default)]
pub struct DropGate {
    state: DropState,
    issued: u64,
    schedule: PhaseSchedule,
}

impl DropGate {
    pub fn new(schedule: PhaseSchedule) -> Self {
        Self {
            state: DropState::default(),
            issued: 0,
            schedule,
        }
    }

    pub fn state(&self) -> DropState {
        self.state
    }

    /// Global number of passes issued.
    pub fn issued(&self) -> u64 {
        self.issued
    }

    pub fn schedule(&self) -> &PhaseSchedule {
        &self.schedule
    }

    /// Current phase index if minting is open.
    pub fn ensure_open(&self) -> Result<u32> {
        match self.state {
            DropState::Open { phase } => Ok(phase),
            DropState::Paused { phase, reason } => {
                warn!(phase, ?reason, "Issuance rejected: minting paused");
                Err(EngineError::MintingPaused)
            }
        }
    }

    /// Status for a pass issued in the current phase.
    pub fn current_status(&self) -> Option<RankedLabel> {
        self.schedule.tiers().status_for(&self.state)
    }

    /// Count one issuance. Returns the new state if the gate closed.
    pub fn record_issue(&mut self) -> Option<DropState> {
        self.issued += 1;
        self.apply(Signal::Issued { total: self.issued })
    }

    /// Close the gate without changing the phase. Returns the new state if
    /// the gate was open.
    pub fn pause(&mut self) -> Option<DropState> {
        self.apply(Signal::Pause)
    }

    /// Reopen the gate. Returns the new state if the gate was closed.
    pub fn resume(&mut self) -> Option<DropState> {
        self.apply(Signal::Resume)
    }

    /// Replace the schedule.
    ///
    /// Fails if the new schedule has no status label for the current phase.
    pub fn set_schedule(&mut self, schedule: PhaseSchedule) -> Result<()> {
        let phase = self.state.phase();
        if schedule.tiers().len() <= phase as usize {
            return Err(EngineError::InvalidSchedule(format!(
                "no status label for current phase {phase}"
            )));
        }
        info!(
            phase,
            boundaries = ?schedule.boundaries(),
            "Phase schedule updated"
        );
        self.schedule = schedule;
        Ok(())
    }

    fn apply(&mut self, signal: Signal) -> Option<DropState> {
        let next = transition(self.state, signal, &self.schedule);
        if next == self.state {
            return None;
        }
        info!(from = ?self.state, to = ?next, issued = self.issued, "Drop state changed");
        self.state = next;
        Some(next)
    }
}
