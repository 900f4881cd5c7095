//! The countdown lifecycle: Idle -> Committing -> Running -> Finished -> Idle.
//!
//! Automatic transitions are represented as [`TimerTicket`]s. A ticket names
//! the session generation and the phase it leaves, so a ticket that outlives
//! its session (a commit from Finished replaces the session) fires as a no-op.
//! All timestamps are caller-supplied monotonic milliseconds.

use log::{debug, info, trace, warn};

use crate::{
    alert::HapticTrigger,
    catalog::CountdownDuration,
    error::CoreError,
    progress::{CountdownProgress, ProgressSample},
};

/// Length of the button-out and button-back animations.
pub const COMMITTING_MS: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Committing,
    Running,
    Finished,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Committing => "committing",
            Self::Running => "running",
            Self::Finished => "finished",
        }
    }

    /// The phase a timed transition leads to, if this phase has one.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Idle => None,
            Self::Committing => Some(Self::Running),
            Self::Running => Some(Self::Finished),
            Self::Finished => Some(Self::Idle),
        }
    }

    pub fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::Idle, Self::Committing)
                | (Self::Committing, Self::Running)
                | (Self::Running, Self::Finished)
                | (Self::Finished, Self::Idle)
                | (Self::Finished, Self::Committing)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownSession {
    pub generation: u64,
    pub duration: CountdownDuration,
    pub phase: Phase,
    pub phase_start_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerTicket {
    pub generation: u64,
    pub from: Phase,
    pub due_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub generation: u64,
    pub from: Phase,
    pub to: Phase,
    pub at_ms: u64,
}

pub struct PhaseSequencer<H> {
    session: Option<CountdownSession>,
    last_generation: u64,
    committing_ms: u64,
    haptic: H,
}

impl<H: HapticTrigger> PhaseSequencer<H> {
    pub fn new(haptic: H) -> Self {
        Self::with_committing_ms(haptic, COMMITTING_MS)
    }

    pub fn with_committing_ms(haptic: H, committing_ms: u64) -> Self {
        Self {
            session: None,
            last_generation: 0,
            committing_ms,
            haptic,
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.map_or(Phase::Idle, |s| s.phase)
    }

    pub fn session(&self) -> Option<CountdownSession> {
        self.session
    }

    pub fn haptic(&self) -> &H {
        &self.haptic
    }

    pub fn committing_ms(&self) -> u64 {
        self.committing_ms
    }

    /// Starts a session from Idle or Finished. Ignored while Committing or Running.
    pub fn commit(&mut self, selected: CountdownDuration, now_ms: u64) -> bool {
        match self.phase() {
            Phase::Idle | Phase::Finished => {
                if let Some(old) = self.session {
                    debug!("commit interrupts finished session #{}", old.generation);
                }
                self.last_generation += 1;
                self.session = Some(CountdownSession {
                    generation: self.last_generation,
                    duration: selected,
                    phase: Phase::Committing,
                    phase_start_ms: now_ms,
                });
                info!("session #{} committed for {}s", self.last_generation, selected.secs());
                true
            }
            Phase::Committing | Phase::Running => {
                debug!("commit ignored while {}", self.phase().name());
                false
            }
        }
    }

    pub fn progress(&self) -> CountdownProgress {
        match self.session {
            Some(s) => CountdownProgress {
                phase: s.phase,
                phase_start_ms: s.phase_start_ms,
                phase_duration_ms: self.phase_duration_ms(&s),
            },
            None => CountdownProgress::idle(),
        }
    }

    pub fn sample(&self, now_ms: u64) -> ProgressSample {
        self.progress().sample(now_ms)
    }

    /// The next automatic transition of the live session, if any.
    pub fn pending_ticket(&self) -> Option<TimerTicket> {
        let s = self.session?;
        s.phase.next()?;
        Some(TimerTicket {
            generation: s.generation,
            from: s.phase,
            due_ms: s.phase_start_ms + self.phase_duration_ms(&s),
        })
    }

    /// Applies a ticket's transition. Stale or early tickets are swallowed.
    pub fn fire(&mut self, ticket: TimerTicket, now_ms: u64) -> Option<Transition> {
        let Some(session) = self.session else {
            trace!("ticket for session #{} fired with no session", ticket.generation);
            return None;
        };
        if session.generation != ticket.generation || session.phase != ticket.from {
            trace!(
                "stale ticket #{} ({}) ignored; live session #{} is {}",
                ticket.generation,
                ticket.from.name(),
                session.generation,
                session.phase.name()
            );
            return None;
        }
        if now_ms < ticket.due_ms {
            trace!("ticket #{} fired {}ms early", ticket.generation, ticket.due_ms - now_ms);
            return None;
        }

        let to = ticket.from.next()?;
        // Anchor at the due time so late frames don't stretch the next phase.
        Some(self.enter(session, to, ticket.due_ms))
    }

    /// Fires every ticket that is due at `now_ms`, in order.
    pub fn tick(&mut self, now_ms: u64) -> Vec<Transition> {
        let mut fired = Vec::new();
        while let Some(ticket) = self.pending_ticket() {
            if ticket.due_ms > now_ms {
                break;
            }
            match self.fire(ticket, now_ms) {
                Some(t) => fired.push(t),
                None => break,
            }
        }
        fired
    }

    /// Forces a timed transition ahead of schedule. Only the edges a ticket
    /// would take are allowed; starting a session goes through [`commit`](Self::commit).
    pub fn request_transition(&mut self, to: Phase, now_ms: u64) -> Result<Transition, CoreError> {
        let from = self.phase();
        match self.session {
            Some(session) if from.next() == Some(to) => Ok(self.enter(session, to, now_ms)),
            _ => {
                let err = CoreError::IllegalTransition { from, to };
                warn!("{}", err);
                #[cfg(feature = "strict-transitions")]
                debug_assert!(false, "{}", err);
                Err(err)
            }
        }
    }

    fn enter(&mut self, mut session: CountdownSession, to: Phase, at_ms: u64) -> Transition {
        let from = session.phase;
        debug_assert!(from.can_transition_to(to));
        let transition = Transition { generation: session.generation, from, to, at_ms };

        if to == Phase::Idle {
            self.session = None;
        } else {
            session.phase = to;
            session.phase_start_ms = at_ms;
            self.session = Some(session);
        }
        info!("session #{}: {} -> {} at {}ms", session.generation, from.name(), to.name(), at_ms);

        if to == Phase::Finished {
            if let Err(e) = self.haptic.fire() {
                warn!("haptic trigger failed: {}", e);
            }
        }
        transition
    }

    fn phase_duration_ms(&self, session: &CountdownSession) -> u64 {
        match session.phase {
            Phase::Idle => 0,
            Phase::Committing | Phase::Finished => self.committing_ms,
            Phase::Running => session.duration.as_millis(),
        }
    }
}
