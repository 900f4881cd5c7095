//! One countdown screen: the scroll mapper and phase sequencer it owns, and
//! the per-frame view the front end pulls from them.

use crate::{
    alert::HapticTrigger,
    catalog::{CountdownDuration, DurationCatalog},
    error::CoreError,
    progress::{remaining_seconds, ProgressSample},
    projection::{project, ProjectionLayout, VisualParams},
    scroll::{ScrollPositionMapper, SettleOutcome},
    sequencer::{Phase, PhaseSequencer, Transition},
};

#[derive(Debug, Clone, PartialEq)]
pub struct FrameView {
    pub phase: Phase,
    /// What the list currently has settled on.
    pub selected: CountdownDuration,
    /// The frozen duration of the live session, if there is one.
    pub session_duration: Option<CountdownDuration>,
    pub remaining_seconds: u32,
    pub sample: ProgressSample,
    pub visual: VisualParams,
}

pub struct CountdownScreen<H> {
    mapper: ScrollPositionMapper,
    sequencer: PhaseSequencer<H>,
    layout: ProjectionLayout,
}

impl<H: HapticTrigger> CountdownScreen<H> {
    pub fn new(item_size: f64, initial_index: usize, haptic: H) -> Self {
        Self {
            mapper: ScrollPositionMapper::with_selection(DurationCatalog::new(), item_size, initial_index),
            sequencer: PhaseSequencer::new(haptic),
            layout: ProjectionLayout::default(),
        }
    }

    pub fn mapper(&self) -> &ScrollPositionMapper {
        &self.mapper
    }

    pub fn sequencer(&self) -> &PhaseSequencer<H> {
        &self.sequencer
    }

    pub fn phase(&self) -> Phase {
        self.sequencer.phase()
    }

    pub fn layout(&self) -> ProjectionLayout {
        self.layout
    }

    pub fn on_scroll(&mut self, offset: f64) {
        self.mapper.on_scroll(offset);
    }

    pub fn on_scroll_settle(&mut self, offset: f64) -> SettleOutcome {
        let item_size = self.mapper.item_size();
        self.mapper.on_scroll_settle(offset, item_size)
    }

    pub fn commit(&mut self, now_ms: u64) -> bool {
        let selected = self.mapper.selected();
        self.sequencer.commit(selected, now_ms)
    }

    pub fn tick(&mut self, now_ms: u64) -> Vec<Transition> {
        self.sequencer.tick(now_ms)
    }

    /// Jumps the live session to its next phase right away. Nothing to skip
    /// while Idle.
    pub fn skip(&mut self, now_ms: u64) -> Result<Option<Transition>, CoreError> {
        match self.sequencer.phase().next() {
            Some(to) => self.sequencer.request_transition(to, now_ms).map(Some),
            None => Ok(None),
        }
    }

    pub fn frame(&self, now_ms: u64) -> FrameView {
        let sample = self.sequencer.sample(now_ms);
        let session_duration = self.sequencer.session().map(|s| s.duration);
        let selected = self.mapper.selected();
        let shown = session_duration.unwrap_or(selected);

        FrameView {
            phase: sample.phase,
            selected,
            session_duration,
            remaining_seconds: remaining_seconds(&sample, shown),
            visual: project(&sample, &self.mapper.weights(), &self.layout),
            sample,
        }
    }
}
