//! Duration selection and countdown sequencing for rcountdown.
//!
//! Everything here is deterministic: time comes in as monotonic
//! milliseconds, and every visual value is recomputed from it on demand.

pub mod alert;
pub mod catalog;
pub mod error;
pub mod progress;
pub mod projection;
pub mod screen;
pub mod scroll;
pub mod sequencer;

pub use alert::{DesktopAlert, HapticTrigger, NoHaptic};
pub use catalog::{CountdownDuration, DurationCatalog};
pub use error::CoreError;
pub use progress::{remaining_seconds, CountdownProgress, ProgressSample};
pub use projection::{project, ProjectionLayout, VisualParams};
pub use screen::{CountdownScreen, FrameView};
pub use scroll::{visual_weight, ItemWeight, ScrollPositionMapper, ScrollState, SettleOutcome};
pub use sequencer::{CountdownSession, Phase, PhaseSequencer, TimerTicket, Transition, COMMITTING_MS};
