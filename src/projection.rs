//! Visual parameters as pure functions of one progress sample.
//!
//! Translations are in layout units, positive meaning downward. The
//! background sits one screen height below the viewport when hidden.

use crate::{progress::ProgressSample, scroll::ItemWeight, sequencer::Phase};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionLayout {
    pub screen_height: f64,
    /// How far the start button drops while fading out.
    pub button_travel: f64,
}

impl Default for ProjectionLayout {
    fn default() -> Self {
        Self { screen_height: 800.0, button_travel: 200.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VisualParams {
    pub button_opacity: f64,
    pub button_translate_y: f64,
    pub background_translate_y: f64,
    pub text_opacity: f64,
    pub list_opacity: f64,
    /// Share of the background still "full": 1 while committing, drains to 0
    /// while running, and stays drained while finished.
    pub background_fill: f64,
    /// Per-item weights with the list opacity already applied.
    pub items: Vec<ItemWeight>,
}

pub fn project(sample: &ProgressSample, weights: &[ItemWeight], layout: &ProjectionLayout) -> VisualParams {
    let p = sample.progress.clamp(0.0, 1.0);

    // `shown` is how far the countdown screen has taken over: 0 idle, 1 running.
    let (shown, fill) = match sample.phase {
        Phase::Idle => (0.0, 0.0),
        Phase::Committing => (p, 1.0),
        Phase::Running => (1.0, 1.0 - p),
        Phase::Finished => (1.0 - p, 0.0),
    };

    let button_opacity = 1.0 - shown;
    let list_opacity = button_opacity;
    VisualParams {
        button_opacity,
        button_translate_y: layout.button_travel * shown,
        background_translate_y: layout.screen_height * (1.0 - shown),
        text_opacity: shown,
        list_opacity,
        background_fill: fill,
        items: weights
            .iter()
            .map(|w| ItemWeight { opacity: w.opacity * list_opacity, scale: w.scale })
            .collect(),
    }
}
