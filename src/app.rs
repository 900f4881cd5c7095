use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use log::{debug, info, warn};
use rcountdown::{CountdownScreen, DesktopAlert, FrameView, Phase};
use std::time::Instant;

use crate::{
    ui::{get_theme, Theme, THEMES},
    Config,
};

/// Glide speed toward the snap point, in items per second.
const GLIDE_ITEMS_PER_SEC: f64 = 12.0;

/// A keyboard or wheel "fling": the offset eases toward `target_index`, and
/// the list settles once it gets there.
#[derive(Clone, Copy, Debug)]
struct Glide {
    target_index: usize,
}

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    pub screen: CountdownScreen<DesktopAlert>,
    pub theme: Theme,
    pub theme_name: String,
    pub finish_at: Option<DateTime<Local>>,
    started: Instant,
    last_update: Instant,
    glide: Option<Glide>,
}

impl AppState {
    pub fn new(config: &Config, initial_index: usize) -> Self {
        let alert = DesktopAlert {
            notify: config.notify_enabled,
            sound: config.sound_enabled,
            bell: true,
        };
        let now = Instant::now();
        Self {
            screen: CountdownScreen::new(f64::from(config.item_width), initial_index, alert),
            theme: get_theme(&config.theme),
            theme_name: config.theme.clone(),
            finish_at: None,
            started: now,
            last_update: now,
            glide: None,
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    pub fn frame(&self) -> FrameView {
        self.screen.frame(self.now_ms())
    }

    pub fn update(&mut self) {
        let dt = self.last_update.elapsed().as_secs_f64();
        self.last_update = Instant::now();
        self.advance_glide(dt);

        let now = self.now_ms();
        for t in self.screen.tick(now) {
            self.on_transition(t.to);
        }
    }

    fn on_transition(&mut self, to: Phase) {
        match to {
            Phase::Running => {
                let secs = self.screen.sequencer().session().map_or(0, |s| s.duration.secs());
                self.finish_at = Some(Local::now() + chrono::Duration::seconds(i64::from(secs)));
            }
            Phase::Idle | Phase::Committing | Phase::Finished => self.finish_at = None,
        }
    }

    fn advance_glide(&mut self, dt: f64) {
        let Some(glide) = self.glide else { return };
        let mapper = self.screen.mapper();
        let target = mapper.offset_for_index(glide.target_index);
        let offset = mapper.state().offset;
        let step = GLIDE_ITEMS_PER_SEC * mapper.item_size() * dt;

        if (target - offset).abs() <= step {
            self.glide = None;
            let outcome = self.screen.on_scroll_settle(target);
            if outcome.changed {
                debug!("settled on {}s", outcome.duration.secs());
            }
        } else {
            self.screen.on_scroll(offset + step.copysign(target - offset));
        }
    }

    fn nudge(&mut self, delta: i64) {
        let from = self.glide.map_or(self.screen.mapper().selected_index(), |g| g.target_index);
        self.glide_to(from as i64 + delta);
    }

    fn glide_to(&mut self, index: i64) {
        let target_index = self.screen.mapper().catalog().clamp_index(index);
        self.glide = Some(Glide { target_index });
    }

    fn commit(&mut self) {
        // a commit lands on what the list has settled on, not on a glide in flight
        let now = self.now_ms();
        if self.screen.commit(now) {
            self.finish_at = None;
        }
    }

    fn skip(&mut self) {
        let now = self.now_ms();
        match self.screen.skip(now) {
            Ok(Some(t)) => {
                info!("session #{}: skipped {} -> {}", t.generation, t.from.name(), t.to.name());
                self.on_transition(t.to);
            }
            Ok(None) => debug!("nothing to skip"),
            Err(e) => warn!("skip rejected: {}", e),
        }
    }

    fn cycle_theme(&mut self, forward: bool) {
        let idx = THEMES.iter().position(|&t| t == self.theme_name).unwrap_or(0);
        let new_idx = if forward {
            (idx + 1) % THEMES.len()
        } else if idx == 0 {
            THEMES.len() - 1
        } else {
            idx - 1
        };
        self.theme_name = THEMES[new_idx].into();
        self.theme = get_theme(&self.theme_name);
    }
}

// ============================================================================
// Event Handlers
// ============================================================================

/// Returns true when the user asked to quit.
pub fn handle_input(key: KeyEvent, app: &mut AppState) -> bool {
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
    {
        return true;
    }

    match key.code {
        KeyCode::Left | KeyCode::Char('h') => app.nudge(-1),
        KeyCode::Right | KeyCode::Char('l') => app.nudge(1),
        KeyCode::Home => app.glide_to(0),
        KeyCode::End => app.glide_to(i64::MAX),
        KeyCode::Char(' ') | KeyCode::Enter => app.commit(),
        KeyCode::Char('n') => app.skip(),
        KeyCode::Char('t') => app.cycle_theme(true),
        KeyCode::Char('T') => app.cycle_theme(false),
        _ => {}
    }
    false
}

pub fn handle_mouse(mouse: MouseEvent, app: &mut AppState) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.nudge(-1),
        MouseEventKind::ScrollDown => app.nudge(1),
        _ => {}
    }
}
