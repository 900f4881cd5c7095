//! Maps a continuous horizontal scroll offset onto the duration list.
//!
//! The offset is measured in layout units from the first item's snap point,
//! so item `i` is centered when `offset == i * item_size`. Selection only
//! changes on settle; plain scroll updates just move the offset.

use log::{debug, warn};

use crate::catalog::{CountdownDuration, DurationCatalog};

pub const NEIGHBOR_OPACITY: f64 = 0.4;
pub const NEIGHBOR_SCALE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemWeight {
    pub opacity: f64,
    pub scale: f64,
}

impl ItemWeight {
    pub const CENTERED: Self = Self { opacity: 1.0, scale: 1.0 };
    pub const NEIGHBOR: Self = Self { opacity: NEIGHBOR_OPACITY, scale: NEIGHBOR_SCALE };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset: f64,
    pub settled_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleOutcome {
    pub index: usize,
    pub duration: CountdownDuration,
    /// False when the list snapped back onto the item that was already selected.
    pub changed: bool,
}

/// Triangular falloff around an item's snap point, flat beyond one item away.
pub fn visual_weight(item_index: usize, offset: f64, item_size: f64) -> ItemWeight {
    if !valid_item_size(item_size) || !offset.is_finite() {
        return ItemWeight::NEIGHBOR;
    }
    let d = ((offset - item_index as f64 * item_size).abs() / item_size).min(1.0);
    ItemWeight {
        opacity: lerp(1.0, NEIGHBOR_OPACITY, d),
        scale: lerp(1.0, NEIGHBOR_SCALE, d),
    }
}

fn valid_item_size(item_size: f64) -> bool {
    item_size.is_finite() && item_size > 0.0
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

pub struct ScrollPositionMapper {
    catalog: DurationCatalog,
    item_size: f64,
    state: ScrollState,
}

impl ScrollPositionMapper {
    pub fn new(catalog: DurationCatalog, item_size: f64) -> Self {
        Self {
            catalog,
            item_size,
            state: ScrollState { offset: 0.0, settled_index: 0 },
        }
    }

    /// Starts already snapped onto `index` (clamped).
    pub fn with_selection(catalog: DurationCatalog, item_size: f64, index: usize) -> Self {
        let mut mapper = Self::new(catalog, item_size);
        let index = mapper.catalog.clamp_index(index as i64);
        mapper.state = ScrollState { offset: mapper.offset_for_index(index), settled_index: index };
        mapper
    }

    pub fn catalog(&self) -> &DurationCatalog {
        &self.catalog
    }

    pub fn item_size(&self) -> f64 {
        self.item_size
    }

    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn selected_index(&self) -> usize {
        self.state.settled_index
    }

    pub fn selected(&self) -> CountdownDuration {
        // settled_index is always clamped
        self.catalog.duration_at(self.state.settled_index).unwrap_or(self.catalog.first())
    }

    pub fn offset_for_index(&self, index: usize) -> f64 {
        self.catalog.clamp_index(index as i64) as f64 * self.item_size
    }

    pub fn on_scroll(&mut self, offset: f64) {
        if offset.is_finite() {
            self.state.offset = offset;
        }
    }

    pub fn on_scroll_settle(&mut self, offset: f64, item_size: f64) -> SettleOutcome {
        if !offset.is_finite() || !valid_item_size(item_size) {
            warn!("ignoring settle with offset {} and item size {}", offset, item_size);
            return self.outcome(self.state.settled_index, false);
        }

        self.state.offset = offset;
        self.item_size = item_size;

        let raw = (offset / item_size).round() as i64;
        let index = self.catalog.clamp_index(raw);
        if index as i64 != raw {
            debug!("settle index {} clamped to {}", raw, index);
        }

        let changed = index != self.state.settled_index;
        if changed {
            self.state.settled_index = index;
            debug!("selection changed to {}s (index {})", self.selected().secs(), index);
        }
        self.outcome(index, changed)
    }

    pub fn weight(&self, item_index: usize) -> ItemWeight {
        visual_weight(item_index, self.state.offset, self.item_size)
    }

    /// Weights for every catalog item at the current offset.
    pub fn weights(&self) -> Vec<ItemWeight> {
        (0..self.catalog.len()).map(|i| self.weight(i)).collect()
    }

    fn outcome(&self, index: usize, changed: bool) -> SettleOutcome {
        SettleOutcome { index, duration: self.selected(), changed }
    }
}
