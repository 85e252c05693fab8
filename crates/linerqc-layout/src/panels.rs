//! Flat, indexable panel collection owned by the host document.

use linerqc_core::geometry::{Geometry, Panel, PanelId};
use rustc_hash::FxHashMap;

/// Panels in insertion order with an id index.
///
/// The host creates and removes panels; engines only read neighbors and
/// write geometry on commit or cancel. Insertion order is the snap
/// tie-break order.
#[derive(Debug, Clone, Default)]
pub struct PanelSet {
    panels: Vec<Panel>,
    index: FxHashMap<PanelId, usize>,
}

impl PanelSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a panel, replacing (in place) any panel with the same id.
    pub fn insert(&mut self, panel: Panel) {
        match self.index.get(&panel.id) {
            Some(&slot) => self.panels[slot] = panel,
            None => {
                self.index.insert(panel.id, self.panels.len());
                self.panels.push(panel);
            }
        }
    }

    /// Remove a panel, preserving the order of the rest.
    pub fn remove(&mut self, id: PanelId) -> Option<Panel> {
        let slot = self.index.remove(&id)?;
        let removed = self.panels.remove(slot);
        for (offset, panel) in self.panels.iter().enumerate().skip(slot) {
            self.index.insert(panel.id, offset);
        }
        Some(removed)
    }

    #[must_use]
    pub fn get(&self, id: PanelId) -> Option<&Panel> {
        self.index.get(&id).map(|&slot| &self.panels[slot])
    }

    #[must_use]
    pub fn geometry(&self, id: PanelId) -> Option<Geometry> {
        self.get(id).map(|panel| panel.geometry)
    }

    #[must_use]
    pub fn contains(&self, id: PanelId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Panel> {
        self.panels.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Panel] {
        &self.panels
    }

    /// Geometry of every panel except `id`, in insertion order.
    #[must_use]
    pub fn neighbors_of(&self, id: PanelId) -> Vec<Geometry> {
        self.panels
            .iter()
            .filter(|panel| panel.id != id)
            .map(|panel| panel.geometry)
            .collect()
    }

    /// Overwrite the geometry of an existing panel. Returns `false` when the
    /// panel is gone.
    pub(crate) fn set_geometry(&mut self, id: PanelId, geometry: Geometry) -> bool {
        match self.index.get(&id) {
            Some(&slot) => {
                self.panels[slot].geometry = geometry;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set_roll_number(&mut self, id: PanelId, roll_number: Option<String>) -> bool {
        match self.index.get(&id) {
            Some(&slot) => {
                self.panels[slot].roll_number = roll_number;
                true
            }
            None => false,
        }
    }
}

impl FromIterator<Panel> for PanelSet {
    fn from_iter<I: IntoIterator<Item = Panel>>(iter: I) -> Self {
        let mut set = Self::new();
        for panel in iter {
            set.insert(panel);
        }
        set
    }
}
