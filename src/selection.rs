//! Bounded compare tray.
//!
//! The tray holds up to [`TRAY_CAPACITY`] product ids in insertion order plus
//! the display mode for the comparison area. Every operation is total:
//! re-adding toggles off, a fourth add is ignored, and removing an absent id
//! changes nothing.

use crate::catalog::{CatalogIndex, CategoryMeta, Product, ProductId};
use crate::comparison::{self, ComparisonView, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub const TRAY_CAPACITY: usize = 3;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Table,
    #[default]
    Visual,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::Table => "table",
            DisplayMode::Visual => "visual",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "table" => Some(DisplayMode::Table),
            "visual" => Some(DisplayMode::Visual),
            _ => None,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tray occupancy as seen by the comparison area.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrayState {
    Empty,
    Single,
    /// Two or three products; the only state that renders a comparison.
    Comparable,
}

impl TrayState {
    pub fn for_len(len: usize) -> Self {
        match len {
            0 => TrayState::Empty,
            1 => TrayState::Single,
            _ => TrayState::Comparable,
        }
    }

    /// Prompt shown in place of the comparison.
    pub fn prompt(&self) -> &'static str {
        match self {
            TrayState::Empty => "Select products to compare",
            TrayState::Single => "Add at least one more product to compare",
            TrayState::Comparable => "",
        }
    }
}

/// Outcome of [`CompareTray::toggle`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TrayChange {
    Added,
    Removed,
    /// The tray was full and the id was not in it.
    Ignored,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompareTray {
    ids: Vec<ProductId>,
    mode: DisplayMode,
}

impl CompareTray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `id` if present, otherwise append it while there is room.
    pub fn toggle(&mut self, id: &ProductId) -> TrayChange {
        if self.remove(id) {
            return TrayChange::Removed;
        }
        if self.is_full() {
            debug!(product = %id, "compare tray full; ignoring add");
            return TrayChange::Ignored;
        }
        self.ids.push(id.clone());
        TrayChange::Added
    }

    /// Drop `id`; returns whether it was present.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        before != self.ids.len()
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= TRAY_CAPACITY
    }

    /// Occupancy counted over the ids that resolve in `catalog`, so it
    /// always agrees with [`CompareTray::view`].
    pub fn state(&self, catalog: &CatalogIndex) -> TrayState {
        TrayState::for_len(self.current_selection(catalog).len())
    }

    /// Readout such as `2/3 selected`.
    pub fn capacity_label(&self) -> String {
        format!("{}/{} selected", self.ids.len(), TRAY_CAPACITY)
    }

    /// Selected products in selection order. Ids the catalog does not know
    /// are skipped.
    pub fn current_selection<'c>(&self, catalog: &'c CatalogIndex) -> Vec<&'c Product> {
        self.ids.iter().filter_map(|id| catalog.product(id)).collect()
    }

    /// Table rows for exactly `meta`'s common features over the selection.
    pub fn comparison_rows(&self, catalog: &CatalogIndex, meta: &CategoryMeta) -> Vec<Row> {
        comparison::comparison_rows(&self.current_selection(catalog), &meta.common_features)
    }

    pub fn view(&self, catalog: &CatalogIndex) -> ComparisonView {
        comparison::build_view(catalog, &self.current_selection(catalog), self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryId;
    use crate::comparison::CellValue;

    fn id(value: &str) -> ProductId {
        ProductId::new(value)
    }

    fn tray_with(ids: &[&str]) -> CompareTray {
        let mut tray = CompareTray::new();
        for value in ids {
            assert_eq!(tray.toggle(&id(value)), TrayChange::Added);
        }
        tray
    }

    #[test]
    fn starts_empty_in_visual_mode() {
        let catalog = CatalogIndex::seed().unwrap();
        let tray = CompareTray::new();
        assert!(tray.is_empty());
        assert_eq!(tray.state(&catalog), TrayState::Empty);
        assert_eq!(tray.mode(), DisplayMode::Visual);
        assert_eq!(tray.capacity_label(), "0/3 selected");
    }

    #[test]
    fn toggle_twice_restores_prior_state() {
        let mut tray = tray_with(&["ka-1", "ls-1"]);
        let before = tray.clone();
        assert_eq!(tray.toggle(&id("bf-1")), TrayChange::Added);
        assert_eq!(tray.toggle(&id("bf-1")), TrayChange::Removed);
        assert_eq!(tray, before);

        assert_eq!(tray.toggle(&id("ka-1")), TrayChange::Removed);
        assert_eq!(tray.ids(), [id("ls-1")]);
    }

    #[test]
    fn fourth_add_is_ignored() {
        let mut tray = tray_with(&["ka-1", "ka-2", "ls-1"]);
        assert!(tray.is_full());
        let before = tray.clone();
        assert_eq!(tray.toggle(&id("bf-1")), TrayChange::Ignored);
        assert_eq!(tray, before);
        assert_eq!(tray.len(), TRAY_CAPACITY);
        assert_eq!(tray.capacity_label(), "3/3 selected");

        // A full tray still toggles off existing members.
        assert_eq!(tray.toggle(&id("ka-2")), TrayChange::Removed);
        assert_eq!(tray.ids(), [id("ka-1"), id("ls-1")]);
    }

    #[test]
    fn remove_of_absent_id_changes_nothing() {
        let mut tray = tray_with(&["ka-1"]);
        let before = tray.clone();
        assert!(!tray.remove(&id("ls-9")));
        assert_eq!(tray, before);
        assert!(tray.remove(&id("ka-1")));
        assert!(tray.is_empty());
    }

    #[test]
    fn mode_switch_keeps_membership() {
        let mut tray = tray_with(&["ka-1", "ka-2"]);
        tray.set_mode(DisplayMode::Table);
        assert_eq!(tray.mode(), DisplayMode::Table);
        assert_eq!(tray.ids(), [id("ka-1"), id("ka-2")]);
        assert_eq!(DisplayMode::parse("table"), Some(DisplayMode::Table));
        assert_eq!(DisplayMode::parse("grid"), None);
    }

    #[test]
    fn states_track_occupancy() {
        let catalog = CatalogIndex::seed().unwrap();
        let mut tray = CompareTray::new();
        tray.toggle(&id("ka-1"));
        assert_eq!(tray.state(&catalog), TrayState::Single);
        tray.toggle(&id("ka-2"));
        assert_eq!(tray.state(&catalog), TrayState::Comparable);
        tray.toggle(&id("ls-1"));
        assert_eq!(tray.state(&catalog), TrayState::Comparable);
        tray.clear();
        assert_eq!(tray.state(&catalog), TrayState::Empty);
    }

    #[test]
    fn unresolved_ids_do_not_count_towards_state() {
        let catalog = CatalogIndex::seed().unwrap();
        let tray = tray_with(&["ka-1", "zz-9"]);
        assert_eq!(tray.len(), 2);
        assert_eq!(tray.state(&catalog), TrayState::Single);
        assert_eq!(
            tray.view(&catalog),
            ComparisonView::Placeholder {
                state: TrayState::Single,
                prompt: TrayState::Single.prompt(),
            }
        );
    }

    #[test]
    fn selection_resolves_against_catalog_in_order() {
        let catalog = CatalogIndex::seed().unwrap();
        let tray = tray_with(&["ka-1", "ka-2"]);
        let selection: Vec<&str> = tray
            .current_selection(&catalog)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(selection, ["ka-1", "ka-2"]);
        assert_eq!(tray.state(&catalog), TrayState::Comparable);

        let meta = catalog.category_meta(CategoryId::KitchenAppliances).unwrap();
        let rows = tray.comparison_rows(&catalog, meta);
        let home_connect = rows
            .iter()
            .find(|row| row.feature_name == "Home Connect")
            .unwrap();
        assert_eq!(
            home_connect.values,
            vec![CellValue::Flag(false), CellValue::Flag(false)]
        );
    }

    #[test]
    fn rows_render_exactly_the_given_meta() {
        let catalog = CatalogIndex::seed().unwrap();
        let tray = tray_with(&["ka-1", "ls-1"]);
        let locks = catalog.category_meta(CategoryId::LocksSecurity).unwrap();
        let rows = tray.comparison_rows(&catalog, locks);
        assert_eq!(rows.len(), locks.common_features.len());
        let bolts = rows
            .iter()
            .find(|row| row.feature_name == "No. of Bolts")
            .unwrap();
        assert_eq!(
            bolts.values,
            vec![CellValue::Absent, CellValue::Text("6".into())]
        );
    }
}
