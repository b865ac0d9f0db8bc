//! One compare screen's worth of state over a shared catalog.
//!
//! A session borrows the immutable catalog and owns its query inputs and
//! compare tray. It is created fresh per screen and dropped with it; nothing
//! is persisted.

use crate::catalog::{CatalogIndex, CategoryFilter, Product, ProductId};
use crate::comparison::ComparisonView;
use crate::query::query;
use crate::selection::{CompareTray, DisplayMode, TrayChange, TrayState};
use serde::Serialize;
use tracing::debug;

#[derive(Debug)]
pub struct CompareSession<'c> {
    catalog: &'c CatalogIndex,
    category: CategoryFilter,
    search: String,
    tray: CompareTray,
}

/// Serializable summary of a session, as printed by `compare-tray`.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot {
    pub category: String,
    pub query: String,
    pub results: Vec<String>,
    pub selection: Vec<String>,
    pub state: TrayState,
    pub mode: DisplayMode,
    pub capacity: String,
    pub view: ComparisonView,
}

impl<'c> CompareSession<'c> {
    /// Fresh session: `all` category, empty search, empty tray.
    pub fn new(catalog: &'c CatalogIndex) -> Self {
        Self {
            catalog,
            category: CategoryFilter::All,
            search: String::new(),
            tray: CompareTray::new(),
        }
    }

    pub fn catalog(&self) -> &'c CatalogIndex {
        self.catalog
    }

    pub fn set_category(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn query_text(&self) -> &str {
        &self.search
    }

    /// Current result list for the active category and search text.
    pub fn results(&self) -> Vec<&'c Product> {
        query(self.catalog, &self.category, &self.search)
    }

    /// Toggle a product in the tray. Ids the catalog does not contain are
    /// ignored so the tray only ever holds resolvable products.
    pub fn toggle(&mut self, id: &ProductId) -> TrayChange {
        if !self.catalog.contains(id) {
            debug!(product = %id, "toggle for unknown product ignored");
            return TrayChange::Ignored;
        }
        self.tray.toggle(id)
    }

    pub fn remove(&mut self, id: &ProductId) -> bool {
        self.tray.remove(id)
    }

    pub fn set_mode(&mut self, mode: DisplayMode) {
        self.tray.set_mode(mode);
    }

    /// Empty the tray; the display mode is kept.
    pub fn clear(&mut self) {
        self.tray.clear();
    }

    pub fn selection(&self) -> Vec<&'c Product> {
        self.tray.current_selection(self.catalog)
    }

    pub fn view(&self) -> ComparisonView {
        self.tray.view(self.catalog)
    }

    pub fn tray(&self) -> &CompareTray {
        &self.tray
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            category: self.category.to_string(),
            query: self.search.clone(),
            results: self.results().iter().map(|p| p.id.to_string()).collect(),
            selection: self.tray.ids().iter().map(ToString::to_string).collect(),
            state: self.tray.state(self.catalog),
            mode: self.tray.mode(),
            capacity: self.tray.capacity_label(),
            view: self.view(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryId;

    #[test]
    fn session_flows_from_query_to_table() {
        let catalog = CatalogIndex::seed().unwrap();
        let mut session = CompareSession::new(&catalog);
        session.set_category(CategoryId::KitchenAppliances.into());
        session.set_query("bosch");
        let results: Vec<ProductId> = session.results().iter().map(|p| p.id.clone()).collect();
        assert_eq!(results, [ProductId::new("ka-1"), ProductId::new("ka-2")]);

        for id in &results {
            assert_eq!(session.toggle(id), TrayChange::Added);
        }
        session.set_mode(DisplayMode::Table);
        match session.view() {
            ComparisonView::Table { label, rows } => {
                assert_eq!(label, "Kitchen Appliances");
                assert!(rows.iter().any(|row| row.feature_name == "Home Connect"));
            }
            other => panic!("expected table, got {other:?}"),
        }
    }

    #[test]
    fn unknown_ids_never_enter_the_tray() {
        let catalog = CatalogIndex::seed().unwrap();
        let mut session = CompareSession::new(&catalog);
        assert_eq!(session.toggle(&ProductId::new("zz-9")), TrayChange::Ignored);
        assert!(session.tray().is_empty());
        assert!(!session.remove(&ProductId::new("zz-9")));
    }

    #[test]
    fn selection_survives_category_changes() {
        let catalog = CatalogIndex::seed().unwrap();
        let mut session = CompareSession::new(&catalog);
        session.toggle(&ProductId::new("ls-1"));
        session.set_category(CategoryId::BathroomFittings.into());
        assert!(session.results().iter().all(|p| p.category == CategoryId::BathroomFittings));
        assert_eq!(session.selection()[0].brand, "Europa");

        let snapshot = session.snapshot();
        assert_eq!(snapshot.category, "bathroom-fittings");
        assert_eq!(snapshot.selection, ["ls-1"]);
        assert_eq!(snapshot.state, TrayState::Single);
        assert_eq!(snapshot.capacity, "1/3 selected");
    }
}
