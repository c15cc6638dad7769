// ============================================================================
// DASHBOARD STATE - PR listing, paging, filters, overlay visibility
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::{Pagination, PrFilters, PurchaseRequest};
use crate::state::request_sequencer::RequestSequencer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Populated,
    Failed(String),
}

/// Dashboard state
#[derive(Clone)]
pub struct DashboardState {
    pub prs: Rc<RefCell<Vec<PurchaseRequest>>>,
    pub pagination: Rc<RefCell<Pagination>>,
    pub filters: Rc<RefCell<PrFilters>>,
    pub status: Rc<RefCell<LoadStatus>>,
    pub show_form: Rc<RefCell<bool>>,
    pub sequencer: RequestSequencer,
}

impl DashboardState {
    pub fn new() -> Self {
        Self {
            prs: Rc::new(RefCell::new(Vec::new())),
            pagination: Rc::new(RefCell::new(Pagination::default())),
            filters: Rc::new(RefCell::new(PrFilters::default())),
            status: Rc::new(RefCell::new(LoadStatus::Idle)),
            show_form: Rc::new(RefCell::new(false)),
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn get_prs(&self) -> Vec<PurchaseRequest> {
        self.prs.borrow().clone()
    }

    pub fn get_pagination(&self) -> Pagination {
        *self.pagination.borrow()
    }

    pub fn get_filters(&self) -> PrFilters {
        self.filters.borrow().clone()
    }

    pub fn get_status(&self) -> LoadStatus {
        self.status.borrow().clone()
    }

    pub fn set_status(&self, status: LoadStatus) {
        *self.status.borrow_mut() = status;
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.status.borrow(), LoadStatus::Loading)
    }

    pub fn set_page(&self, page: u32) {
        self.pagination.borrow_mut().page = page;
    }

    /// Store a fetched page
    pub fn apply_page(&self, items: Vec<PurchaseRequest>, total_pages: u32) {
        *self.prs.borrow_mut() = items;
        self.pagination.borrow_mut().set_total_pages(total_pages);
        self.set_status(LoadStatus::Populated);
    }

    pub fn is_form_open(&self) -> bool {
        *self.show_form.borrow()
    }

    pub fn set_form_open(&self, open: bool) {
        *self.show_form.borrow_mut() = open;
    }

    /// Drop everything loaded for the previous user
    pub fn reset(&self) {
        self.sequencer.invalidate();
        self.prs.borrow_mut().clear();
        *self.pagination.borrow_mut() = Pagination::default();
        *self.filters.borrow_mut() = PrFilters::default();
        self.set_status(LoadStatus::Idle);
        self.set_form_open(false);
    }
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_page_clamps_and_marks_populated() {
        let state = DashboardState::new();
        state.set_page(4);
        state.set_status(LoadStatus::Loading);
        assert!(state.is_loading());

        state.apply_page(vec![], 2);
        assert_eq!(state.get_pagination(), Pagination { page: 2, total_pages: 2 });
        assert_eq!(state.get_status(), LoadStatus::Populated);
    }

    #[test]
    fn reset_returns_to_idle() {
        let state = DashboardState::new();
        state.set_form_open(true);
        state.filters.borrow_mut().search = "SY".to_string();
        state.set_status(LoadStatus::Failed("boom".to_string()));

        let ticket = state.sequencer.issue();
        state.reset();
        assert!(!state.sequencer.is_current(ticket));
        assert_eq!(state.get_filters(), PrFilters::default());
        assert_eq!(state.get_status(), LoadStatus::Idle);
        assert!(!state.is_form_open());
    }
}
