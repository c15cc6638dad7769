// ============================================================================
// PR FORM STATE - Draft fields + submit status for the overlay
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;
use crate::models::pr_form::{PrField, PrFormDraft};

#[derive(Clone)]
pub struct PrFormState {
    pub draft: Rc<RefCell<PrFormDraft>>,
    pub error: Rc<RefCell<Option<String>>>,
    pub submitting: Rc<RefCell<bool>>,
    /// Code of the last PR created in this session, shown as confirmation
    pub last_code: Rc<RefCell<Option<String>>>,
}

impl PrFormState {
    pub fn new() -> Self {
        Self {
            draft: Rc::new(RefCell::new(PrFormDraft::default())),
            error: Rc::new(RefCell::new(None)),
            submitting: Rc::new(RefCell::new(false)),
            last_code: Rc::new(RefCell::new(None)),
        }
    }

    pub fn get_draft(&self) -> PrFormDraft {
        self.draft.borrow().clone()
    }

    pub fn set_field(&self, field: PrField, value: String) {
        self.draft.borrow_mut().set(field, value);
    }

    pub fn get_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    pub fn is_submitting(&self) -> bool {
        *self.submitting.borrow()
    }

    pub fn set_submitting(&self, submitting: bool) {
        *self.submitting.borrow_mut() = submitting;
    }

    pub fn get_last_code(&self) -> Option<String> {
        self.last_code.borrow().clone()
    }

    pub fn set_last_code(&self, code: Option<String>) {
        *self.last_code.borrow_mut() = code;
    }

    /// Fresh draft with the requester seeded from the session
    pub fn reset(&self, requester: &str) {
        self.draft.borrow_mut().reset(requester);
        self.set_error(None);
        self.set_submitting(false);
    }
}

impl Default for PrFormState {
    fn default() -> Self {
        Self::new()
    }
}
