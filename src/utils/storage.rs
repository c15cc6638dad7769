use web_sys::{window, Storage};

/// Browser localStorage, None outside a browser or when access is denied
pub fn get_local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}
