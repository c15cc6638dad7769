use serde::{Deserialize, Serialize};

/// Authenticated user context
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub display_name: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        Self {
            token: token.into(),
            display_name: (!display_name.trim().is_empty()).then_some(display_name),
        }
    }

    /// Name shown in the header and used as PR requester
    pub fn display_name_or_default(&self) -> &str {
        self.display_name.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_display_name_is_absent() {
        let s = Session::new("t1", "  ");
        assert_eq!(s.display_name, None);
        assert_eq!(s.display_name_or_default(), "");
    }
}
