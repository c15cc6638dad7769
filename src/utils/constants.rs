/// localStorage key holding the bearer token
pub const TOKEN_STORAGE_KEY: &str = "token";

/// localStorage key holding the user's display name
pub const USER_NAME_STORAGE_KEY: &str = "userName";

/// File name offered for the CSV download
pub const CSV_EXPORT_FILE_NAME: &str = "purchase_requests.csv";

pub const AUTH_LOGIN_PATH: &str = "/auth/login";
pub const AUTH_REGISTER_PATH: &str = "/auth/register";
pub const PR_LIST_PATH: &str = "/api/pr";
pub const PR_EXPORT_CSV_PATH: &str = "/api/pr/export/csv";
