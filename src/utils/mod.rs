// Shared helpers

pub mod constants;
pub mod storage;
