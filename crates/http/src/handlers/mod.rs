pub mod interests;
pub mod preferences;
pub mod results;
pub mod storage;
