//! Domain record stores layered on the adapter contract.
//!
//! Each store owns one key namespace and performs no direct I/O of its own.

mod interests;
mod locks;
mod preferences;
mod results;

pub use interests::{InterestStore, INTERESTS_KEY};
pub use preferences::{PreferencesStore, PREFERENCES_KEY};
pub use results::{ResultStore, RESULTS_PREFIX};
