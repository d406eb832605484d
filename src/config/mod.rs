//! Configuration loading for the pay tracker.
//!
//! Settings live in a single YAML file; every field has a default.
//!
//! # Example
//!
//! ```no_run
//! use pay_tracker::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/settings.yaml").unwrap();
//! println!("Serving on {}", config.bind_address());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DEFAULT_BIND_ADDRESS, TrackerConfig};
