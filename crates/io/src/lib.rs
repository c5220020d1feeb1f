//! # janus-io
//!
//! Load level panels from CSV, persist trained models as JSON bundles, and
//! memoize file-backed values between calls.
//!
//! ```mermaid
//! graph LR
//!     A["donnees.csv"] -->|"read_csv"| B["TimeSeriesPanel"]
//!     C["ModelBundle"] -->|"write_bundle"| D["bundle.json"]
//!     D -->|"FileCache::get_or_load(read_bundle)"| E["Arc&lt;ModelBundle&gt;"]
//! ```

mod bundle;
mod cache;
mod error;
mod reader;

pub use bundle::{ModelBundle, read_bundle, write_bundle};
pub use cache::FileCache;
pub use error::IoError;
pub use reader::{ReaderConfig, read_csv};
