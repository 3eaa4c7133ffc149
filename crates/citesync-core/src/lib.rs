//! Citesync core: pyproject.toml → CITATION.cff field synchronization
//!
//! This crate is the pure engine behind `citesync`. It knows nothing about
//! files; callers hand it the `[project]` table of a PEP 621 manifest and the
//! previously written citation record (if any), and get back the new record.
//!
//! ## Pipeline
//!
//! ```text
//! FieldPolicy::build ──► eligible fields
//!                            │
//! [project] ──► resolve ─────┤  (priority-ordered candidates per field,
//!                            │   winner's transform applied)
//!                            ▼
//!               apply_computed  (cff-version, message, date-released)
//!                            │
//! existing ───► merge ◄──────┘  (existing ◄ resolved ◄ computed ◄ custom,
//!                 │              then minimum-completeness backfill)
//!                 ▼
//!           records_equal        (ignores date-released)
//! ```
//!
//! Nothing here touches the system clock directly: the release date comes from
//! an injected [`Clock`].

pub mod computed;
pub mod engine;
pub mod error;
pub mod mapping;
pub mod merge;
pub mod names;
pub mod policy;
pub mod resolve;
pub mod transform;

use serde_json::{Map, Value};

pub use computed::{apply_computed, Clock, FixedClock, SystemClock};
pub use engine::SyncEngine;
pub use error::{ConfigurationError, CoreError, PolicyRole};
pub use mapping::{ComputedField, ComputedKind, MappingRule, MappingTable};
pub use merge::{merge, records_equal};
pub use names::{split_name, PersonName};
pub use policy::FieldPolicy;
pub use resolve::{lookup_path, resolve};
pub use transform::Transform;

/// A key-value tree with insertion order preserved.
///
/// Used both for the `[project]` table (read-only) and for citation records.
pub type Record = Map<String, Value>;

/// CFF schema version this crate emits.
pub const CFF_VERSION: &str = "1.2.0";

/// Default `message` for generated citation files.
pub const DEFAULT_MESSAGE: &str = "If you use this software, please cite it as below.";

/// Title used when nothing else provides one.
pub const UNKNOWN_TITLE: &str = "Unknown";

/// Name of the placeholder author used when nothing else provides one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// CFF field names the engine treats specially.
pub mod fields {
    pub const CFF_VERSION: &str = "cff-version";
    pub const MESSAGE: &str = "message";
    pub const DATE_RELEASED: &str = "date-released";
    pub const TITLE: &str = "title";
    pub const AUTHORS: &str = "authors";
    pub const VERSION: &str = "version";

    /// Fields every CFF 1.2.0 record must carry.
    pub const REQUIRED: [&str; 4] = [CFF_VERSION, MESSAGE, TITLE, AUTHORS];

    /// Fields that change on their own and must not count as a modification.
    pub const VOLATILE: [&str; 1] = [DATE_RELEASED];
}
