//! HAAI Catalog
//!
//! Score-resolution engine for the Human Activity Automation Index.
//!
//! The dataset exists in two generations. The legacy generation stores one
//! file per domain, each activity carrying all of its scores. The split
//! generation stores one activities file and distributes the scores across
//! per-metric index files and dated assessment snapshots. This crate picks
//! the usable generation and produces one fully scored record per activity.
//!
//! # Architecture
//!
//! ```text
//! ArtifactStore → detect_generation ─┬─ SplitSource ─→ merge_scores ─┐
//!                                    └─ LegacySource ────────────────┴→ ActivityCatalog
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use haai_catalog::{Dataset, DatasetConfig};
//!
//! # fn example() -> Result<(), haai_catalog::CatalogError> {
//! let dataset = Dataset::open(DatasetConfig::new("/srv/haai"));
//! let catalog = dataset.catalog()?;
//!
//! for activity in catalog.in_wave(1) {
//!     println!("{} {}", activity.id, activity.name);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod artifacts;
pub mod assessment;
pub mod catalog;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loaders;
pub mod merge;
pub mod metadata;
pub mod source;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use artifacts::{Assessment, AssessmentFile, IndexFile, LegacyDomainFile, Scale, ScaleLevel};
pub use catalog::{ActivityCatalog, CatalogStats};
pub use config::{DatasetConfig, DatasetLayout, GenerationPolicy};
pub use dataset::Dataset;
pub use error::{CatalogError, CatalogResult};
pub use merge::{MergeReport, ScoreSource};
pub use metadata::{AgiWaveEstimate, Category, Domain, Mappings, Taxonomy};
pub use source::{CatalogSource, Generation};
pub use store::{ArtifactStore, Format, FsStore, MemoryStore};
pub use types::{domain_from_id, purpose_name, Activity, Capability, ScoreSet};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
