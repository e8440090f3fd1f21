//! External collaborators the core consumes through trait seams: where
//! tasks come from, where their feasibility metadata comes from, and where
//! the finished plan goes.

pub mod fetcher;
pub mod metadata;
pub mod registry;
pub mod writer;

pub use fetcher::TaskFetcher;
pub use metadata::MetadataProvider;
pub use writer::PlanWriter;
