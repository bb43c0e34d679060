//! The five pipeline stages, in execution order.

pub mod extend;
pub mod filter;
pub mod merge;
pub mod normalize;
pub mod sort;

pub use extend::RegionExtender;
pub use filter::ContigFilter;
pub use merge::GeneMerger;
pub use normalize::PositionNormalizer;
pub use sort::NaturalSorter;
