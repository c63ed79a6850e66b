pub mod circle;
pub mod config;
pub mod path;
pub mod polygon;
pub mod region;
pub(crate) mod scan;

pub use circle::CircleRegion;
pub use config::CoverageConfig;
pub use path::PathRegion;
pub use polygon::{CellClass, Classifier, PolygonRegion};
pub use region::Region;
