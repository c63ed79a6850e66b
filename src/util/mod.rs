pub mod codec;
pub mod coord;
pub mod error;

pub use codec::{decode_bbox, encode, matches};
pub use coord::{Coordinate, destination, distance, validate, validate_strict};
pub use error::GeoCoverError;
