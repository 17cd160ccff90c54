pub mod bounds;
pub mod map;
pub mod mercator;

// Geometry and viewport primitives shared by the browser and native front ends.
pub use bounds::*;
pub use map::*;
pub use mercator::{MercatorViewport, TileCoord};
