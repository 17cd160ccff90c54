//! Spherical Web Mercator (EPSG:3857) projection and a headless viewport model.
//!
//! Pixel space follows the slippy-map convention: the world at zoom `z` is a
//! square of `TILE_SIZE * 2^z` pixels with the origin at the north-west corner.

use std::f64::consts::PI;

use crate::bounds::{BoundingBox, BoundsError, MAX_LONGITUDE};
use crate::map::MapWidget;

pub const TILE_SIZE: f64 = 256.0;

/// Latitude at which the Mercator square is cut off.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051_128_779_806_59;

pub fn world_size_px(zoom: f64) -> f64 {
    TILE_SIZE * zoom.exp2()
}

/// Projects `(lat, lon)` to world pixel coordinates `[x, y]` at `zoom`.
pub fn project(lat: f64, lon: f64, zoom: f64) -> [f64; 2] {
    let size = world_size_px(zoom);
    let lat = lat.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
    let sin = lat.to_radians().sin();
    let x = (lon + 180.0) / 360.0 * size;
    let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * size;
    [x, y]
}

/// Inverse of [`project`]: world pixels at `zoom` back to `(lat, lon)`.
pub fn unproject(x: f64, y: f64, zoom: f64) -> (f64, f64) {
    let size = world_size_px(zoom);
    let lon = x / size * 360.0 - 180.0;
    let n = PI - 2.0 * PI * y / size;
    let lat = n.sinh().atan().to_degrees();
    (lat, lon)
}

/// Tile coordinate in ZXY scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    /// Deepest zoom whose tile indices still fit in `u32`.
    pub const MAX_ZOOM: u8 = 32;

    pub fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }

    /// Number of tiles along one axis at zoom `z`. Zooms past `MAX_ZOOM` count
    /// as `MAX_ZOOM`.
    pub fn tiles_per_axis(z: u8) -> u64 {
        1u64 << z.min(Self::MAX_ZOOM)
    }

    pub fn bounds(&self) -> Result<BoundingBox, BoundsError> {
        let n = Self::tiles_per_axis(self.z) as f64;
        let x = f64::from(self.x);
        let west = (x / n) * 360.0 - 180.0;
        let east = ((x + 1.0) / n) * 360.0 - 180.0;
        let north = tile_y_to_lat(f64::from(self.y), n);
        let south = tile_y_to_lat(f64::from(self.y) + 1.0, n);
        BoundingBox::from_extent(north, south, east, west)
    }
}

fn tile_y_to_lat(y: f64, tiles_per_axis: f64) -> f64 {
    let n = PI - 2.0 * PI * y / tiles_per_axis;
    n.sinh().atan().to_degrees()
}

/// Headless model of a slippy-map view: a center, a fractional zoom and a
/// pixel size. Its extent matches what a browser map widget reports for the
/// same view.
#[derive(Debug, Clone, PartialEq)]
pub struct MercatorViewport {
    center_lat: f64,
    center_lon: f64,
    zoom: f64,
    width_px: u32,
    height_px: u32,
}

impl MercatorViewport {
    pub const MAX_ZOOM: f64 = 22.0;
    /// Largest width or height in pixels; larger sizes are clamped.
    pub const MAX_SIZE_PX: u32 = 16_384;

    pub fn new(
        center_lat: f64,
        center_lon: f64,
        zoom: f64,
        width_px: u32,
        height_px: u32,
    ) -> Result<Self, BoundsError> {
        let mut viewport = Self {
            center_lat: 0.0,
            center_lon: 0.0,
            zoom: 0.0,
            width_px: clamp_size(width_px),
            height_px: clamp_size(height_px),
        };
        viewport.set_view(center_lat, center_lon, zoom)?;
        Ok(viewport)
    }

    /// Recenters the view. Latitude is clamped to the Mercator square and the
    /// zoom to `[0, MAX_ZOOM]`.
    pub fn set_view(&mut self, lat: f64, lon: f64, zoom: f64) -> Result<(), BoundsError> {
        if !lat.is_finite() {
            return Err(BoundsError::NonFinite { edge: "center latitude" });
        }
        if !lon.is_finite() {
            return Err(BoundsError::NonFinite { edge: "center longitude" });
        }
        if !zoom.is_finite() {
            return Err(BoundsError::NonFinite { edge: "zoom" });
        }
        self.center_lat = lat.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);
        self.center_lon = wrap_longitude(lon);
        self.zoom = zoom.clamp(0.0, Self::MAX_ZOOM);
        Ok(())
    }

    /// Moves the center by a pixel offset (positive `dx` pans east, positive
    /// `dy` pans south).
    pub fn pan_by(&mut self, dx_px: f64, dy_px: f64) -> Result<(), BoundsError> {
        let [x, y] = project(self.center_lat, self.center_lon, self.zoom);
        let (lat, lon) = unproject(x + dx_px, y + dy_px, self.zoom);
        self.set_view(lat, lon, self.zoom)
    }

    pub fn resize(&mut self, width_px: u32, height_px: u32) {
        self.width_px = clamp_size(width_px);
        self.height_px = clamp_size(height_px);
    }

    pub fn center(&self) -> (f64, f64) {
        (self.center_lat, self.center_lon)
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn size_px(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    /// Visible extent, clamped into WGS84 range.
    pub fn bounds(&self) -> Result<BoundingBox, BoundsError> {
        let [cx, cy] = project(self.center_lat, self.center_lon, self.zoom);
        let half_w = self.width_px as f64 / 2.0;
        let half_h = self.height_px as f64 / 2.0;
        let (north, west) = unproject(cx - half_w, cy - half_h, self.zoom);
        let (south, east) = unproject(cx + half_w, cy + half_h, self.zoom);
        BoundingBox::from_extent(north, south, east, west)
    }

    /// Tiles at the integer zoom level that intersect the view, row-major
    /// from the north-west corner. The pixel size cap bounds the count to a
    /// few thousand tiles.
    pub fn visible_tiles(&self) -> Vec<TileCoord> {
        let z = self.zoom.floor() as u8;
        let scale = (self.zoom - z as f64).exp2();
        let [cx, cy] = project(self.center_lat, self.center_lon, z as f64);
        let half_w = self.width_px as f64 / 2.0 / scale;
        let half_h = self.height_px as f64 / 2.0 / scale;

        let max_index = TileCoord::tiles_per_axis(z) as i64 - 1;
        let to_index = |px: f64| ((px / TILE_SIZE).floor() as i64).clamp(0, max_index) as u32;
        let (x0, x1) = (to_index(cx - half_w), to_index(cx + half_w));
        let (y0, y1) = (to_index(cy - half_h), to_index(cy + half_h));

        let count = (u64::from(x1 - x0) + 1) * (u64::from(y1 - y0) + 1);
        let mut tiles = Vec::with_capacity(usize::try_from(count).unwrap_or(0));
        for y in y0..=y1 {
            for x in x0..=x1 {
                tiles.push(TileCoord::new(z, x, y));
            }
        }
        tiles
    }
}

impl MapWidget for MercatorViewport {
    fn viewport_bounds(&self) -> Result<BoundingBox, BoundsError> {
        self.bounds()
    }
}

fn clamp_size(px: u32) -> u32 {
    px.clamp(1, MercatorViewport::MAX_SIZE_PX)
}

fn wrap_longitude(lon: f64) -> f64 {
    if (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&lon) {
        return lon;
    }
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon > 0.0 {
        180.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn project_round_trips_through_unproject() {
        let [x, y] = project(51.505, -0.09, 13.0);
        let (lat, lon) = unproject(x, y, 13.0);
        assert!(approx(lat, 51.505, 1e-9));
        assert!(approx(lon, -0.09, 1e-9));
    }

    #[test]
    fn equator_prime_meridian_is_world_center() {
        let [x, y] = project(0.0, 0.0, 0.0);
        assert!(approx(x, 128.0, 1e-9));
        assert!(approx(y, 128.0, 1e-9));
    }

    #[test]
    fn tile_zero_covers_mercator_world() {
        let b = TileCoord::new(0, 0, 0).bounds().unwrap();
        assert!(approx(b.west(), -180.0, 1e-9));
        assert!(approx(b.east(), 180.0, 1e-9));
        assert!(approx(b.north(), MAX_MERCATOR_LATITUDE, 1e-6));
        assert!(approx(b.south(), -MAX_MERCATOR_LATITUDE, 1e-6));
    }

    #[test]
    fn viewport_bounds_surround_center() {
        let v = MercatorViewport::new(51.505, -0.09, 13.0, 1024, 768).unwrap();
        let b = v.bounds().unwrap();
        assert!(b.contains(51.505, -0.09));
        let (lat, lon) = b.center();
        assert!(approx(lon, -0.09, 1e-9));
        // Mercator stretches northwards, so the box center sits slightly south
        // of the view center but within a tiny fraction of the span.
        assert!(approx(lat, 51.505, b.span_lat() * 0.01));
        // 1024px at zoom 13 spans 1024 / (256 * 8192) of the world.
        assert!(approx(b.span_lon(), 360.0 * 1024.0 / (256.0 * 8192.0), 1e-9));
    }

    #[test]
    fn bounds_are_stable_without_movement() {
        let v = MercatorViewport::new(10.0, 20.0, 5.5, 800, 600).unwrap();
        assert_eq!(v.bounds().unwrap(), v.bounds().unwrap());
    }

    #[test]
    fn pan_moves_extent_east() {
        let mut v = MercatorViewport::new(0.0, 0.0, 4.0, 512, 512).unwrap();
        let before = v.bounds().unwrap();
        v.pan_by(256.0, 0.0).unwrap();
        let after = v.bounds().unwrap();
        assert!(after.west() > before.west());
        assert!(approx(after.span_lon(), before.span_lon(), 1e-9));
        assert!(approx(after.north(), before.north(), 1e-9));
    }

    #[test]
    fn zoomed_out_view_is_clamped_to_world() {
        let v = MercatorViewport::new(0.0, 0.0, 0.0, 2048, 2048).unwrap();
        let b = v.bounds().unwrap();
        assert_eq!(b.west(), -180.0);
        assert_eq!(b.east(), 180.0);
        assert!(b.north() <= 90.0);
    }

    #[test]
    fn set_view_rejects_nan_zoom() {
        let mut v = MercatorViewport::new(0.0, 0.0, 1.0, 10, 10).unwrap();
        assert!(v.set_view(0.0, 0.0, f64::NAN).is_err());
        assert_eq!(v.zoom(), 1.0);
    }

    #[test]
    fn longitudes_wrap_into_range() {
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(540.0), 180.0);
    }

    #[test]
    fn visible_tiles_cover_center_tile() {
        let v = MercatorViewport::new(0.0, 0.0, 2.0, 256, 256).unwrap();
        let tiles = v.visible_tiles();
        // Center of the world at z=2 is the corner shared by tiles (1,1)..(2,2).
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0], TileCoord::new(2, 1, 1));
        assert_eq!(tiles[3], TileCoord::new(2, 2, 2));
    }

    #[test]
    fn oversized_view_is_clamped_and_tiles_stay_bounded() {
        let v = MercatorViewport::new(0.0, 0.0, 16.0, u32::MAX, u32::MAX).unwrap();
        let max = MercatorViewport::MAX_SIZE_PX;
        assert_eq!(v.size_px(), (max, max));

        let per_axis = (max as usize) / 256 + 2;
        let tiles = v.visible_tiles();
        assert!(!tiles.is_empty());
        assert!(tiles.len() <= per_axis * per_axis, "{} tiles", tiles.len());

        let mut v = v;
        v.resize(0, u32::MAX);
        assert_eq!(v.size_px(), (1, max));
    }

    #[test]
    fn deep_tile_zooms_do_not_overflow() {
        assert_eq!(TileCoord::tiles_per_axis(32), 1u64 << 32);
        assert_eq!(TileCoord::tiles_per_axis(40), TileCoord::tiles_per_axis(32));
        assert!(TileCoord::new(40, u32::MAX, u32::MAX).bounds().is_ok());
        assert!(TileCoord::new(31, u32::MAX, 0).bounds().is_ok());
    }
}
