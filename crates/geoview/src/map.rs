use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::bounds::{BoundingBox, BoundsError};
use crate::mercator::TileCoord;

/// Anything that can report its currently visible geographic extent.
///
/// Implementations must read the live view on every call; callers rely on
/// never seeing a cached extent.
pub trait MapWidget {
    fn viewport_bounds(&self) -> Result<BoundingBox, BoundsError>;
}

impl<W: MapWidget + ?Sized> MapWidget for &W {
    fn viewport_bounds(&self) -> Result<BoundingBox, BoundsError> {
        (**self).viewport_bounds()
    }
}

impl<W: MapWidget + ?Sized> MapWidget for Rc<W> {
    fn viewport_bounds(&self) -> Result<BoundingBox, BoundsError> {
        (**self).viewport_bounds()
    }
}

impl<W: MapWidget + ?Sized> MapWidget for Box<W> {
    fn viewport_bounds(&self) -> Result<BoundingBox, BoundsError> {
        (**self).viewport_bounds()
    }
}

/// Translates a map widget's visible extent into a [`BoundingBox`].
#[derive(Debug)]
pub struct ViewportSelector<W> {
    widget: W,
}

impl<W: MapWidget> ViewportSelector<W> {
    pub fn new(widget: W) -> Self {
        Self { widget }
    }

    /// Snapshot of the extent at the moment of the call.
    pub fn current_bounding_box(&self) -> Result<BoundingBox, BoundsError> {
        self.widget.viewport_bounds()
    }

    pub fn widget(&self) -> &W {
        &self.widget
    }
}

/// Raster base layer source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileLayerConfig {
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    /// Attribution text the provider requires alongside the map (may contain markup).
    pub attribution: String,
    pub subdomains: String,
    pub max_zoom: u8,
}

impl Default for TileLayerConfig {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
                .to_string(),
            subdomains: "abc".to_string(),
            max_zoom: 19,
        }
    }
}

impl TileLayerConfig {
    /// Expands the template for one tile, picking the subdomain the same way
    /// slippy-map clients do so browser and native requests share caches.
    pub fn tile_url(&self, coord: TileCoord) -> String {
        let subdomain = self
            .subdomains
            .chars()
            .nth((coord.x as usize + coord.y as usize) % self.subdomains.chars().count().max(1))
            .map(String::from)
            .unwrap_or_default();
        self.url_template
            .replace("{s}", &subdomain)
            .replace("{z}", &coord.z.to_string())
            .replace("{x}", &coord.x.to_string())
            .replace("{y}", &coord.y.to_string())
    }
}

/// Initial view and base layer of the map widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub zoom: f64,
    pub tile_layer: TileLayerConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: [51.505, -0.09],
            zoom: 13.0,
            tile_layer: TileLayerConfig::default(),
        }
    }
}
