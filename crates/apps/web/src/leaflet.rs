//! Minimal bindings to the page's Leaflet global `L`.

use analysis::InitError;
use geoview::{BoundingBox, BoundsError, MapConfig, MapWidget, TileLayerConfig};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = L, js_name = Map)]
    pub type LeafletMap;

    #[wasm_bindgen(catch, js_namespace = L, js_name = map)]
    fn create_map(container: &HtmlElement) -> Result<LeafletMap, JsValue>;

    #[wasm_bindgen(method, js_name = setView)]
    fn set_view(this: &LeafletMap, center: &js_sys::Array, zoom: f64) -> LeafletMap;

    #[wasm_bindgen(method, js_name = getBounds)]
    fn get_bounds(this: &LeafletMap) -> LatLngBounds;

    #[wasm_bindgen(js_namespace = L, js_name = LatLngBounds)]
    pub type LatLngBounds;

    #[wasm_bindgen(method, js_name = getNorth)]
    fn get_north(this: &LatLngBounds) -> f64;

    #[wasm_bindgen(method, js_name = getSouth)]
    fn get_south(this: &LatLngBounds) -> f64;

    #[wasm_bindgen(method, js_name = getEast)]
    fn get_east(this: &LatLngBounds) -> f64;

    #[wasm_bindgen(method, js_name = getWest)]
    fn get_west(this: &LatLngBounds) -> f64;

    #[wasm_bindgen(js_namespace = L, js_name = TileLayer)]
    pub type TileLayer;

    #[wasm_bindgen(catch, js_namespace = L, js_name = tileLayer)]
    fn create_tile_layer(url_template: &str, options: &js_sys::Object)
    -> Result<TileLayer, JsValue>;

    #[wasm_bindgen(method, js_name = addTo)]
    fn add_to(this: &TileLayer, map: &LeafletMap) -> TileLayer;
}

/// A Leaflet map mounted into a container element, with one base tile layer.
pub struct LeafletMapWidget {
    map: LeafletMap,
    _base_layer: TileLayer,
}

impl LeafletMapWidget {
    pub fn mount(container: &HtmlElement, config: &MapConfig) -> Result<Self, InitError> {
        let map = create_map(container).map_err(map_error)?;
        let center = js_sys::Array::of2(
            &JsValue::from_f64(config.center[0]),
            &JsValue::from_f64(config.center[1]),
        );
        map.set_view(&center, config.zoom);

        let options = tile_layer_options(&config.tile_layer)?;
        let layer =
            create_tile_layer(&config.tile_layer.url_template, &options).map_err(map_error)?;
        layer.add_to(&map);

        Ok(Self {
            map,
            _base_layer: layer,
        })
    }
}

impl MapWidget for LeafletMapWidget {
    fn viewport_bounds(&self) -> Result<BoundingBox, BoundsError> {
        let b = self.map.get_bounds();
        // Leaflet reports longitudes past the antimeridian when the world wraps.
        BoundingBox::from_extent(b.get_north(), b.get_south(), b.get_east(), b.get_west())
    }
}

fn tile_layer_options(config: &TileLayerConfig) -> Result<js_sys::Object, InitError> {
    let options = js_sys::Object::new();
    set(&options, "attribution", &JsValue::from_str(&config.attribution))?;
    set(&options, "subdomains", &JsValue::from_str(&config.subdomains))?;
    set(&options, "maxZoom", &JsValue::from_f64(f64::from(config.max_zoom)))?;
    Ok(options)
}

fn set(target: &js_sys::Object, key: &str, value: &JsValue) -> Result<(), InitError> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(map_error)
}

fn map_error(err: JsValue) -> InitError {
    InitError::Map(format!("{err:?}"))
}
