//! Map Composer Service
//!
//! Pure domain logic for turning a coordinate, a label and a basemap choice
//! into a renderable map description. This service has NO external
//! dependencies - it's pure Rust plus serde derives.

use crate::domain::basemap::{BasemapCatalog, BasemapLayers, TileLayerSpec};
use crate::domain::value_objects::MarkerColor;
use serde::Serialize;

/// Zoom level every composed map starts at.
pub const DEFAULT_ZOOM: u8 = 13;

/// A tile layer ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileLayerView {
    pub name: String,
    pub url_template: String,
    pub attribution: String,
    /// Overlay layers are drawn on top of the base layer and can be
    /// toggled independently in the layer control
    pub overlay: bool,
}

impl TileLayerView {
    fn from_spec(spec: &TileLayerSpec, overlay: bool) -> Self {
        Self {
            name: spec.name.to_string(),
            url_template: spec.url_template.to_string(),
            attribution: spec.attribution.to_string(),
            overlay,
        }
    }
}

/// The single marker placed on the composed map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub latitude: f64,
    pub longitude: f64,
    pub color: String,
    pub popup: String,
    pub tooltip: String,
}

/// A self-contained, renderable map description.
///
/// The view is pure data; the web layer serializes it to JSON and a small
/// client-side bootstrap interprets it with Leaflet. Each composition is
/// independent of any previous one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: (f64, f64),
    pub zoom: u8,
    pub tile_layers: Vec<TileLayerView>,
    pub marker: MarkerView,
    /// Always on; harmless when there is only one layer to show
    pub layer_control: bool,
}

/// Map composer service.
///
/// Builds a `MapView` centered on the given coordinate with the selected
/// basemap's tile layers and a single colored marker.
pub struct MapComposer;

impl MapComposer {
    /// Compose a map for one geocoding result.
    ///
    /// # Arguments
    /// * `catalog` - Basemap registry to resolve `basemap_name` against
    /// * `latitude`, `longitude` - Map center and marker position
    /// * `label` - Popup text; the tooltip gets a pin prefix
    /// * `color` - Marker color for the current mode
    /// * `basemap_name` - Name obtained from `catalog.names()`
    ///
    /// # Returns
    /// The composed map, or None if `basemap_name` is not in the catalog
    pub fn compose(
        catalog: &BasemapCatalog,
        latitude: f64,
        longitude: f64,
        label: &str,
        color: MarkerColor,
        basemap_name: &str,
    ) -> Option<MapView> {
        let basemap = catalog.get(basemap_name)?;

        let tile_layers = match &basemap.layers {
            BasemapLayers::Single(spec) => vec![TileLayerView::from_spec(spec, false)],
            BasemapLayers::ImageryWithLabels { imagery, labels } => vec![
                TileLayerView::from_spec(imagery, false),
                TileLayerView::from_spec(labels, true),
            ],
        };

        let marker = MarkerView {
            latitude,
            longitude,
            color: color.as_str().to_string(),
            popup: label.to_string(),
            tooltip: format!("📍 {label}"),
        };

        Some(MapView {
            center: (latitude, longitude),
            zoom: DEFAULT_ZOOM,
            tile_layers,
            marker,
            layer_control: true,
        })
    }
}
