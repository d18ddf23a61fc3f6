//! Basemap Catalog - Static registry of tile-layer styles
//!
//! Basemaps are fixed data: a named tile URL template plus the attribution
//! its provider requires. The catalog is populated once at startup and
//! never mutated.

/// A single tile layer: URL template plus required attribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileLayerSpec {
    /// Display name of the layer (shown in the layer control)
    pub name: &'static str,
    /// Tile URL template with {s}/{z}/{x}/{y} placeholders
    pub url_template: &'static str,
    /// Attribution text required by the tile provider
    pub attribution: &'static str,
}

/// Layer composition of a basemap.
///
/// Most basemaps are a single tile layer. Satellite imagery has no place
/// names baked into the tiles, so it is composed of the imagery base plus
/// a transparent reference overlay. Carrying the distinction here keeps
/// the map composer free of catalog-specific conditionals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasemapLayers {
    /// One opaque tile layer
    Single(TileLayerSpec),
    /// Opaque imagery base plus a transparent labels overlay
    ImageryWithLabels {
        imagery: TileLayerSpec,
        labels: TileLayerSpec,
    },
}

/// A named basemap style offered to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasemapDefinition {
    /// Name shown in the basemap selector; also the lookup key
    pub name: &'static str,
    /// Tile layers this basemap is composed of
    pub layers: BasemapLayers,
}

/// Ordered registry of the available basemap styles.
#[derive(Debug, Clone)]
pub struct BasemapCatalog {
    defs: Vec<BasemapDefinition>,
}

impl BasemapCatalog {
    /// Build the catalog with the built-in styles.
    pub fn new() -> Self {
        let defs = vec![
            BasemapDefinition {
                name: "OpenStreetMap",
                layers: BasemapLayers::Single(TileLayerSpec {
                    name: "OpenStreetMap",
                    url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
                    attribution: "© OpenStreetMap contributors",
                }),
            },
            BasemapDefinition {
                name: "CartoDB Positron",
                layers: BasemapLayers::Single(TileLayerSpec {
                    name: "CartoDB Positron",
                    url_template:
                        "https://cartodb-basemaps-a.global.ssl.fastly.net/light_all/{z}/{x}/{y}.png",
                    attribution: "© OpenStreetMap © CartoDB",
                }),
            },
            BasemapDefinition {
                name: "CartoDB DarkMatter",
                layers: BasemapLayers::Single(TileLayerSpec {
                    name: "CartoDB DarkMatter",
                    url_template:
                        "https://cartodb-basemaps-a.global.ssl.fastly.net/dark_all/{z}/{x}/{y}.png",
                    attribution: "© OpenStreetMap © CartoDB",
                }),
            },
            BasemapDefinition {
                name: "Stamen Terrain",
                layers: BasemapLayers::Single(TileLayerSpec {
                    name: "Stamen Terrain",
                    url_template: "https://stamen-tiles.a.ssl.fastly.net/terrain/{z}/{x}/{y}.jpg",
                    attribution:
                        "Map tiles by Stamen Design, under CC BY 3.0 — Data © OpenStreetMap contributors",
                }),
            },
            BasemapDefinition {
                name: "Stamen Toner",
                layers: BasemapLayers::Single(TileLayerSpec {
                    name: "Stamen Toner",
                    url_template: "https://stamen-tiles.a.ssl.fastly.net/toner/{z}/{x}/{y}.png",
                    attribution:
                        "Map tiles by Stamen Design, under CC BY 3.0 — Data © OpenStreetMap contributors",
                }),
            },
            BasemapDefinition {
                name: "Stamen Watercolor",
                layers: BasemapLayers::Single(TileLayerSpec {
                    name: "Stamen Watercolor",
                    url_template:
                        "https://stamen-tiles.a.ssl.fastly.net/watercolor/{z}/{x}/{y}.jpg",
                    attribution:
                        "Map tiles by Stamen Design, under CC BY 3.0 — Data © OpenStreetMap contributors",
                }),
            },
            BasemapDefinition {
                name: "OpenTopoMap",
                layers: BasemapLayers::Single(TileLayerSpec {
                    name: "OpenTopoMap",
                    url_template: "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
                    attribution: "© OpenTopoMap contributors under CC BY-SA",
                }),
            },
            BasemapDefinition {
                name: "Esri Satellite (Hybrid)",
                layers: BasemapLayers::ImageryWithLabels {
                    imagery: TileLayerSpec {
                        name: "Esri Imagery",
                        url_template:
                            "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}",
                        attribution:
                            "Tiles © Esri — Source: Esri, Maxar, Earthstar Geographics, and the GIS User Community",
                    },
                    labels: TileLayerSpec {
                        name: "Labels",
                        url_template:
                            "https://server.arcgisonline.com/ArcGIS/rest/services/Reference/World_Boundaries_and_Places/MapServer/tile/{z}/{y}/{x}",
                        attribution: "© Esri — Boundaries & Places",
                    },
                },
            },
        ];

        Self { defs }
    }

    /// Look up a basemap by its exact name.
    pub fn get(&self, name: &str) -> Option<&BasemapDefinition> {
        self.defs.iter().find(|d| d.name == name)
    }

    /// Names of all basemaps, in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.defs.iter().map(|d| d.name).collect()
    }

    /// The basemap the page starts with.
    pub fn default_name(&self) -> &'static str {
        self.defs[0].name
    }
}

impl Default for BasemapCatalog {
    fn default() -> Self {
        Self::new()
    }
}
