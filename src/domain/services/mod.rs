mod map_composer;

pub use map_composer::{MapComposer, MapView, MarkerView, TileLayerView, DEFAULT_ZOOM};
