pub mod geojson;
pub mod source;
pub mod track;
