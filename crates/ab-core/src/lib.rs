pub mod document;
pub mod error;
pub mod geometry;
pub mod id;
pub mod layers;
pub mod model;
pub mod selection;
pub mod serialize;

pub use document::Document;
pub use error::{DocumentError, ImportError};
pub use geometry::{Axis, Bounds, Geom, Guideline, Handle, Point, ScaleResult};
pub use id::ElementId;
pub use model::*;
pub use selection::Selection;
pub use serialize::{from_json, to_json};
