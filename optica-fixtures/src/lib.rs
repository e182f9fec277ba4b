//! Accessors rendered by `optica` at build time for a small domain model.
//!
//! The build script plans and renders accessors for [`Entity`]; this crate
//! compiles that output so its tests run against exactly what the renderer
//! emits.

pub mod model;

mod accessors {
    use crate::model::*;

    include!(concat!(env!("OUT_DIR"), "/accessors.rs"));
}

pub use accessors::*;
pub use model::*;

impl optica::optics::Lensed for Node {
    type Accessor = NodeAccessor<Node>;
}
