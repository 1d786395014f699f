//! Convert DXF soil-layer outlines into D-Stability (`.stix`) models.
//!
//! Closed lightweight polylines in a drawing are read as [`Ring`]s, normalised to clockwise
//! [`Polygon2`]s and emitted as the layers of a [`GeotechnicalModel`], all of one placeholder
//! [`SoilMaterial`]. [`pipeline::run`] does this for every drawing in a directory.

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod discover;
mod drawing;
mod error;
mod extents;
pub mod io;
mod model;
pub mod pipeline;
#[cfg(feature = "plot")]
pub mod plot;
mod point;
pub mod polygon;

pub use discover::*;
pub use drawing::*;
pub use error::*;
pub use extents::*;
pub use model::*;
pub use point::*;
pub use polygon::*;
