//! File formats.
//! Drawings come in as DXF, models go out as D-Stability `.stix` archives.
use crate::*;
use std::{
    io::{Cursor, Read, Write},
    path::Path,
};

pub mod dxf;
pub mod stix;
