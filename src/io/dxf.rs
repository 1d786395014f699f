use super::*;
use ::dxf::entities::{Entity, EntityType, LwPolyline};
use ::dxf::enums::AcadVersion;
use ::dxf::{Drawing, LwPolylineVertex};
use log::debug;

/// Read the rings of a drawing file.
pub fn from_dxf_file(path: impl AsRef<Path>) -> Result<DrawingModel> {
    let path = path.as_ref();
    let drawing = Drawing::load_file(path).map_err(|e| Error::parse(path, e))?;
    Ok(extract(&drawing, path))
}

/// Read the rings of an in-memory drawing; `source` only labels the result.
pub fn from_dxf(source: impl AsRef<Path>, dxf: &[u8]) -> Result<DrawingModel> {
    let source = source.as_ref();
    let drawing = Drawing::load(&mut Cursor::new(dxf))
        .map_err(|e| Error::parse(source, e))?;
    Ok(extract(&drawing, source))
}

fn extract(drawing: &Drawing, source: &Path) -> DrawingModel {
    let mut model = DrawingModel::new(source);

    for e in drawing.entities() {
        let id = format!("{:X}", e.common.handle.0);
        if e.common.is_in_paper_space {
            debug!("{}: ignoring paper space entity {}", source.display(), id);
            continue;
        }
        match &e.specific {
            EntityType::LwPolyline(p) => match map_lw_polyline(id.clone(), p) {
                Some(ring) => model.push(ring),
                None => debug!("{}: ignoring open polyline {}", source.display(), id),
            },
            _ => debug!("{}: ignoring entity {}", source.display(), id),
        }
    }

    model
}

fn map_lw_polyline(id: String, p: &LwPolyline) -> Option<Ring> {
    let ring = Ring::new(id, p.vertices.iter().map(|v| [v.x, v.y]));
    let coincident = ring.points.len() > 1 && ring.points.first() == ring.points.last();
    (p.is_closed() || coincident).then_some(ring)
}

/// Write the rings as closed lightweight polylines.
pub fn to_dxf(model: &DrawingModel) -> Result<Vec<u8>> {
    let mut d = Drawing::new();
    // lightweight polylines do not exist before R13
    d.header.version = AcadVersion::R2000;

    for ring in &model.rings {
        let mut polyline = LwPolyline::default();
        polyline.set_is_closed(true);
        polyline.vertices = ring.points.iter().map(|&[x, y]| vertex(x, y)).collect();
        d.add_entity(Entity::new(EntityType::LwPolyline(polyline)));
    }

    d.normalize();
    let mut buf = Vec::new();
    d.save(&mut buf)
        .map_err(|e| Error::serialization(&model.source, e))?;

    Ok(buf)
}

fn vertex(x: f64, y: f64) -> LwPolylineVertex {
    LwPolylineVertex {
        x,
        y,
        ..Default::default()
    }
}
