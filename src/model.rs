//! The geotechnical model written out as a `.stix` file.
use crate::*;

/// Ids below this are reserved for the model's own documents.
const FIRST_ID: u32 = 100;

/// Name and code of the material every layer is assigned.
pub const DEFAULT_SOIL_NAME: &str = "ongedefinieerd";

/// Strength and weight parameters of a soil.
#[derive(Clone, Debug, PartialEq)]
pub struct SoilMaterial {
    pub name: String,
    pub code: String,
    /// Unit weight above the phreatic level (kN/m3).
    pub unsaturated_weight: f64,
    /// Unit weight below the phreatic level (kN/m3).
    pub saturated_weight: f64,
    /// Cohesion (kPa).
    pub cohesion: f64,
    /// Friction angle (degrees).
    pub friction_angle: f64,
}

impl Default for SoilMaterial {
    /// The placeholder material; nothing about the soil is inferred from the drawing.
    fn default() -> Self {
        Self {
            name: DEFAULT_SOIL_NAME.to_string(),
            code: DEFAULT_SOIL_NAME.to_string(),
            unsaturated_weight: 14.0,
            saturated_weight: 14.0,
            cohesion: 2.0,
            friction_angle: 22.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Soil {
    pub id: u32,
    pub material: SoilMaterial,
}

/// A layer boundary (open, closed implicitly) and the soil it consists of.
#[derive(Clone, Debug, PartialEq)]
pub struct SoilLayer {
    pub id: u32,
    pub soil_id: u32,
    pub label: String,
    pub points: Vec<Point2>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeotechnicalModel {
    next_id: u32,
    soils: Vec<Soil>,
    layers: Vec<SoilLayer>,
}

impl Default for GeotechnicalModel {
    fn default() -> Self {
        Self::new()
    }
}

impl GeotechnicalModel {
    pub fn new() -> Self {
        Self {
            next_id: FIRST_ID,
            soils: Vec::new(),
            layers: Vec::new(),
        }
    }

    fn take_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn soils(&self) -> &[Soil] {
        &self.soils
    }

    pub fn layers(&self) -> &[SoilLayer] {
        &self.layers
    }

    pub fn soil(&self, name: &str) -> Option<&Soil> {
        self.soils.iter().find(|s| s.material.name == name)
    }

    /// Register a material, returning its id.
    pub fn add_soil(&mut self, material: SoilMaterial) -> Result<u32> {
        if self.soil(&material.name).is_some() {
            let message = format!("soil '{}' is already defined", material.name);
            return Err(Error::Geometry(message));
        }
        let id = self.take_id();
        self.soils.push(Soil { id, material });
        Ok(id)
    }

    /// Add a layer bounded by `points` made of the soil named `soil`, returning the layer id.
    ///
    /// The boundary is closed implicitly. Points are taken as given, a repeated point included.
    pub fn add_layer(&mut self, points: Vec<Point2>, soil: &str) -> Result<u32> {
        let soil_id = self
            .soil(soil)
            .map(|s| s.id)
            .ok_or_else(|| Error::Geometry(format!("unknown soil '{}'", soil)))?;

        if points.len() < 3 {
            let message = format!(
                "layer boundary requires 3 or more points, found {}",
                points.len()
            );
            return Err(Error::Geometry(message));
        }

        let id = self.take_id();
        self.layers.push(SoilLayer {
            id,
            soil_id,
            label: format!("Layer {}", self.layers.len() + 1),
            points,
        });
        Ok(id)
    }
}
