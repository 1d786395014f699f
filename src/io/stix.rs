use super::*;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use zip::{write::SimpleFileOptions, CompressionMethod, DateTime, ZipArchive, ZipWriter};

// A .stix file is a zip archive of json documents:
// projectinfo.json             -- who/what made the file
// soils.json                   -- soil materials
// geometries/geometry.json     -- layer boundaries (X, Z)
// soillayers/soillayers.json   -- layer -> soil mapping
// stages/stage.json            -- ties a geometry to its soil layers
const CONTENT_VERSION: &str = "2";
const GEOMETRY_ID: &str = "1";
const SOIL_LAYERS_ID: &str = "2";
const STAGE_ID: &str = "3";

const PROJECT_INFO: &str = "projectinfo.json";
const SOILS: &str = "soils.json";
const GEOMETRY: &str = "geometries/geometry.json";
const SOIL_LAYERS: &str = "soillayers/soillayers.json";
const STAGE: &str = "stages/stage.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProjectInfo {
    pub content_version: String,
    pub application_created: String,
    pub project: String,
    pub label: String,
    pub remarks: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MohrCoulomb {
    pub cohesion: f64,
    pub friction_angle: f64,
    pub dilatancy: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SoilDoc {
    pub id: String,
    pub name: String,
    pub code: String,
    pub volumetric_weight_above_phreatic_level: f64,
    pub volumetric_weight_below_phreatic_level: f64,
    pub mohr_coulomb_advanced_shear_strength_model: MohrCoulomb,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Soils {
    pub content_version: String,
    pub soils: Vec<SoilDoc>,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PointXZ {
    pub x: f64,
    pub z: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LayerDoc {
    pub id: String,
    pub label: String,
    pub notes: String,
    pub points: Vec<PointXZ>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Geometry {
    pub content_version: String,
    pub id: String,
    pub layers: Vec<LayerDoc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SoilLayerDoc {
    pub layer_id: String,
    pub soil_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SoilLayers {
    pub content_version: String,
    pub id: String,
    pub soil_layers: Vec<SoilLayerDoc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stage {
    pub content_version: String,
    pub id: String,
    pub label: String,
    pub notes: String,
    pub geometry_id: String,
    pub soil_layers_id: String,
}

/// The json documents of a `.stix` archive.
#[derive(Clone, Debug, PartialEq)]
pub struct StixDocuments {
    pub project_info: ProjectInfo,
    pub soils: Soils,
    pub geometry: Geometry,
    pub soil_layers: SoilLayers,
    pub stage: Stage,
}

impl StixDocuments {
    pub fn new(model: &GeotechnicalModel, project: &str) -> Self {
        let project_info = ProjectInfo {
            content_version: CONTENT_VERSION.into(),
            application_created: concat!("dxf2stix ", env!("CARGO_PKG_VERSION")).into(),
            project: project.into(),
            label: project.into(),
            remarks: String::new(),
        };

        let soils = Soils {
            content_version: CONTENT_VERSION.into(),
            soils: model
                .soils()
                .iter()
                .map(|s| SoilDoc {
                    id: s.id.to_string(),
                    name: s.material.name.clone(),
                    code: s.material.code.clone(),
                    volumetric_weight_above_phreatic_level: s.material.unsaturated_weight,
                    volumetric_weight_below_phreatic_level: s.material.saturated_weight,
                    mohr_coulomb_advanced_shear_strength_model: MohrCoulomb {
                        cohesion: s.material.cohesion,
                        friction_angle: s.material.friction_angle,
                        dilatancy: 0.0,
                    },
                })
                .collect(),
        };

        let geometry = Geometry {
            content_version: CONTENT_VERSION.into(),
            id: GEOMETRY_ID.into(),
            layers: model
                .layers()
                .iter()
                .map(|l| LayerDoc {
                    id: l.id.to_string(),
                    label: l.label.clone(),
                    notes: String::new(),
                    // drawing y is the model's vertical axis
                    points: l.points.iter().map(|&[x, z]| PointXZ { x, z }).collect(),
                })
                .collect(),
        };

        let soil_layers = SoilLayers {
            content_version: CONTENT_VERSION.into(),
            id: SOIL_LAYERS_ID.into(),
            soil_layers: model
                .layers()
                .iter()
                .map(|l| SoilLayerDoc {
                    layer_id: l.id.to_string(),
                    soil_id: l.soil_id.to_string(),
                })
                .collect(),
        };

        let stage = Stage {
            content_version: CONTENT_VERSION.into(),
            id: STAGE_ID.into(),
            label: "Stage 1".into(),
            notes: String::new(),
            geometry_id: GEOMETRY_ID.into(),
            soil_layers_id: SOIL_LAYERS_ID.into(),
        };

        Self {
            project_info,
            soils,
            geometry,
            soil_layers,
            stage,
        }
    }
}

/// Serialize the model into `.stix` bytes.
///
/// Entries carry a fixed timestamp so unchanged input serializes to identical bytes.
pub fn to_stix(model: &GeotechnicalModel, project: &str) -> Result<Vec<u8>, String> {
    fn entry<T: Serialize>(
        zip: &mut ZipWriter<Cursor<Vec<u8>>>,
        name: &str,
        doc: &T,
    ) -> Result<(), String> {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());
        zip.start_file(name, options).map_err(|e| e.to_string())?;
        let json = serde_json::to_vec_pretty(doc).map_err(|e| e.to_string())?;
        zip.write_all(&json).map_err(|e| e.to_string())
    }

    let docs = StixDocuments::new(model, project);
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    entry(&mut zip, PROJECT_INFO, &docs.project_info)?;
    entry(&mut zip, SOILS, &docs.soils)?;
    entry(&mut zip, GEOMETRY, &docs.geometry)?;
    entry(&mut zip, SOIL_LAYERS, &docs.soil_layers)?;
    entry(&mut zip, STAGE, &docs.stage)?;

    let buf = zip.finish().map_err(|e| e.to_string())?;
    Ok(buf.into_inner())
}

/// Serialize the model to `path`, replacing any existing file.
pub fn write_stix(model: &GeotechnicalModel, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let project = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let bytes = to_stix(model, &project)
        .map_err(|e| Error::serialization(path, e))?;
    std::fs::write(path, bytes).map_err(|e| Error::serialization(path, e))
}

/// Read the documents of a `.stix` archive.
pub fn from_stix(stix: &[u8]) -> Result<StixDocuments, String> {
    fn doc<T: DeserializeOwned>(
        zip: &mut ZipArchive<Cursor<&[u8]>>,
        name: &str,
    ) -> Result<T, String> {
        let mut file = zip.by_name(name).map_err(|e| format!("{}: {}", name, e))?;
        let mut json = Vec::new();
        file.read_to_end(&mut json)
            .map_err(|e| format!("{}: {}", name, e))?;
        serde_json::from_slice(&json).map_err(|e| format!("{}: {}", name, e))
    }

    let mut zip = ZipArchive::new(Cursor::new(stix))
        .map_err(|e| e.to_string())?;

    Ok(StixDocuments {
        project_info: doc(&mut zip, PROJECT_INFO)?,
        soils: doc(&mut zip, SOILS)?,
        geometry: doc(&mut zip, GEOMETRY)?,
        soil_layers: doc(&mut zip, SOIL_LAYERS)?,
        stage: doc(&mut zip, STAGE)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> GeotechnicalModel {
        let square = vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        let mut m = GeotechnicalModel::new();
        m.add_soil(SoilMaterial::default()).unwrap();
        m.add_layer(square, DEFAULT_SOIL_NAME).unwrap();
        m
    }

    #[test]
    fn documents_describe_the_model() {
        let docs = StixDocuments::new(&model(), "plan");

        assert_eq!(docs.project_info.project, "plan");
        assert_eq!(docs.soils.soils.len(), 1);
        let soil = &docs.soils.soils[0];
        assert_eq!(soil.name, "ongedefinieerd");
        assert_eq!(soil.volumetric_weight_below_phreatic_level, 14.0);
        let strength = &soil.mohr_coulomb_advanced_shear_strength_model;
        assert_eq!(strength.cohesion, 2.0);
        assert_eq!(strength.friction_angle, 22.0);

        let layer = &docs.geometry.layers[0];
        assert_eq!(docs.geometry.layers.len(), 1);
        assert_eq!(layer.points[2], PointXZ { x: 10.0, z: 10.0 });

        let mapping = &docs.soil_layers.soil_layers[0];
        assert_eq!(mapping.soil_id, soil.id);
        assert_eq!(mapping.layer_id, layer.id);
        assert_eq!(docs.stage.geometry_id, docs.geometry.id);
        assert_eq!(docs.stage.soil_layers_id, docs.soil_layers.id);
    }

    #[test]
    fn json_uses_pascal_case() {
        let docs = StixDocuments::new(&model(), "plan");
        let json = serde_json::to_value(&docs.soils).unwrap();

        let soil = &json["Soils"][0];
        assert_eq!(soil["VolumetricWeightAbovePhreaticLevel"], 14.0);
        assert!(soil["MohrCoulombAdvancedShearStrengthModel"].is_object());
    }

    #[test]
    fn archive_reads_back() {
        let m = model();
        let bytes = to_stix(&m, "plan").unwrap();
        assert_eq!(from_stix(&bytes).unwrap(), StixDocuments::new(&m, "plan"));
    }

    #[test]
    fn serialization_is_reproducible() {
        let first = to_stix(&model(), "plan").unwrap();
        let second = to_stix(&model(), "plan").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unwritable_path_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("plan.stix");
        let e = write_stix(&model(), path).unwrap_err();
        assert!(matches!(e, Error::Serialization { .. }));
    }
}
