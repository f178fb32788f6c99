//! End-to-end integration tests.
//!
//! These tests write synthetic OBJ/MTL scenes, run the full conversion,
//! and read the exported scene back with tobj.

use std::fs;
use std::path::Path;

use udim_split::config::{ConversionConfig, UdimConfig};
use udim_split::{Pipeline, UdimError};

/// Write an OBJ with a row of `columns.len()` unit quads sharing the
/// material `skin`; quad `i` has UVs inside tile column `columns[i]`.
fn write_tiled_obj(dir: &Path, columns: &[u32]) {
    let mut obj = String::from("mtllib scene.mtl\no body\n");

    for i in 0..columns.len() {
        let x = i as f32;
        obj.push_str(&format!("v {} 0 0\nv {} 0 0\nv {} 1 0\nv {} 1 0\n", x, x + 1.0, x + 1.0, x));
    }
    for &col in columns {
        let u = col as f32;
        obj.push_str(&format!(
            "vt {} 0.1\nvt {} 0.1\nvt {} 0.9\nvt {} 0.9\n",
            u + 0.1,
            u + 0.9,
            u + 0.9,
            u + 0.1
        ));
    }
    obj.push_str("vn 0 0 1\nusemtl skin\n");
    for i in 0..columns.len() {
        let b = i * 4 + 1;
        obj.push_str(&format!(
            "f {}/{}/1 {}/{}/1 {}/{}/1 {}/{}/1\n",
            b,
            b,
            b + 1,
            b + 1,
            b + 2,
            b + 2,
            b + 3,
            b + 3
        ));
    }
    fs::write(dir.join("scene.obj"), obj).unwrap();

    let mtl = "\
newmtl skin
Kd 0.8 0.6 0.5
illum 2
map_Kd skin.<UDIM>.png
";
    fs::write(dir.join("scene.mtl"), mtl).unwrap();
}

fn config_for(dir: &Path) -> ConversionConfig {
    ConversionConfig {
        input: dir.join("scene.obj"),
        output: dir.join("out").join("scene_udim.obj"),
        ..Default::default()
    }
}

#[test]
fn splits_material_across_two_tiles() {
    let tmp = tempfile::tempdir().unwrap();
    write_tiled_obj(tmp.path(), &[0, 1, 0, 1]);
    let config = config_for(tmp.path());

    let result = Pipeline::run(&config).expect("conversion should succeed");
    assert!(result.changed);
    assert!(result.exported);
    assert_eq!(result.materials_before, 1);
    assert_eq!(result.materials_after, 2);
    assert_eq!(result.stats.polygons_reassigned, 2);

    let names: Vec<_> = result.tile_materials.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["skin_1001", "skin_1002"]);
    assert!(!result.tile_materials[0].cloned);
    assert!(result.tile_materials[1].cloned);

    let mtl = fs::read_to_string(tmp.path().join("out").join("scene_udim.mtl")).unwrap();
    assert!(mtl.contains("newmtl skin_1001"));
    assert!(mtl.contains("newmtl skin_1002"));
    assert_eq!(mtl.matches("map_Kd skin.<UDIM>.png").count(), 2);

    let options = tobj::LoadOptions {
        triangulate: false,
        single_index: false,
        ..Default::default()
    };
    let (models, materials) = tobj::load_obj(&config.output, &options).unwrap();
    let materials = materials.unwrap();
    assert_eq!(materials.len(), 2);

    // tobj starts a new model at every material switch.
    assert_eq!(models.len(), 4);
    for model in &models {
        for uv in &model.mesh.texcoords {
            assert!((0.0..1.0).contains(uv), "uv component {uv} outside the unit square");
        }
        assert_eq!(model.mesh.indices.len(), 4, "quads must stay quads");
    }
    let used: Vec<_> = models
        .iter()
        .map(|m| materials[m.mesh.material_id.unwrap()].name.as_str())
        .collect();
    assert_eq!(used, vec!["skin_1001", "skin_1002", "skin_1001", "skin_1002"]);
}

#[test]
fn unchanged_scene_is_not_exported() {
    let tmp = tempfile::tempdir().unwrap();
    write_tiled_obj(tmp.path(), &[0, 0]);
    let config = config_for(tmp.path());

    let result = Pipeline::run(&config).unwrap();
    assert!(!result.changed);
    assert!(!result.exported);
    assert!(!config.output.exists());
}

#[test]
fn always_flag_exports_unchanged_scene() {
    let tmp = tempfile::tempdir().unwrap();
    write_tiled_obj(tmp.path(), &[0, 0]);
    let config = ConversionConfig {
        always_export: true,
        ..config_for(tmp.path())
    };

    let result = Pipeline::run(&config).unwrap();
    assert!(!result.changed);
    assert!(result.exported);
    assert!(config.output.exists());
}

#[test]
fn writes_json_report() {
    let tmp = tempfile::tempdir().unwrap();
    write_tiled_obj(tmp.path(), &[0, 2]);
    let report = tmp.path().join("report.json");
    let config = ConversionConfig {
        report: Some(report.clone()),
        ..config_for(tmp.path())
    };

    Pipeline::run(&config).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["changed"], true);
    assert_eq!(json["materials_after"], 2);
    assert_eq!(json["tile_materials"][1]["tile"], 1003);
    assert_eq!(json["tile_materials"][1]["name"], "skin_1003");
    assert_eq!(json["stats"]["meshes_changed"], 1);
}

#[test]
fn overfull_input_scene_exits_with_3() {
    let tmp = tempfile::tempdir().unwrap();
    write_tiled_obj(tmp.path(), &[0, 1]);
    let config = ConversionConfig {
        udim: UdimConfig {
            max_materials: 0,
            ..Default::default()
        },
        ..config_for(tmp.path())
    };

    let err = Pipeline::run(&config).unwrap_err();
    assert!(matches!(err, UdimError::SceneCapacity { count: 1, max: 0 }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn tile_material_overflow_exits_with_4() {
    let tmp = tempfile::tempdir().unwrap();
    write_tiled_obj(tmp.path(), &[0, 1, 2]);
    let config = ConversionConfig {
        udim: UdimConfig {
            max_materials: 2,
            ..Default::default()
        },
        ..config_for(tmp.path())
    };

    let err = Pipeline::run(&config).unwrap_err();
    assert_eq!(err.exit_code(), 4);
    assert!(!config.output.exists(), "nothing is exported after a fatal error");
}

#[test]
fn missing_input_returns_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_for(tmp.path());

    let err = Pipeline::run(&config).unwrap_err();
    assert_eq!(err.exit_code(), -1);
}
