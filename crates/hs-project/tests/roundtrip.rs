use hs_project::schema::*;
use hs_project::{load, load_json, load_yaml, save_json, save_yaml, validate_project};

fn sample_project() -> Project {
    let mut project = Project::with_catalogs(
        "Roundtrip Loop",
        vec![
            HeatExchangerDef {
                name: "Plate-S".to_string(),
                capital_cost: 3200.0,
                k_factor: 4.5,
            },
            HeatExchangerDef {
                name: "Shell-M".to_string(),
                capital_cost: 5400.0,
                k_factor: 2.0,
            },
        ],
        vec![PumpDef {
            name: "Inline-40".to_string(),
            speed_rpm: 1750.0,
            capital_cost: 2100.0,
            rated_head_m: 40.0,
            efficiency: 0.68,
        }],
    );
    project.economics.target = TargetDef::Power;
    project.design_space.materials = vec![MaterialDef::Pvc];
    project.sections.truncate(2);
    project
}

#[test]
fn roundtrip_yaml() {
    let project = sample_project();
    validate_project(&project).unwrap();

    let path = std::env::temp_dir().join("hs_project_roundtrip.yaml");
    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(project, loaded);

    let loaded = load(&path).unwrap();
    assert_eq!(project, loaded);
}

#[test]
fn roundtrip_json() {
    let project = sample_project();

    let path = std::env::temp_dir().join("hs_project_roundtrip.json");
    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(project, loaded);

    let loaded = load(&path).unwrap();
    assert_eq!(project, loaded);
}

#[test]
fn save_refuses_invalid_project() {
    let mut project = sample_project();
    project.pumps.clear();
    let path = std::env::temp_dir().join("hs_project_invalid.yaml");
    assert!(save_yaml(&path, &project).is_err());
}

#[test]
fn malformed_file_is_an_error() {
    let path = std::env::temp_dir().join("hs_project_malformed.yaml");
    std::fs::write(&path, "version: [not a number\n").unwrap();
    assert!(matches!(
        load_yaml(&path),
        Err(hs_project::ProjectError::Yaml(_))
    ));
}
