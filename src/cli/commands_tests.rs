use super::*;
use crate::parser::parse_project_str;
use tempfile::TempDir;

fn write_project(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("ribbon.yaml");
    std::fs::write(&path, content).unwrap();
    path
}

// =========================================================================
// STARTER_PROJECT Tests
// =========================================================================

#[test]
fn test_starter_project_is_valid() {
    let project = parse_project_str(STARTER_PROJECT, Path::new(".")).unwrap();
    let ribbon = Ribbon::from_project(project).unwrap();
    assert!(ribbon.getters().contains_key("autoSave_getPressed"));
    assert!(ribbon.getters().contains_key("status_getText"));
    assert!(ribbon.setters().contains_key("status_setText"));
}

// =========================================================================
// load_project Tests
// =========================================================================

#[test]
fn test_load_project_router_file_replaces_section() {
    let dir = TempDir::new().unwrap();
    let model = write_project(&dir, STARTER_PROJECT);
    let router_path = dir.path().join("router.json");
    std::fs::write(&router_path, r#"{"onOpen": "Module1.Open"}"#).unwrap();

    let project =
        load_project(&model, Some(&router_path), &ConfigOverrides::default()).unwrap();
    assert!(project.router.contains("onOpen"));
    assert!(!project.router.contains("onSave"));
}

#[test]
fn test_load_project_applies_overrides() {
    let dir = TempDir::new().unwrap();
    let model = write_project(&dir, STARTER_PROJECT);
    let overrides = ConfigOverrides {
        module_name: Some("Ribbon2".to_string()),
        ..ConfigOverrides::default()
    };
    let project = load_project(&model, None, &overrides).unwrap();
    assert_eq!(project.config.module_name, "Ribbon2");
}

#[test]
fn test_load_project_rejects_bad_module_override() {
    let dir = TempDir::new().unwrap();
    let model = write_project(&dir, STARTER_PROJECT);
    let overrides = ConfigOverrides {
        module_name: Some("bad name".to_string()),
        ..ConfigOverrides::default()
    };
    assert!(load_project(&model, None, &overrides)
        .unwrap_err()
        .is_configuration());
}

// =========================================================================
// Command Tests
// =========================================================================

#[test]
fn test_check_valid_project() {
    let dir = TempDir::new().unwrap();
    let model = write_project(&dir, STARTER_PROJECT);
    assert!(check(model, None, ConfigOverrides::default()).is_ok());
}

#[test]
fn test_check_reports_router_mismatch() {
    let dir = TempDir::new().unwrap();
    let model = write_project(&dir, &STARTER_PROJECT.replace("onSave: Module1.Save", "onOpen:"));
    let err = check(model, None, ConfigOverrides::default()).unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("onSave"));
}

#[test]
fn test_callbacks_fails_when_unrouted() {
    let dir = TempDir::new().unwrap();
    let model = write_project(&dir, &STARTER_PROJECT.replace("onSave: Module1.Save", "onOpen:"));
    assert!(callbacks(model, None).is_err());
}

#[test]
fn test_callbacks_ok() {
    let dir = TempDir::new().unwrap();
    let model = write_project(&dir, STARTER_PROJECT);
    assert!(callbacks(model, None).is_ok());
}

#[test]
fn test_xml_writes_into_dir_once() {
    let dir = TempDir::new().unwrap();
    let model = write_project(&dir, STARTER_PROJECT);
    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    xml(model.clone(), Some(out.clone()), None, ConfigOverrides::default(), true).unwrap();
    let written = std::fs::read_to_string(out.join("customUI.xml")).unwrap();
    assert!(written.contains("getPressed='autoSave_getPressed'"));

    let err = xml(model, Some(out), None, ConfigOverrides::default(), false).unwrap_err();
    assert!(matches!(err, RibbonError::OutputExists(_)));
}

#[test]
fn test_macros_write() {
    let dir = TempDir::new().unwrap();
    let model = write_project(&dir, STARTER_PROJECT);
    macros(
        model,
        Some(dir.path().to_path_buf()),
        None,
        ConfigOverrides::default(),
    )
    .unwrap();
    let source = std::fs::read_to_string(dir.path().join("xlribbon.bas")).unwrap();
    assert!(source.contains("Sub status_setText(control As IRibbonControl, text As String)"));
}

#[test]
fn test_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("new.yaml");
    init(path.clone()).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), STARTER_PROJECT);
    assert!(init(path).is_err());
}

#[test]
fn test_build_missing_input() {
    let dir = TempDir::new().unwrap();
    let model = write_project(&dir, STARTER_PROJECT);
    let result = build(
        model,
        dir.path().join("missing.xlam"),
        None,
        None,
        ConfigOverrides::default(),
        false,
    );
    assert!(result.is_err());
}
