use soil_extract::registry::{builtin_catalogue, ParameterDefinition, Registry};

fn calcium() -> ParameterDefinition {
    ParameterDefinition {
        name: "Calcium".into(),
        unit: "meq/100g".into(),
        min: 0.0,
        max: 50.0,
        strict: false,
        aliases: vec!["ca".into()],
        patterns: vec![],
    }
}

#[test]
fn builtin_has_twelve_in_order() {
    let reg = Registry::builtin();
    let names: Vec<&str> = reg.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "pH",
            "EC",
            "Organic Carbon",
            "Nitrogen",
            "Phosphorus",
            "Potassium",
            "Sulphur",
            "Zinc",
            "Iron",
            "Manganese",
            "Copper",
            "Boron"
        ]
    );
}

#[test]
fn builtin_passes_validation() {
    let reg = Registry::new(builtin_catalogue()).unwrap();
    assert_eq!(reg.len(), 12);
}

#[test]
fn only_ph_is_strict() {
    let strict: Vec<&str> = Registry::builtin()
        .iter()
        .filter(|p| p.strict)
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(strict, vec!["pH"]);
}

#[test]
fn lookup_is_case_insensitive() {
    let k = Registry::builtin().get("potassium").unwrap();
    assert_eq!(k.unit, "kg/ha");
    assert_eq!((k.min, k.max), (10.0, 800.0));
    assert!(Registry::builtin().get("Calcium").is_none());
}

#[test]
fn rejects_inverted_range() {
    let mut p = calcium();
    p.min = 60.0;
    assert!(Registry::new(vec![p]).is_err());
}

#[test]
fn rejects_missing_aliases() {
    let mut p = calcium();
    p.aliases = vec!["  ".into()];
    assert!(Registry::new(vec![p]).is_err());
}

#[test]
fn rejects_duplicate_names() {
    let mut dup = calcium();
    dup.name = "CALCIUM".into();
    assert!(Registry::new(vec![calcium(), dup]).is_err());
}

#[test]
fn empty_config_uses_builtin() {
    let reg = Registry::from_config(&[]).unwrap();
    assert_eq!(reg.len(), Registry::builtin().len());
}

#[test]
fn labels_dedup_and_lowercase() {
    let mut p = calcium();
    p.aliases = vec!["CA".into(), "calcium".into(), "ca".into()];
    assert_eq!(p.labels(), vec!["calcium".to_string(), "ca".to_string()]);
}
