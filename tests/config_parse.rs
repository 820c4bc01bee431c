use soil_extract::config::Config;

#[test]
fn parse_example_config() {
    let raw = include_str!("../soil-extract.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert!(cfg.limits.max_parallel_documents >= 1);
    assert!(cfg.parameters.is_empty());
    assert_eq!(cfg.extraction.header_keywords.len(), 4);
    assert!(cfg.extraction.qualifier_words.iter().any(|w| w == "negligible"));
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let cfg: Config = toml::from_str("[logging]\nlevel = \"debug\"\n").expect("parse TOML");
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.extraction.text_fallback);
    assert!(cfg.security.reject_url_inputs);
}

#[test]
fn custom_catalogue_from_toml() {
    let raw = r#"
[[parameters]]
name = "Calcium"
unit = "meq/100g"
min = 0.0
max = 50.0
aliases = ["ca"]
"#;
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert_eq!(cfg.parameters.len(), 1);
    assert!(!cfg.parameters[0].strict);
    assert!(cfg.parameters[0].patterns.is_empty());
}
