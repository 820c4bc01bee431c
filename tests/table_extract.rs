use soil_extract::config::Extraction as ExtractionConfig;
use soil_extract::engine::{
    table::{detect_value_column, TableScan},
    DocumentInput, Extractor, SourceKind,
};
use soil_extract::registry::Registry;

fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
    raw.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}

fn scan(cfg: &ExtractionConfig) -> TableScan<'_> {
    TableScan {
        registry: Registry::builtin(),
        header_keywords: &cfg.header_keywords,
        scan_next_column: cfg.scan_next_column,
        alias_labels: cfg.alias_table_labels,
    }
}

#[test]
fn densest_column_wins() {
    let t = rows(&[
        &["Zinc", "1", "0.6"],
        &["Iron", "x", "4.2"],
        &["Boron", "n/a", "0.5"],
    ]);
    assert_eq!(detect_value_column(&t), Some(2));
}

#[test]
fn tie_goes_to_earlier_column() {
    let t = rows(&[&["Zinc", "0.6", "1"], &["Iron", "4.2", "2"]]);
    assert_eq!(detect_value_column(&t), Some(1));
}

#[test]
fn no_numerals_no_column() {
    let t = rows(&[&["Zinc", "High"], &["Iron", "Low"]]);
    assert_eq!(detect_value_column(&t), None);
}

#[test]
fn header_rows_are_skipped() {
    let cfg = ExtractionConfig::default();
    let t = rows(&[
        &["Test Name 2023", "12"],
        &["Zinc (Zn)", "0.9"],
    ]);
    let out = scan(&cfg).scan(0, &t);
    assert_eq!(out.len(), 1);
    let zinc = Registry::builtin().iter().position(|p| p.name == "Zinc").unwrap();
    assert_eq!(out[0].0, zinc);
    assert_eq!(out[0].1.value, 0.9);
    assert_eq!(out[0].1.source, SourceKind::TableCell);
    assert_eq!(out[0].1.origin, "page0:row1:col1");
}

#[test]
fn reads_one_column_past_the_value_column() {
    let cfg = ExtractionConfig::default();
    let t = rows(&[
        &["pH", "6.8", ""],
        &["EC", "0.4", ""],
        &["Sulphur (S)", "", "11.2"],
    ]);
    let out = scan(&cfg).scan(0, &t);
    let values: Vec<f64> = out.iter().map(|(_, c)| c.value).collect();
    assert_eq!(values, vec![6.8, 0.4, 11.2]);
}

#[test]
fn next_column_scan_can_be_disabled() {
    let cfg = ExtractionConfig {
        scan_next_column: false,
        ..Default::default()
    };
    let t = rows(&[&["pH", "6.8"], &["EC", "0.4"], &["Sulphur (S)", "", "11.2"]]);
    let out = scan(&cfg).scan(0, &t);
    assert_eq!(out.len(), 2);
}

#[test]
fn short_names_do_not_claim_longer_words() {
    let cfg = ExtractionConfig::default();
    let s = scan(&cfg);
    let idx = |name: &str| Registry::builtin().iter().position(|p| p.name == name);
    assert_eq!(s.match_label("Available Phosphorus (P)"), idx("Phosphorus"));
    assert_eq!(s.match_label("Soil pH (1:2.5)"), idx("pH"));
    assert_eq!(s.match_label("Electrical Conductivity"), idx("EC"));
    assert_eq!(s.match_label("Available K"), idx("Potassium"));
    assert_eq!(s.match_label("DTPA Fe"), idx("Iron"));
    assert_eq!(s.match_label("Calcium"), None);
}

#[test]
fn alias_labels_can_be_disabled() {
    let cfg = ExtractionConfig {
        alias_table_labels: false,
        ..Default::default()
    };
    assert_eq!(scan(&cfg).match_label("Available K"), None);
}

#[test]
fn value_column_is_recomputed_per_page() {
    let ex = Extractor::with_defaults().unwrap();
    let doc = DocumentInput {
        text: String::new(),
        tables: vec![
            rows(&[&["pH", "6.8", "Neutral"], &["EC", "0.45", "Normal"]]),
            rows(&[
                &["S.No", "Parameter", "Value"],
                &["Zinc", "-", "0.9"],
                &["Iron", "-", "12.4"],
            ]),
        ],
    };
    let out = ex.extract(&doc);
    assert_eq!(out.get("pH").unwrap().value, 6.8);
    assert_eq!(out.get("EC").unwrap().value, 0.45);
    assert_eq!(out.get("Zinc").unwrap().value, 0.9);
    assert_eq!(out.get("Iron").unwrap().value, 12.4);
    assert_eq!(out.found(), 4);
}

#[test]
fn comma_decimals_in_cells() {
    let ex = Extractor::with_defaults().unwrap();
    let doc = DocumentInput {
        text: String::new(),
        tables: vec![rows(&[&["Organic Carbon", "0,62"], &["Boron", "0,48"]])],
    };
    let out = ex.extract(&doc);
    assert_eq!(out.get("Organic Carbon").unwrap().value, 0.62);
    assert_eq!(out.get("Boron").unwrap().value, 0.48);
}

#[test]
fn labels_with_lost_spaces_still_map() {
    let cfg = ExtractionConfig::default();
    let t = rows(&[
        &["AvailablePotassium(K)", "245"],
        &["AvailableNitrogen", "280"],
    ]);
    let out = scan(&cfg).scan(0, &t);
    let idx = |name: &str| Registry::builtin().iter().position(|p| p.name == name).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!((out[0].0, out[0].1.value), (idx("Potassium"), 245.0));
    assert_eq!((out[1].0, out[1].1.value), (idx("Nitrogen"), 280.0));
}

#[test]
fn unmappable_tables_yield_nothing() {
    let cfg = ExtractionConfig::default();
    let s = scan(&cfg);
    let unknown_labels = rows(&[&["Calcium", "12.5"], &["Magnesium", "3.1"]]);
    assert!(s.scan(0, &unknown_labels).is_empty());
    let no_numbers = rows(&[&["Zinc", "High"], &["Iron", "Low"]]);
    assert!(s.scan(1, &no_numbers).is_empty());
}
