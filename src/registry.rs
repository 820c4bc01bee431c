//! Catalogue of the soil parameters the engine knows how to extract.
//!
//! The registry is pure data. Extraction logic is closed over the set of
//! fields but reads everything else (units, ranges, labels) from here, so a
//! new parameter is a catalogue edit, not a code change.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    pub unit: String,
    /// Inclusive lower bound of a physically plausible value.
    pub min: f64,
    /// Inclusive upper bound of a physically plausible value.
    pub max: f64,
    /// Out-of-range values are rejected, never corrected.
    #[serde(default)]
    pub strict: bool,
    pub aliases: Vec<String>,
    /// Hand-tuned regexes tried before the alias-derived rules. Capture
    /// group 1 must hold the numeral.
    #[serde(default)]
    pub patterns: Vec<String>,
}

impl ParameterDefinition {
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Canonical name followed by aliases, lower-cased, first occurrence kept.
    pub fn labels(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        std::iter::once(&self.name)
            .chain(self.aliases.iter())
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty() && seen.insert(l.clone()))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    params: Vec<ParameterDefinition>,
}

static BUILTIN: LazyLock<Registry> = LazyLock::new(|| Registry {
    params: builtin_catalogue(),
});

impl Registry {
    pub fn new(params: Vec<ParameterDefinition>) -> Result<Self> {
        if params.is_empty() {
            bail!("parameter catalogue is empty");
        }
        let mut names = HashSet::new();
        for p in &params {
            if p.name.trim().is_empty() {
                bail!("parameter with empty name");
            }
            if !names.insert(p.name.to_lowercase()) {
                bail!("duplicate parameter: {}", p.name);
            }
            if p.unit.trim().is_empty() {
                bail!("parameter {} has no unit", p.name);
            }
            if !(p.min < p.max) {
                bail!("parameter {} has invalid range [{}, {}]", p.name, p.min, p.max);
            }
            if p.aliases.iter().all(|a| a.trim().is_empty()) {
                bail!("parameter {} has no aliases", p.name);
            }
        }
        Ok(Self { params })
    }

    /// The built-in catalogue, constructed once per process.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// The catalogue from config when it carries one, else the built-in.
    pub fn from_config(params: &[ParameterDefinition]) -> Result<Self> {
        if params.is_empty() {
            Ok(Self::builtin().clone())
        } else {
            Self::new(params.to_vec())
        }
    }

    pub fn get(&self, name: &str) -> Option<&ParameterDefinition> {
        self.params.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterDefinition> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn definitions(&self) -> &[ParameterDefinition] {
        &self.params
    }
}

fn entry(
    name: &str,
    unit: &str,
    range: (f64, f64),
    strict: bool,
    aliases: &[&str],
    pattern: &str,
) -> ParameterDefinition {
    ParameterDefinition {
        name: name.into(),
        unit: unit.into(),
        min: range.0,
        max: range.1,
        strict,
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        patterns: vec![pattern.into()],
    }
}

pub fn builtin_catalogue() -> Vec<ParameterDefinition> {
    vec![
        entry("pH", "pH", (3.0, 10.0), true, &["soil reaction"], r"ph[\s:]*(\d+\.?\d*)"),
        entry(
            "EC",
            "dS/m",
            (0.0, 20.0),
            false,
            &["electrical conductivity", "conductivity"],
            r"ec[\s:]*(\d+\.?\d*)",
        ),
        entry(
            "Organic Carbon",
            "%",
            (0.0, 10.0),
            false,
            &["oc", "organic carbon (oc)"],
            r"organic\s+carbon[\s:]*(\d+\.?\d*)",
        ),
        entry(
            "Nitrogen",
            "kg/ha",
            (50.0, 800.0),
            false,
            &["nitrogen (n)", "n"],
            r"nitrogen[\s:]*(\d+\.?\d*)",
        ),
        entry(
            "Phosphorus",
            "kg/ha",
            (0.0, 150.0),
            false,
            &["phosphorous", "phosphorus (p)", "p"],
            r"phosphorus[\s:]*(\d+\.?\d*)",
        ),
        entry(
            "Potassium",
            "kg/ha",
            (10.0, 800.0),
            false,
            &["potassium (k)", "k"],
            r"potassium[\s:]*(\d+\.?\d*)",
        ),
        entry(
            "Sulphur",
            "mg/kg",
            (0.0, 100.0),
            false,
            &["s", "sulfur", "sulphur (s)"],
            r"sulphur[\s:]*(\d+\.?\d*)",
        ),
        entry(
            "Zinc",
            "mg/kg",
            (0.0, 50.0),
            false,
            &["zn", "zinc (zn)", "dtpa zn"],
            r"zinc[\s:]*(\d+\.?\d*)",
        ),
        entry(
            "Iron",
            "mg/kg",
            (0.0, 200.0),
            false,
            &["fe", "iron (fe)", "dtpa fe"],
            r"iron[\s:]*(\d+\.?\d*)",
        ),
        entry(
            "Manganese",
            "mg/kg",
            (0.0, 100.0),
            false,
            &["mn", "manganese (mn)", "dtpa mn"],
            r"manganese[\s:]*(\d+\.?\d*)",
        ),
        entry(
            "Copper",
            "mg/kg",
            (0.0, 50.0),
            false,
            &["cu", "copper (cu)", "dtpa cu"],
            r"copper[\s:]*(\d+\.?\d*)",
        ),
        entry(
            "Boron",
            "mg/kg",
            (0.0, 20.0),
            false,
            &["b", "boron (b)", "hot water b"],
            r"boron[\s:]*(\d+\.?\d*)",
        ),
    ]
}
