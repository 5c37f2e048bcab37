//! Feature Schema and Canonical Records

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::warn;

/// Every feature this engine can produce, in the order of the default schema
pub const CANONICAL_FEATURES: &[&str] = &[
    "MSSubClass",
    "MSZoning",
    "LotFrontage",
    "LotArea",
    "LotShape",
    "LotConfig",
    "Neighborhood",
    "HouseStyle",
    "OverallQual",
    "OverallCond",
    "YearBuilt",
    "YearRemodAdd",
    "MasVnrType",
    "MasVnrArea",
    "ExterQual",
    "ExterCond",
    "BsmtQual",
    "BsmtExposure",
    "BsmtFinType1",
    "BsmtFinSF1",
    "BsmtUnfSF",
    "TotalBsmtSF",
    "Heating",
    "HeatingQC",
    "CentralAir",
    "1stFlrSF",
    "2ndFlrSF",
    "GrLivArea",
    "BsmtFullBath",
    "BsmtHalfBath",
    "FullBath",
    "HalfBath",
    "BedroomAbvGr",
    "KitchenAbvGr",
    "KitchenQual",
    "TotRmsAbvGrd",
    "Functional",
    "Fireplaces",
    "FireplaceQu",
    "GarageFinish",
    "GarageCars",
    "GarageArea",
    "WoodDeckSF",
    "OpenPorchSF",
    "EnclosedPorch",
    "3SsnPorch",
    "ScreenPorch",
    "PoolArea",
    "TotalSF",
    "TotalBathrooms",
    "TotalArea",
    "TotalPorchSF",
    "HouseAge",
    "HouseRemodelAge",
];

/// Ordered set of feature names a model consumes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExpectedFeatures {
    names: Vec<String>,
}

impl ExpectedFeatures {
    /// Build from an ordered list; repeated names keep their first position
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for name in names {
            let name = name.into();
            if seen.insert(name.clone()) {
                unique.push(name);
            } else {
                warn!("Duplicate expected feature {:?} ignored", name);
            }
        }
        Self { names: unique }
    }

    /// The full list of features this engine produces
    pub fn canonical() -> Self {
        Self::new(CANONICAL_FEATURES.iter().copied())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }
}

impl Default for ExpectedFeatures {
    fn default() -> Self {
        Self::canonical()
    }
}

impl From<Vec<String>> for ExpectedFeatures {
    fn from(names: Vec<String>) -> Self {
        Self::new(names)
    }
}

impl From<ExpectedFeatures> for Vec<String> {
    fn from(expected: ExpectedFeatures) -> Self {
        expected.names
    }
}

/// A single feature value: numeric or a categorical code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Code(String),
}

impl FeatureValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(n) => Some(*n),
            FeatureValue::Code(_) => None,
        }
    }

    pub fn as_code(&self) -> Option<&str> {
        match self {
            FeatureValue::Code(c) => Some(c),
            FeatureValue::Number(_) => None,
        }
    }
}

impl Default for FeatureValue {
    fn default() -> Self {
        FeatureValue::Number(0.0)
    }
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Number(n) => write!(f, "{n}"),
            FeatureValue::Code(c) => f.write_str(c),
        }
    }
}

impl From<f64> for FeatureValue {
    fn from(value: f64) -> Self {
        FeatureValue::Number(value)
    }
}

impl From<u8> for FeatureValue {
    fn from(value: u8) -> Self {
        FeatureValue::Number(f64::from(value))
    }
}

impl From<i32> for FeatureValue {
    fn from(value: i32) -> Self {
        FeatureValue::Number(f64::from(value))
    }
}

impl From<&str> for FeatureValue {
    fn from(value: &str) -> Self {
        FeatureValue::Code(value.to_string())
    }
}

/// Feature mapping whose key set is exactly an [`ExpectedFeatures`] list.
///
/// Keys are fixed at construction; later writes can only replace values.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalFeatureRecord {
    entries: Vec<(String, FeatureValue)>,
    index: HashMap<String, usize>,
}

impl CanonicalFeatureRecord {
    /// Every expected name set to `0`
    pub fn zeroed(expected: &ExpectedFeatures) -> Self {
        let entries: Vec<(String, FeatureValue)> = expected
            .names()
            .iter()
            .map(|name| (name.clone(), FeatureValue::default()))
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Replace the value of an existing key. Returns `false` and leaves the
    /// record untouched when `name` is not part of the schema.
    pub fn set(&mut self, name: &str, value: FeatureValue) -> bool {
        match self.index.get(name) {
            Some(&i) => {
                self.entries[i].1 = value;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Numeric value of a feature, `None` if absent or categorical
    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(FeatureValue::as_number)
    }

    /// Code of a feature, `None` if absent or numeric
    pub fn code(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FeatureValue::as_code)
    }

    /// Feature names in schema order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the key set equals `expected`, in order
    pub fn matches_schema(&self, expected: &ExpectedFeatures) -> bool {
        self.names().eq(expected.names().iter().map(String::as_str))
    }
}

impl Serialize for CanonicalFeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
