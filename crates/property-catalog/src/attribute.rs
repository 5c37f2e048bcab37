//! Categorical Attribute Definitions
//!
//! Names every categorical question on the property form and binds it to its
//! code table, sentinel and default.

use crate::error::{UnknownAttribute, UnknownCategory};
use crate::tables::{self, CategoryEntry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Subclass code for "1-Story w/Finished Attic", the one single-story
/// subclass that carries a second floor
pub const ATTIC_SUBCLASS: u16 = 40;

/// Categorical attributes known to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    #[serde(rename = "MSZoning")]
    MsZoning,
    Neighborhood,
    HouseStyle,
    #[serde(rename = "MSSubClass")]
    MsSubClass,
    ExterQual,
    ExterCond,
    KitchenQual,
    #[serde(rename = "HeatingQC")]
    HeatingQc,
    BsmtQual,
    BsmtExposure,
    BsmtFinType1,
    FireplaceQu,
    GarageFinish,
    MasVnrType,
    Heating,
    CentralAir,
    Functional,
    LotShape,
    LotConfig,
    PorchType,
}

impl Attribute {
    /// Every attribute, in form order
    pub const ALL: [Attribute; 20] = [
        Attribute::MsZoning,
        Attribute::Neighborhood,
        Attribute::HouseStyle,
        Attribute::MsSubClass,
        Attribute::ExterQual,
        Attribute::ExterCond,
        Attribute::KitchenQual,
        Attribute::HeatingQc,
        Attribute::BsmtQual,
        Attribute::BsmtExposure,
        Attribute::BsmtFinType1,
        Attribute::FireplaceQu,
        Attribute::GarageFinish,
        Attribute::MasVnrType,
        Attribute::Heating,
        Attribute::CentralAir,
        Attribute::Functional,
        Attribute::LotShape,
        Attribute::LotConfig,
        Attribute::PorchType,
    ];

    /// Feature name the attribute is stored under in a canonical record
    pub fn feature_name(&self) -> &'static str {
        match self {
            Attribute::MsZoning => "MSZoning",
            Attribute::Neighborhood => "Neighborhood",
            Attribute::HouseStyle => "HouseStyle",
            Attribute::MsSubClass => "MSSubClass",
            Attribute::ExterQual => "ExterQual",
            Attribute::ExterCond => "ExterCond",
            Attribute::KitchenQual => "KitchenQual",
            Attribute::HeatingQc => "HeatingQC",
            Attribute::BsmtQual => "BsmtQual",
            Attribute::BsmtExposure => "BsmtExposure",
            Attribute::BsmtFinType1 => "BsmtFinType1",
            Attribute::FireplaceQu => "FireplaceQu",
            Attribute::GarageFinish => "GarageFinish",
            Attribute::MasVnrType => "MasVnrType",
            Attribute::Heating => "Heating",
            Attribute::CentralAir => "CentralAir",
            Attribute::Functional => "Functional",
            Attribute::LotShape => "LotShape",
            Attribute::LotConfig => "LotConfig",
            Attribute::PorchType => "PorchType",
        }
    }

    /// Ordered code table
    pub fn entries(&self) -> &'static [CategoryEntry] {
        match self {
            Attribute::MsZoning => tables::MS_ZONING,
            Attribute::Neighborhood => tables::NEIGHBORHOOD,
            Attribute::HouseStyle => tables::HOUSE_STYLE,
            Attribute::MsSubClass => tables::MS_SUBCLASS,
            Attribute::ExterQual
            | Attribute::ExterCond
            | Attribute::KitchenQual
            | Attribute::HeatingQc => tables::QUALITY,
            Attribute::BsmtQual => tables::BSMT_QUAL,
            Attribute::BsmtExposure => tables::BSMT_EXPOSURE,
            Attribute::BsmtFinType1 => tables::BSMT_FIN_TYPE,
            Attribute::FireplaceQu => tables::FIREPLACE_QU,
            Attribute::GarageFinish => tables::GARAGE_FINISH,
            Attribute::MasVnrType => tables::MAS_VNR_TYPE,
            Attribute::Heating => tables::HEATING,
            Attribute::CentralAir => tables::CENTRAL_AIR,
            Attribute::Functional => tables::FUNCTIONAL,
            Attribute::LotShape => tables::LOT_SHAPE,
            Attribute::LotConfig => tables::LOT_CONFIG,
            Attribute::PorchType => tables::PORCH_TYPE,
        }
    }

    /// Valid codes in catalog order
    pub fn codes(&self) -> impl Iterator<Item = &'static str> {
        self.entries().iter().map(|e| e.code)
    }

    /// Code meaning "the feature this attribute describes is absent"
    pub fn sentinel(&self) -> Option<&'static str> {
        match self {
            Attribute::BsmtQual
            | Attribute::BsmtExposure
            | Attribute::BsmtFinType1
            | Attribute::FireplaceQu
            | Attribute::GarageFinish => Some("NA"),
            Attribute::MasVnrType => Some("None"),
            _ => None,
        }
    }

    /// Canonical non-sentinel default, used for initial form values and for
    /// repairing a sentinel when the gate says the feature is present
    pub fn default_code(&self) -> &'static str {
        match self {
            Attribute::MsZoning => "RL",
            Attribute::Neighborhood => "NAmes",
            Attribute::HouseStyle => "1Story",
            Attribute::MsSubClass => "20",
            Attribute::ExterQual
            | Attribute::ExterCond
            | Attribute::KitchenQual
            | Attribute::HeatingQc
            | Attribute::BsmtQual
            | Attribute::FireplaceQu => "TA",
            Attribute::BsmtExposure => "No",
            Attribute::BsmtFinType1 | Attribute::GarageFinish => "Unf",
            Attribute::MasVnrType => "BrkFace",
            Attribute::Heating => "GasA",
            Attribute::CentralAir => "Y",
            Attribute::Functional => "Typ",
            Attribute::LotShape => "Reg",
            Attribute::LotConfig => "Inside",
            Attribute::PorchType => "OpenPorchSF",
        }
    }

    /// Whether `code` is registered for this attribute
    pub fn contains(&self, code: &str) -> bool {
        self.entries().iter().any(|e| e.code == code)
    }

    /// Check a code and hand back its static form
    pub fn validate(&self, code: &str) -> Result<&'static str, UnknownCategory> {
        self.entries()
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.code)
            .ok_or_else(|| UnknownCategory::new(*self, code))
    }

    /// Display label for a code
    pub fn label(&self, code: &str) -> Result<&'static str, UnknownCategory> {
        self.entries()
            .iter()
            .find(|e| e.code == code)
            .map(|e| e.label)
            .ok_or_else(|| UnknownCategory::new(*self, code))
    }

    /// Reverse of [`Attribute::label`]
    pub fn code_for_label(&self, label: &str) -> Result<&'static str, UnknownCategory> {
        self.entries()
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.code)
            .ok_or_else(|| UnknownCategory::new(*self, label))
    }

    /// Position of a code in the catalog order
    pub fn ordinal(&self, code: &str) -> Result<usize, UnknownCategory> {
        self.entries()
            .iter()
            .position(|e| e.code == code)
            .ok_or_else(|| UnknownCategory::new(*self, code))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.feature_name())
    }
}

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .iter()
            .copied()
            .find(|a| a.feature_name() == s)
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}

/// Architectural style of the dwelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HouseStyle {
    #[serde(rename = "1Story")]
    OneStory,
    #[serde(rename = "1.5Fin")]
    OneAndHalfFinished,
    #[serde(rename = "1.5Unf")]
    OneAndHalfUnfinished,
    #[serde(rename = "2Story")]
    TwoStory,
    #[serde(rename = "2.5Fin")]
    TwoAndHalfFinished,
    #[serde(rename = "2.5Unf")]
    TwoAndHalfUnfinished,
    #[serde(rename = "SFoyer")]
    SplitFoyer,
    #[serde(rename = "SLvl")]
    SplitLevel,
}

impl HouseStyle {
    pub const ALL: [HouseStyle; 8] = [
        HouseStyle::OneStory,
        HouseStyle::OneAndHalfFinished,
        HouseStyle::OneAndHalfUnfinished,
        HouseStyle::TwoStory,
        HouseStyle::TwoAndHalfFinished,
        HouseStyle::TwoAndHalfUnfinished,
        HouseStyle::SplitFoyer,
        HouseStyle::SplitLevel,
    ];

    /// Catalog code
    pub fn code(&self) -> &'static str {
        match self {
            HouseStyle::OneStory => "1Story",
            HouseStyle::OneAndHalfFinished => "1.5Fin",
            HouseStyle::OneAndHalfUnfinished => "1.5Unf",
            HouseStyle::TwoStory => "2Story",
            HouseStyle::TwoAndHalfFinished => "2.5Fin",
            HouseStyle::TwoAndHalfUnfinished => "2.5Unf",
            HouseStyle::SplitFoyer => "SFoyer",
            HouseStyle::SplitLevel => "SLvl",
        }
    }

    /// All living area sits on one floor (split levels count as multi-level)
    pub fn is_single_story(&self) -> bool {
        matches!(self, HouseStyle::OneStory)
    }
}

impl fmt::Display for HouseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for HouseStyle {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HouseStyle::ALL
            .iter()
            .copied()
            .find(|style| style.code() == s)
            .ok_or_else(|| UnknownCategory::new(Attribute::HouseStyle, s))
    }
}

/// Porch and deck kinds a property can report an area for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PorchType {
    #[serde(rename = "WoodDeckSF")]
    WoodDeck,
    #[serde(rename = "OpenPorchSF")]
    OpenPorch,
    EnclosedPorch,
    #[serde(rename = "3SsnPorch")]
    ThreeSeason,
    ScreenPorch,
}

impl PorchType {
    pub const ALL: [PorchType; 5] = [
        PorchType::WoodDeck,
        PorchType::OpenPorch,
        PorchType::EnclosedPorch,
        PorchType::ThreeSeason,
        PorchType::ScreenPorch,
    ];

    /// Catalog code, which is also the feature name of the area
    pub fn code(&self) -> &'static str {
        match self {
            PorchType::WoodDeck => "WoodDeckSF",
            PorchType::OpenPorch => "OpenPorchSF",
            PorchType::EnclosedPorch => "EnclosedPorch",
            PorchType::ThreeSeason => "3SsnPorch",
            PorchType::ScreenPorch => "ScreenPorch",
        }
    }
}

impl fmt::Display for PorchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PorchType {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PorchType::ALL
            .iter()
            .copied()
            .find(|p| p.code() == s)
            .ok_or_else(|| UnknownCategory::new(Attribute::PorchType, s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_labels_are_bijective() {
        for attribute in Attribute::ALL {
            let codes: HashSet<_> = attribute.codes().collect();
            let labels: HashSet<_> = attribute.entries().iter().map(|e| e.label).collect();
            assert_eq!(codes.len(), attribute.entries().len(), "{attribute} codes");
            assert_eq!(labels.len(), attribute.entries().len(), "{attribute} labels");

            for entry in attribute.entries() {
                assert_eq!(attribute.code_for_label(entry.label).unwrap(), entry.code);
            }
        }
    }

    #[test]
    fn test_defaults_and_sentinels_are_registered() {
        for attribute in Attribute::ALL {
            assert!(attribute.contains(attribute.default_code()), "{attribute}");
            assert_ne!(Some(attribute.default_code()), attribute.sentinel());
            if let Some(sentinel) = attribute.sentinel() {
                assert!(attribute.contains(sentinel), "{attribute}");
            }
        }
    }

    #[test]
    fn test_unknown_code() {
        let err = Attribute::BsmtQual.label("Great").unwrap_err();
        assert_eq!(err.attribute, Attribute::BsmtQual);
        assert_eq!(err.code, "Great");
        assert!(Attribute::Neighborhood.validate("NAmes").is_ok());
    }

    #[test]
    fn test_house_style_codes_match_catalog() {
        for style in HouseStyle::ALL {
            assert!(Attribute::HouseStyle.contains(style.code()));
            assert_eq!(style.code().parse::<HouseStyle>().unwrap(), style);
        }
        assert!("3Story".parse::<HouseStyle>().is_err());
    }

    #[test]
    fn test_porch_codes_match_catalog() {
        for porch in PorchType::ALL {
            assert!(Attribute::PorchType.contains(porch.code()));
        }
    }

    #[test]
    fn test_attribute_serializes_as_feature_name() {
        let json = serde_json::to_string(&Attribute::HeatingQc).unwrap();
        assert_eq!(json, "\"HeatingQC\"");
        assert_eq!("MSSubClass".parse::<Attribute>().unwrap(), Attribute::MsSubClass);
    }
}
