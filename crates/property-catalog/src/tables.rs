//! Code and label tables for every categorical attribute
//!
//! Codes follow the Ames housing data dictionary so that assembled records
//! line up with models trained on it.

use serde::Serialize;

/// One selectable value of a categorical attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    /// Internal code as the model sees it
    pub code: &'static str,
    /// Human label as the form shows it
    pub label: &'static str,
}

const fn entry(code: &'static str, label: &'static str) -> CategoryEntry {
    CategoryEntry { code, label }
}

pub(crate) static MS_ZONING: &[CategoryEntry] = &[
    entry("A", "Agriculture"),
    entry("C (all)", "Commercial"),
    entry("FV", "Floating Village Residential"),
    entry("I", "Industrial"),
    entry("RH", "Residential High Density"),
    entry("RL", "Residential Low Density"),
    entry("RP", "Residential Low Density Park"),
    entry("RM", "Residential Medium Density"),
];

pub(crate) static NEIGHBORHOOD: &[CategoryEntry] = &[
    entry("Blmngtn", "Bloomington Heights"),
    entry("Blueste", "Bluestem"),
    entry("BrDale", "Briardale"),
    entry("BrkSide", "Brookside"),
    entry("ClearCr", "Clear Creek"),
    entry("CollgCr", "College Creek"),
    entry("Crawfor", "Crawford"),
    entry("Edwards", "Edwards"),
    entry("Gilbert", "Gilbert"),
    entry("IDOTRR", "Iowa DOT and Rail Road"),
    entry("MeadowV", "Meadow Village"),
    entry("Mitchel", "Mitchell"),
    entry("NAmes", "North Ames"),
    entry("NoRidge", "Northridge"),
    entry("NPkVill", "Northpark Villa"),
    entry("NridgHt", "Northridge Heights"),
    entry("NWAmes", "Northwest Ames"),
    entry("OldTown", "Old Town"),
    entry("SWISU", "South & West of Iowa State University"),
    entry("Sawyer", "Sawyer"),
    entry("SawyerW", "Sawyer West"),
    entry("Somerst", "Somerset"),
    entry("StoneBr", "Stone Brook"),
    entry("Timber", "Timberland"),
    entry("Veenker", "Veenker"),
];

pub(crate) static HOUSE_STYLE: &[CategoryEntry] = &[
    entry("1Story", "One story"),
    entry("1.5Fin", "One and one-half story: 2nd level finished"),
    entry("1.5Unf", "One and one-half story: 2nd level unfinished"),
    entry("2Story", "Two story"),
    entry("2.5Fin", "Two and one-half story: 2nd level finished"),
    entry("2.5Unf", "Two and one-half story: 2nd level unfinished"),
    entry("SFoyer", "Split Foyer"),
    entry("SLvl", "Split Level"),
];

pub(crate) static MS_SUBCLASS: &[CategoryEntry] = &[
    entry("20", "1-Story 1946 & Newer All Styles"),
    entry("30", "1-Story 1945 & Older"),
    entry("40", "1-Story w/Finished Attic All Ages"),
    entry("45", "1-1/2 Story - Unfinished All Ages"),
    entry("50", "1-1/2 Story Finished All Ages"),
    entry("60", "2-Story 1946 & Newer"),
    entry("70", "2-Story 1945 & Older"),
    entry("75", "2-1/2 Story All Ages"),
    entry("80", "Split or Multi-Level"),
    entry("85", "Split Foyer"),
    entry("90", "Duplex - All Styles and Ages"),
    entry("120", "1-Story PUD 1946 & Newer"),
    entry("150", "1-1/2 Story PUD All Ages"),
    entry("160", "2-Story PUD 1946 & Newer"),
    entry("180", "PUD - Multilevel Incl Split Lev/Foyer"),
    entry("190", "2 Family Conversion - All Styles and Ages"),
];

/// Five-step grade scale shared by the exterior, kitchen and heating grades
pub(crate) static QUALITY: &[CategoryEntry] = &[
    entry("Ex", "Excellent"),
    entry("Gd", "Good"),
    entry("TA", "Typical/Average"),
    entry("Fa", "Fair"),
    entry("Po", "Poor"),
];

pub(crate) static BSMT_QUAL: &[CategoryEntry] = &[
    entry("Ex", "Excellent (100+ inches)"),
    entry("Gd", "Good (90-99 inches)"),
    entry("TA", "Typical (80-89 inches)"),
    entry("Fa", "Fair (70-79 inches)"),
    entry("Po", "Poor (<70 inches)"),
    entry("NA", "No Basement"),
];

pub(crate) static BSMT_EXPOSURE: &[CategoryEntry] = &[
    entry("Gd", "Good Exposure"),
    entry("Av", "Average Exposure"),
    entry("Mn", "Minimum Exposure"),
    entry("No", "No Exposure"),
    entry("NA", "No Basement"),
];

pub(crate) static BSMT_FIN_TYPE: &[CategoryEntry] = &[
    entry("GLQ", "Good Living Quarters"),
    entry("ALQ", "Average Living Quarters"),
    entry("BLQ", "Below Average Living Quarters"),
    entry("Rec", "Average Rec Room"),
    entry("LwQ", "Low Quality"),
    entry("Unf", "Unfinished"),
    entry("NA", "No Basement"),
];

pub(crate) static FIREPLACE_QU: &[CategoryEntry] = &[
    entry("Ex", "Excellent - Exceptional Masonry Fireplace"),
    entry("Gd", "Good - Masonry Fireplace in main level"),
    entry("TA", "Average - Prefabricated Fireplace in main living area"),
    entry("Fa", "Fair - Prefabricated Fireplace in basement"),
    entry("Po", "Poor - Ben Franklin Stove"),
    entry("NA", "No Fireplace"),
];

pub(crate) static GARAGE_FINISH: &[CategoryEntry] = &[
    entry("Fin", "Finished"),
    entry("RFn", "Rough Finished"),
    entry("Unf", "Unfinished"),
    entry("NA", "No Garage"),
];

pub(crate) static MAS_VNR_TYPE: &[CategoryEntry] = &[
    entry("BrkCmn", "Brick Common"),
    entry("BrkFace", "Brick Face"),
    entry("CBlock", "Cinder Block"),
    entry("None", "None"),
    entry("Stone", "Stone"),
];

pub(crate) static HEATING: &[CategoryEntry] = &[
    entry("Floor", "Floor Furnace"),
    entry("GasA", "Gas forced warm air furnace"),
    entry("GasW", "Gas hot water or steam heat"),
    entry("Grav", "Gravity furnace"),
    entry("OthW", "Hot water or steam heat other than gas"),
    entry("Wall", "Wall furnace"),
];

pub(crate) static CENTRAL_AIR: &[CategoryEntry] = &[entry("Y", "Yes"), entry("N", "No")];

pub(crate) static FUNCTIONAL: &[CategoryEntry] = &[
    entry("Typ", "Typical Functionality"),
    entry("Min1", "Minor Deductions 1"),
    entry("Min2", "Minor Deductions 2"),
    entry("Mod", "Moderate Deductions"),
    entry("Maj1", "Major Deductions 1"),
    entry("Maj2", "Major Deductions 2"),
    entry("Sev", "Severely Damaged"),
    entry("Sal", "Salvage only"),
];

pub(crate) static LOT_SHAPE: &[CategoryEntry] = &[
    entry("Reg", "Regular"),
    entry("IR1", "Slightly irregular"),
    entry("IR2", "Moderately Irregular"),
    entry("IR3", "Irregular"),
];

pub(crate) static LOT_CONFIG: &[CategoryEntry] = &[
    entry("Inside", "Inside lot"),
    entry("Corner", "Corner lot"),
    entry("CulDSac", "Cul-de-sac"),
    entry("FR2", "Frontage on 2 sides of property"),
    entry("FR3", "Frontage on 3 sides of property"),
];

pub(crate) static PORCH_TYPE: &[CategoryEntry] = &[
    entry("WoodDeckSF", "Wood Deck"),
    entry("OpenPorchSF", "Open Porch"),
    entry("EnclosedPorch", "Enclosed Porch"),
    entry("3SsnPorch", "Three Season Porch"),
    entry("ScreenPorch", "Screen Porch"),
];
