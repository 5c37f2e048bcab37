//! Property Category Catalogs
//!
//! Static code tables for every categorical property attribute, plus the house
//! style / subclass compatibility table. Pure data, loaded once and shared
//! read-only.

mod attribute;
mod compatibility;
mod error;
mod tables;

pub use attribute::{Attribute, HouseStyle, PorchType, ATTIC_SUBCLASS};
pub use compatibility::{CompatibilityTable, StyleRule};
pub use error::{UnknownAttribute, UnknownCategory};
pub use tables::CategoryEntry;

use serde::{Deserialize, Serialize};

/// Form state that narrows which values of an attribute are selectable
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CatalogContext {
    /// Currently chosen house style, narrows subclass choices
    pub house_style: Option<HouseStyle>,
}

impl CatalogContext {
    pub fn with_style(style: HouseStyle) -> Self {
        Self {
            house_style: Some(style),
        }
    }
}

/// Labels currently selectable for `attribute`.
///
/// Subclass labels are restricted to the chosen style's allowed codes, in the
/// table's order. Never returns an empty list.
pub fn labels_for(attribute: Attribute, context: &CatalogContext) -> Vec<&'static str> {
    entries_for(attribute, context)
        .into_iter()
        .map(|e| e.label)
        .collect()
}

/// Entries currently selectable for `attribute`, see [`labels_for`]
pub fn entries_for(attribute: Attribute, context: &CatalogContext) -> Vec<CategoryEntry> {
    let all = attribute.entries();

    let style = match (attribute, context.house_style) {
        (Attribute::MsSubClass, Some(style)) => style,
        _ => return all.to_vec(),
    };

    let table = CompatibilityTable::standard();
    let mut allowed = table.allowed(style).to_vec();
    if allowed.is_empty() {
        allowed.push(table.default_subclass(style));
    }

    let filtered: Vec<CategoryEntry> = allowed
        .iter()
        .filter_map(|code| {
            let code = code.to_string();
            all.iter().find(|e| e.code == code).copied()
        })
        .collect();

    if filtered.is_empty() {
        all.to_vec()
    } else {
        filtered
    }
}

/// Display label of a subclass code
pub fn subclass_label(code: u16) -> Result<&'static str, UnknownCategory> {
    Attribute::MsSubClass.label(&code.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_subclass_labels_follow_style() {
        let labels = labels_for(
            Attribute::MsSubClass,
            &CatalogContext::with_style(HouseStyle::OneAndHalfUnfinished),
        );
        assert_eq!(
            labels,
            vec![
                "1-1/2 Story - Unfinished All Ages",
                "2 Family Conversion - All Styles and Ages"
            ]
        );
    }

    #[test]
    fn test_unfiltered_attribute_returns_all_labels() {
        let labels = labels_for(Attribute::GarageFinish, &CatalogContext::default());
        assert_eq!(labels, vec!["Finished", "Rough Finished", "Unfinished", "No Garage"]);
    }

    #[test]
    fn test_subclass_without_style_returns_all() {
        let labels = labels_for(Attribute::MsSubClass, &CatalogContext::default());
        assert_eq!(labels.len(), Attribute::MsSubClass.entries().len());
    }

    #[test]
    fn test_subclass_label_lookup() {
        assert_eq!(subclass_label(40).unwrap(), "1-Story w/Finished Attic All Ages");
        assert!(subclass_label(55).is_err());
    }

    proptest! {
        #[test]
        fn prop_labels_never_empty(
            attr_idx in 0usize..Attribute::ALL.len(),
            style_idx in proptest::option::of(0usize..HouseStyle::ALL.len()),
        ) {
            let context = CatalogContext {
                house_style: style_idx.map(|i| HouseStyle::ALL[i]),
            };
            let labels = labels_for(Attribute::ALL[attr_idx], &context);
            prop_assert!(!labels.is_empty());
        }
    }
}
