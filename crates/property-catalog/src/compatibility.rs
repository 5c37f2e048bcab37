//! House Style / Subclass Compatibility
//!
//! Which dwelling subclass codes may be combined with which house style, and
//! which one the form preselects.

use crate::attribute::HouseStyle;
use crate::tables;

/// Registered subclasses and preselected default for one style
#[derive(Debug, Clone, Copy)]
pub struct StyleRule {
    pub style: HouseStyle,
    /// Allowed subclass codes, in the order the form offers them
    pub allowed: &'static [u16],
    /// Registered default; `None` means the first allowed code is used
    pub default: Option<u16>,
}

static STYLE_RULES: &[StyleRule] = &[
    StyleRule {
        style: HouseStyle::OneStory,
        allowed: &[20, 30, 40, 90, 120, 190],
        default: Some(20),
    },
    StyleRule {
        style: HouseStyle::OneAndHalfFinished,
        allowed: &[50, 90, 150, 190],
        default: Some(50),
    },
    StyleRule {
        style: HouseStyle::OneAndHalfUnfinished,
        allowed: &[45, 190],
        default: Some(45),
    },
    StyleRule {
        style: HouseStyle::TwoStory,
        allowed: &[60, 70, 90, 160, 190],
        default: Some(60),
    },
    StyleRule {
        style: HouseStyle::TwoAndHalfFinished,
        allowed: &[75, 190],
        default: Some(75),
    },
    StyleRule {
        style: HouseStyle::TwoAndHalfUnfinished,
        allowed: &[75, 190],
        default: None,
    },
    StyleRule {
        style: HouseStyle::SplitFoyer,
        allowed: &[85, 90, 180, 190],
        default: Some(85),
    },
    StyleRule {
        style: HouseStyle::SplitLevel,
        allowed: &[80, 90, 180, 190],
        default: Some(80),
    },
];

/// Static style → subclass relation
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityTable {
    rules: &'static [StyleRule],
}

impl CompatibilityTable {
    /// The table the form is built from
    pub const fn standard() -> Self {
        Self { rules: STYLE_RULES }
    }

    fn rule(&self, style: HouseStyle) -> Option<&StyleRule> {
        self.rules.iter().find(|r| r.style == style)
    }

    /// Subclass codes allowed for a style
    pub fn allowed(&self, style: HouseStyle) -> &'static [u16] {
        self.rule(style).map(|r| r.allowed).unwrap_or(&[])
    }

    /// Whether `code` may be combined with `style`
    pub fn is_allowed(&self, style: HouseStyle, code: u16) -> bool {
        self.allowed(style).contains(&code)
    }

    /// Preselected subclass for a style.
    ///
    /// A registered default that is not in the allowed set is ignored, so the
    /// result is always a member of [`CompatibilityTable::allowed`] unless the
    /// style has no rule at all, in which case the first global code is used.
    pub fn default_subclass(&self, style: HouseStyle) -> u16 {
        match self.rule(style) {
            Some(rule) => rule
                .default
                .filter(|code| rule.allowed.contains(code))
                .or_else(|| rule.allowed.first().copied())
                .unwrap_or_else(|| self.first_global_code()),
            None => self.first_global_code(),
        }
    }

    /// First subclass code in the catalog, the fallback for unknown styles
    pub fn first_global_code(&self) -> u16 {
        tables::MS_SUBCLASS
            .iter()
            .find_map(|e| e.code.parse().ok())
            .unwrap_or(20)
    }
}

impl Default for CompatibilityTable {
    fn default() -> Self {
        Self::standard()
    }
}
