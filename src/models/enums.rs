use serde::{Deserialize, Serialize};

/// Error returned when a string names no known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

// Catalog order. The rule engine keeps its own evaluation order.
str_enum!(Disease {
    CommonCold => "Common Cold",
    Influenza => "Influenza (Flu)",
    Migraine => "Migraine",
    Hypertension => "Hypertension",
    Gastritis => "Gastritis",
    Eczema => "Eczema",
    Asthma => "Asthma",
    AnxietyDisorder => "Anxiety Disorder",
    Diabetes => "Diabetes Type 2",
    Bronchitis => "Bronchitis",
});

str_enum!(Engine {
    Statistical => "statistical",
    RuleBased => "rule_based",
});
