use serde::Deserialize;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Drawing style token understood by the renderer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter, IntoStaticStr,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Plain,
    /// Hand-drawn look
    Scruffy,
    Boring,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_tokens_round_trip() {
        for style in Style::iter() {
            assert_eq!(Style::from_str(style.as_str()).unwrap(), style);
        }
        assert_eq!(Style::Scruffy.to_string(), "scruffy");
        assert!(Style::from_str("fancy").is_err());
    }
}
