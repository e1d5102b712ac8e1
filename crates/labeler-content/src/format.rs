//! On-disk format detection

use serde::{Deserialize, Serialize};

/// The two encodings a KiCad project file can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    /// JSON document (KiCad 9+)
    Json,
    /// Parenthesized S-expression text (KiCad 6-8)
    Sexpr,
}

impl Format {
    /// Detect format from content.
    ///
    /// Only routes to the matching updater; no deeper validation happens
    /// here.
    pub fn from_content(content: &str) -> Self {
        if content.trim_start().starts_with('{') {
            Self::Json
        } else {
            Self::Sexpr
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("{\"meta\": {}}", Format::Json)]
    #[case("  \n\t{}", Format::Json)]
    #[case("(kicad_pro (version 1))", Format::Sexpr)]
    #[case("", Format::Sexpr)]
    #[case("garbage", Format::Sexpr)]
    fn detects_format_from_leading_content(#[case] content: &str, #[case] expected: Format) {
        assert_eq!(Format::from_content(content), expected);
    }
}
