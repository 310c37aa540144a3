//! Visual Studio editions and their command-line aliases.

use std::fmt;
use std::str::FromStr;

/// Prefix shared by every product id the locator reports.
pub const PRODUCT_ID_PREFIX: &str = "Microsoft.VisualStudio.Product.";

/// A Visual Studio edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sku {
    Community,
    Professional,
    Enterprise,
    BuildTools,
}

/// Accepted spellings for each edition, matched case-insensitively.
const ALIASES: &[(&[&str], Sku)] = &[
    (&["c", "com", "community"], Sku::Community),
    (&["p", "pro", "professional"], Sku::Professional),
    (&["e", "ent", "enterprise"], Sku::Enterprise),
    (&["b", "build", "buildtools"], Sku::BuildTools),
];

impl Sku {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Community => "Community",
            Self::Professional => "Professional",
            Self::Enterprise => "Enterprise",
            Self::BuildTools => "BuildTools",
        }
    }

    /// The locator/installer product id, e.g. `Microsoft.VisualStudio.Product.Professional`.
    pub fn product_id(self) -> String {
        format!("{PRODUCT_ID_PREFIX}{}", self.as_str())
    }

    /// Recovers the edition from a product id reported by the locator.
    pub fn from_product_id(product_id: &str) -> Option<Self> {
        let suffix = product_id.strip_prefix(PRODUCT_ID_PREFIX)?;
        ALIASES
            .iter()
            .map(|(_, sku)| *sku)
            .find(|sku| sku.as_str().eq_ignore_ascii_case(suffix))
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sku {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ALIASES
            .iter()
            .find(|(names, _)| names.contains(&wanted.as_str()))
            .map(|(_, sku)| *sku)
            .ok_or_else(|| {
                "expected one of [c|com|community], [p|pro|professional], \
                 [e|ent|enterprise] or [b|build|buildtools]"
                    .to_string()
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("pro".parse::<Sku>().unwrap(), Sku::Professional);
        assert_eq!("P".parse::<Sku>().unwrap(), Sku::Professional);
        assert_eq!("Enterprise".parse::<Sku>().unwrap(), Sku::Enterprise);
        assert_eq!("com".parse::<Sku>().unwrap(), Sku::Community);
        assert_eq!("buildtools".parse::<Sku>().unwrap(), Sku::BuildTools);
    }

    #[test]
    fn test_parse_invalid() {
        let err = "ultimate".parse::<Sku>().unwrap_err();
        assert!(err.contains("p|pro|professional"));
        assert!("".parse::<Sku>().is_err());
    }

    #[test]
    fn test_product_id() {
        assert_eq!(
            Sku::Professional.product_id(),
            "Microsoft.VisualStudio.Product.Professional"
        );
    }

    #[test]
    fn test_from_product_id() {
        assert_eq!(
            Sku::from_product_id("Microsoft.VisualStudio.Product.Enterprise"),
            Some(Sku::Enterprise)
        );
        assert_eq!(Sku::from_product_id("Microsoft.VisualStudio.Product.Unknown"), None);
        assert_eq!(Sku::from_product_id("Enterprise"), None);
    }
}
