//! Artifact locators
//!
//! A locator is either a registry reference (`models:/<name>/<version>`) or a
//! plain key/path. Parsing never fails; stores decide whether a locator
//! resolves.

use std::fmt;
use std::str::FromStr;

const REGISTRY_SCHEME: &str = "models:/";

/// Registry version selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Version {
    /// Whatever the store considers newest
    Latest,
    Number(u64),
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str("latest"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// Named, versioned model in a registry
    Registry { name: String, version: Version },

    /// Direct key or path, relative to the store root
    Path(String),
}

impl Locator {
    pub fn parse(raw: &str) -> Self {
        raw.strip_prefix(REGISTRY_SCHEME)
            .and_then(|rest| rest.rsplit_once('/'))
            .and_then(|(name, version)| {
                if name.is_empty() {
                    return None;
                }
                let version = match version {
                    "latest" => Version::Latest,
                    v => Version::Number(v.parse::<u64>().ok().filter(|&n| n > 0)?),
                };
                Some(Self::registry(name, version))
            })
            .unwrap_or_else(|| Self::Path(raw.to_string()))
    }

    pub fn registry(name: impl Into<String>, version: Version) -> Self {
        Self::Registry {
            name: name.into(),
            version,
        }
    }
}

impl FromStr for Locator {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry { name, version } => write!(f, "{REGISTRY_SCHEME}{name}/{version}"),
            Self::Path(path) => f.write_str(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_locators() {
        assert_eq!(
            Locator::parse("models:/Naive Bayes/latest"),
            Locator::registry("Naive Bayes", Version::Latest)
        );
        assert_eq!(
            Locator::parse("models:/Support Vector Machine/3"),
            Locator::registry("Support Vector Machine", Version::Number(3))
        );
    }

    #[test]
    fn test_everything_else_is_a_path() {
        for raw in [
            "vectorizer.json",
            "/abs/path/vectorizer.json",
            "models:/no-version",
            "models://latest",
            "models:/Naive Bayes/staging",
            "models:/Naive Bayes/0",
            "models:/Naive Bayes/-1",
        ] {
            assert_eq!(Locator::parse(raw), Locator::Path(raw.to_string()));
        }
    }

    #[test]
    fn test_display_round_trips() {
        for raw in ["models:/Logistic Regression/latest", "models:/x/12", "vectorizer.json"] {
            assert_eq!(Locator::parse(raw).to_string(), raw);
        }
    }
}
