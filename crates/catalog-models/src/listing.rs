use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Paged listing endpoints of the catalog service.
///
/// Written as `top`, `current-season`, `movies` or `network/<id>` in configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub enum Listing {
    Top,
    CurrentSeason,
    Movies,
    Network(u64),
}

impl Listing {
    /// Path below the `/api/anime` prefix
    pub fn path(&self) -> String {
        match self {
            Listing::Top => "top".to_string(),
            Listing::CurrentSeason => "current-season".to_string(),
            Listing::Movies => "movies".to_string(),
            Listing::Network(id) => format!("network/{}", id),
        }
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromStr for Listing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s {
            "top" => Ok(Listing::Top),
            "current-season" | "season" => Ok(Listing::CurrentSeason),
            "movies" => Ok(Listing::Movies),
            _ => {
                let id = s
                    .strip_prefix("network/")
                    .ok_or_else(|| format!("Unknown listing: {}", s))?;
                id.parse::<u64>()
                    .map(Listing::Network)
                    .map_err(|_| format!("Invalid network id in listing: {}", s))
            }
        }
    }
}

impl TryFrom<String> for Listing {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Listing> for String {
    fn from(listing: Listing) -> Self {
        listing.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_parse_and_display() {
        assert_eq!("top".parse::<Listing>().unwrap(), Listing::Top);
        assert_eq!("season".parse::<Listing>().unwrap(), Listing::CurrentSeason);
        assert_eq!("network/213".parse::<Listing>().unwrap(), Listing::Network(213));
        assert_eq!(Listing::CurrentSeason.to_string(), "current-season");
        assert!("network/abc".parse::<Listing>().is_err());
        assert!("popular".parse::<Listing>().is_err());
    }

    #[test]
    fn test_listing_serde_as_string() {
        let json = serde_json::to_string(&Listing::Network(7)).unwrap();
        assert_eq!(json, "\"network/7\"");
        let back: Listing = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Listing::Network(7));
    }
}
