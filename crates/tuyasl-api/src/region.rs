// Tuya cloud region selection
//
// The Home Assistant endpoints live on one cluster per region
// (`px1.tuyaeu.com`, `px1.tuyaus.com`, `px1.tuyacn.com`). The region is
// picked from the account's country code; anything unknown lands in `eu`.

use std::fmt;

use serde::{Deserialize, Serialize};

const EU_COUNTRIES: &[&str] = &[
    "IT", "ID", "DE", "FR", "ES", "UK", "NL", "BE", "CH", "SE", "NO", "DK", "FI", "AT", "IE",
    "PT", "PL", "GR",
];
const US_COUNTRIES: &[&str] = &["US", "CA", "MX", "BR"];
const CN_COUNTRIES: &[&str] = &["CN"];

/// API endpoint cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Eu,
    Us,
    Cn,
}

impl Region {
    /// Lowercase tag used in hostnames.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eu => "eu",
            Self::Us => "us",
            Self::Cn => "cn",
        }
    }

    /// Root URL of the region's Home Assistant API host.
    pub fn base_url(self) -> String {
        format!("https://px1.tuya{}.com", self.as_str())
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a country code to its region. Case-insensitive; unknown codes map to [`Region::Eu`].
pub fn resolve_region(country_code: &str) -> Region {
    let code = country_code.to_ascii_uppercase();
    let code = code.as_str();

    if EU_COUNTRIES.contains(&code) {
        Region::Eu
    } else if US_COUNTRIES.contains(&code) {
        Region::Us
    } else if CN_COUNTRIES.contains(&code) {
        Region::Cn
    } else {
        Region::Eu
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_country_resolves_in_any_case() {
        for code in EU_COUNTRIES {
            assert_eq!(resolve_region(code), Region::Eu, "{code}");
            assert_eq!(resolve_region(&code.to_lowercase()), Region::Eu, "{code}");
        }
        for code in US_COUNTRIES {
            assert_eq!(resolve_region(code), Region::Us, "{code}");
            assert_eq!(resolve_region(&code.to_lowercase()), Region::Us, "{code}");
        }
        assert_eq!(resolve_region("CN"), Region::Cn);
        assert_eq!(resolve_region("cN"), Region::Cn);
    }

    #[test]
    fn unknown_codes_default_to_eu() {
        for code in ["", "JP", "xx", "U S", "12", "united states", "ÜS"] {
            assert_eq!(resolve_region(code), Region::Eu, "{code:?}");
        }
    }

    #[test]
    fn base_url_embeds_region_tag() {
        assert_eq!(Region::Eu.base_url(), "https://px1.tuyaeu.com");
        assert_eq!(Region::Us.base_url(), "https://px1.tuyaus.com");
        assert_eq!(Region::Cn.base_url(), "https://px1.tuyacn.com");
    }

    #[test]
    fn region_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Region::Us).unwrap(), "\"us\"");
        assert_eq!(Region::Cn.to_string(), "cn");
    }
}
