//! Heuristic VRF/VPN tag extraction from free-text fields.
//!
//! This is not a routing-table lookup. The rules are an ordered,
//! data-driven policy handed in by the caller: an exact-substring keyword
//! table, a structured-token pattern fallback, and finally the primary
//! field itself. Extraction never fails; a record with nothing derivable
//! gets the configured default tag.

use regex::Regex;

const KEYWORD_TAGS: &[(&str, &str)] = &[
    ("CGNAT", "cgnat"),
    ("MGMT", "management"),
    ("PROD", "production"),
    ("DEV", "development"),
    ("TEST", "testing"),
    ("GUEST", "guest"),
    ("DMZ", "dmz"),
    ("CORE", "core"),
    ("ACCESS", "access"),
];

// Matched against upper-cased text; every hit normalizes to VRF_<id>.
const TOKEN_PATTERNS: &[&str] = &[
    r"VRF[_-]?(\w+)",
    r"VPN[_-]?(\w+)",
    r"RD[_-]?(\d+:\d+)",
    r"RT[_-]?(\d+:\d+)",
    r"MPLS[_-]?(\w+)",
];

/// The ordered rule set for one run. Build once, pass by reference.
pub struct SegmentRules {
    keywords: Vec<(String, String)>,
    patterns: Vec<Regex>,
    default_tag: String,
}

impl SegmentRules {
    /// The stock policy: well-known network-segment keywords plus the
    /// usual VRF/VPN/route-distinguisher token shapes.
    pub fn standard() -> Self {
        let keywords = KEYWORD_TAGS
            .iter()
            .map(|(keyword, tag)| (keyword.to_string(), tag.to_string()))
            .collect();
        let patterns = TOKEN_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("token pattern must compile"))
            .collect();
        Self::new(keywords, patterns, "default")
    }

    /// Keywords are matched case-insensitively in the order given; the
    /// first pattern capture group becomes the `VRF_<id>` tag.
    pub fn new(
        keywords: Vec<(String, String)>,
        patterns: Vec<Regex>,
        default_tag: impl Into<String>,
    ) -> Self {
        let keywords = keywords
            .into_iter()
            .map(|(keyword, tag)| (keyword.to_uppercase(), tag))
            .collect();
        Self {
            keywords,
            patterns,
            default_tag: default_tag.into(),
        }
    }

    /// Derive the segment tag from the primary field (service domain) and
    /// any further fields in falling priority (interface description,
    /// host name). A keyword hit on the primary field always wins over a
    /// pattern hit anywhere.
    pub fn extract(&self, primary: Option<&str>, extras: &[Option<&str>]) -> String {
        if let Some(primary) = primary {
            let upper = primary.to_uppercase();
            for (keyword, tag) in &self.keywords {
                if upper.contains(keyword) {
                    return tag.clone();
                }
            }
        }

        for field in std::iter::once(&primary).chain(extras.iter()).copied().flatten() {
            if let Some(tag) = self.match_token(field) {
                return tag;
            }
        }

        match primary {
            Some(primary) => primary.to_lowercase(),
            None => self.default_tag.clone(),
        }
    }

    fn match_token(&self, text: &str) -> Option<String> {
        let upper = text.to_uppercase();
        for pattern in &self.patterns {
            if let Some(caps) = pattern.captures(&upper) {
                return Some(format!("VRF_{}", &caps[1]));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(primary: Option<&str>, extras: &[Option<&str>]) -> String {
        SegmentRules::standard().extract(primary, extras)
    }

    #[test]
    fn keyword_table_maps_known_segments() {
        assert_eq!(extract(Some("PROD-CORE"), &[]), "production");
        assert_eq!(extract(Some("mgmt uplink"), &[]), "management");
        assert_eq!(extract(Some("Guest-WiFi"), &[]), "guest");
        assert_eq!(extract(Some("CGNAT pool"), &[]), "cgnat");
    }

    #[test]
    fn keyword_beats_pattern() {
        // Both a keyword hit and a structured token; the table wins.
        assert_eq!(extract(Some("MGMT link via VRF_100"), &[]), "management");
    }

    #[test]
    fn keyword_order_is_first_match_wins() {
        // PROD sits before CORE in the table.
        assert_eq!(extract(Some("PROD-CORE"), &[]), "production");
    }

    #[test]
    fn patterns_normalize_to_vrf_tags() {
        assert_eq!(extract(Some("uplink VRF_100"), &[]), "VRF_100");
        assert_eq!(extract(None, &[Some("customer vpn-alpha")]), "VRF_ALPHA");
        assert_eq!(extract(None, &[Some("RD_65000:100")]), "VRF_65000:100");
        assert_eq!(extract(None, &[Some("mpls-backbone")]), "VRF_BACKBONE");
    }

    #[test]
    fn pattern_fallback_scans_fields_in_order() {
        let tag = extract(None, &[Some("plain text"), Some("edge VPN_7")]);
        assert_eq!(tag, "VRF_7");
    }

    #[test]
    fn identity_fallback_lowercases_primary() {
        assert_eq!(extract(Some("IPRAN-D"), &[]), "ipran-d");
    }

    #[test]
    fn default_tag_when_nothing_derivable() {
        assert_eq!(extract(None, &[]), "default");
        assert_eq!(extract(None, &[Some("just an uplink")]), "default");
    }
}
