//! Address to region classification.
//!
//! Lookup order:
//! 1. Locality keywords in the free-text address (earliest mention wins,
//!    longer keyword wins on a tie).
//! 2. The two-digit sector of a 6-digit postal code, via [`SECTOR_RANGES`].
//! 3. [`Region::default`].

use super::Region;

/// Locality keywords, lower-case.
const KEYWORDS: &[(&str, Region)] = &[
    // Central
    ("orchard", Region::Central),
    ("novena", Region::Central),
    ("toa payoh", Region::Central),
    ("bishan", Region::Central),
    ("queenstown", Region::Central),
    ("bukit merah", Region::Central),
    ("bukit timah", Region::Central),
    ("tanjong pagar", Region::Central),
    ("tiong bahru", Region::Central),
    ("chinatown", Region::Central),
    ("marina", Region::Central),
    ("raffles", Region::Central),
    ("kallang", Region::Central),
    ("geylang", Region::Central),
    ("marine parade", Region::Central),
    ("newton", Region::Central),
    ("river valley", Region::Central),
    ("tanglin", Region::Central),
    ("outram", Region::Central),
    ("sentosa", Region::Central),
    // North
    ("woodlands", Region::North),
    ("yishun", Region::North),
    ("sembawang", Region::North),
    ("admiralty", Region::North),
    ("kranji", Region::North),
    ("marsiling", Region::North),
    ("canberra", Region::North),
    ("mandai", Region::North),
    // North-East
    ("punggol", Region::NorthEast),
    ("sengkang", Region::NorthEast),
    ("hougang", Region::NorthEast),
    ("serangoon", Region::NorthEast),
    ("ang mo kio", Region::NorthEast),
    ("seletar", Region::NorthEast),
    ("buangkok", Region::NorthEast),
    ("kovan", Region::NorthEast),
    // East
    ("tampines", Region::East),
    ("bedok", Region::East),
    ("pasir ris", Region::East),
    ("changi", Region::East),
    ("simei", Region::East),
    ("tanah merah", Region::East),
    ("paya lebar", Region::East),
    ("east coast", Region::East),
    ("siglap", Region::East),
    ("loyang", Region::East),
    // West
    ("jurong", Region::West),
    ("clementi", Region::West),
    ("bukit batok", Region::West),
    ("bukit panjang", Region::West),
    ("choa chu kang", Region::West),
    ("tengah", Region::West),
    ("boon lay", Region::West),
    ("pioneer", Region::West),
    ("tuas", Region::West),
    ("west coast", Region::West),
    ("dover", Region::West),
    ("lim chu kang", Region::West),
];

/// Postal sector (first two digits) ranges, inclusive.
///
/// Sector 74 and anything above 82 are not issued.
pub const SECTOR_RANGES: &[(u8, u8, Region)] = &[
    (1, 10, Region::Central),
    (11, 13, Region::West),
    (14, 37, Region::Central),
    (38, 52, Region::East),
    (53, 55, Region::NorthEast),
    (56, 56, Region::NorthEast),
    (57, 57, Region::Central),
    (58, 71, Region::West),
    (72, 73, Region::North),
    (75, 78, Region::North),
    (79, 80, Region::NorthEast),
    (81, 81, Region::East),
    (82, 82, Region::NorthEast),
];

/// Classifies a free-text address into a region.
///
/// Never fails; unknown input falls back to [`Region::default`].
pub fn classify(address: &str) -> Region {
    let normalized = normalize_address(address);

    if let Some(region) = classify_by_keyword(&normalized) {
        return region;
    }

    extract_postal_code(&normalized)
        .and_then(|code| classify_postal_code(&code))
        .unwrap_or_default()
}

/// Keyword lookup only.
pub fn classify_by_keyword(address: &str) -> Option<Region> {
    let haystack = address.to_lowercase();

    KEYWORDS
        .iter()
        .filter_map(|(keyword, region)| {
            haystack
                .find(keyword)
                .map(|position| (position, std::cmp::Reverse(keyword.len()), *region))
        })
        .min_by_key(|(position, len, _)| (*position, *len))
        .map(|(_, _, region)| region)
}

/// Postal sector lookup. `None` unless `code` is exactly six ASCII digits in
/// an issued sector.
pub fn classify_postal_code(code: &str) -> Option<Region> {
    let sector = postal_sector(code)?;
    SECTOR_RANGES
        .iter()
        .find(|(lo, hi, _)| (*lo..=*hi).contains(&sector))
        .map(|(_, _, region)| *region)
}

/// Returns true for a six-digit code in an issued postal sector.
pub fn is_valid_postal_code(code: &str) -> bool {
    classify_postal_code(code).is_some()
}

/// Finds the first standalone run of exactly six digits.
pub fn extract_postal_code(address: &str) -> Option<String> {
    let mut run = String::new();

    for ch in address.chars().chain(std::iter::once(' ')) {
        if ch.is_ascii_digit() {
            run.push(ch);
            continue;
        }
        if run.len() == 6 {
            return Some(run);
        }
        run.clear();
    }

    None
}

/// Lower-cases and collapses whitespace. Used as the cache key too.
pub fn normalize_address(address: &str) -> String {
    address
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn postal_sector(code: &str) -> Option<u8> {
    let code = code.trim();
    if code.len() != 6 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.get(0..2)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_match_is_case_insensitive() {
        assert_eq!(classify("Blk 123 WOODLANDS Ave 3"), Region::North);
        assert_eq!(classify("10 tampines central 1"), Region::East);
        assert_eq!(classify("Jurong East St 21"), Region::West);
    }

    #[test]
    fn keyword_wins_over_postal_code() {
        // 520123 would be East by sector; the locality says North-East.
        assert_eq!(classify("Blk 1 Punggol Field, Singapore 520123"), Region::NorthEast);
    }

    #[test]
    fn earliest_keyword_wins() {
        assert_eq!(classify("Hougang Ave 1, near Tampines"), Region::NorthEast);
    }

    #[test]
    fn falls_back_to_postal_sector() {
        assert_eq!(classify("Blk 5, #03-12, Singapore 730005"), Region::North);
        assert_eq!(classify("238801"), Region::Central);
        assert_eq!(classify("Some Road 640123"), Region::West);
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(classify("unknown place"), Region::Central);
        assert_eq!(classify(""), Region::Central);
        assert_eq!(classify("Unit 740123"), Region::Central);
    }

    #[test]
    fn postal_code_validation() {
        assert!(is_valid_postal_code("018956"));
        assert!(is_valid_postal_code("820123"));
        assert!(!is_valid_postal_code("740123"));
        assert!(!is_valid_postal_code("000123"));
        assert!(!is_valid_postal_code("990123"));
        assert!(!is_valid_postal_code("12345"));
        assert!(!is_valid_postal_code("12345a"));
    }

    #[test]
    fn extracts_only_six_digit_runs() {
        assert_eq!(extract_postal_code("Blk 123 #04-56 S(560123)"), Some("560123".to_string()));
        assert_eq!(extract_postal_code("phone 91234567"), None);
        assert_eq!(extract_postal_code("no digits"), None);
    }

    #[test]
    fn every_issued_sector_has_exactly_one_region() {
        for sector in 1u8..=82 {
            let code = format!("{:02}0000", sector);
            let matches = SECTOR_RANGES
                .iter()
                .filter(|(lo, hi, _)| (*lo..=*hi).contains(&sector))
                .count();
            if sector == 74 {
                assert_eq!(matches, 0);
                assert!(classify_postal_code(&code).is_none());
            } else {
                assert_eq!(matches, 1, "sector {} should map to one region", sector);
            }
        }
    }

    #[test]
    fn normalize_collapses_whitespace() {
        assert_eq!(normalize_address("  Blk 1   Bedok\tNorth  "), "blk 1 bedok north");
    }
}
