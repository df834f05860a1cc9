//! Postal districts and the town → district mapping
//!
//! The 28 Singapore postal districts, keyed by the first two digits of the
//! six-digit postal code. Transactions arrive labelled with HDB town names,
//! so grouping at district level goes through the town → district table.

use serde::Serialize;

/// One postal district: code, display name, two-digit postal-code prefixes.
#[derive(Debug, Clone, Serialize)]
pub struct District {
    pub code: &'static str,
    pub name: &'static str,
    pub postal_prefixes: &'static [&'static str],
}

/// All 28 postal districts, ordered by code.
pub static POSTAL_DISTRICTS: &[District] = &[
    District {
        code: "D01",
        name: "Raffles Place, Cecil, Marina, People's Park",
        postal_prefixes: &["01", "02", "03", "04", "05", "06"],
    },
    District {
        code: "D02",
        name: "Anson, Tanjong Pagar",
        postal_prefixes: &["07", "08"],
    },
    District {
        code: "D03",
        name: "Queenstown, Tiong Bahru",
        postal_prefixes: &["14", "15", "16"],
    },
    District {
        code: "D04",
        name: "Telok Blangah, Harbourfront",
        postal_prefixes: &["09", "10"],
    },
    District {
        code: "D05",
        name: "Pasir Panjang, Hong Leong Garden, Clementi New Town",
        postal_prefixes: &["11", "12", "13"],
    },
    District {
        code: "D06",
        name: "High Street, Beach Road (City Hall area)",
        postal_prefixes: &["17"],
    },
    District {
        code: "D07",
        name: "Middle Road, Golden Mile",
        postal_prefixes: &["18", "19"],
    },
    District {
        code: "D08",
        name: "Little India",
        postal_prefixes: &["20", "21"],
    },
    District {
        code: "D09",
        name: "Orchard, Cairnhill, River Valley",
        postal_prefixes: &["22", "23"],
    },
    District {
        code: "D10",
        name: "Ardmore, Bukit Timah, Holland Road, Tanglin",
        postal_prefixes: &["24", "25", "26", "27"],
    },
    District {
        code: "D11",
        name: "Watten Estate, Novena, Thomson",
        postal_prefixes: &["28", "29", "30"],
    },
    District {
        code: "D12",
        name: "Balestier, Toa Payoh, Serangoon",
        postal_prefixes: &["31", "32", "33"],
    },
    District {
        code: "D13",
        name: "Macpherson, Braddell",
        postal_prefixes: &["34", "35", "36", "37"],
    },
    District {
        code: "D14",
        name: "Geylang, Eunos",
        postal_prefixes: &["38", "39", "40", "41"],
    },
    District {
        code: "D15",
        name: "Katong, Joo Chiat, Amber Road",
        postal_prefixes: &["42", "43", "44", "45"],
    },
    District {
        code: "D16",
        name: "Bedok, Upper East Coast, Eastwood, Kew Drive",
        postal_prefixes: &["46", "47", "48"],
    },
    District {
        code: "D17",
        name: "Loyang, Changi",
        postal_prefixes: &["49", "50", "81"],
    },
    District {
        code: "D18",
        name: "Tampines, Pasir Ris",
        postal_prefixes: &["51", "52"],
    },
    District {
        code: "D19",
        name: "Serangoon Garden, Hougang, Punggol",
        postal_prefixes: &["53", "54", "55", "82"],
    },
    District {
        code: "D20",
        name: "Bishan, Ang Mo Kio",
        postal_prefixes: &["56", "57"],
    },
    District {
        code: "D21",
        name: "Upper Bukit Timah, Clementi Park, Ulu Pandan",
        postal_prefixes: &["58", "59"],
    },
    District {
        code: "D22",
        name: "Jurong",
        postal_prefixes: &["60", "61", "62", "63", "64"],
    },
    District {
        code: "D23",
        name: "Hillview, Dairy Farm, Bukit Panjang, Choa Chu Kang",
        postal_prefixes: &["65", "66", "67", "68"],
    },
    District {
        code: "D24",
        name: "Lim Chu Kang, Tengah",
        postal_prefixes: &["69", "70", "71"],
    },
    District {
        code: "D25",
        name: "Kranji, Woodgrove",
        postal_prefixes: &["72", "73"],
    },
    District {
        code: "D26",
        name: "Upper Thomson, Springleaf",
        postal_prefixes: &["77", "78"],
    },
    District {
        code: "D27",
        name: "Yishun, Sembawang",
        postal_prefixes: &["75", "76"],
    },
    District {
        code: "D28",
        name: "Seletar",
        postal_prefixes: &["79", "80"],
    },
];

/// Map an HDB town name to its approximate postal district code.
///
/// Input is matched after uppercasing and trimming; `None` when the town has
/// no mapping.
pub fn town_to_district(town: &str) -> Option<&'static str> {
    let code = match town.trim().to_uppercase().as_str() {
        "ANG MO KIO" => "D20",
        "BEDOK" => "D16",
        "BISHAN" => "D20",
        "BUKIT BATOK" => "D23",
        "BUKIT MERAH" => "D03",
        "BUKIT PANJANG" => "D23",
        "BUKIT TIMAH" => "D21",
        "CENTRAL AREA" => "D01",
        "CHOA CHU KANG" => "D23",
        "CLEMENTI" => "D05",
        "GEYLANG" => "D14",
        "HOUGANG" => "D19",
        "JURONG EAST" => "D22",
        "JURONG WEST" => "D22",
        "KALLANG/WHAMPOA" => "D12",
        "KALLANG" => "D12",
        "WHAMPOA" => "D12",
        "LIM CHU KANG" => "D24",
        "MARINE PARADE" => "D15",
        "MOUNTBATTEN" => "D15",
        "PASIR RIS" => "D18",
        "PUNGGOL" => "D19",
        "QUEENSTOWN" => "D03",
        "SEMBAWANG" => "D27",
        "SENGKANG" => "D19",
        "SERANGOON" => "D19",
        "TAMPINES" => "D18",
        "TENGAH" => "D24",
        "TOA PAYOH" => "D12",
        "WOODLANDS" => "D25",
        "YISHUN" => "D27",
        _ => return None,
    };
    Some(code)
}

/// `(code, name)` pairs for all districts, sorted by code. Dropdown fodder.
pub fn district_names() -> Vec<(&'static str, &'static str)> {
    POSTAL_DISTRICTS.iter().map(|d| (d.code, d.name)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_28_districts_present() {
        assert_eq!(POSTAL_DISTRICTS.len(), 28);
        assert_eq!(POSTAL_DISTRICTS.first().unwrap().code, "D01");
        assert_eq!(POSTAL_DISTRICTS.last().unwrap().code, "D28");
    }

    #[test]
    fn test_town_lookup_normalizes_input() {
        assert_eq!(town_to_district("ANG MO KIO"), Some("D20"));
        assert_eq!(town_to_district("  bedok "), Some("D16"));
        assert_eq!(town_to_district("Kallang/Whampoa"), Some("D12"));
    }

    #[test]
    fn test_unknown_town_is_none() {
        assert_eq!(town_to_district("ATLANTIS"), None);
        assert_eq!(town_to_district(""), None);
    }

    #[test]
    fn test_mapped_districts_exist_in_table() {
        for town in ["ANG MO KIO", "WOODLANDS", "TENGAH", "CENTRAL AREA"] {
            let code = town_to_district(town).unwrap();
            assert!(POSTAL_DISTRICTS.iter().any(|d| d.code == code), "{code}");
        }
    }
}
