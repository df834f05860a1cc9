//! URA planning areas
//!
//! All 55 planning areas with approximate centre coordinates (WGS84,
//! `[longitude, latitude]`) for label placement on the map.

use serde::Serialize;

/// One planning area: canonical uppercase key, display name, centroid.
#[derive(Debug, Clone, Serialize)]
pub struct PlanningArea {
    pub key: &'static str,
    pub name: &'static str,
    /// `[longitude, latitude]`
    pub center: [f64; 2],
}

/// All 55 URA planning areas, ordered by key.
pub static PLANNING_AREAS: &[PlanningArea] = &[
    PlanningArea { key: "ANG MO KIO", name: "Ang Mo Kio", center: [103.8490, 1.3691] },
    PlanningArea { key: "BEDOK", name: "Bedok", center: [103.9273, 1.3236] },
    PlanningArea { key: "BISHAN", name: "Bishan", center: [103.8352, 1.3526] },
    PlanningArea { key: "BOON LAY", name: "Boon Lay", center: [103.7100, 1.3187] },
    PlanningArea { key: "BUKIT BATOK", name: "Bukit Batok", center: [103.7637, 1.3590] },
    PlanningArea { key: "BUKIT MERAH", name: "Bukit Merah", center: [103.8239, 1.2819] },
    PlanningArea { key: "BUKIT PANJANG", name: "Bukit Panjang", center: [103.7716, 1.3774] },
    PlanningArea { key: "BUKIT TIMAH", name: "Bukit Timah", center: [103.7764, 1.3294] },
    PlanningArea { key: "CENTRAL WATER CATCHMENT", name: "Central Water Catchment", center: [103.8052, 1.4020] },
    PlanningArea { key: "CHANGI", name: "Changi", center: [103.9893, 1.3517] },
    PlanningArea { key: "CHANGI BAY", name: "Changi Bay", center: [104.0053, 1.3217] },
    PlanningArea { key: "CHOA CHU KANG", name: "Choa Chu Kang", center: [103.7468, 1.3840] },
    PlanningArea { key: "CLEMENTI", name: "Clementi", center: [103.7649, 1.3150] },
    PlanningArea { key: "DOWNTOWN CORE", name: "Downtown Core", center: [103.8536, 1.2873] },
    PlanningArea { key: "GEYLANG", name: "Geylang", center: [103.8884, 1.3201] },
    PlanningArea { key: "HOUGANG", name: "Hougang", center: [103.8863, 1.3612] },
    PlanningArea { key: "JURONG EAST", name: "Jurong East", center: [103.7427, 1.3329] },
    PlanningArea { key: "JURONG WEST", name: "Jurong West", center: [103.6940, 1.3404] },
    PlanningArea { key: "KALLANG", name: "Kallang", center: [103.8666, 1.3100] },
    PlanningArea { key: "LIM CHU KANG", name: "Lim Chu Kang", center: [103.7174, 1.4253] },
    PlanningArea { key: "MANDAI", name: "Mandai", center: [103.8084, 1.4190] },
    PlanningArea { key: "MARINA EAST", name: "Marina East", center: [103.8700, 1.3050] },
    PlanningArea { key: "MARINA SOUTH", name: "Marina South", center: [103.8600, 1.2730] },
    PlanningArea { key: "MARINE PARADE", name: "Marine Parade", center: [103.9000, 1.3030] },
    PlanningArea { key: "MUSEUM", name: "Museum", center: [103.8490, 1.2970] },
    PlanningArea { key: "NEWTON", name: "Newton", center: [103.8380, 1.3120] },
    PlanningArea { key: "NORTH-EASTERN ISLANDS", name: "North-Eastern Islands", center: [103.9600, 1.3900] },
    PlanningArea { key: "NOVENA", name: "Novena", center: [103.8400, 1.3200] },
    PlanningArea { key: "ORCHARD", name: "Orchard", center: [103.8321, 1.3048] },
    PlanningArea { key: "OUTRAM", name: "Outram", center: [103.8400, 1.2800] },
    PlanningArea { key: "PASIR RIS", name: "Pasir Ris", center: [103.9494, 1.3721] },
    PlanningArea { key: "PAYA LEBAR", name: "Paya Lebar", center: [103.8930, 1.3510] },
    PlanningArea { key: "PIONEER", name: "Pioneer", center: [103.6900, 1.3200] },
    PlanningArea { key: "PUNGGOL", name: "Punggol", center: [103.9093, 1.3984] },
    PlanningArea { key: "QUEENSTOWN", name: "Queenstown", center: [103.7985, 1.2942] },
    PlanningArea { key: "RIVER VALLEY", name: "River Valley", center: [103.8340, 1.2930] },
    PlanningArea { key: "ROCHOR", name: "Rochor", center: [103.8562, 1.3040] },
    PlanningArea { key: "SELETAR", name: "Seletar", center: [103.8690, 1.4100] },
    PlanningArea { key: "SEMBAWANG", name: "Sembawang", center: [103.8200, 1.4491] },
    PlanningArea { key: "SENGKANG", name: "Sengkang", center: [103.8935, 1.3868] },
    PlanningArea { key: "SERANGOON", name: "Serangoon", center: [103.8715, 1.3554] },
    PlanningArea { key: "SIMPANG", name: "Simpang", center: [103.9620, 1.4050] },
    PlanningArea { key: "SINGAPORE RIVER", name: "Singapore River", center: [103.8468, 1.2880] },
    PlanningArea { key: "SOUTHERN ISLANDS", name: "Southern Islands", center: [103.8350, 1.2300] },
    PlanningArea { key: "STRAITS VIEW", name: "Straits View", center: [103.8550, 1.2700] },
    PlanningArea { key: "SUNGEI KADUT", name: "Sungei Kadut", center: [103.7560, 1.4130] },
    PlanningArea { key: "TAMPINES", name: "Tampines", center: [103.9456, 1.3496] },
    PlanningArea { key: "TANGLIN", name: "Tanglin", center: [103.8133, 1.3050] },
    PlanningArea { key: "TENGAH", name: "Tengah", center: [103.7400, 1.3640] },
    PlanningArea { key: "TOA PAYOH", name: "Toa Payoh", center: [103.8486, 1.3343] },
    PlanningArea { key: "TUAS", name: "Tuas", center: [103.6500, 1.3150] },
    PlanningArea { key: "WESTERN ISLANDS", name: "Western Islands", center: [103.7200, 1.2600] },
    PlanningArea { key: "WESTERN WATER CATCHMENT", name: "Western Water Catchment", center: [103.6950, 1.3900] },
    PlanningArea { key: "WOODLANDS", name: "Woodlands", center: [103.7867, 1.4382] },
    PlanningArea { key: "YISHUN", name: "Yishun", center: [103.8354, 1.4304] },
];

/// Look up a planning area by its canonical key (uppercase town name).
pub fn planning_area(key: &str) -> Option<&'static PlanningArea> {
    let key = key.trim().to_uppercase();
    PLANNING_AREAS.iter().find(|a| a.key == key)
}

/// All planning-area keys, sorted. Dropdown fodder.
pub fn planning_area_names() -> Vec<&'static str> {
    PLANNING_AREAS.iter().map(|a| a.key).collect()
}
