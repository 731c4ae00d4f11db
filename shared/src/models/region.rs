//! Sales regions and their packet label codes

/// Code used when a region name is not in [`REGION_CODES`]
pub const DEFAULT_REGION_CODE: &str = "GEN";

/// Named sales regions and the short code printed on packet labels
pub const REGION_CODES: &[(&str, &str)] = &[
    ("Riyadh Region", "RR"),
    ("Eastern Region", "ER"),
    ("Western Region", "WR"),
    ("Northern Region", "NR"),
    ("Southern Region", "SR"),
    ("Central Region", "CR"),
    ("Makkah Region", "MR"),
    ("Madinah Region", "MDR"),
    ("Qassim Region", "QR"),
    ("Asir Region", "ASR"),
    ("Tabuk Region", "TBK"),
    ("Hail Region", "HL"),
    ("Jazan Region", "JZN"),
    ("Najran Region", "NJR"),
    ("Al Baha Region", "BH"),
    ("Al Jouf Region", "JF"),
    ("Northern Borders Region", "NB"),
    ("Jeddah", "JED"),
    ("Dammam", "DMM"),
    ("Khobar", "KHB"),
    ("Default", DEFAULT_REGION_CODE),
];

/// Resolve a region name to its label code.
///
/// Matching ignores case and surrounding whitespace. Unmapped names fall back
/// to [`DEFAULT_REGION_CODE`].
pub fn region_code(region: &str) -> &'static str {
    let wanted = region.trim();
    REGION_CODES
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(wanted))
        .map(|(_, code)| *code)
        .unwrap_or(DEFAULT_REGION_CODE)
}

/// Region name for a label code, if the code is known
pub fn region_name(code: &str) -> Option<&'static str> {
    REGION_CODES
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
}
