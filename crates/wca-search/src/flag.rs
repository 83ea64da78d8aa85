/// `'🇦' as u32 - 'A' as u32`
const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

/// Turns an ISO 3166-1 alpha-2 code ("FR") into its flag emoji.
///
/// Expects two uppercase ASCII letters. Anything else is shifted the same way; a
/// character whose shifted code point is not a valid `char` is kept as is.
pub fn flag_from_iso2(iso2: &str) -> String {
    iso2.chars()
        .map(|c| char::from_u32(c as u32 + REGIONAL_INDICATOR_OFFSET).unwrap_or(c))
        .collect()
}
