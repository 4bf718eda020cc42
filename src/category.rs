//! Short category codes from the filter control mapped to the labels used in the data.

/// Canonical (code, label) pairs.
pub const CATEGORY_LABELS: [(&str, &str); 3] = [
    ("PPU", "PEKERJA PENERIMA UPAH (PPU)"),
    ("PBPU", "PEKERJA BUKAN PENERIMA UPAH (PBPU) / MANDIRI"),
    ("BP", "BUKAN PEKERJA (BP)"),
];

/// Map a short code to its full label. Unknown codes pass through unchanged.
pub fn normalize(code: &str) -> String {
    CATEGORY_LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| code.to_string())
}

/// Comparison key: trimmed and uppercased.
pub fn match_key(label: &str) -> String {
    label.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_expand() {
        assert_eq!(normalize("PPU"), "PEKERJA PENERIMA UPAH (PPU)");
        assert_eq!(normalize("PBPU"), "PEKERJA BUKAN PENERIMA UPAH (PBPU) / MANDIRI");
        assert_eq!(normalize("BP"), "BUKAN PEKERJA (BP)");
    }

    #[test]
    fn unknown_codes_pass_through() {
        assert_eq!(normalize("XYZ"), "XYZ");
        assert_eq!(normalize(""), "");
        // lookup is exact; lowercase codes are not in the table
        assert_eq!(normalize("ppu"), "ppu");
    }

    #[test]
    fn match_key_trims_and_uppercases() {
        assert_eq!(match_key("  bukan pekerja (bp) "), "BUKAN PEKERJA (BP)");
    }
}
