//! ASCII folding for EpiInfo cell values
//!
//! EpiInfo exports from francophone and lusophone labs carry accented
//! characters and Windows smart punctuation that break the downstream
//! pipeline's strict ASCII expectations. Values are folded to their ASCII
//! equivalents; characters with no equivalent are dropped.

/// Fold a cell value to ASCII
pub fn fold_ascii(value: &str) -> String {
    if value.is_ascii() {
        return value.to_string();
    }

    let mut folded = String::with_capacity(value.len());
    for ch in value.chars() {
        if ch.is_ascii() {
            folded.push(ch);
        } else if let Some(replacement) = fold_char(ch) {
            folded.push_str(replacement);
        }
    }
    folded
}

/// ASCII replacement for the accented characters and punctuation seen in
/// French and Portuguese exports
fn fold_char(ch: char) -> Option<&'static str> {
    let replacement = match ch {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => "a",
        'Á' | 'À' | 'Â' | 'Ä' | 'Ã' | 'Å' => "A",
        'ç' => "c",
        'Ç' => "C",
        'é' | 'è' | 'ê' | 'ë' => "e",
        'É' | 'È' | 'Ê' | 'Ë' => "E",
        'í' | 'ì' | 'î' | 'ï' => "i",
        'Í' | 'Ì' | 'Î' | 'Ï' => "I",
        'ñ' => "n",
        'Ñ' => "N",
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => "o",
        'Ó' | 'Ò' | 'Ô' | 'Ö' | 'Õ' => "O",
        'ú' | 'ù' | 'û' | 'ü' => "u",
        'Ú' | 'Ù' | 'Û' | 'Ü' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' => "Y",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        '\u{2018}' | '\u{2019}' => "'",
        '\u{201C}' | '\u{201D}' => "\"",
        '\u{2013}' | '\u{2014}' => "-",
        '\u{00A0}' => " ",
        _ => return None,
    };
    Some(replacement)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(fold_ascii("ENV-2024-0113"), "ENV-2024-0113");
        assert_eq!(fold_ascii(""), "");
    }

    #[test]
    fn test_french_accents_folded() {
        assert_eq!(fold_ascii("Kinshasa-Est, prélèvement"), "Kinshasa-Est, prelevement");
        assert_eq!(fold_ascii("Sèmè-Kpodji"), "Seme-Kpodji");
    }

    #[test]
    fn test_portuguese_accents_folded() {
        assert_eq!(fold_ascii("São Tomé"), "Sao Tome");
        assert_eq!(fold_ascii("Função"), "Funcao");
    }

    #[test]
    fn test_smart_punctuation_folded() {
        assert_eq!(fold_ascii("N\u{2019}Djamena"), "N'Djamena");
        assert_eq!(fold_ascii("a\u{2013}b"), "a-b");
    }

    #[test]
    fn test_unmapped_characters_dropped() {
        assert_eq!(fold_ascii("sample\u{4e2d}01"), "sample01");
    }
}
