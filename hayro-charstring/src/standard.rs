//! The Adobe StandardEncoding.
//!
//! `seac` references its components by StandardEncoding code, so resolving a
//! component usually means mapping the code to a glyph name first.

use phf::phf_map;

/// Returns the name of the glyph that `code` maps to in the StandardEncoding.
pub fn glyph_name(code: u8) -> Option<&'static str> {
    STANDARD.get(&code).copied()
}

/// Returns the StandardEncoding code of a glyph name.
pub fn code(name: &str) -> Option<u8> {
    STANDARD_INVERSE.get(name).copied()
}

static STANDARD: phf::Map<u8, &'static str> = phf_map! {
    32u8 => "space",
    33u8 => "exclam",
    34u8 => "quotedbl",
    35u8 => "numbersign",
    36u8 => "dollar",
    37u8 => "percent",
    38u8 => "ampersand",
    39u8 => "quoteright",
    40u8 => "parenleft",
    41u8 => "parenright",
    42u8 => "asterisk",
    43u8 => "plus",
    44u8 => "comma",
    45u8 => "hyphen",
    46u8 => "period",
    47u8 => "slash",
    48u8 => "zero",
    49u8 => "one",
    50u8 => "two",
    51u8 => "three",
    52u8 => "four",
    53u8 => "five",
    54u8 => "six",
    55u8 => "seven",
    56u8 => "eight",
    57u8 => "nine",
    58u8 => "colon",
    59u8 => "semicolon",
    60u8 => "less",
    61u8 => "equal",
    62u8 => "greater",
    63u8 => "question",
    64u8 => "at",
    65u8 => "A",
    66u8 => "B",
    67u8 => "C",
    68u8 => "D",
    69u8 => "E",
    70u8 => "F",
    71u8 => "G",
    72u8 => "H",
    73u8 => "I",
    74u8 => "J",
    75u8 => "K",
    76u8 => "L",
    77u8 => "M",
    78u8 => "N",
    79u8 => "O",
    80u8 => "P",
    81u8 => "Q",
    82u8 => "R",
    83u8 => "S",
    84u8 => "T",
    85u8 => "U",
    86u8 => "V",
    87u8 => "W",
    88u8 => "X",
    89u8 => "Y",
    90u8 => "Z",
    91u8 => "bracketleft",
    92u8 => "backslash",
    93u8 => "bracketright",
    94u8 => "asciicircum",
    95u8 => "underscore",
    96u8 => "quoteleft",
    97u8 => "a",
    98u8 => "b",
    99u8 => "c",
    100u8 => "d",
    101u8 => "e",
    102u8 => "f",
    103u8 => "g",
    104u8 => "h",
    105u8 => "i",
    106u8 => "j",
    107u8 => "k",
    108u8 => "l",
    109u8 => "m",
    110u8 => "n",
    111u8 => "o",
    112u8 => "p",
    113u8 => "q",
    114u8 => "r",
    115u8 => "s",
    116u8 => "t",
    117u8 => "u",
    118u8 => "v",
    119u8 => "w",
    120u8 => "x",
    121u8 => "y",
    122u8 => "z",
    123u8 => "braceleft",
    124u8 => "bar",
    125u8 => "braceright",
    126u8 => "asciitilde",
    161u8 => "exclamdown",
    162u8 => "cent",
    163u8 => "sterling",
    164u8 => "fraction",
    165u8 => "yen",
    166u8 => "florin",
    167u8 => "section",
    168u8 => "currency",
    169u8 => "quotesingle",
    170u8 => "quotedblleft",
    171u8 => "guillemotleft",
    172u8 => "guilsinglleft",
    173u8 => "guilsinglright",
    174u8 => "fi",
    175u8 => "fl",
    177u8 => "endash",
    178u8 => "dagger",
    179u8 => "daggerdbl",
    180u8 => "periodcentered",
    182u8 => "paragraph",
    183u8 => "bullet",
    184u8 => "quotesinglbase",
    185u8 => "quotedblbase",
    186u8 => "quotedblright",
    187u8 => "guillemotright",
    188u8 => "ellipsis",
    189u8 => "perthousand",
    191u8 => "questiondown",
    193u8 => "grave",
    194u8 => "acute",
    195u8 => "circumflex",
    196u8 => "tilde",
    197u8 => "macron",
    198u8 => "breve",
    199u8 => "dotaccent",
    200u8 => "dieresis",
    202u8 => "ring",
    203u8 => "cedilla",
    205u8 => "hungarumlaut",
    206u8 => "ogonek",
    207u8 => "caron",
    208u8 => "emdash",
    225u8 => "AE",
    227u8 => "ordfeminine",
    232u8 => "Lslash",
    233u8 => "Oslash",
    234u8 => "OE",
    235u8 => "ordmasculine",
    241u8 => "ae",
    245u8 => "dotlessi",
    248u8 => "lslash",
    249u8 => "oslash",
    250u8 => "oe",
    251u8 => "germandbls",
};

static STANDARD_INVERSE: phf::Map<&'static str, u8> = phf_map! {
    "space" => 32u8,
    "exclam" => 33u8,
    "quotedbl" => 34u8,
    "numbersign" => 35u8,
    "dollar" => 36u8,
    "percent" => 37u8,
    "ampersand" => 38u8,
    "quoteright" => 39u8,
    "parenleft" => 40u8,
    "parenright" => 41u8,
    "asterisk" => 42u8,
    "plus" => 43u8,
    "comma" => 44u8,
    "hyphen" => 45u8,
    "period" => 46u8,
    "slash" => 47u8,
    "zero" => 48u8,
    "one" => 49u8,
    "two" => 50u8,
    "three" => 51u8,
    "four" => 52u8,
    "five" => 53u8,
    "six" => 54u8,
    "seven" => 55u8,
    "eight" => 56u8,
    "nine" => 57u8,
    "colon" => 58u8,
    "semicolon" => 59u8,
    "less" => 60u8,
    "equal" => 61u8,
    "greater" => 62u8,
    "question" => 63u8,
    "at" => 64u8,
    "A" => 65u8,
    "B" => 66u8,
    "C" => 67u8,
    "D" => 68u8,
    "E" => 69u8,
    "F" => 70u8,
    "G" => 71u8,
    "H" => 72u8,
    "I" => 73u8,
    "J" => 74u8,
    "K" => 75u8,
    "L" => 76u8,
    "M" => 77u8,
    "N" => 78u8,
    "O" => 79u8,
    "P" => 80u8,
    "Q" => 81u8,
    "R" => 82u8,
    "S" => 83u8,
    "T" => 84u8,
    "U" => 85u8,
    "V" => 86u8,
    "W" => 87u8,
    "X" => 88u8,
    "Y" => 89u8,
    "Z" => 90u8,
    "bracketleft" => 91u8,
    "backslash" => 92u8,
    "bracketright" => 93u8,
    "asciicircum" => 94u8,
    "underscore" => 95u8,
    "quoteleft" => 96u8,
    "a" => 97u8,
    "b" => 98u8,
    "c" => 99u8,
    "d" => 100u8,
    "e" => 101u8,
    "f" => 102u8,
    "g" => 103u8,
    "h" => 104u8,
    "i" => 105u8,
    "j" => 106u8,
    "k" => 107u8,
    "l" => 108u8,
    "m" => 109u8,
    "n" => 110u8,
    "o" => 111u8,
    "p" => 112u8,
    "q" => 113u8,
    "r" => 114u8,
    "s" => 115u8,
    "t" => 116u8,
    "u" => 117u8,
    "v" => 118u8,
    "w" => 119u8,
    "x" => 120u8,
    "y" => 121u8,
    "z" => 122u8,
    "braceleft" => 123u8,
    "bar" => 124u8,
    "braceright" => 125u8,
    "asciitilde" => 126u8,
    "exclamdown" => 161u8,
    "cent" => 162u8,
    "sterling" => 163u8,
    "fraction" => 164u8,
    "yen" => 165u8,
    "florin" => 166u8,
    "section" => 167u8,
    "currency" => 168u8,
    "quotesingle" => 169u8,
    "quotedblleft" => 170u8,
    "guillemotleft" => 171u8,
    "guilsinglleft" => 172u8,
    "guilsinglright" => 173u8,
    "fi" => 174u8,
    "fl" => 175u8,
    "endash" => 177u8,
    "dagger" => 178u8,
    "daggerdbl" => 179u8,
    "periodcentered" => 180u8,
    "paragraph" => 182u8,
    "bullet" => 183u8,
    "quotesinglbase" => 184u8,
    "quotedblbase" => 185u8,
    "quotedblright" => 186u8,
    "guillemotright" => 187u8,
    "ellipsis" => 188u8,
    "perthousand" => 189u8,
    "questiondown" => 191u8,
    "grave" => 193u8,
    "acute" => 194u8,
    "circumflex" => 195u8,
    "tilde" => 196u8,
    "macron" => 197u8,
    "breve" => 198u8,
    "dotaccent" => 199u8,
    "dieresis" => 200u8,
    "ring" => 202u8,
    "cedilla" => 203u8,
    "hungarumlaut" => 205u8,
    "ogonek" => 206u8,
    "caron" => 207u8,
    "emdash" => 208u8,
    "AE" => 225u8,
    "ordfeminine" => 227u8,
    "Lslash" => 232u8,
    "Oslash" => 233u8,
    "OE" => 234u8,
    "ordmasculine" => 235u8,
    "ae" => 241u8,
    "dotlessi" => 245u8,
    "lslash" => 248u8,
    "oslash" => 249u8,
    "oe" => 250u8,
    "germandbls" => 251u8,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accented_components() {
        assert_eq!(glyph_name(65), Some("A"));
        assert_eq!(glyph_name(194), Some("acute"));
        assert_eq!(glyph_name(245), Some("dotlessi"));
        assert_eq!(glyph_name(0), None);
        assert_eq!(glyph_name(176), None);
    }

    #[test]
    fn inverse() {
        for c in 0..=255u8 {
            if let Some(name) = glyph_name(c) {
                assert_eq!(code(name), Some(c));
            }
        }

        assert_eq!(code("Aacute"), None);
    }
}
