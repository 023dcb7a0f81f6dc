//! CSV roster exports: byte decoding and record flattening.
//!
//! Exports come from spreadsheet tools on different platforms, so the byte
//! encoding is unknown. Decoding walks an ordered list of strict decoders and
//! ends in a lossy UTF-8 pass, which means it never fails.

use encoding_rs::{UTF_8, WINDOWS_1252};
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Delimiters considered when sniffing a CSV dialect. Never `:`, which shift
/// hours ("07:00") contain.
const DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// Stands in for an empty field between non-empty ones, so that a blank day
/// cell keeps its position in the flattened line.
pub const EMPTY_FIELD: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvEncoding {
    /// UTF-8, with a leading byte-order mark stripped when present.
    Utf8Bom,
    Utf8,
    /// ISO-8859-1; encoding_rs serves this label with windows-1252.
    Latin1,
    /// UTF-8 with invalid sequences dropped.
    Utf8Lossy,
}

const STRICT_ORDER: [CsvEncoding; 3] = [
    CsvEncoding::Utf8Bom,
    CsvEncoding::Utf8,
    CsvEncoding::Latin1,
];

/// Decode CSV bytes to text.
pub fn decode_csv(bytes: &[u8]) -> String {
    decode_csv_with_encoding(bytes).0
}

/// Decode CSV bytes, also reporting which decoder succeeded.
pub fn decode_csv_with_encoding(bytes: &[u8]) -> (String, CsvEncoding) {
    for encoding in STRICT_ORDER {
        if let Some(text) = try_decode(bytes, encoding) {
            debug!(?encoding, "decoded csv");
            return (text, encoding);
        }
    }

    warn!("csv bytes matched no strict encoding, decoding lossily");
    let (text, _) = UTF_8.decode_without_bom_handling(bytes);
    let text = text.chars().filter(|&c| c != '\u{FFFD}').collect();
    (text, CsvEncoding::Utf8Lossy)
}

fn try_decode(bytes: &[u8], encoding: CsvEncoding) -> Option<String> {
    match encoding {
        CsvEncoding::Utf8Bom => {
            let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
            UTF_8
                .decode_without_bom_handling_and_without_replacement(body)
                .map(|s| s.into_owned())
        }
        CsvEncoding::Utf8 => UTF_8
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|s| s.into_owned()),
        CsvEncoding::Latin1 => WINDOWS_1252
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|s| s.into_owned()),
        CsvEncoding::Utf8Lossy => None,
    }
}

/// Number of leading non-blank lines sampled when sniffing the delimiter.
const SNIFF_LINES: usize = 10;

/// Pick the delimiter that occurs most often in the leading non-blank lines.
pub fn detect_delimiter(text: &str) -> Option<char> {
    let sample: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();
    DELIMITERS
        .iter()
        .map(|&d| (d, sample.iter().map(|l| l.matches(d).count()).sum::<usize>()))
        .filter(|&(_, n)| n > 0)
        .max_by_key(|&(_, n)| n)
        .map(|(d, _)| d)
}

/// Rewrite delimited records as whitespace-separated lines.
///
/// Leading and trailing empty fields are dropped; empty fields in between
/// become [`EMPTY_FIELD`]. Text without any known delimiter is returned
/// unchanged.
pub fn flatten_records(text: &str) -> String {
    let Some(delimiter) = detect_delimiter(text) else {
        return text.to_string();
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .flexible(true)
        .has_headers(false)
        .from_reader(text.as_bytes());

    let mut lines = Vec::new();
    for (i, record) in reader.records().enumerate() {
        match record {
            Ok(record) => {
                let fields: Vec<&str> = record.iter().map(str::trim).collect();
                let first = fields.iter().position(|f| !f.is_empty());
                let last = fields.iter().rposition(|f| !f.is_empty());
                let line = match (first, last) {
                    (Some(first), Some(last)) => fields[first..=last]
                        .iter()
                        .map(|&f| if f.is_empty() { EMPTY_FIELD } else { f })
                        .collect::<Vec<_>>()
                        .join(" "),
                    _ => String::new(),
                };
                lines.push(line);
            }
            Err(e) => warn!(record = i, error = %e, "skipping malformed csv record"),
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_utf8() {
        let (text, enc) = decode_csv_with_encoding("Supervisão".as_bytes());
        assert_eq!(text, "Supervisão");
        assert_eq!(enc, CsvEncoding::Utf8Bom);
    }

    #[test]
    fn test_bom_is_stripped() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("1001 JOÃO".as_bytes());
        assert_eq!(decode_csv(&bytes), "1001 JOÃO");
    }

    #[test]
    fn test_latin1_fallback() {
        // "JOÃO PLANTÃO" in ISO-8859-1: invalid as UTF-8.
        let bytes = b"1001 JO\xC3O PLANT\xC3O";
        let (text, enc) = decode_csv_with_encoding(bytes);
        assert_eq!(enc, CsvEncoding::Latin1);
        assert_eq!(text, "1001 JOÃO PLANTÃO");
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), Some(';'));
        assert_eq!(detect_delimiter("\n\na,b,c"), Some(','));
        assert_eq!(detect_delimiter("ESCALA JANEIRO\n1001;MARIA;P"), Some(';'));
        assert_eq!(detect_delimiter("1001 MARIA DA SILVA P T"), None);
    }

    #[test]
    fn test_flatten_semicolon_records() {
        let text = "1001;\"MARIA DA SILVA\";P;T;;M\n1002;JOAO;N";
        assert_eq!(flatten_records(text), "1001 MARIA DA SILVA P T - M\n1002 JOAO N");
    }

    #[test]
    fn test_flatten_trims_outer_empty_fields() {
        let text = ";CTI / UCO (Noturno);;;\n;;;";
        assert_eq!(flatten_records(text), "CTI / UCO (Noturno)\n");
    }

    #[test]
    fn test_flatten_keeps_shift_hours() {
        let text = "1001,MARIA,Enfermeiro,07:00 as 19:00";
        assert_eq!(flatten_records(text), "1001 MARIA Enfermeiro 07:00 as 19:00");
    }

    #[test]
    fn test_flatten_without_delimiter_is_identity() {
        let text = "1001 MARIA DA SILVA P T M N\nCTI / UCO (Diurno)";
        assert_eq!(flatten_records(text), text);
    }
}
