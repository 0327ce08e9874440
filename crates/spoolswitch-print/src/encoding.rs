// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Legacy codepage output for spool files.
//
// Simple print handlers (Notepad's /p, text filters) read plain text in the
// system ANSI codepage, so spool files are written in a fixed legacy
// encoding rather than UTF-8. Characters the codepage cannot represent are
// written as '?'; encoding never fails.

use encoding_rs::{EncoderResult, Encoding, SHIFT_JIS, UTF_8};

use spoolswitch_core::error::{PrintSwitchError, Result};

/// Byte written in place of an unrepresentable character.
const REPLACEMENT: u8 = b'?';

/// Encoder for one legacy single- or double-byte codepage.
#[derive(Debug, Clone, Copy)]
pub struct LegacyEncoder {
    encoding: &'static Encoding,
}

impl Default for LegacyEncoder {
    /// Shift_JIS as used by Windows (code page 932).
    fn default() -> Self {
        Self {
            encoding: SHIFT_JIS,
        }
    }
}

impl LegacyEncoder {
    /// Resolve a WHATWG encoding label ("shift_jis", "cp1252", "gbk", ...).
    ///
    /// Labels for UTF-8, UTF-16 and the replacement encoding are refused:
    /// none of them is a legacy codepage.
    pub fn for_label(label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| PrintSwitchError::UnknownEncoding(label.to_string()))?;
        // UTF-16 and "replacement" both encode as UTF-8.
        if encoding.output_encoding() == UTF_8 {
            return Err(PrintSwitchError::UnknownEncoding(label.to_string()));
        }
        Ok(Self { encoding })
    }

    /// Canonical name of the codepage.
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Encode `text`, writing '?' for every unmappable character.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut encoder = self.encoding.new_encoder();
        let capacity = encoder
            .max_buffer_length_from_utf8_without_replacement(text.len())
            .unwrap_or(text.len());
        let mut out = Vec::with_capacity(capacity);
        let mut rest = text;

        loop {
            let (result, read) =
                encoder.encode_from_utf8_to_vec_without_replacement(rest, &mut out, true);
            rest = &rest[read..];
            match result {
                EncoderResult::InputEmpty => break,
                EncoderResult::OutputFull => {
                    let more = encoder
                        .max_buffer_length_from_utf8_without_replacement(rest.len())
                        .unwrap_or(rest.len())
                        .max(16);
                    out.reserve(more);
                }
                EncoderResult::Unmappable(_) => {
                    out.push(REPLACEMENT);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        let enc = LegacyEncoder::default();
        assert_eq!(enc.encode("Hello\nWorld"), b"Hello\nWorld".to_vec());
    }

    #[test]
    fn japanese_is_shift_jis() {
        let enc = LegacyEncoder::default();
        assert_eq!(enc.encode("あア"), vec![0x82, 0xa0, 0x83, 0x41]);
    }

    #[test]
    fn unmappable_characters_become_question_marks() {
        let enc = LegacyEncoder::default();
        assert_eq!(enc.encode("a😀b"), b"a?b".to_vec());

        let latin = LegacyEncoder::for_label("windows-1252").unwrap();
        assert_eq!(latin.encode("café 印"), vec![b'c', b'a', b'f', 0xe9, b' ', b'?']);
    }

    #[test]
    fn many_unmappable_characters_grow_the_buffer() {
        let latin = LegacyEncoder::for_label("windows-1252").unwrap();
        let input = "印".repeat(500);
        assert_eq!(latin.encode(&input), vec![b'?'; 500]);
    }

    #[test]
    fn labels_resolve_case_insensitively() {
        assert_eq!(LegacyEncoder::for_label(" Shift_JIS ").unwrap().name(), "Shift_JIS");
        assert_eq!(LegacyEncoder::for_label("cp1252").unwrap().name(), "windows-1252");
    }

    #[test]
    fn unicode_and_unknown_labels_are_refused() {
        for label in ["utf-8", "utf-16le", "no-such-codepage"] {
            assert!(matches!(
                LegacyEncoder::for_label(label),
                Err(PrintSwitchError::UnknownEncoding(_))
            ));
        }
    }
}
