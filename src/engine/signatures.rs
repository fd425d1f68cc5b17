//! Built-in content classifier: magic numbers first, then a text heuristic with refinement.
//! Filenames and extensions are never consulted.

use anyhow::Result;

use super::classifier::Classifier;
use crate::ClassificationOutcome;
use crate::utils::config::ClassifierConsts;

/// Static description of one content type.
#[derive(Clone, Copy, Debug)]
pub struct TypeInfo {
    pub label: &'static str,
    pub mime_type: &'static str,
    pub group: &'static str,
    pub description: &'static str,
    pub is_text: bool,
}

impl TypeInfo {
    const fn binary(
        label: &'static str,
        mime_type: &'static str,
        group: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            label,
            mime_type,
            group,
            description,
            is_text: false,
        }
    }

    const fn text(
        label: &'static str,
        mime_type: &'static str,
        group: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            label,
            mime_type,
            group,
            description,
            is_text: true,
        }
    }

    fn outcome(&self, score: f64) -> ClassificationOutcome {
        ClassificationOutcome {
            label: self.label.to_string(),
            mime_type: self.mime_type.to_string(),
            group: self.group.to_string(),
            description: self.description.to_string(),
            is_text: self.is_text,
            score,
        }
    }
}

pub const EMPTY: TypeInfo = TypeInfo::binary("empty", "inode/x-empty", "inode", "Empty file");
pub const UNKNOWN: TypeInfo = TypeInfo::binary(
    "unknown",
    "application/octet-stream",
    "unknown",
    "Unknown binary data",
);
pub const TXT: TypeInfo = TypeInfo::text("txt", "text/plain", "text", "Generic text document");
const JSON: TypeInfo = TypeInfo::text("json", "application/json", "code", "JSON document");
const HTML: TypeInfo = TypeInfo::text("html", "text/html", "code", "HTML document");
const XML: TypeInfo = TypeInfo::text("xml", "text/xml", "code", "XML document");
const SVG: TypeInfo = TypeInfo::text(
    "svg",
    "image/svg+xml",
    "image",
    "SVG Scalable Vector Graphics image data",
);
const SHELL: TypeInfo = TypeInfo::text("shell", "text/x-shellscript", "code", "Shell script");
const PYTHON: TypeInfo = TypeInfo::text("python", "text/x-python", "code", "Python source");
const JAVASCRIPT: TypeInfo =
    TypeInfo::text("javascript", "application/javascript", "code", "JavaScript source");
const PERL: TypeInfo = TypeInfo::text("perl", "text/x-perl", "code", "Perl source");
const RUBY: TypeInfo = TypeInfo::text("ruby", "application/x-ruby", "code", "Ruby source");

/// A magic number: every `(offset, bytes)` part must match.
struct Signature {
    parts: &'static [(usize, &'static [u8])],
    info: TypeInfo,
}

impl Signature {
    fn matches(&self, buffer: &[u8]) -> bool {
        self.parts.iter().all(|(offset, magic)| {
            buffer
                .get(*offset..*offset + magic.len())
                .is_some_and(|window| window == *magic)
        })
    }
}

/// Longer and multi-part signatures come first so they win over short prefixes.
const SIGNATURES: &[Signature] = &[
    Signature {
        parts: &[(0, b"SQLite format 3\0")],
        info: TypeInfo::binary("sqlite", "application/x-sqlite3", "code", "SQLite database"),
    },
    Signature {
        parts: &[(0, b"\x89PNG\r\n\x1a\n")],
        info: TypeInfo::binary("png", "image/png", "image", "PNG image data"),
    },
    Signature {
        parts: &[(0, b"\xFD7zXZ\x00")],
        info: TypeInfo::binary("xz", "application/x-xz", "archive", "XZ compressed data"),
    },
    Signature {
        parts: &[(0, b"7z\xBC\xAF\x27\x1C")],
        info: TypeInfo::binary("sevenzip", "application/x-7z-compressed", "archive", "7-zip archive data"),
    },
    Signature {
        parts: &[(0, b"GIF87a")],
        info: TypeInfo::binary("gif", "image/gif", "image", "GIF image data"),
    },
    Signature {
        parts: &[(0, b"GIF89a")],
        info: TypeInfo::binary("gif", "image/gif", "image", "GIF image data"),
    },
    Signature {
        parts: &[(0, b"RIFF"), (8, b"WEBP")],
        info: TypeInfo::binary("webp", "image/webp", "image", "WebP media file"),
    },
    Signature {
        parts: &[(0, b"RIFF"), (8, b"WAVE")],
        info: TypeInfo::binary("wav", "audio/x-wav", "audio", "Waveform Audio file (WAV)"),
    },
    Signature {
        parts: &[(257, b"ustar")],
        info: TypeInfo::binary("tar", "application/x-tar", "archive", "POSIX tar archive"),
    },
    Signature {
        parts: &[(0, b"%PDF-")],
        info: TypeInfo::binary("pdf", "application/pdf", "document", "PDF document"),
    },
    Signature {
        parts: &[(0, b"PK\x03\x04")],
        info: TypeInfo::binary("zip", "application/zip", "archive", "Zip archive data"),
    },
    Signature {
        parts: &[(0, b"PK\x05\x06")],
        info: TypeInfo::binary("zip", "application/zip", "archive", "Zip archive data"),
    },
    Signature {
        parts: &[(0, b"\x7FELF")],
        info: TypeInfo::binary("elf", "application/x-executable-elf", "executable", "ELF executable"),
    },
    Signature {
        parts: &[(0, b"\0asm")],
        info: TypeInfo::binary("wasm", "application/wasm", "executable", "Web Assembly"),
    },
    Signature {
        parts: &[(0, b"\xCF\xFA\xED\xFE")],
        info: TypeInfo::binary("macho", "application/x-mach-o", "executable", "Mach-O executable"),
    },
    Signature {
        parts: &[(0, b"\xCE\xFA\xED\xFE")],
        info: TypeInfo::binary("macho", "application/x-mach-o", "executable", "Mach-O executable"),
    },
    Signature {
        parts: &[(0, b"\xFE\xED\xFA\xCF")],
        info: TypeInfo::binary("macho", "application/x-mach-o", "executable", "Mach-O executable"),
    },
    Signature {
        parts: &[(0, b"\xFE\xED\xFA\xCE")],
        info: TypeInfo::binary("macho", "application/x-mach-o", "executable", "Mach-O executable"),
    },
    Signature {
        parts: &[(0, b"OggS")],
        info: TypeInfo::binary("ogg", "audio/ogg", "audio", "Ogg data"),
    },
    Signature {
        parts: &[(0, b"fLaC")],
        info: TypeInfo::binary("flac", "audio/flac", "audio", "FLAC audio bitstream data"),
    },
    Signature {
        parts: &[(0, b"\xFF\xD8\xFF")],
        info: TypeInfo::binary("jpeg", "image/jpeg", "image", "JPEG image data"),
    },
    Signature {
        parts: &[(0, b"ID3")],
        info: TypeInfo::binary("mp3", "audio/mpeg", "audio", "MP3 media file"),
    },
    Signature {
        parts: &[(0, b"BZh")],
        info: TypeInfo::binary("bzip", "application/x-bzip2", "archive", "bzip2 compressed data"),
    },
    Signature {
        parts: &[(0, b"\x1F\x8B")],
        info: TypeInfo::binary("gzip", "application/gzip", "archive", "gzip compressed data"),
    },
    Signature {
        parts: &[(0, b"BM"), (6, b"\0\0\0\0")],
        info: TypeInfo::binary("bmp", "image/bmp", "image", "PC bitmap"),
    },
    Signature {
        parts: &[(0, b"MZ")],
        info: TypeInfo::binary("pebin", "application/x-dosexec", "executable", "PE Windows executable"),
    },
];

/// Content-signature engine. Stateless; construct once and share.
#[derive(Clone, Copy, Debug, Default)]
pub struct SignatureClassifier;

impl SignatureClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Pick a type for `buffer` along with its confidence.
    pub fn identify(&self, buffer: &[u8]) -> (TypeInfo, f64) {
        if buffer.is_empty() {
            return (EMPTY, 1.0);
        }
        if let Some(sig) = SIGNATURES.iter().find(|s| s.matches(buffer)) {
            return (sig.info, ClassifierConsts::SIGNATURE_SCORE);
        }
        match text_prefix(buffer) {
            Some(text) => refine_text(text, buffer),
            None => (UNKNOWN, ClassifierConsts::UNKNOWN_SCORE),
        }
    }
}

impl Classifier for SignatureClassifier {
    fn classify_bytes(&self, buffer: &[u8]) -> Result<ClassificationOutcome> {
        let (info, score) = self.identify(buffer);
        Ok(info.outcome(score))
    }
}

/// The sample as text, or None when it looks binary. A multi-byte char cut at the sample edge is
/// tolerated.
fn text_prefix(buffer: &[u8]) -> Option<&str> {
    let sample = &buffer[..buffer.len().min(ClassifierConsts::TEXT_SAMPLE_SIZE)];
    if sample.contains(&0) {
        return None;
    }
    let text = match std::str::from_utf8(sample) {
        Ok(s) => s,
        Err(e) if e.error_len().is_none() => std::str::from_utf8(&sample[..e.valid_up_to()]).ok()?,
        Err(_) => return None,
    };
    let control = text.bytes().filter(|b| is_control(*b)).count();
    let ratio = control as f64 / sample.len() as f64;
    (ratio <= ClassifierConsts::MAX_CONTROL_RATIO).then_some(text)
}

fn is_control(b: u8) -> bool {
    (b < 0x20 && !matches!(b, b'\t' | b'\n' | b'\r' | 0x0C | 0x1B)) || b == 0x7F
}

fn refine_text(text: &str, buffer: &[u8]) -> (TypeInfo, f64) {
    let trimmed = text.trim_start_matches('\u{FEFF}').trim_start();

    if let Some(rest) = trimmed.strip_prefix("#!") {
        let interpreter = rest.lines().next().unwrap_or_default();
        return (script_for(interpreter), ClassifierConsts::REFINED_TEXT_SCORE);
    }
    if (trimmed.starts_with('{') || trimmed.starts_with('['))
        && serde_json::from_slice::<serde_json::Value>(buffer).is_ok()
    {
        return (JSON, ClassifierConsts::REFINED_TEXT_SCORE);
    }

    let head: String = trimmed.chars().take(256).collect::<String>().to_ascii_lowercase();
    if head.starts_with("<!doctype html") || head.starts_with("<html") {
        return (HTML, ClassifierConsts::REFINED_TEXT_SCORE);
    }
    if head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg")) {
        return (SVG, ClassifierConsts::REFINED_TEXT_SCORE);
    }
    if head.starts_with("<?xml") {
        return (XML, ClassifierConsts::REFINED_TEXT_SCORE);
    }
    (TXT, ClassifierConsts::TEXT_SCORE)
}

fn script_for(interpreter: &str) -> TypeInfo {
    let name = interpreter
        .split_whitespace()
        .flat_map(|tok| tok.rsplit('/').next())
        .find(|tok| *tok != "env" && !tok.starts_with('-'))
        .unwrap_or_default();
    match name {
        n if n.starts_with("python") => PYTHON,
        n if n.starts_with("node") || n == "deno" => JAVASCRIPT,
        n if n.starts_with("perl") => PERL,
        n if n.starts_with("ruby") => RUBY,
        _ => SHELL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(buffer: &[u8]) -> &'static str {
        SignatureClassifier::new().identify(buffer).0.label
    }

    #[test]
    fn empty_buffer_is_empty() {
        let out = SignatureClassifier::new().classify_bytes(b"").unwrap();
        assert_eq!(out.label, "empty");
        assert_eq!(out.score, 1.0);
        assert!(!out.is_text);
    }

    #[test]
    fn magic_numbers() {
        assert_eq!(label(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"), "png");
        assert_eq!(label(b"PK\x03\x04\x14\0\0\0"), "zip");
        assert_eq!(label(b"%PDF-1.7\n"), "pdf");
        assert_eq!(label(b"\x7FELF\x02\x01\x01"), "elf");
        assert_eq!(label(b"\x1F\x8B\x08\0"), "gzip");
        assert_eq!(label(b"RIFF\0\0\0\0WEBPVP8 "), "webp");
        assert_eq!(label(b"RIFF\0\0\0\0WAVEfmt "), "wav");
        assert_eq!(label(b"BM\x46\0\0\0\0\0\0\0\x36\0\0\0\x28\0\0\0"), "bmp");
        assert_eq!(label(b"BMW owners club\n"), "txt");
    }

    #[test]
    fn tar_magic_at_offset() {
        let mut buf = vec![0u8; 512];
        buf[..5].copy_from_slice(b"a.txt");
        buf[257..262].copy_from_slice(b"ustar");
        assert_eq!(label(&buf), "tar");
    }

    #[test]
    fn plain_text() {
        let (info, score) =
            SignatureClassifier::new().identify("The quick brown fox.\n".repeat(5).as_bytes());
        assert_eq!(info.label, "txt");
        assert_eq!(info.group, "text");
        assert!(info.is_text);
        assert!(score > 0.0 && score <= 1.0);
    }

    #[test]
    fn refined_text_types() {
        assert_eq!(label(br#"{"a": [1, 2, 3]}"#), "json");
        assert_eq!(label(b"[not json"), "txt");
        assert_eq!(label(b"<!DOCTYPE html>\n<html></html>"), "html");
        assert_eq!(label(b"<?xml version=\"1.0\"?>\n<root/>"), "xml");
        assert_eq!(label(b"<?xml version=\"1.0\"?>\n<svg xmlns=\"x\"/>"), "svg");
        assert_eq!(label(b"#!/bin/sh\necho hi\n"), "shell");
        assert_eq!(label(b"#!/usr/bin/env python3\nprint(1)\n"), "python");
        assert_eq!(label(b"#!/usr/bin/env -S node\n"), "javascript");
    }

    #[test]
    fn structured_text_is_code_group() {
        let engine = SignatureClassifier::new();
        let cases: [(&[u8], &str); 5] = [
            (br#"{"k": 1}"#, "code"),
            (b"<!DOCTYPE html>\n<html></html>", "code"),
            (b"<?xml version=\"1.0\"?>\n<root/>", "code"),
            (b"#!/bin/sh\necho hi\n", "code"),
            (b"plain words\n", "text"),
        ];
        for (input, group) in cases {
            let (info, _) = engine.identify(input);
            assert_eq!(info.group, group, "{}", info.label);
            assert!(info.is_text);
        }
    }

    #[test]
    fn binary_noise_is_unknown() {
        let buf: Vec<u8> = (0u8..=255).cycle().skip(1).take(1024).collect();
        assert_eq!(label(&buf), "unknown");
        assert_eq!(label(b"abc\0def"), "unknown");
    }

    #[test]
    fn utf8_cut_at_sample_edge_is_still_text() {
        let mut buf = "a".repeat(ClassifierConsts::TEXT_SAMPLE_SIZE - 1).into_bytes();
        buf.extend_from_slice("é".as_bytes());
        assert_eq!(label(&buf), "txt");
    }
}
