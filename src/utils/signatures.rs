use infer::MatcherType;

/// Whether `data` looks like a file of type `extension` (lowercase, with the
/// leading dot). Extensions without a known signature never match.
pub fn matches_extension(extension: &str, data: &[u8]) -> bool {
    match extension {
        ".txt" => is_plain_text(data),
        ".pdf" => infer::archive::is_pdf(data),
        ".png" => infer::image::is_png(data),
        ".jpg" | ".jpeg" => infer::image::is_jpeg(data),
        ".gif" => infer::image::is_gif(data),
        ".zip" => infer::archive::is_zip(data),
        _ => false,
    }
}

/// Text has no magic number, so accept 7-bit ASCII that `infer` does not
/// recognise as some binary format.
fn is_plain_text(data: &[u8]) -> bool {
    if !data.is_ascii() {
        return false;
    }
    match infer::get(data) {
        Some(kind) => kind.matcher_type() == MatcherType::Text,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PDF: &[u8] = b"%PDF-1.7\n1 0 obj\n<< /Type /Catalog >>\nendobj\n%%EOF\n";
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    #[test]
    fn ascii_text_matches_txt() {
        assert!(matches_extension(".txt", b"Shopping list\r\n- milk\n- eggs\n"));
    }

    #[test]
    fn non_ascii_bytes_do_not_match_txt() {
        assert!(!matches_extension(".txt", "naïve".as_bytes()));
        assert!(!matches_extension(".txt", &[0xff, 0xfe, 0x00]));
    }

    #[test]
    fn pdf_signature_does_not_pass_as_text() {
        assert!(PDF.is_ascii());
        assert!(!matches_extension(".txt", PDF));
        assert!(matches_extension(".pdf", PDF));
    }

    #[test]
    fn text_does_not_pass_as_pdf() {
        assert!(!matches_extension(".pdf", b"just some words"));
    }

    #[test]
    fn binary_formats_are_sniffed() {
        assert!(matches_extension(".png", PNG));
        assert!(!matches_extension(".jpg", PNG));
        assert!(!matches_extension(".txt", PNG));
    }

    #[test]
    fn unknown_extensions_never_match() {
        assert!(!matches_extension(".exe", b"MZ\x90\x00"));
        assert!(!matches_extension("", b"anything"));
    }
}
