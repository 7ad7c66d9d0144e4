pub const PLACEHOLDER: char = '_';

/// Characters that are not allowed in a file name on at least one of the
/// filesystems the stored names may end up on.
pub fn is_illegal(c: char) -> bool {
    (c as u32) < 0x20 || matches!(c, '"' | '<' | '>' | '|' | ':' | '*' | '?' | '\\' | '/')
}

/// Replaces every illegal character in a client supplied file name with `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if is_illegal(c) { PLACEHOLDER } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_are_untouched() {
        assert_eq!(sanitize("report.pdf"), "report.pdf");
        assert_eq!(sanitize("notes 2024-10-15.txt"), "notes 2024-10-15.txt");
        assert_eq!(sanitize("résumé.txt"), "résumé.txt");
    }

    #[test]
    fn illegal_characters_become_underscores() {
        assert_eq!(sanitize("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize(r"C:\Users\me\a.txt"), "C__Users_me_a.txt");
        assert_eq!(sanitize("what?<now>|\"*.txt"), "what__now____.txt");
        assert_eq!(sanitize("tab\there\0.txt"), "tab_here_.txt");
    }

    #[test]
    fn pathological_input_still_produces_output() {
        assert_eq!(sanitize(""), "");
        assert_eq!(sanitize("/\\:*"), "____");
        assert_eq!(sanitize("no_extension"), "no_extension");
    }

    #[test]
    fn output_is_clean_and_idempotent() {
        let inputs = [
            "",
            "a.txt",
            "a/b\\c:d*e?f\"g<h>i|j",
            "\u{1}\u{1f}\u{7f}.pdf",
            "日本語/ファイル.txt",
            "___",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert!(!once.chars().any(is_illegal), "{:?} left an illegal char in {:?}", input, once);
            assert_eq!(sanitize(&once), once);
            assert_eq!(once.chars().count(), input.chars().count());
        }
    }
}
