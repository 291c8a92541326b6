//! The URL corpus file: one URL per line, `#` comments and blank lines ignored.

use std::path::Path;

use tracing::{info, warn};

/// Parse corpus text into URLs, preserving file order.
pub fn parse_corpus(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Load the corpus from `path`.
///
/// A missing file yields an empty corpus so the assistant can still answer
/// from the static table and the model alone.
pub fn load_corpus(path: &Path) -> std::io::Result<Vec<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let urls = parse_corpus(&text);
            info!(path = %path.display(), urls = urls.len(), "Loaded URL corpus");
            Ok(urls)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "URL corpus not found, run `fifi crawl` to build it");
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_header_and_blank_lines() {
        let text = "# IU South Bend URLs\n# Total URLs collected: 2\n\n  https://www.iusb.edu/  \nhttps://clas.iusb.edu/\n\n";
        assert_eq!(
            parse_corpus(text),
            vec!["https://www.iusb.edu/", "https://clas.iusb.edu/"]
        );
    }

    #[test]
    fn parse_empty_text() {
        assert!(parse_corpus("").is_empty());
        assert!(parse_corpus("# only comments\n").is_empty());
    }

    #[test]
    fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let urls = load_corpus(&dir.path().join("absent.txt")).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urls.txt");
        std::fs::write(&path, "# header\nhttps://www.iusb.edu/library/\n").unwrap();
        assert_eq!(load_corpus(&path).unwrap(), vec!["https://www.iusb.edu/library/"]);
    }
}
