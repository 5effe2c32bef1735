// Report URL helpers - dating scale reports and reading URL lists
use chrono::DateTime;
use std::path::Path;
use url::Url;

pub const UNKNOWN_DATE: &str = "unknown";

/// UTC calendar date of a report, taken from its `t` query parameter
/// (Unix seconds). Reports without a usable `t` are dated "unknown".
pub fn date_from_url(url: &str) -> String {
    query_param(url, "t")
        .and_then(|t| t.trim().parse::<i64>().ok())
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.date_naive().to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// First non-empty value of `name` in the URL's query string.
pub fn query_param(url: &str, name: &str) -> Option<String> {
    let url = Url::parse(url).ok()?;
    url.query_pairs()
        .find(|(key, value)| key == name && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

/// URLs listed one per line. Blank lines and `#` comments are skipped;
/// a missing file is an empty list.
pub fn read_report_urls(path: &Path) -> std::io::Result<Vec<String>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e),
    };

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const REPORT: &str = "https://www.example.com/index.php?m=renti&a=print&id=1480724&t=1758251593";

    #[test]
    fn test_date_from_url() {
        assert_eq!(date_from_url(REPORT), "2025-09-19");
        assert_eq!(date_from_url("https://x.org/r?t=0"), "1970-01-01");
        assert_eq!(date_from_url("https://x.org/r?t=%201757993136"), "2025-09-16");
        assert_eq!(date_from_url("https://x.org/r?t=&t=1757993136"), "2025-09-16");
    }

    #[test]
    fn test_date_from_url_unknown() {
        assert_eq!(date_from_url("https://x.org/r?id=1488031&ishis=0&f=en"), UNKNOWN_DATE);
        assert_eq!(date_from_url("https://x.org/r?t=soon"), UNKNOWN_DATE);
        assert_eq!(date_from_url("https://x.org/r?t="), UNKNOWN_DATE);
        assert_eq!(date_from_url("https://x.org/r"), UNKNOWN_DATE);
        assert_eq!(date_from_url("not a url?t=1758251593"), UNKNOWN_DATE);
    }

    #[test]
    fn test_date_from_url_ignores_fragment() {
        assert_eq!(date_from_url("https://x.org/r#frag?t=1758251593"), UNKNOWN_DATE);
        assert_eq!(date_from_url("https://x.org/r?t=1758251593#top"), "2025-09-19");
    }

    #[test]
    fn test_query_param_skips_blank_and_fragment() {
        assert_eq!(
            query_param("https://x.org/r?dzid=&id=7#frag", "id").as_deref(),
            Some("7")
        );
        assert_eq!(query_param("https://x.org/r?dzid=&id=7", "dzid"), None);
        assert_eq!(
            query_param("https://x.org/r?q=a+b%21", "q").as_deref(),
            Some("a b!")
        );
    }

    #[test]
    fn test_read_report_urls() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# scale reports").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  {}  ", REPORT).unwrap();
        writeln!(file, "https://x.org/r?id=2").unwrap();

        let urls = read_report_urls(file.path()).unwrap();
        assert_eq!(urls, vec![REPORT.to_string(), "https://x.org/r?id=2".to_string()]);
    }

    #[test]
    fn test_read_report_urls_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_report_urls(&dir.path().join("records.txt")).unwrap().is_empty());
    }
}
