// Report reader - fetches a scale report page and reads its labelled values
use crate::application::dataset_repository::LoadError;
use crate::domain::record::extract_number;
use regex::Regex;
use std::sync::OnceLock;

/// One "Label: value" line of a report, e.g. `Height: 171.0cm`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportReading {
    pub label: String,
    pub value_text: String,
    pub value: f64,
    pub unit: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ReportReader {
    client: reqwest::Client,
}

impl ReportReader {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch a report page and parse the readings out of its visible text.
    pub async fn read(&self, url: &str) -> Result<Vec<ReportReading>, LoadError> {
        let http_error = |source| LoadError::Http {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(http_error)?;
        let readings = parse_report_text(&visible_text(&body));
        tracing::debug!("Read {} values from {}", readings.len(), url);
        Ok(readings)
    }
}

/// Page markup reduced to text, one line per block element.
pub fn visible_text(html: &str) -> String {
    static BLOCK: OnceLock<Regex> = OnceLock::new();
    static TAG: OnceLock<Regex> = OnceLock::new();
    let block = BLOCK.get_or_init(|| {
        Regex::new(r"(?i)<\s*(?:br|/p|/div|/tr|/li|/h[1-6])\b[^>]*>").unwrap()
    });
    let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").unwrap());

    let text = block.replace_all(html, "\n");
    let text = tag.replace_all(&text, " ");
    text.replace("&nbsp;", " ").replace("&amp;", "&")
}

/// Labelled numeric readings in report text. Name, gender and timestamp
/// lines are skipped, as are lines without a number.
pub fn parse_report_text(text: &str) -> Vec<ReportReading> {
    static LINE: OnceLock<Regex> = OnceLock::new();
    static UNIT: OnceLock<Regex> = OnceLock::new();
    let line_re = LINE.get_or_init(|| Regex::new(r"^\s*([A-Za-z /]+)\s*:?\s*(.+)$").unwrap());
    let unit_re = UNIT.get_or_init(|| Regex::new(r"[a-zA-Z%]+$").unwrap());

    let mut readings = Vec::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let lower = line.to_lowercase();
        if ["name:", "gender:", "time/date"].iter().any(|p| lower.starts_with(p)) {
            continue;
        }

        let Some(caps) = line_re.captures(line) else {
            continue;
        };
        let label = caps[1].trim();
        let rest = caps[2].trim();
        if label.is_empty() {
            continue;
        }

        let Some(value) = extract_number(rest) else {
            continue;
        };
        readings.push(ReportReading {
            label: label.to_string(),
            value_text: rest.to_string(),
            value,
            unit: unit_re.find(rest).map(|m| m.as_str().to_string()),
        });
    }
    readings
}
