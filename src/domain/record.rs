// Record domain model - dated report observations and their flat row form
use regex::Regex;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

/// The whole dataset as loaded from `records_mapped.json`.
///
/// Date keys and label keys keep the order they had in the source document,
/// which is the order rows are emitted in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    #[serde(default, with = "ordered_records")]
    pub records: Vec<Record>,
}

/// All observations captured on one date.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub date: String,
    pub observations: Vec<Observation>,
}

/// One device reading: the report it came from and its metric values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub url: String,
    #[serde(
        default,
        deserialize_with = "deserialize_labels",
        serialize_with = "serialize_labels"
    )]
    pub labels: Vec<(String, Option<f64>)>,
}

/// Flat (date, url, metric, value) tuple derived from a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub date: String,
    pub url: String,
    pub metric: String,
    pub value: Option<f64>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn observation_count(&self) -> usize {
        self.records.iter().map(|r| r.observations.len()).sum()
    }

    /// Number of rows `flatten` will produce.
    pub fn label_count(&self) -> usize {
        self.records
            .iter()
            .flat_map(|r| &r.observations)
            .map(|o| o.labels.len())
            .sum()
    }

    /// Observations for a date, appending a new record if the date is unseen.
    pub fn observations_mut(&mut self, date: &str) -> &mut Vec<Observation> {
        let idx = match self.records.iter().position(|r| r.date == date) {
            Some(idx) => idx,
            None => {
                self.records.push(Record::new(date.to_string(), Vec::new()));
                self.records.len() - 1
            }
        };
        &mut self.records[idx].observations
    }
}

impl Record {
    pub fn new(date: String, observations: Vec<Observation>) -> Self {
        Self { date, observations }
    }
}

impl Observation {
    pub fn new(url: String, labels: Vec<(String, Option<f64>)>) -> Self {
        Self { url, labels }
    }
}

impl Row {
    pub fn new(date: &str, url: &str, metric: &str, value: Option<f64>) -> Self {
        Self {
            date: date.to_string(),
            url: url.to_string(),
            metric: metric.to_string(),
            value,
        }
    }
}

/// Denormalize the nested record set into one row per
/// (date, observation, metric) in source order.
pub fn flatten(records: &RecordSet) -> Vec<Row> {
    let mut rows = Vec::with_capacity(records.label_count());
    for record in &records.records {
        for observation in &record.observations {
            for (metric, value) in &observation.labels {
                rows.push(Row::new(&record.date, &observation.url, metric, *value));
            }
        }
    }
    rows
}

/// First signed decimal number in `text`, e.g. `"171.0cm"` -> `171.0`.
pub fn extract_number(text: &str) -> Option<f64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"[-+]?\d+(?:\.\d+)?").unwrap());
    re.find(text)?.as_str().parse().ok()
}

fn label_value(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => extract_number(s),
        _ => None,
    }
}

fn deserialize_labels<'de, D>(deserializer: D) -> Result<Vec<(String, Option<f64>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct LabelsVisitor;

    impl<'de> Visitor<'de> for LabelsVisitor {
        type Value = Vec<(String, Option<f64>)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object of metric values")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut labels = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((metric, raw)) = access.next_entry::<String, Value>()? {
                labels.push((metric, label_value(&raw)));
            }
            Ok(labels)
        }
    }

    deserializer.deserialize_any(LabelsVisitor)
}

#[allow(clippy::ptr_arg)]
fn serialize_labels<S>(labels: &Vec<(String, Option<f64>)>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(labels.len()))?;
    for (metric, value) in labels {
        map.serialize_entry(metric, value)?;
    }
    map.end()
}

mod ordered_records {
    use super::{Observation, Record};
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Record>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RecordsVisitor;

        impl<'de> Visitor<'de> for RecordsVisitor {
            type Value = Vec<Record>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object keyed by date")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut records = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((date, observations)) =
                    access.next_entry::<String, Vec<Observation>>()?
                {
                    records.push(Record::new(date, observations));
                }
                Ok(records)
            }
        }

        deserializer.deserialize_map(RecordsVisitor)
    }

    #[allow(clippy::ptr_arg)]
    pub fn serialize<S>(records: &Vec<Record>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(records.len()))?;
        for record in records {
            map.serialize_entry(&record.date, &record.observations)?;
        }
        map.end()
    }
}
