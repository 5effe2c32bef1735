// Metric catalog - which metrics exist and how they are grouped for display
use super::record::Row;
use serde::{Deserialize, Serialize};

pub const OTHER_GROUP: &str = "Other";
pub const OTHER_ICON: &str = "more-horizontal";
pub const DEFAULT_EXCLUDED: [&str; 2] = ["height", "age"];

/// A configured display category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricGroup {
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub members: Vec<String>,
}

/// A display category filled with the metrics actually present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedMetrics {
    pub name: String,
    pub icon: String,
    pub metrics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricCatalog {
    pub groups: Vec<GroupedMetrics>,
    pub ungrouped: Vec<String>,
}

impl MetricGroup {
    pub fn new(name: &str, icon: &str, members: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            icon: icon.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn contains(&self, metric: &str) -> bool {
        self.members.iter().any(|m| m == metric)
    }
}

impl MetricCatalog {
    /// Distinct metrics, minus the excluded ones, grouped by `groups`.
    pub fn build(rows: &[Row], excluded: &[String], groups: &[MetricGroup]) -> Self {
        let metrics = exclude_metrics(&distinct_metrics(rows), excluded);
        group_metrics(&metrics, groups)
    }

    /// No selectable metric survived filtering; nothing can be charted.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.ungrouped.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.metrics.len()).sum::<usize>() + self.ungrouped.len()
    }

    pub fn contains(&self, metric: &str) -> bool {
        self.metrics().any(|m| m == metric)
    }

    /// Metrics in display order, ungrouped last.
    pub fn metrics(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.metrics.iter())
            .chain(self.ungrouped.iter())
            .map(String::as_str)
    }

    /// The groups followed by the implicit "Other" bucket, when it has members.
    pub fn display_groups(&self) -> Vec<GroupedMetrics> {
        let mut groups = self.groups.clone();
        if !self.ungrouped.is_empty() {
            groups.push(GroupedMetrics {
                name: OTHER_GROUP.to_string(),
                icon: OTHER_ICON.to_string(),
                metrics: self.ungrouped.clone(),
            });
        }
        groups
    }
}

pub fn default_excluded() -> Vec<String> {
    DEFAULT_EXCLUDED.iter().map(|m| m.to_string()).collect()
}

/// Built-in display categories used when no metrics config is present.
pub fn default_groups() -> Vec<MetricGroup> {
    vec![
        MetricGroup::new("Body", "scale", &["Weight", "BMI", "Score", "Body Type"]),
        MetricGroup::new(
            "Fat",
            "droplet",
            &["Body Fat", "Fat Mass", "Visceral Fat", "Subcutaneous Fat"],
        ),
        MetricGroup::new(
            "Muscle",
            "dumbbell",
            &["Muscle Mass", "Skeletal Muscle", "Protein", "Bone Mass"],
        ),
        MetricGroup::new("Metabolism", "flame", &["BMR", "Body Water", "Metabolic Age"]),
    ]
}

/// Metric names in the order they are first seen.
pub fn distinct_metrics(rows: &[Row]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for row in rows {
        if !seen.iter().any(|m| *m == row.metric) {
            seen.push(row.metric.clone());
        }
    }
    seen
}

/// Drop every name matching `excluded`, ignoring case.
pub fn exclude_metrics(names: &[String], excluded: &[String]) -> Vec<String> {
    let excluded: Vec<String> = excluded.iter().map(|e| e.to_lowercase()).collect();
    names
        .iter()
        .filter(|name| !excluded.contains(&name.to_lowercase()))
        .cloned()
        .collect()
}

/// Assign each name to the first group listing it; leftovers stay ungrouped
/// in input order. Groups keep declaration order and list their metrics in
/// config member order. Groups with no present member are left out.
pub fn group_metrics(names: &[String], groups: &[MetricGroup]) -> MetricCatalog {
    let owner = |name: &str| groups.iter().position(|g| g.contains(name));

    let grouped = groups
        .iter()
        .enumerate()
        .filter_map(|(idx, group)| {
            let mut metrics: Vec<String> = Vec::new();
            for member in &group.members {
                let present = names.iter().any(|n| n == member);
                if present && owner(member.as_str()) == Some(idx) && !metrics.contains(member) {
                    metrics.push(member.clone());
                }
            }
            if metrics.is_empty() {
                return None;
            }
            Some(GroupedMetrics {
                name: group.name.clone(),
                icon: group.icon.clone(),
                metrics,
            })
        })
        .collect();

    let ungrouped = names
        .iter()
        .filter(|name| owner(name.as_str()).is_none())
        .cloned()
        .collect();

    MetricCatalog {
        groups: grouped,
        ungrouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_distinct_metrics_first_seen_order() {
        let rows = vec![
            Row::new("2024-01-02", "u", "Weight", Some(1.0)),
            Row::new("2024-01-01", "u", "Score", None),
            Row::new("2024-01-01", "u", "Weight", Some(2.0)),
            Row::new("2024-01-03", "u", "BMI", Some(3.0)),
        ];
        assert_eq!(distinct_metrics(&rows), names(&["Weight", "Score", "BMI"]));
    }

    #[test]
    fn test_exclusion_ignores_case() {
        let input = names(&["Weight", "Height", "Age", "Score"]);
        assert_eq!(
            exclude_metrics(&input, &default_excluded()),
            names(&["Weight", "Score"])
        );

        let shouting = names(&["WEIGHT", "HEIGHT", "age", "Score"]);
        assert_eq!(
            exclude_metrics(&shouting, &names(&["Height", "AGE"])),
            names(&["WEIGHT", "Score"])
        );
    }

    #[test]
    fn test_group_first_match_wins() {
        let groups = vec![
            MetricGroup::new("Body", "scale", &["Weight", "BMI"]),
            MetricGroup::new("Again", "x", &["BMI", "Fat"]),
        ];
        let catalog = group_metrics(&names(&["Fat", "BMI", "Weight", "Mystery"]), &groups);

        assert_eq!(catalog.groups.len(), 2);
        assert_eq!(catalog.groups[0].name, "Body");
        assert_eq!(catalog.groups[0].metrics, names(&["Weight", "BMI"]));
        assert_eq!(catalog.groups[1].metrics, names(&["Fat"]));
        assert_eq!(catalog.ungrouped, names(&["Mystery"]));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_empty_groups_are_skipped() {
        let catalog = group_metrics(&names(&["Weight"]), &default_groups());
        assert_eq!(catalog.groups.len(), 1);
        assert_eq!(catalog.groups[0].name, "Body");
        assert!(catalog.ungrouped.is_empty());
    }

    #[test]
    fn test_display_groups_adds_other_bucket() {
        let catalog = group_metrics(&names(&["Weight", "Grip"]), &default_groups());
        let display = catalog.display_groups();

        assert_eq!(display.len(), 2);
        let other = display.last().unwrap();
        assert_eq!(other.name, OTHER_GROUP);
        assert_eq!(other.metrics, names(&["Grip"]));
        assert_eq!(catalog.metrics().collect::<Vec<_>>(), vec!["Weight", "Grip"]);
    }

    #[test]
    fn test_build_signals_empty_state() {
        let rows = vec![
            Row::new("2024-01-01", "u", "Height", Some(170.0)),
            Row::new("2024-01-01", "u", "age", Some(40.0)),
        ];
        let catalog = MetricCatalog::build(&rows, &default_excluded(), &default_groups());
        assert!(catalog.is_empty());
        assert!(!catalog.contains("Height"));
    }
}
