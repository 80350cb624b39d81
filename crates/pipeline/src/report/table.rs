//! Consolidated percent-change table and timing report

use crate::run::AreaReport;

/// Format the study-area × decade-pair percent-change table.
///
/// Columns are decade-pair labels in first-seen order; missing cells
/// (areas lacking a decade pair) print as blank, undefined ratios print
/// as `undefined`.
pub fn format_change_table(areas: &[AreaReport]) -> String {
    let mut labels: Vec<String> = Vec::new();
    for area in areas {
        for record in &area.changes {
            let label = record.label();
            if !labels.contains(&label) {
                labels.push(label);
            }
        }
    }

    let name_width = areas
        .iter()
        .map(|a| a.name.len())
        .max()
        .unwrap_or(0)
        .max("Study area".len());
    let col_width = labels.iter().map(|l| l.len()).max().unwrap_or(0).max(13);

    let mut out = String::new();
    out.push_str(&format!("{:<name_width$}", "Study area"));
    for label in &labels {
        out.push_str(&format!("  {:>col_width$}", label));
    }
    out.push('\n');

    for area in areas {
        out.push_str(&format!("{:<name_width$}", area.name));
        for label in &labels {
            let cell = area
                .changes
                .iter()
                .find(|r| &r.label() == label)
                .map(|r| r.change.to_string())
                .unwrap_or_default();
            out.push_str(&format!("  {:>col_width$}", cell));
        }
        out.push('\n');
    }

    out
}

/// Per-area elapsed-time lines
pub fn format_timings(areas: &[AreaReport]) -> String {
    let mut out = String::new();
    for area in areas {
        out.push_str(&format!(
            "Completed {} in {:.2}s\n",
            area.name,
            area.elapsed.as_secs_f64()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::ChangeRecord;
    use greentrace_algorithms::temporal::PercentChange;
    use std::time::Duration;

    fn report(name: &str, changes: Vec<ChangeRecord>) -> AreaReport {
        AreaReport {
            name: name.to_string(),
            changes,
            elapsed: Duration::from_millis(1234),
        }
    }

    fn record(from: i32, to: i32, change: PercentChange) -> ChangeRecord {
        ChangeRecord {
            from_decade: from,
            to_decade: to,
            change,
        }
    }

    #[test]
    fn table_has_header_and_rows() {
        let areas = vec![
            report(
                "Ergers Pond",
                vec![
                    record(1990, 2000, PercentChange::Defined(12.5)),
                    record(2000, 2010, PercentChange::Defined(0.0)),
                ],
            ),
            report(
                "Mattive Open Space",
                vec![record(1990, 2000, PercentChange::Undefined)],
            ),
        ];

        let table = format_change_table(&areas);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("2000's-1990's"));
        assert!(lines[0].contains("2010's-2000's"));
        assert!(lines[1].contains("12.50"));
        assert!(lines[2].contains("undefined"));
    }

    #[test]
    fn timings_are_seconds_with_two_decimals() {
        let areas = vec![report("Ergers Pond", Vec::new())];
        let timings = format_timings(&areas);
        assert_eq!(timings, "Completed Ergers Pond in 1.23s\n");
    }
}
