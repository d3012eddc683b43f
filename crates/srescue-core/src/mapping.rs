//! Operator-supplied column remapping (`--map target=source`).

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use srescue_model::{
    QcReport, REQUIRED_COLUMNS, RescueError, Result, Warning, WarningCategory,
};

use crate::headers::normalize_header;

/// Ordered `target <- source` rewrites, applied after header normalization.
#[derive(Debug, Clone, Default)]
pub struct ColumnMap {
    entries: Vec<(String, String)>,
}

impl ColumnMap {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Target for a normalized source header, if one is mapped.
    fn target_for(&self, source: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, s)| s == source)
            .map(|(t, _)| t.as_str())
    }
}

/// Parse `target=source` entries. Malformed entries are configuration errors
/// and fail the run before any data is touched. A later entry for the same
/// source overrides the earlier one.
pub fn parse_map_entries(raw: &[String]) -> Result<ColumnMap> {
    let mut map = ColumnMap::default();
    for item in raw {
        let Some((target, source)) = item.split_once('=') else {
            return Err(RescueError::InvalidMapEntry(item.clone()));
        };
        let target = normalize_header(target);
        let source = normalize_header(source);
        if target.is_empty() || source.is_empty() {
            return Err(RescueError::EmptyMapEntry);
        }
        if let Some(position) = map.entries.iter().position(|(_, s)| *s == source) {
            warn!(%source, "overriding earlier mapping for source column");
            map.entries.remove(position);
        }
        map.entries.push((target, source));
    }
    Ok(map)
}

/// Read `target=source` lines from a mapping profile file. Blank lines and
/// `#` comments are skipped.
pub fn load_profile(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(RescueError::ProfileNotFound(path.to_path_buf()));
    }
    let text = std::fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Apply the column map to normalized headers, producing the resolved header
/// set. Any resolved name claimed by more than one source is a duplicate-
/// target violation: a warning naming every contributing source goes into the
/// QC report and the run fails.
pub fn apply_column_map(
    normalized: &[String],
    map: &ColumnMap,
    qc: &mut QcReport,
) -> Result<Vec<String>> {
    let resolved: Vec<String> = normalized
        .iter()
        .map(|header| {
            map.target_for(header)
                .map_or_else(|| header.clone(), String::from)
        })
        .collect();

    let mut contributors: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (resolved_name, source) in resolved.iter().zip(normalized) {
        contributors
            .entry(resolved_name.as_str())
            .or_default()
            .push(source.as_str());
    }

    let mut first_collision: Option<RescueError> = None;
    for (target, sources) in &contributors {
        if sources.len() < 2 {
            continue;
        }
        let sources: Vec<String> = sources.iter().map(|s| (*s).to_string()).collect();
        qc.push_warning(
            Warning::new(
                WarningCategory::DuplicateMappedColumn,
                format!(
                    "Duplicate mapped column target '{target}' from sources: {}",
                    sources.join(", ")
                ),
            )
            .with_column(*target),
        );
        if first_collision.is_none() {
            first_collision = Some(RescueError::DuplicateTarget {
                target: (*target).to_string(),
                sources,
            });
        }
    }
    if let Some(error) = first_collision {
        return Err(error);
    }

    for (target, source) in map.entries() {
        if !normalized.contains(source) {
            debug!(%source, %target, "mapping source not present in input; ignored");
        }
    }

    Ok(resolved)
}

/// Required columns absent from the resolved header set, sorted.
pub fn missing_required(resolved: &[String]) -> Vec<String> {
    let mut missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !resolved.iter().any(|header| header == *required))
        .map(|required| (*required).to_string())
        .collect();
    missing.sort();
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn parses_target_source_pairs() {
        let map = parse_map_entries(&strings(&["revenue=Sales", "date=Order Date"])).unwrap();
        assert_eq!(
            map.entries(),
            &[
                ("revenue".to_string(), "sales".to_string()),
                ("date".to_string(), "order_date".to_string()),
            ]
        );
    }

    #[test]
    fn malformed_entry_is_a_contract_violation() {
        let error = parse_map_entries(&strings(&["revenue"])).unwrap_err();
        assert!(matches!(error, RescueError::InvalidMapEntry(_)));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn empty_sides_are_rejected() {
        assert!(parse_map_entries(&strings(&["=sales"])).is_err());
        assert!(parse_map_entries(&strings(&["revenue="])).is_err());
    }

    #[test]
    fn profile_lines_skip_comments_and_blanks() {
        let dir = std::env::temp_dir().join(format!(
            "srescue-profile-test-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("client.profile");
        std::fs::write(
            &path,
            "# client A mappings\n\nrevenue=Sales\n  date=Order Date  \n\n# seasonal\nunits=Qty\n",
        )
        .unwrap();

        let lines = load_profile(&path).unwrap();
        assert_eq!(
            lines,
            strings(&["revenue=Sales", "date=Order Date", "units=Qty"])
        );
        // Profile lines feed the same parser as --map flags.
        let map = parse_map_entries(&lines).unwrap();
        assert_eq!(map.entries().len(), 3);
    }

    #[test]
    fn missing_profile_is_a_contract_violation() {
        let error = load_profile(Path::new("/nonexistent/client.profile")).unwrap_err();
        assert!(matches!(error, RescueError::ProfileNotFound(_)));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn later_entry_overrides_same_source() {
        let map = parse_map_entries(&strings(&["revenue=Sales", "cost=sales"])).unwrap();
        assert_eq!(map.entries(), &[("cost".to_string(), "sales".to_string())]);
    }

    #[test]
    fn renames_mapped_headers() {
        let map = parse_map_entries(&strings(&["revenue=sales"])).unwrap();
        let mut qc = QcReport::new(0);
        let resolved =
            apply_column_map(&strings(&["date", "sales", "cost"]), &map, &mut qc).unwrap();
        assert_eq!(resolved, strings(&["date", "revenue", "cost"]));
        assert!(qc.warnings.is_empty());
    }

    #[test]
    fn mapping_onto_existing_header_collides() {
        let map = parse_map_entries(&strings(&["revenue=sales"])).unwrap();
        let mut qc = QcReport::new(0);
        let error =
            apply_column_map(&strings(&["revenue", "sales"]), &map, &mut qc).unwrap_err();
        match error {
            RescueError::DuplicateTarget { target, sources } => {
                assert_eq!(target, "revenue");
                assert_eq!(sources, strings(&["revenue", "sales"]));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(qc.warnings.len(), 1);
        assert_eq!(
            qc.warnings[0].category,
            WarningCategory::DuplicateMappedColumn
        );
        assert!(qc.warnings[0].message.contains("revenue, sales"));
    }

    #[test]
    fn distinct_sources_same_target_collide_at_apply() {
        let map = parse_map_entries(&strings(&["units=qty", "units=count"])).unwrap();
        let mut qc = QcReport::new(0);
        let error = apply_column_map(&strings(&["qty", "count"]), &map, &mut qc).unwrap_err();
        assert!(matches!(error, RescueError::DuplicateTarget { .. }));
    }

    #[test]
    fn missing_required_lists_all_sorted() {
        let missing = missing_required(&strings(&["date", "product", "region"]));
        assert_eq!(missing, strings(&["cost", "revenue", "units"]));
    }
}
