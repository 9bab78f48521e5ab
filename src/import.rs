//! Tabular import.
//!
//! Turns rows of the combined maintenance sheet into a [`Problem`], and
//! rows of the standalone resource and tool sheets into budget lists.
//! File parsing stays with the caller; rows arrive either as typed
//! structs or as a JSON array of row objects keyed by column name (the
//! shape of a dataframe exported with `orient="records"`).
//!
//! # Aggregation
//!
//! - ID cells are trimmed.
//! - Tasks keep first-appearance order; duration and priority come from
//!   the last row naming the task.
//! - Dependencies are comma-separated; blanks are dropped and duplicates
//!   merged across rows.
//! - In the combined sheet, resources and tools keep first-appearance
//!   order and availabilities are summed across rows sharing an ID.
//! - In the standalone sheets, availabilities come from the last row
//!   naming the ID.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Problem, Resource, Task, Tool};

pub const COL_TASK: &str = "Tâche";
pub const COL_DURATION: &str = "Durée";
pub const COL_RESOURCE: &str = "Ressource Humaine";
pub const COL_AVAILABILITY: &str = "Disponibilité";
pub const COL_TOOL: &str = "Outillage";
pub const COL_TOOL_AVAILABILITY: &str = "Disponibilité des outils";
pub const COL_DEPENDENCIES: &str = "Dépendances";
pub const COL_PRIORITY: &str = "Priorité";

/// Columns every row of the combined sheet must carry, in sheet order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    COL_TASK,
    COL_DURATION,
    COL_RESOURCE,
    COL_AVAILABILITY,
    COL_TOOL,
    COL_TOOL_AVAILABILITY,
    COL_DEPENDENCIES,
    COL_PRIORITY,
];

/// Columns of the standalone resource sheet.
pub const RESOURCE_COLUMNS: [&str; 2] = [COL_RESOURCE, COL_AVAILABILITY];

/// Columns of the standalone tool sheet.
pub const TOOL_COLUMNS: [&str; 2] = [COL_TOOL, COL_TOOL_AVAILABILITY];

/// One row of the combined sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularRow {
    #[serde(rename = "Tâche")]
    pub task: String,
    #[serde(rename = "Durée")]
    pub duration: u32,
    #[serde(rename = "Ressource Humaine")]
    pub resource: String,
    #[serde(rename = "Disponibilité")]
    pub availability: u32,
    #[serde(rename = "Outillage")]
    pub tool: String,
    #[serde(rename = "Disponibilité des outils")]
    pub tool_availability: u32,
    /// Comma-separated prerequisite task IDs; empty cells arrive as `null`.
    #[serde(rename = "Dépendances")]
    pub dependencies: Option<String>,
    #[serde(rename = "Priorité")]
    pub priority: u8,
}

/// One row of the standalone resource sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRow {
    #[serde(rename = "Ressource Humaine")]
    pub resource: String,
    #[serde(rename = "Disponibilité")]
    pub availability: u32,
}

/// One row of the standalone tool sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRow {
    #[serde(rename = "Outillage")]
    pub tool: String,
    #[serde(rename = "Disponibilité des outils")]
    pub availability: u32,
}

/// Parses a JSON array of combined-sheet row objects.
///
/// # Errors
/// - [`Error::Json`] if the text is not an array of objects or a cell has
///   the wrong type
/// - [`Error::EmptyInput`] for an empty array
/// - [`Error::MissingColumns`] naming every required column absent from
///   at least one row
pub fn from_json_rows(json: &str) -> Result<Problem> {
    let rows: Vec<TabularRow> = parse_records(json, &REQUIRED_COLUMNS)?;
    from_rows(&rows)
}

/// Parses a JSON array of resource-sheet row objects.
///
/// Errors as for [`from_json_rows`], against [`RESOURCE_COLUMNS`].
pub fn resources_from_json_rows(json: &str) -> Result<Vec<Resource>> {
    let rows: Vec<ResourceRow> = parse_records(json, &RESOURCE_COLUMNS)?;
    resources_from_rows(&rows)
}

/// Parses a JSON array of tool-sheet row objects.
///
/// Errors as for [`from_json_rows`], against [`TOOL_COLUMNS`].
pub fn tools_from_json_rows(json: &str) -> Result<Vec<Tool>> {
    let rows: Vec<ToolRow> = parse_records(json, &TOOL_COLUMNS)?;
    tools_from_rows(&rows)
}

fn parse_records<T: DeserializeOwned>(json: &str, required: &[&str]) -> Result<Vec<T>> {
    let records: Vec<Map<String, Value>> = serde_json::from_str(json)?;
    if records.is_empty() {
        return Err(Error::EmptyInput("the sheet has no rows".to_string()));
    }

    let missing: Vec<String> = required
        .iter()
        .filter(|col| records.iter().any(|r| !r.contains_key(**col)))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingColumns(missing));
    }

    let rows = records
        .into_iter()
        .map(|r| serde_json::from_value(Value::Object(r)))
        .collect::<std::result::Result<Vec<T>, _>>()?;
    Ok(rows)
}

/// Aggregates typed rows into a problem.
pub fn from_rows(rows: &[TabularRow]) -> Result<Problem> {
    if rows.is_empty() {
        return Err(Error::EmptyInput("the sheet has no rows".to_string()));
    }

    let mut problem = Problem::default();
    let mut task_pos: HashMap<String, usize> = HashMap::new();
    let mut resource_pos: HashMap<String, usize> = HashMap::new();
    let mut tool_pos: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let task_id = row.task.trim();
        let deps = parse_dependencies(row.dependencies.as_deref().unwrap_or(""));
        match task_pos.get(task_id) {
            Some(&i) => {
                let task = &mut problem.tasks[i];
                task.duration_hours = row.duration;
                task.priority = row.priority;
                merge_prerequisites(task, deps);
            }
            None => {
                let mut task = Task::new(task_id, row.duration).with_priority(row.priority);
                merge_prerequisites(&mut task, deps);
                task_pos.insert(task_id.to_string(), problem.tasks.len());
                problem.tasks.push(task);
            }
        }

        let resource_id = row.resource.trim();
        match resource_pos.get(resource_id) {
            Some(&i) => {
                let r = &mut problem.resources[i];
                r.availability_hours = r.availability_hours.saturating_add(row.availability);
            }
            None => {
                resource_pos.insert(resource_id.to_string(), problem.resources.len());
                problem
                    .resources
                    .push(Resource::new(resource_id, row.availability));
            }
        }

        let tool_id = row.tool.trim();
        if tool_id.is_empty() {
            continue;
        }
        match tool_pos.get(tool_id) {
            Some(&i) => {
                let t = &mut problem.tools[i];
                t.availability = t.availability.saturating_add(row.tool_availability);
            }
            None => {
                tool_pos.insert(tool_id.to_string(), problem.tools.len());
                problem.tools.push(Tool::new(tool_id, row.tool_availability));
            }
        }
    }

    debug!(
        rows = rows.len(),
        tasks = problem.tasks.len(),
        resources = problem.resources.len(),
        tools = problem.tools.len(),
        "imported sheet"
    );
    Ok(problem)
}

/// Aggregates resource-sheet rows; the last row naming a resource wins.
pub fn resources_from_rows(rows: &[ResourceRow]) -> Result<Vec<Resource>> {
    if rows.is_empty() {
        return Err(Error::EmptyInput("the resource sheet has no rows".to_string()));
    }

    let mut resources: Vec<Resource> = Vec::new();
    let mut pos: HashMap<String, usize> = HashMap::new();
    for row in rows {
        let id = row.resource.trim();
        match pos.get(id) {
            Some(&i) => resources[i].availability_hours = row.availability,
            None => {
                pos.insert(id.to_string(), resources.len());
                resources.push(Resource::new(id, row.availability));
            }
        }
    }

    debug!(rows = rows.len(), resources = resources.len(), "imported resource sheet");
    Ok(resources)
}

/// Aggregates tool-sheet rows; the last row naming a tool wins. Blank
/// tool cells are skipped.
pub fn tools_from_rows(rows: &[ToolRow]) -> Result<Vec<Tool>> {
    if rows.is_empty() {
        return Err(Error::EmptyInput("the tool sheet has no rows".to_string()));
    }

    let mut tools: Vec<Tool> = Vec::new();
    let mut pos: HashMap<String, usize> = HashMap::new();
    for row in rows {
        let id = row.tool.trim();
        if id.is_empty() {
            continue;
        }
        match pos.get(id) {
            Some(&i) => tools[i].availability = row.availability,
            None => {
                pos.insert(id.to_string(), tools.len());
                tools.push(Tool::new(id, row.availability));
            }
        }
    }

    debug!(rows = rows.len(), tools = tools.len(), "imported tool sheet");
    Ok(tools)
}

/// Replaces the budgets of a combined-sheet problem with those of the
/// standalone sheets. Tasks, durations, dependencies and priorities are
/// kept.
pub fn with_separate_budgets(
    problem: Problem,
    resources: Vec<Resource>,
    tools: Vec<Tool>,
) -> Problem {
    Problem {
        resources,
        tools,
        ..problem
    }
}

fn merge_prerequisites(task: &mut Task, deps: Vec<String>) {
    for dep in deps {
        if !task.prerequisites.contains(&dep) {
            task.prerequisites.push(dep);
        }
    }
}

/// Splits a comma-separated dependency cell.
pub fn parse_dependencies(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::too_many_arguments)]
    fn row(
        task: &str,
        duration: u32,
        resource: &str,
        availability: u32,
        tool: &str,
        tool_avail: u32,
        deps: Option<&str>,
        priority: u8,
    ) -> TabularRow {
        TabularRow {
            task: task.to_string(),
            duration,
            resource: resource.to_string(),
            availability,
            tool: tool.to_string(),
            tool_availability: tool_avail,
            dependencies: deps.map(str::to_string),
            priority,
        }
    }

    #[test]
    fn test_parse_dependencies() {
        assert_eq!(parse_dependencies("A, B,,C "), vec!["A", "B", "C"]);
        assert!(parse_dependencies("").is_empty());
        assert!(parse_dependencies(" , ").is_empty());
    }

    #[test]
    fn test_from_rows_aggregates() {
        let rows = vec![
            row("T1", 4, "alice", 8, "crane", 2, None, 5),
            row("T2", 3, "bob", 6, "crane", 1, Some("T1"), 8),
            row("T3", 2, "alice", 4, "welder", 1, Some("T1, T2"), 3),
        ];
        let problem = from_rows(&rows).unwrap();

        let ids: Vec<&str> = problem.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["T1", "T2", "T3"]);
        assert_eq!(problem.tasks[2].prerequisites, vec!["T1", "T2"]);

        assert_eq!(
            problem.resources,
            vec![Resource::new("alice", 12), Resource::new("bob", 6)]
        );
        assert_eq!(
            problem.tools,
            vec![Tool::new("crane", 3), Tool::new("welder", 1)]
        );
    }

    #[test]
    fn test_repeated_task_last_row_wins_and_deps_merge() {
        let rows = vec![
            row("T1", 4, "alice", 8, "crane", 1, Some("X"), 5),
            row("T1", 6, "bob", 8, "crane", 1, Some("X, Y"), 9),
        ];
        let problem = from_rows(&rows).unwrap();

        assert_eq!(problem.tasks.len(), 1);
        assert_eq!(problem.tasks[0].duration_hours, 6);
        assert_eq!(problem.tasks[0].priority, 9);
        assert_eq!(problem.tasks[0].prerequisites, vec!["X", "Y"]);
    }

    #[test]
    fn test_blank_tool_skipped() {
        let rows = vec![row("T1", 4, "alice", 8, "  ", 0, None, 5)];
        let problem = from_rows(&rows).unwrap();
        assert!(problem.tools.is_empty());
    }

    #[test]
    fn test_from_rows_empty() {
        assert!(matches!(from_rows(&[]), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_from_json_rows() {
        let json = r#"[
            {"Tâche":"T1","Durée":4,"Ressource Humaine":"alice","Disponibilité":8,
             "Outillage":"crane","Disponibilité des outils":2,"Dépendances":null,"Priorité":5},
            {"Tâche":"T2","Durée":3,"Ressource Humaine":"alice","Disponibilité":2,
             "Outillage":"crane","Disponibilité des outils":2,"Dépendances":"T1","Priorité":8}
        ]"#;
        let problem = from_json_rows(json).unwrap();
        assert_eq!(problem.tasks.len(), 2);
        assert_eq!(problem.tasks[1].prerequisites, vec!["T1"]);
        assert_eq!(problem.resources, vec![Resource::new("alice", 10)]);
        assert_eq!(problem.tools, vec![Tool::new("crane", 4)]);
    }

    #[test]
    fn test_from_json_missing_columns() {
        let json = r#"[{"Tâche":"T1","Durée":4,"Ressource Humaine":"alice","Disponibilité":8}]"#;
        match from_json_rows(json) {
            Err(Error::MissingColumns(cols)) => assert_eq!(
                cols,
                vec![COL_TOOL, COL_TOOL_AVAILABILITY, COL_DEPENDENCIES, COL_PRIORITY]
            ),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_id_cells_trimmed() {
        let rows = vec![
            row(" T1 ", 4, "alice ", 8, " crane", 1, None, 5),
            row("T2", 3, " alice", 2, "crane ", 1, Some(" T1 "), 8),
        ];
        let problem = from_rows(&rows).unwrap();

        assert_eq!(problem.tasks[0].id, "T1");
        assert_eq!(problem.tasks[1].prerequisites, vec!["T1"]);
        assert!(problem.contains_task(&problem.tasks[1].prerequisites[0]));
        assert_eq!(problem.resources, vec![Resource::new("alice", 10)]);
        assert_eq!(problem.tools, vec![Tool::new("crane", 2)]);
    }

    #[test]
    fn test_resource_sheet_last_row_wins() {
        let json = r#"[
            {"Ressource Humaine":"alice","Disponibilité":8},
            {"Ressource Humaine":"bob","Disponibilité":6},
            {"Ressource Humaine":"alice ","Disponibilité":4}
        ]"#;
        let resources = resources_from_json_rows(json).unwrap();
        assert_eq!(
            resources,
            vec![Resource::new("alice", 4), Resource::new("bob", 6)]
        );
    }

    #[test]
    fn test_tool_sheet_last_row_wins() {
        let tool_row = |tool: &str, availability| ToolRow {
            tool: tool.to_string(),
            availability,
        };
        let rows = vec![
            tool_row("crane", 3),
            tool_row(" ", 9),
            tool_row("crane", 1),
            tool_row("welder", 2),
        ];
        let tools = tools_from_rows(&rows).unwrap();
        assert_eq!(tools, vec![Tool::new("crane", 1), Tool::new("welder", 2)]);
    }

    #[test]
    fn test_standalone_sheet_errors() {
        assert!(matches!(resources_from_json_rows("[]"), Err(Error::EmptyInput(_))));
        assert!(matches!(tools_from_rows(&[]), Err(Error::EmptyInput(_))));

        match tools_from_json_rows(r#"[{"Outillage":"crane"}]"#) {
            Err(Error::MissingColumns(cols)) => assert_eq!(cols, vec![COL_TOOL_AVAILABILITY]),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn test_separate_budgets_replace_combined_ones() {
        let rows = vec![
            row("T1", 4, "alice", 8, "crane", 2, None, 5),
            row("T2", 3, "alice", 8, "crane", 2, Some("T1"), 8),
        ];
        let combined = from_rows(&rows).unwrap();
        let resources = vec![Resource::new("bob", 5), Resource::new("carol", 5)];
        let tools = vec![Tool::new("welder", 1)];

        let problem = with_separate_budgets(combined, resources.clone(), tools.clone());
        assert_eq!(problem.tasks.len(), 2);
        assert_eq!(problem.tasks[1].prerequisites, vec!["T1"]);
        assert_eq!(problem.resources, resources);
        assert_eq!(problem.tools, tools);
    }

    #[test]
    fn test_from_json_empty_and_malformed() {
        assert!(matches!(from_json_rows("[]"), Err(Error::EmptyInput(_))));
        assert!(matches!(from_json_rows("{}"), Err(Error::Json(_))));

        let wrong_type = r#"[{"Tâche":"T1","Durée":"four","Ressource Humaine":"a","Disponibilité":8,
            "Outillage":"c","Disponibilité des outils":1,"Dépendances":null,"Priorité":5}]"#;
        assert!(matches!(from_json_rows(wrong_type), Err(Error::Json(_))));
    }
}
