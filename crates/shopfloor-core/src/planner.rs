//! Production planning and operator assignment.
//!
//! A plan request lists parts, quantities and work areas. Each becomes a
//! task whose duration is the standard time per unit times the quantity.
//! Tasks are then staffed longest first: every task takes the most
//! efficient trained worker still available as its primary operator and the
//! least efficient trained worker still available as its support operator,
//! pairing strong and weak operators on the long jobs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::lenient::deserialize_quantity;
use crate::records::ProductionRecord;
use crate::{CoreError, Employee, EmployeeId, PartId, Roster, StandardTimes};

/// Name reported when a task gets a primary but no support operator.
pub const NO_OPERATOR: &str = "None";

/// One line of a production plan request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRequest {
    pub part_id: PartId,
    #[serde(deserialize_with = "deserialize_quantity")]
    pub quantity: u32,
    pub work_area: String,
}

/// A costed unit of work, ready for assignment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedTask {
    pub part_id: PartId,
    pub part_name: String,
    pub quantity: u32,
    pub work_area: String,
    /// Standard minutes per unit, zero when the table has no entry.
    pub time_per_unit: f64,
    pub total_minutes: f64,
}

/// Operators staffed on a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorPair {
    pub best_operator: String,
    pub support_operator: String,
}

/// Assignment result for one task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskAssignment {
    /// Part display name.
    pub part: String,
    pub part_id: PartId,
    pub quantity: u32,
    pub work_area: String,
    pub total_minutes: f64,
    /// One pair when a trained worker was available, otherwise empty.
    pub operators: Vec<OperatorPair>,
}

/// Cost every request against the standard-time table.
pub fn build_tasks(
    requests: &[PartRequest],
    roster: &Roster,
    times: &StandardTimes,
) -> Result<Vec<PlannedTask>, CoreError> {
    requests
        .iter()
        .map(|req| {
            let part = roster
                .part(req.part_id.as_str())
                .ok_or_else(|| CoreError::UnknownPart(req.part_id.to_string()))?;
            let time_per_unit = times
                .minutes_per_unit(req.part_id.as_str(), &req.work_area)
                .unwrap_or(0.0);

            Ok(PlannedTask {
                part_id: req.part_id.clone(),
                part_name: part.name.clone(),
                quantity: req.quantity,
                work_area: req.work_area.clone(),
                time_per_unit,
                total_minutes: time_per_unit * f64::from(req.quantity),
            })
        })
        .collect()
}

/// Roster employees that are present, in roster order.
pub fn present_workers<'a>(roster: &'a Roster, present: &BTreeSet<EmployeeId>) -> Vec<&'a Employee> {
    roster
        .employees
        .iter()
        .filter(|e| present.contains(&e.id))
        .collect()
}

/// Staff tasks greedily, longest task first.
///
/// Each worker is used at most once across the whole plan. Efficiency ties
/// go to the worker listed first.
pub fn assign(mut tasks: Vec<PlannedTask>, workers: &[&Employee]) -> Vec<TaskAssignment> {
    // Stable: equal durations keep request order.
    tasks.sort_by(|a, b| b.total_minutes.total_cmp(&a.total_minutes));

    let mut pool: Vec<&Employee> = workers.to_vec();
    let mut assignments = Vec::with_capacity(tasks.len());

    for task in tasks {
        let best = pick(&pool, &task.work_area, |candidate, current| candidate > current)
            .map(|i| pool.remove(i));
        let support = pick(&pool, &task.work_area, |candidate, current| candidate < current)
            .map(|i| pool.remove(i));

        let operators = match best {
            Some(best) => vec![OperatorPair {
                best_operator: best.name.clone(),
                support_operator: support
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| NO_OPERATOR.to_string()),
            }],
            None => Vec::new(),
        };

        assignments.push(TaskAssignment {
            part: task.part_name,
            part_id: task.part_id,
            quantity: task.quantity,
            work_area: task.work_area,
            total_minutes: task.total_minutes,
            operators,
        });
    }

    assignments
}

/// Index of the trained worker preferred by `better`, first one on ties.
fn pick(pool: &[&Employee], work_area: &str, better: impl Fn(f64, f64) -> bool) -> Option<usize> {
    let mut chosen: Option<usize> = None;
    for (i, worker) in pool.iter().enumerate() {
        if !worker.is_trained(work_area) || worker.efficiency.is_nan() {
            continue;
        }
        match chosen {
            Some(c) if !better(worker.efficiency, pool[c].efficiency) => {}
            _ => chosen = Some(i),
        }
    }
    chosen
}

/// Production log rows for an assigned plan, in plan order.
pub fn log_entries(assignments: &[TaskAssignment], date: &str, shift: &str) -> Vec<ProductionRecord> {
    assignments
        .iter()
        .map(|a| ProductionRecord::planned(date, shift, a.part_id.clone(), a.work_area.clone(), a.quantity))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Part;

    fn task(part: &str, area: &str, minutes: f64) -> PlannedTask {
        PlannedTask {
            part_id: PartId::new(part),
            part_name: format!("{part}-name"),
            quantity: 1,
            work_area: area.to_string(),
            time_per_unit: minutes,
            total_minutes: minutes,
        }
    }

    fn names(a: &TaskAssignment) -> Option<(&str, &str)> {
        a.operators
            .first()
            .map(|o| (o.best_operator.as_str(), o.support_operator.as_str()))
    }

    #[test]
    fn test_longest_task_gets_best_and_weakest() {
        let workers = vec![
            Employee::new("E1", "Ana", 0.8).with_skills("CCA"),
            Employee::new("E2", "Ben", 1.3).with_skills("CCA, PAA"),
            Employee::new("E3", "Cy", 1.0).with_skills("CCA"),
            Employee::new("E4", "Dee", 1.1).with_skills("CCA"),
        ];
        let refs: Vec<&Employee> = workers.iter().collect();
        let tasks = vec![task("P1", "CCA", 30.0), task("P2", "CCA", 90.0)];

        let result = assign(tasks, &refs);

        assert_eq!(result[0].part_id.as_str(), "P2");
        assert_eq!(names(&result[0]), Some(("Ben", "Ana")));
        assert_eq!(result[1].part_id.as_str(), "P1");
        assert_eq!(names(&result[1]), Some(("Dee", "Cy")));
    }

    #[test]
    fn test_no_support_reports_none() {
        let workers = vec![Employee::new("E1", "Ana", 1.0).with_skills("PAA")];
        let refs: Vec<&Employee> = workers.iter().collect();

        let result = assign(vec![task("P1", "PAA", 10.0)], &refs);

        assert_eq!(names(&result[0]), Some(("Ana", NO_OPERATOR)));
    }

    #[test]
    fn test_untrained_task_has_no_operators() {
        let workers = vec![Employee::new("E1", "Ana", 1.0).with_skills("PAA")];
        let refs: Vec<&Employee> = workers.iter().collect();

        let result = assign(vec![task("P1", "Autoclave", 10.0), task("P2", "PAA", 5.0)], &refs);

        assert!(result[0].operators.is_empty());
        assert_eq!(names(&result[1]), Some(("Ana", NO_OPERATOR)));
    }

    #[test]
    fn test_workers_are_used_once() {
        let workers = vec![
            Employee::new("E1", "Ana", 1.0).with_skills("CCA"),
            Employee::new("E2", "Ben", 0.9).with_skills("CCA"),
        ];
        let refs: Vec<&Employee> = workers.iter().collect();

        let result = assign(vec![task("P1", "CCA", 20.0), task("P2", "CCA", 10.0)], &refs);

        assert_eq!(names(&result[0]), Some(("Ana", "Ben")));
        assert!(result[1].operators.is_empty());
    }

    #[test]
    fn test_ties_go_to_first_listed() {
        let workers = vec![
            Employee::new("E1", "Ana", 1.0).with_skills("CCA"),
            Employee::new("E2", "Ben", 1.0).with_skills("CCA"),
            Employee::new("E3", "Cy", 1.0).with_skills("CCA"),
        ];
        let refs: Vec<&Employee> = workers.iter().collect();

        let result = assign(vec![task("P1", "CCA", 20.0)], &refs);

        assert_eq!(names(&result[0]), Some(("Ana", "Ben")));
    }

    #[test]
    fn test_equal_durations_keep_request_order() {
        let result = assign(
            vec![task("P1", "CCA", 10.0), task("P2", "CCA", 10.0), task("P3", "CCA", 40.0)],
            &[],
        );
        let order: Vec<&str> = result.iter().map(|a| a.part_id.as_str()).collect();
        assert_eq!(order, vec!["P3", "P1", "P2"]);
    }

    #[test]
    fn test_build_tasks_costs_requests() {
        let roster = Roster {
            employees: Vec::new(),
            parts: vec![Part::new("P1", "Bracket")],
        };
        let times = StandardTimes::parse("Part_ID,CCA,PAA\nP1,2.5,\n").unwrap();
        let requests = vec![
            PartRequest {
                part_id: PartId::new("P1"),
                quantity: 4,
                work_area: "CCA".to_string(),
            },
            PartRequest {
                part_id: PartId::new("P1"),
                quantity: 4,
                work_area: "PAA".to_string(),
            },
        ];

        let tasks = build_tasks(&requests, &roster, &times).unwrap();

        assert_eq!(tasks[0].part_name, "Bracket");
        assert_eq!(tasks[0].total_minutes, 10.0);
        assert_eq!(tasks[1].time_per_unit, 0.0);
        assert_eq!(tasks[1].total_minutes, 0.0);
    }

    #[test]
    fn test_build_tasks_rejects_unknown_part() {
        let requests = vec![PartRequest {
            part_id: PartId::new("P404"),
            quantity: 1,
            work_area: "CCA".to_string(),
        }];
        let err = build_tasks(&requests, &Roster::default(), &StandardTimes::default());
        assert!(matches!(err, Err(CoreError::UnknownPart(id)) if id == "P404"));
    }

    #[test]
    fn test_present_workers_in_roster_order() {
        let roster = Roster {
            employees: vec![
                Employee::new("E1", "Ana", 1.0),
                Employee::new("E2", "Ben", 1.0),
                Employee::new("E3", "Cy", 1.0),
            ],
            parts: Vec::new(),
        };
        let present: BTreeSet<EmployeeId> = ["E3", "E1", "E9"].into_iter().map(EmployeeId::from).collect();

        let workers = present_workers(&roster, &present);

        let ids: Vec<&str> = workers.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["E1", "E3"]);
    }

    #[test]
    fn test_log_entries_follow_each_task() {
        let result = assign(vec![task("P1", "CCA", 5.0), task("P2", "PAA", 50.0)], &[]);
        let rows = log_entries(&result, "2024-05-01", "A");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].part_id.as_str(), "P2");
        assert_eq!(rows[0].work_area, "PAA");
        assert_eq!(rows[1].part_id.as_str(), "P1");
        assert_eq!(rows[1].actual_qty, 0.0);
    }
}
