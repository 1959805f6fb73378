//! Employee and part roster.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{CoreError, EmployeeId, PartId};

/// An operator on the floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Roster identifier, also the key used on the attendance sheet.
    pub id: EmployeeId,

    /// Display name.
    pub name: String,

    /// Efficiency rating; higher is faster.
    pub efficiency: f64,

    /// Comma-separated list of work areas the employee is trained for.
    #[serde(default)]
    pub trained_skills: String,
}

impl Employee {
    /// Create a new Employee with no trained skills.
    pub fn new(id: impl Into<EmployeeId>, name: impl Into<String>, efficiency: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            efficiency,
            trained_skills: String::new(),
        }
    }

    /// Builder method to set the trained skills list.
    pub fn with_skills(mut self, skills: impl Into<String>) -> Self {
        self.trained_skills = skills.into();
        self
    }

    /// Iterate the trained work areas, trimmed.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.trained_skills
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Check if this employee is trained for a work area.
    pub fn is_trained(&self, work_area: &str) -> bool {
        self.skills().any(|s| s == work_area)
    }
}

/// A part that can be planned for production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub id: PartId,
    pub name: String,
}

impl Part {
    pub fn new(id: impl Into<PartId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// The fixed roster of employees and parts.
///
/// Employee order is the file order. The assignment heuristic breaks
/// efficiency ties by this order, so it is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    #[serde(default)]
    pub employees: Vec<Employee>,

    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Roster {
    /// Decode a roster from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let roster: Roster =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidRoster(e.to_string()))?;
        roster.validate()?;
        Ok(roster)
    }

    /// Reject duplicate employee or part ids.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut seen = HashSet::new();
        for employee in &self.employees {
            if !seen.insert(employee.id.as_str()) {
                return Err(CoreError::InvalidRoster(format!(
                    "duplicate employee id '{}'",
                    employee.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for part in &self.parts {
            if !seen.insert(part.id.as_str()) {
                return Err(CoreError::InvalidRoster(format!(
                    "duplicate part id '{}'",
                    part.id
                )));
            }
        }

        Ok(())
    }

    /// Get an employee by id.
    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id.as_str() == id)
    }

    /// Get a part by id.
    pub fn part(&self, id: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.id.as_str() == id)
    }

    /// Number of employees on the roster.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}
