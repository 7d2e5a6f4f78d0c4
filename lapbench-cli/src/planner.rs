//! Test Planner
//!
//! Narrows a suite's registry to the tests selected on the command line.
//!
//! Filtering options:
//! - Regex pattern matching on the test name
//! - Regex exclusion
//!
//! Ordering: registration order is kept; it never affects the score.

use lapbench_core::TestRegistry;
use regex::Regex;

/// Outcome of planning
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Tests that will run, in registration order
    pub selected: Vec<String>,
    /// Tests removed by the filters, in registration order
    pub skipped: Vec<String>,
}

/// Filter `registry` in place and describe what was kept
pub fn build_plan<E>(
    registry: &mut TestRegistry<E>,
    filter: Option<&Regex>,
    skip: Option<&Regex>,
) -> ExecutionPlan {
    let mut plan = ExecutionPlan::default();

    registry.retain(|test| {
        let keep = is_selected(test.name(), filter, skip);
        if keep {
            plan.selected.push(test.name().to_string());
        } else {
            plan.skipped.push(test.name().to_string());
        }
        keep
    });

    plan
}

fn is_selected(name: &str, filter: Option<&Regex>, skip: Option<&Regex>) -> bool {
    // Apply regex filter on the test name
    if let Some(re) = filter {
        if !re.is_match(name) {
            return false;
        }
    }

    // Apply exclusion filter
    if let Some(re) = skip {
        if re.is_match(name) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapbench_core::TestDefinition;

    fn registry(names: &[&str]) -> TestRegistry<()> {
        let mut registry = TestRegistry::new();
        for name in names {
            registry
                .insert(TestDefinition::without_setup(*name, "", |_| Ok(())))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_no_filter() {
        let mut reg = registry(&["tableCreation", "classChange", "formCreation"]);
        let plan = build_plan(&mut reg, None, None);

        // Registration order, not alphabetical
        assert_eq!(plan.selected, ["tableCreation", "classChange", "formCreation"]);
        assert!(plan.skipped.is_empty());
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_regex_filter() {
        let mut reg = registry(&["tableCreation", "classChange", "tableRemoval"]);
        let re = Regex::new("^table").unwrap();
        let plan = build_plan(&mut reg, Some(&re), None);

        assert_eq!(plan.selected, ["tableCreation", "tableRemoval"]);
        assert_eq!(plan.skipped, ["classChange"]);
        assert_eq!(reg.names().collect::<Vec<_>>(), ["tableCreation", "tableRemoval"]);
    }

    #[test]
    fn test_skip_filter() {
        let mut reg = registry(&["simpleStyling", "complexStyling", "elementSearch"]);
        let skip = Regex::new("Styling$").unwrap();
        let plan = build_plan(&mut reg, None, Some(&skip));

        assert_eq!(plan.selected, ["elementSearch"]);
        assert_eq!(plan.skipped, ["simpleStyling", "complexStyling"]);
    }

    #[test]
    fn test_filter_and_skip_combined() {
        let mut reg = registry(&["tableCreation", "tableCloning", "tableRemoval"]);
        let filter = Regex::new("table").unwrap();
        let skip = Regex::new("Clon").unwrap();
        let plan = build_plan(&mut reg, Some(&filter), Some(&skip));

        assert_eq!(plan.selected, ["tableCreation", "tableRemoval"]);
    }
}
