//! Select options for branch and weekday pickers.

use sucursales_core::{Branch, BranchId, Weekday};

/// One `<option>` of the branch picker.
#[derive(Debug, Clone)]
pub struct BranchOption {
    pub id: BranchId,
    pub label: String,
    pub selected: bool,
}

/// Branch picker options in list order, with `selected` marked.
#[must_use]
pub fn branch_options(branches: &[Branch], selected: Option<BranchId>) -> Vec<BranchOption> {
    branches
        .iter()
        .map(|branch| BranchOption {
            id: branch.id,
            label: branch.address.clone(),
            selected: selected == Some(branch.id),
        })
        .collect()
}

/// One `<option>` of the weekday picker.
#[derive(Debug, Clone)]
pub struct WeekdayOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// All seven days, Monday first.
#[must_use]
pub fn weekday_options(selected: Option<Weekday>) -> Vec<WeekdayOption> {
    Weekday::ALL
        .into_iter()
        .map(|day| WeekdayOption {
            value: day.as_str(),
            label: day.label(),
            selected: selected == Some(day),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_options_mark_selection() {
        let options = weekday_options(Some(Weekday::Wednesday));
        assert_eq!(options.len(), 7);
        assert_eq!(options[0].label, "Lunes");
        let selected: Vec<_> = options.iter().filter(|o| o.selected).map(|o| o.value).collect();
        assert_eq!(selected, vec!["WEDNESDAY"]);
    }

    #[test]
    fn test_branch_options_keep_order() {
        let branches: Vec<Branch> = serde_json::from_value(serde_json::json!([
            {"id": 2, "direccion": "Norte 1", "telefono": "5551234", "latitud": 0.0, "longitud": 0.0},
            {"id": 1, "direccion": "Sur 9", "telefono": "5551234", "latitud": 0.0, "longitud": 0.0}
        ]))
        .unwrap();

        let options = branch_options(&branches, Some(BranchId::new(1)));
        assert_eq!(options[0].label, "Norte 1");
        assert!(!options[0].selected);
        assert!(options[1].selected);
        assert!(branch_options(&branches, None).iter().all(|o| !o.selected));
    }
}
