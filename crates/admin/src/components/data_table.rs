//! Data table component types.
//!
//! Every list screen renders the same four explicit states: the loading
//! placeholder (in the page shell), an error banner, an empty message, or
//! the rows in backend order.

/// Column definition for a data table.
#[derive(Debug, Clone)]
pub struct TableColumn {
    /// Display label for the column header.
    pub label: &'static str,
    /// Right-align the column (actions).
    pub align_end: bool,
}

impl TableColumn {
    #[must_use]
    pub const fn new(label: &'static str) -> Self {
        Self {
            label,
            align_end: false,
        }
    }

    /// Right-aligned actions column.
    #[must_use]
    pub const fn actions() -> Self {
        Self {
            label: "ACCIONES",
            align_end: true,
        }
    }
}

/// What a table fragment renders.
#[derive(Debug, Clone)]
pub enum TableBody<R> {
    /// The list read failed.
    Error(String),
    /// The list is empty.
    Empty(&'static str),
    Rows(Vec<R>),
}

impl<R> TableBody<R> {
    /// Pick the state from a list read.
    pub fn from_list<T>(
        items: &[T],
        error: Option<String>,
        empty_message: &'static str,
        row: impl FnMut(&T) -> R,
    ) -> Self {
        if let Some(message) = error {
            return Self::Error(message);
        }
        if items.is_empty() {
            return Self::Empty(empty_message);
        }
        Self::Rows(items.iter().map(row).collect())
    }
}

/// Branch table columns.
#[must_use]
pub fn branch_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("DIRECCIÓN"),
        TableColumn::new("TELÉFONO"),
        TableColumn::new("UBICACIÓN"),
        TableColumn::new("CONTACTOS"),
        TableColumn::new("ESTADO"),
        TableColumn::actions(),
    ]
}

/// Staff table columns.
#[must_use]
pub fn staff_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("NOMBRE COMPLETO"),
        TableColumn::new("CORREO"),
        TableColumn::new("TELÉFONOS"),
        TableColumn::new("CORPORATIVO"),
        TableColumn::new("SUCURSAL"),
        TableColumn::actions(),
    ]
}

/// Schedule table columns.
#[must_use]
pub fn schedule_columns() -> Vec<TableColumn> {
    vec![
        TableColumn::new("DÍA"),
        TableColumn::new("HORARIO"),
        TableColumn::new("DURACIÓN"),
        TableColumn::new("SUCURSAL"),
        TableColumn::actions(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_wins_over_rows() {
        let body: TableBody<i32> =
            TableBody::from_list(&[1, 2], Some("caído".to_string()), "vacío", |n| *n);
        assert!(matches!(body, TableBody::Error(ref m) if m == "caído"));
    }

    #[test]
    fn test_empty_and_rows() {
        let body: TableBody<i32> = TableBody::from_list(&[] as &[i32], None, "vacío", |n| *n);
        assert!(matches!(body, TableBody::Empty("vacío")));

        let body = TableBody::from_list(&[1, 2, 3], None, "vacío", |n| n * 10);
        assert!(matches!(body, TableBody::Rows(ref rows) if rows == &vec![10, 20, 30]));
    }

    #[test]
    fn test_actions_column_is_last() {
        for columns in [branch_columns(), staff_columns(), schedule_columns()] {
            let last = columns.last().map(|c| c.label);
            assert_eq!(last, Some("ACCIONES"));
        }
    }
}
