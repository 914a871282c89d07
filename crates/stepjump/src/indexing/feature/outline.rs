//! Scenario outline placeholder substitution.

/// Values from the first data row of the first Examples table, keyed by
/// header.
#[derive(Debug, Default)]
pub(super) struct FirstExampleRow {
    cells: Vec<(String, String)>,
}

impl FirstExampleRow {
    /// Collect the substitutions for `scenario`.
    ///
    /// Scenarios without examples, and examples without a table or data row,
    /// yield no substitutions and leave step text untouched.
    pub(super) fn of(scenario: &gherkin::Scenario) -> Self {
        let Some(examples) = scenario.examples.first() else {
            return Self::default();
        };
        let Some(table) = examples.table.as_ref() else {
            tracing::debug!(scenario = %scenario.name, "examples block has no table");
            return Self::default();
        };
        let mut rows = table.rows.iter();
        let (Some(header), Some(first)) = (rows.next(), rows.next()) else {
            tracing::debug!(scenario = %scenario.name, "examples table has no data rows");
            return Self::default();
        };
        Self {
            cells: header.iter().cloned().zip(first.iter().cloned()).collect(),
        }
    }

    /// Replace every `<header>` in `text` with its value.
    pub(super) fn expand(&self, text: &str) -> String {
        self.cells
            .iter()
            .fold(text.to_owned(), |acc, (header, value)| {
                acc.replace(&format!("<{header}>"), value)
            })
    }
}
