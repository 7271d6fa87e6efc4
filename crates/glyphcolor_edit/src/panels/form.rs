//! Form view model shared by the panels.

/// Action attached to a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    AddLayer,
    RemoveLayer { index: usize },
}

/// One row of a panel form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldDescription {
    Text {
        value: String,
    },
    Header {
        label: String,
        action: Option<FormAction>,
    },
    /// Integer input bound to the color index of mapping entry `layer_index`.
    EditNumber {
        key: String,
        label: String,
        value: i64,
        min_value: i64,
        max_value: i64,
        layer_index: usize,
    },
}

impl FieldDescription {
    pub fn text(value: impl Into<String>) -> Self {
        FieldDescription::Text { value: value.into() }
    }

    pub fn header(label: impl Into<String>, action: Option<FormAction>) -> Self {
        FieldDescription::Header { label: label.into(), action }
    }
}
