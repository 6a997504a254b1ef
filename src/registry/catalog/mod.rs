//! The built-in node catalog.
//!
//! Each category contributes its templates in display order; the registry keeps that order
//! for `by_category`.

use super::template::{ConfigFieldDef as Field, NodeTemplate, OutputFieldDef as Out, OutputType};

mod automation;
mod data;
mod logic;
mod triggers;

pub(super) fn builtin_templates() -> Vec<NodeTemplate> {
    let mut templates = Vec::new();
    templates.extend(triggers::trigger_templates());
    templates.extend(automation::web_templates());
    templates.extend(automation::desktop_templates());
    templates.extend(data::files_templates());
    templates.extend(data::excel_templates());
    templates.extend(data::email_templates());
    templates.extend(data::api_templates());
    templates.extend(data::database_templates());
    templates.extend(data::document_templates());
    templates.extend(logic::ai_templates());
    templates.extend(logic::python_templates());
    templates.extend(logic::control_templates());
    templates.extend(logic::logging_templates());
    templates.extend(logic::security_templates());
    templates.extend(logic::human_templates());
    templates
}

/// A workbook path field shared by the excel templates.
fn workbook() -> Field {
    Field::text("path", "Workbook").required().expressions()
}

/// The `selector` field most browser and desktop actions start with.
fn selector(name: &str, label: &str) -> Field {
    Field::text(name, label).required().expressions()
}

/// A single string output.
fn text_out(name: &str, description: &str) -> Out {
    Out::new(name, OutputType::String, description)
}
