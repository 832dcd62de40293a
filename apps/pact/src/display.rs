//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use pact_types::{ActionKind, Class, FetchActionFailure, FetchActionOptions, Object, SupportsActionTestBase};
use serde::Serialize;
use std::io;

/// Result of a command, rendered as plain text or JSON
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum CommandOutput {
    Object(Object),
    FetchOptions(FetchActionOptions),
    Classes(Vec<ClassInfo>),
    Supports {
        action: ActionKind,
        repositories: Vec<String>,
    },
}

#[derive(Debug, Serialize)]
pub struct ClassInfo {
    pub name: &'static str,
    pub superclass: Option<&'static str>,
    pub is_abstract: bool,
}

impl From<Class> for ClassInfo {
    fn from(class: Class) -> Self {
        Self {
            name: class.name(),
            superclass: class.superclass().map(Class::name),
            is_abstract: class.is_abstract(),
        }
    }
}

/// Output renderer for CLI results
#[derive(Clone)]
pub struct OutputRenderer {
    /// Use JSON output format
    json_output: bool,
}

impl OutputRenderer {
    pub fn new(json_output: bool) -> Self {
        Self { json_output }
    }

    pub fn render(&self, output: &CommandOutput) -> io::Result<()> {
        if self.json_output {
            let json = serde_json::to_string_pretty(output).map_err(io::Error::other)?;
            println!("{json}");
            return Ok(());
        }

        match output {
            CommandOutput::Object(object) => Self::render_object(object),
            CommandOutput::FetchOptions(options) => Self::render_options(options),
            CommandOutput::Classes(classes) => Self::render_classes(classes),
            CommandOutput::Supports {
                action,
                repositories,
            } => Self::render_supports(*action, repositories),
        }
        Ok(())
    }

    fn render_object(object: &Object) {
        println!("{}", object.class());
        match object {
            Object::Action(action) => println!("  action: {action}"),
            Object::FetchActionOptions(options) => Self::render_options(options),
            Object::FetchActionFailure(failure) => Self::render_failure(failure),
            Object::SupportsActionTest(test) => println!("  action: {}", test.action_kind()),
        }
    }

    fn render_options(options: &FetchActionOptions) {
        println!("  safe_resume: {}", options.safe_resume());
        println!("  fetch_unneeded: {}", options.fetch_unneeded());
    }

    fn render_failure(failure: &FetchActionFailure) {
        println!("  target_file: {}", failure.target_file());
        println!(
            "  requires_manual_fetching: {}",
            failure.requires_manual_fetching()
        );
        println!(
            "  failed_automatic_fetching: {}",
            failure.failed_automatic_fetching()
        );
        println!(
            "  failed_integrity_checks: {}",
            failure.failed_integrity_checks()
        );
    }

    fn render_classes(classes: &[ClassInfo]) {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Class").add_attribute(Attribute::Bold),
            Cell::new("Superclass").add_attribute(Attribute::Bold),
            Cell::new("Abstract").add_attribute(Attribute::Bold),
        ]);

        for class in classes {
            table.add_row(vec![
                Cell::new(class.name),
                Cell::new(class.superclass.unwrap_or("-")),
                Cell::new(if class.is_abstract { "yes" } else { "no" }),
            ]);
        }

        println!("{table}");
    }

    fn render_supports(action: ActionKind, repositories: &[String]) {
        if repositories.is_empty() {
            println!("No repository supports {action}.");
            return;
        }
        for name in repositories {
            println!("{name}");
        }
    }
}
