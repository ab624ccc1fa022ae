//! Schema lint command handler

use super::utils::load_schema;
use crate::cli::{LintArgs, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use paramcheck_core::{FieldSchema, ParamType, Pattern, Schema};
use serde::Serialize;
use tracing::{info, instrument};

/// A problem found in a schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintIssue {
    /// Field name, with `[]` appended for each item-schema level
    pub field: String,
    pub problem: String,
}

/// Handle the lint command
#[instrument(skip(config, output), fields(schema = %args.schema))]
pub fn handle_lint(args: LintArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let (path, schema) = load_schema(&args.schema, config)?;
    output.info(&format!("Linting {} ({} field(s))", path.display(), schema.len()))?;

    let issues = lint_schema(&schema);
    info!(issues = issues.len(), "Lint finished");

    if output.format() != OutputFormat::Human {
        output.data(&issues)?;
    } else if issues.is_empty() {
        output.success("✓ Schema looks good")?;
    } else {
        output.error(&format!("✗ {} problem(s) found", issues.len()))?;
        let rows = issues
            .iter()
            .map(|issue| vec![issue.field.clone(), issue.problem.clone()])
            .collect();
        output.table(&["Field", "Problem"], rows)?;
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::LintFailed {
            count: issues.len(),
        })
    }
}

/// Collect every problem in `schema`, in field order
pub fn lint_schema(schema: &Schema) -> Vec<LintIssue> {
    let mut issues = Vec::new();
    for (name, field) in schema.iter() {
        lint_field(name.to_string(), field, &mut issues);
    }
    issues
}

fn lint_field(label: String, field: &FieldSchema, issues: &mut Vec<LintIssue>) {
    match field.param_type {
        None => issues.push(LintIssue {
            field: label.clone(),
            problem: "missing type".to_string(),
        }),
        Some(ty) if ty != ParamType::Array && field.items.is_some() => issues.push(LintIssue {
            field: label.clone(),
            problem: format!("items are ignored for type {}", ty),
        }),
        Some(_) => {}
    }

    if let Some(regex) = &field.regex {
        if let Err(reason) = Pattern::compile(regex) {
            issues.push(LintIssue {
                field: label.clone(),
                problem: format!("invalid regex {:?}: {}", regex, reason),
            });
        }
    }

    if let Some(items) = &field.items {
        lint_field(format!("{}[]", label), items, issues);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_schema() {
        let schema = Schema::from_value(json!({
            "id": {"type": "number", "path": "params.id"},
            "tags": {"type": "array", "items": {"type": "string", "regex": "/^[a-z]+$/i"}}
        }))
        .unwrap();
        assert!(lint_schema(&schema).is_empty());
    }

    #[test]
    fn test_reports_problems_in_order() {
        let schema = Schema::from_value(json!({
            "q": {"default": "x"},
            "code": {"type": "string", "regex": "/(unclosed/"},
            "ids": {"type": "array", "items": {"regex": "x"}},
            "name": {"type": "string", "items": {"type": "string"}}
        }))
        .unwrap();

        let issues = lint_schema(&schema);
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["q", "code", "ids[]", "name"]);
        assert_eq!(issues[0].problem, "missing type");
        assert!(issues[1].problem.starts_with("invalid regex"));
        assert_eq!(issues[2].problem, "missing type");
        assert_eq!(issues[3].problem, "items are ignored for type string");
    }

    #[test]
    fn test_unknown_flag_is_reported() {
        let schema = Schema::from_value(json!({
            "code": {"type": "string", "regex": "/abc/q"}
        }))
        .unwrap();
        let issues = lint_schema(&schema);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "code");
    }
}
