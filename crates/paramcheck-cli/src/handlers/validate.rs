//! Validation command handler

use super::utils::{load_document, load_schema};
use crate::cli::{OutputFormat, ValidateArgs};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::{OutputFormatter, OutputWriter};
use std::fs;
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip(config, output), fields(input = %args.input.display(), schema = %args.schema))]
pub fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("input: {}", args.input.display()));
    info!("Starting validation");

    let (schema_path, schema) = load_schema(&args.schema, config)?;
    output.info(&format!(
        "Validating {} against {}",
        args.input.display(),
        schema_path.display()
    ))?;

    let document = load_document(&args.input)?;

    let result = {
        let _validation_timer = Timer::new("parameter_validation");
        paramcheck_core::validate(&schema, &document)
    };

    match result {
        Ok(mapping) => {
            info!(parameters = mapping.len(), "Validation completed successfully");
            output.success(&format!("✓ {} parameter(s) accepted", mapping.len()))?;
            output.section("Output")?;
            output.mapping(&mapping)?;

            if let Some(path) = &args.output_file {
                let format = match output.format() {
                    OutputFormat::Human => OutputFormat::JsonPretty,
                    other => other,
                };
                fs::write(path, format.format_mapping(&mapping)?)?;
                debug!(path = %path.display(), "Saved output mapping");
            }

            if args.detailed {
                show_input(output, document)?;
            }

            Ok(())
        }
        Err(error) => {
            warn!(path = error.path(), kind = error.kind(), "Validation failed");
            output.error("✗ Validation failed")?;
            output.validation_error(&error)?;

            if args.detailed {
                show_input(output, document)?;
            }

            Err(Error::Validation(error))
        }
    }
}

fn show_input(output: &mut OutputWriter, mut document: serde_json::Value) -> Result<()> {
    output.section("Input Document")?;
    redaction::redact_json_value(&mut document);
    output.data(&document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use paramcheck_core::{ParamType, ValidationError};
    use serde_json::{json, Value};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fixture(dir: &TempDir) -> (PathBuf, PathBuf) {
        let schema = dir.path().join("schema.yaml");
        fs::write(
            &schema,
            "id:\n  type: number\n  path: params.id\npage:\n  type: number\n  path: query.page\n  default: 1\n",
        )
        .unwrap();
        let input = dir.path().join("request.json");
        fs::write(&input, r#"{"params": {"id": "17"}, "query": {}}"#).unwrap();
        (schema, input)
    }

    fn quiet_writer() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, Box::new(std::io::sink()))
    }

    #[test]
    fn test_validate_saves_output_mapping() {
        let dir = TempDir::new().unwrap();
        let (schema, input) = fixture(&dir);
        let saved = dir.path().join("out.json");

        let args = ValidateArgs {
            input,
            schema: schema.to_string_lossy().into_owned(),
            detailed: true,
            output_file: Some(saved.clone()),
        };
        handle_validate(args, &Config::default(), &mut quiet_writer()).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(saved).unwrap()).unwrap();
        assert_eq!(written, json!({"id": 17, "page": 1}));
    }

    #[test]
    fn test_validate_reports_typed_error() {
        let dir = TempDir::new().unwrap();
        let (schema, input) = fixture(&dir);
        fs::write(&input, r#"{"params": {"id": "seventeen"}}"#).unwrap();

        let args = ValidateArgs {
            input,
            schema: schema.to_string_lossy().into_owned(),
            detailed: false,
            output_file: None,
        };
        let error = handle_validate(args, &Config::default(), &mut quiet_writer()).unwrap_err();

        assert_eq!(error.exit_code(), 2);
        match error {
            Error::Validation(inner) => assert_eq!(
                inner,
                ValidationError::type_mismatch("params.id", ParamType::Number)
            ),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_missing_schema() {
        let dir = TempDir::new().unwrap();
        let (_, input) = fixture(&dir);

        let args = ValidateArgs {
            input,
            schema: dir.path().join("nope.yaml").to_string_lossy().into_owned(),
            detailed: false,
            output_file: None,
        };
        let error = handle_validate(args, &Config::default(), &mut quiet_writer()).unwrap_err();
        assert!(matches!(error, Error::FileNotFound { .. }));
    }
}
