//! Path resolution command handler

use super::utils::load_document;
use crate::cli::{OutputFormat, ResolveArgs};
use crate::error::Result;
use crate::output::OutputWriter;
use paramcheck_core::{ParamPath, PathSegment};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

/// Machine-readable result of a path lookup
#[derive(Debug, Serialize)]
struct Resolution<'a> {
    path: &'a str,
    segments: Vec<String>,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a Value>,
}

/// Handle the resolve command
#[instrument(skip(output), fields(input = %args.input.display(), path = %args.path))]
pub fn handle_resolve(args: ResolveArgs, output: &mut OutputWriter) -> Result<()> {
    let document = load_document(&args.input)?;
    let path = ParamPath::parse(&args.path);
    debug!(segments = path.segments().len(), "Parsed parameter path");

    let value = path.resolve(&document);
    let resolution = Resolution {
        path: path.as_str(),
        segments: path.segments().iter().map(describe_segment).collect(),
        found: value.is_some(),
        value,
    };

    if output.format() != OutputFormat::Human {
        return output.data(&resolution);
    }

    output.info(&format!("Segments: {}", resolution.segments.join(" → ")))?;
    match value {
        Some(value) => {
            output.success(&format!("✓ `{}` resolves to:", args.path))?;
            output.data(value)
        }
        None => output.warning(&format!("`{}` is not present in {}", args.path, args.input.display())),
    }
}

fn describe_segment(segment: &PathSegment) -> String {
    match segment {
        PathSegment::Key(key) => format!("{:?}", key),
        PathSegment::Index(index) => format!("[{}]", index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_describe_segments() {
        let path = ParamPath::parse("a.b[1].c");
        let described: Vec<String> = path.segments().iter().map(describe_segment).collect();
        assert_eq!(described, vec!["\"a\"", "\"b\"", "[1]", "\"c\""]);
    }

    #[test]
    fn test_resolution_serialization() {
        let document = json!({"a": {"b": [{"c": 1}, {"c": 2}]}});
        let path = ParamPath::parse("a.b[1].c");
        let value = path.resolve(&document);
        let resolution = Resolution {
            path: path.as_str(),
            segments: path.segments().iter().map(describe_segment).collect(),
            found: value.is_some(),
            value,
        };
        let serialized = serde_json::to_value(&resolution).unwrap();
        assert_eq!(serialized["found"], json!(true));
        assert_eq!(serialized["value"], json!(2));

        let missing = Resolution {
            path: "x.y",
            segments: vec![],
            found: false,
            value: None,
        };
        let serialized = serde_json::to_value(&missing).unwrap();
        assert!(serialized.get("value").is_none());
    }

    #[test]
    fn test_handle_resolve_missing_input() {
        let mut output = OutputWriter::with_writer(
            OutputFormat::Json,
            false,
            true,
            Box::new(std::io::sink()),
        );
        let args = ResolveArgs {
            input: "/definitely/not/here.json".into(),
            path: "a".to_string(),
        };
        assert!(handle_resolve(args, &mut output).is_err());
    }
}
