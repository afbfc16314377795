//! Mypy adapter - Python static type checker.
//!
//! Mypy is a static type checker for Python.
//! https://mypy-lang.org/

use crate::{Adapter, CommandTemplate};

pub fn adapter() -> Adapter {
    Adapter::new(
        "mypy",
        CommandTemplate::new([
            "mypy",
            "--no-color-output",
            "--no-error-summary",
            "--show-column-numbers",
            "%f",
        ]),
        super::file_line_column().message().severity_from_message(),
    )
    .with_website("https://mypy-lang.org/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use crate::adapters::parse_sample;

    const SAMPLE: &str = r#"t.py: error: Duplicate module named "t" (also at "./t.py")
t.py:3:5: error: Incompatible types in assignment (expression has type "str", variable has type "int")  [assignment]
t.py:8:7: error: Name "undefined" is not defined  [name-defined]
t.py:10:13: note: Revealed type is "builtins.int"
"#;

    #[test]
    fn test_parse_output() {
        let diags = parse_sample(&adapter(), SAMPLE);
        // File-level errors carry no line number.
        assert_eq!(diags.len(), 3);

        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].column, Some(5));
        assert!(diags[0].message.starts_with("error: Incompatible types"));
        assert!(diags[0].message.ends_with("[assignment]"));

        assert_eq!((diags[1].line, diags[1].column), (8, Some(7)));
        assert_eq!(diags[2].severity, Severity::Info);
    }
}
