//! Go vet adapter - reports suspicious constructs in Go code.
//!
//! Vet prints no severity; findings are warnings.

use crate::{Adapter, CommandTemplate, Severity};

pub fn adapter() -> Adapter {
    Adapter::new(
        "go-vet",
        CommandTemplate::new(["go", "vet", "%f"]),
        super::file_line_column().message().severity(Severity::Warning),
    )
    .with_website("https://pkg.go.dev/cmd/vet")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::parse_sample;

    #[test]
    fn test_parse_output() {
        let diags = parse_sample(
            &adapter(),
            "# command-line-arguments\n\
             ./main.go:8:2: fmt.Printf format %d has arg s of wrong type string\n",
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].filename, "./main.go");
        assert_eq!(diags[0].line, 8);
        assert_eq!(diags[0].severity, Severity::Warning);
    }
}
