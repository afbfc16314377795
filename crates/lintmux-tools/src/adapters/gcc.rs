//! GCC adapter - syntax and warning check for C.

use crate::{Adapter, CommandTemplate};

pub fn adapter() -> Adapter {
    Adapter::new(
        "gcc",
        CommandTemplate::new(["gcc", "-fsyntax-only", "-Wall", "-fdiagnostics-plain-output", "%f"]),
        super::gcc_style(),
    )
    .with_website("https://gcc.gnu.org/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use crate::adapters::parse_sample;

    const SAMPLE: &str = "\
main.c: In function 'main':
main.c:3:9: warning: unused variable 'x' [-Wunused-variable]
main.c:4:5: error: expected ';' before 'return'
main.c:1:1: note: include '<stdio.h>' or provide a declaration of 'printf'
main.c:2:10: fatal error: missing.h: No such file or directory
compilation terminated.
";

    #[test]
    fn test_parse_plain_output() {
        let diags = parse_sample(&adapter(), SAMPLE);
        let severities: Vec<_> = diags.iter().map(|d| d.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::Warning, Severity::Error, Severity::Info, Severity::Error]
        );
        assert_eq!(diags[1].line, 4);
        assert_eq!(diags[1].column, Some(5));
        assert_eq!(
            diags[3].message,
            "fatal error: missing.h: No such file or directory"
        );
    }
}
