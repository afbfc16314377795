//! Clang adapter - C and C++ front-end diagnostics.

use crate::{Adapter, CommandTemplate};

pub fn adapter() -> Adapter {
    Adapter::new(
        "clang",
        CommandTemplate::new([
            "clang",
            "-fsyntax-only",
            "-Wall",
            "-fno-color-diagnostics",
            "-fno-caret-diagnostics",
            "%f",
        ]),
        super::gcc_style(),
    )
    .with_website("https://clang.llvm.org/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use crate::adapters::parse_sample;

    #[test]
    fn test_parse_output() {
        let diags = parse_sample(
            &adapter(),
            "a.cpp:6:10: error: no member named 'foo' in 'S'\n\
             a.cpp:2:8: note: 'S' declared here\n\
             a.cpp:1:10: fatal error: 'missing.h' file not found\n\
             2 errors generated.\n",
        );
        assert_eq!(diags.len(), 3);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[1].severity, Severity::Info);
        assert_eq!(diags[2].severity, Severity::Error);
        assert_eq!(diags[2].message, "fatal error: 'missing.h' file not found");
    }
}
