//! Flake8 adapter - Python style guide enforcement.
//!
//! https://flake8.pycqa.org/

use crate::{Adapter, CommandTemplate};

pub fn adapter() -> Adapter {
    Adapter::new(
        "flake8",
        CommandTemplate::new(["flake8", "%f"]),
        super::file_line_column()
            .severity_pattern(super::ruff::rule_code_severity())
            .message(),
    )
    .with_website("https://flake8.pycqa.org/")
}
