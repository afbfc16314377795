//! Pyflakes adapter - passive Python checker.
//!
//! Pyflakes prints no severity, so everything it reports is a warning.
//! https://github.com/PyCQA/pyflakes

use crate::{Adapter, CommandTemplate, Severity};

pub fn adapter() -> Adapter {
    Adapter::new(
        "pyflakes",
        CommandTemplate::new(["pyflakes", "%f"]),
        super::file_line_column().message().severity(Severity::Warning),
    )
    .with_website("https://github.com/PyCQA/pyflakes")
}
