//! ShellCheck adapter - shell script analysis.
//!
//! https://www.shellcheck.net/

use crate::{Adapter, CommandTemplate};

pub fn adapter() -> Adapter {
    Adapter::new(
        "shellcheck",
        CommandTemplate::new(["shellcheck", "--format=gcc", "%f"]),
        super::gcc_style(),
    )
    .with_website("https://www.shellcheck.net/")
}
