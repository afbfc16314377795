//! Clippy adapter - Rust linter.
//!
//! Clippy is the official Rust linter that catches common mistakes and improves code.
//! https://doc.rust-lang.org/clippy/
//!
//! Clippy works on the whole cargo project, so the command has no `%f`.

use crate::{Adapter, CommandTemplate};

pub fn adapter() -> Adapter {
    Adapter::new(
        "clippy",
        CommandTemplate::new(["cargo", "clippy", "--quiet", "--message-format=short"]),
        super::file_line_column().message().severity_from_message(),
    )
    .with_website("https://doc.rust-lang.org/clippy/")
}
