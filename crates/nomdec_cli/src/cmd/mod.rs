/// Top-level value decode command.
pub mod decode;
/// Kind code table command.
pub mod kinds;
/// Package listing command.
pub mod package;

mod render;
mod util;
