pub(crate) mod commands;
pub(crate) mod prompt;
pub(crate) mod render;
pub(crate) mod util;

#[cfg(test)]
#[path = "util_tests.rs"]
mod util_tests;
