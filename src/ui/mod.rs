mod render;
mod util;

pub(crate) use render::{render_list, render_record, render_summary};
pub(crate) use util::truncate;

#[cfg(test)]
#[path = "util_tests.rs"]
mod tests;
