mod sms_import;

pub(crate) use sms_import::import_batch;

#[cfg(test)]
#[path = "sms_import_tests.rs"]
mod tests;
