//! Placeholder lookup tests

mod test_placeholders;
