//! Settings store tests

mod test_groups;
