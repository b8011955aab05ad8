//! Classifier layer tests
//!
//! Language labels, exclusion and category precedence for single files.

mod test_categories;
