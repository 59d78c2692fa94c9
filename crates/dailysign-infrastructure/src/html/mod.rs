mod form_extractor;

pub use form_extractor::extract_check_in_form;
