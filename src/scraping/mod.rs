pub mod detail_page;
pub mod extract_field_by_label;
pub mod fetch;
pub mod issue_number;
pub mod labels;
pub mod list_page;
pub mod normalize;
pub mod parse_date;
