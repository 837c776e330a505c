pub mod badge;
pub mod filter_panel;
pub mod form_field;
pub mod pagination_controls;
