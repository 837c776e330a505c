pub mod api_error;
pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod debounce;
pub mod deep_link;
pub mod form_errors;
pub mod http;
pub mod icons;
pub mod list_controller;
pub mod list_state;
pub mod modal;
pub mod page_frame;
pub mod resource;
pub mod select_options;
