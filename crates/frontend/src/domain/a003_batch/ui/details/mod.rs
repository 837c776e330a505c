mod product_picker;
pub mod view;
pub mod view_model;

pub use view::BatchDetails;
