pub mod u101_global_search;
pub mod u102_point_of_sale;
