pub mod a001_laboratory;
pub mod a002_product;
pub mod a003_batch;
pub mod a004_sale;
