pub mod u101_global_search;
