mod filter_view;
pub mod utils;
