pub mod match_status;
