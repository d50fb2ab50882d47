pub mod issues;
pub mod match_dtos;
