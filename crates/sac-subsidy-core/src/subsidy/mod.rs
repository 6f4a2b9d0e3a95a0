pub mod calculator;
pub mod policy;
