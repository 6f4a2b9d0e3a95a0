pub mod sac;
pub mod terms;
