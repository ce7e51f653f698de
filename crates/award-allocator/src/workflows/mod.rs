pub mod allocation;
pub mod intake;
