pub mod court;
pub mod fixture;
