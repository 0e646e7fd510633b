pub mod generate;
pub mod load;
pub mod report;
