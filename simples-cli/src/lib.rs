pub mod amount;
pub mod logging;
pub mod report;
pub mod settings;
