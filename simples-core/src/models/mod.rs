mod activity;
mod annex;
mod bracket;
mod results;

pub use activity::{Activity, ServiceSubtype};
pub use annex::Annex;
pub use bracket::{AnnexTable, AnnexTables, Bracket, REVENUE_CEILING, TableError};
pub use results::{
    Assessment, CalculationRequest, Comparison, ComparisonEntry, RateResolution,
    RevenueDistribution,
};
