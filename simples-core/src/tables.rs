//! Built-in Simples Nacional bracket tables (2025 schedule).
//!
//! Every table has six brackets sharing the same revenue ranges; only the
//! nominal rates and deductions differ between annexes.
//!
//! | Bracket | Accumulated revenue (RBT12)       |
//! |---------|-----------------------------------|
//! | 1       | 0.00 to 180,000.00                |
//! | 2       | 180,000.01 to 360,000.00          |
//! | 3       | 360,000.01 to 720,000.00          |
//! | 4       | 720,000.01 to 1,800,000.00        |
//! | 5       | 1,800,000.01 to 3,600,000.00      |
//! | 6       | 3,600,000.01 to 4,800,000.00      |

use rust_decimal_macros::dec;

use crate::models::{Annex, AnnexTable, AnnexTables, Bracket};

/// Commerce.
pub static ANNEX_I: [Bracket; 6] = [
    Bracket::new(dec!(0), dec!(180000), dec!(4.00), dec!(0)),
    Bracket::new(dec!(180000.01), dec!(360000), dec!(7.30), dec!(5940)),
    Bracket::new(dec!(360000.01), dec!(720000), dec!(9.50), dec!(13860)),
    Bracket::new(dec!(720000.01), dec!(1800000), dec!(10.70), dec!(22500)),
    Bracket::new(dec!(1800000.01), dec!(3600000), dec!(14.30), dec!(87300)),
    Bracket::new(dec!(3600000.01), dec!(4800000), dec!(19.00), dec!(378000)),
];

/// Industry.
pub static ANNEX_II: [Bracket; 6] = [
    Bracket::new(dec!(0), dec!(180000), dec!(4.50), dec!(0)),
    Bracket::new(dec!(180000.01), dec!(360000), dec!(7.80), dec!(5940)),
    Bracket::new(dec!(360000.01), dec!(720000), dec!(10.00), dec!(13860)),
    Bracket::new(dec!(720000.01), dec!(1800000), dec!(11.20), dec!(22500)),
    Bracket::new(dec!(1800000.01), dec!(3600000), dec!(14.70), dec!(87300)),
    Bracket::new(dec!(3600000.01), dec!(4800000), dec!(30.00), dec!(720000)),
];

/// Services with Factor R at or above the threshold.
pub static ANNEX_III: [Bracket; 6] = [
    Bracket::new(dec!(0), dec!(180000), dec!(6.00), dec!(0)),
    Bracket::new(dec!(180000.01), dec!(360000), dec!(11.20), dec!(9360)),
    Bracket::new(dec!(360000.01), dec!(720000), dec!(13.20), dec!(17640)),
    Bracket::new(dec!(720000.01), dec!(1800000), dec!(16.00), dec!(35640)),
    Bracket::new(dec!(1800000.01), dec!(3600000), dec!(21.00), dec!(125640)),
    Bracket::new(dec!(3600000.01), dec!(4800000), dec!(33.00), dec!(648000)),
];

/// Specialized services.
pub static ANNEX_IV: [Bracket; 6] = [
    Bracket::new(dec!(0), dec!(180000), dec!(4.50), dec!(0)),
    Bracket::new(dec!(180000.01), dec!(360000), dec!(9.00), dec!(8100)),
    Bracket::new(dec!(360000.01), dec!(720000), dec!(10.20), dec!(12420)),
    Bracket::new(dec!(720000.01), dec!(1800000), dec!(11.40), dec!(21600)),
    Bracket::new(dec!(1800000.01), dec!(3600000), dec!(14.70), dec!(85500)),
    Bracket::new(dec!(3600000.01), dec!(4800000), dec!(18.00), dec!(720000)),
];

/// Other services, and services with Factor R below the threshold.
pub static ANNEX_V: [Bracket; 6] = [
    Bracket::new(dec!(0), dec!(180000), dec!(15.50), dec!(0)),
    Bracket::new(dec!(180000.01), dec!(360000), dec!(18.00), dec!(4500)),
    Bracket::new(dec!(360000.01), dec!(720000), dec!(19.50), dec!(9900)),
    Bracket::new(dec!(720000.01), dec!(1800000), dec!(20.50), dec!(17100)),
    Bracket::new(dec!(1800000.01), dec!(3600000), dec!(23.00), dec!(62100)),
    Bracket::new(dec!(3600000.01), dec!(4800000), dec!(30.50), dec!(540000)),
];

/// The built-in table set.
pub fn simples_2025() -> AnnexTables {
    AnnexTables::from_trusted([
        AnnexTable::from_static(Annex::I, &ANNEX_I),
        AnnexTable::from_static(Annex::II, &ANNEX_II),
        AnnexTable::from_static(Annex::III, &ANNEX_III),
        AnnexTable::from_static(Annex::IV, &ANNEX_IV),
        AnnexTable::from_static(Annex::V, &ANNEX_V),
    ])
}
