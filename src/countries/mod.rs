mod aggregate;
mod display;
mod parse;

pub use aggregate::{Aggregation, CountryView, RegionSet, RegionView, aggregate};
pub use display::{CountryField, DisplayType, RegionField};
pub use parse::{RawCountry, load_countries};
