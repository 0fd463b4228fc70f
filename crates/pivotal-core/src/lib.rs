// File: crates/pivotal-core/src/lib.rs
// Summary: Core library entry point; tables, pivoting, measures and the renderer-agnostic chart model.

pub mod error;
pub mod label;
pub mod table;
pub mod pivot;
pub mod aggregate;
pub mod limit;
pub mod sort;
pub mod prepare;
pub mod measures;
pub mod chart;
pub mod series;
pub mod layout;
pub mod axis;
pub mod grid;
pub mod types;
pub mod geometry;
pub mod scale;
pub mod view;
pub mod theme;

pub use error::{Error, Result};
pub use label::Label;
pub use table::{Cell, Table};
pub use pivot::Pivot;
pub use aggregate::{pivot_table, AggFunc};
pub use limit::Limit;
pub use sort::{Direction, SortBy, SortOn, SortSpec};
pub use prepare::{DataFactory, DataProperties, PreparedData};
pub use measures::{year_over_year, Measures, YoyOptions, YoyTable};
pub use chart::{BarOptions, Chart, ChartBuilder, ChartKind, Legend, LegendEntry, LineOptions};
pub use series::{BarRect, Series, SeriesType};
pub use layout::BarLayout;
pub use axis::{Axis, CategoryAxis};
pub use view::ViewState;
pub use theme::Theme;
pub use types::{Insets, Rgba};
