// File: crates/pivotal-core/src/chart.rs
// Summary: Chart model built from a table: prepared data, axes, series, legend, title and theme.

use serde::Deserialize;
use tracing::debug;

use crate::axis::{Axis, CategoryAxis};
use crate::error::{Error, Result};
use crate::layout::{clustered_bars, line_points, stacked_bars, standard_bars, BarLayout};
use crate::measures::Measures;
use crate::prepare::{DataFactory, DataProperties, PreparedData};
use crate::series::{Series, SeriesType};
use crate::table::Table;
use crate::theme::Theme;
use crate::types::Rgba;
use crate::view::ViewState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
    /// Bar chart with the layout actually used.
    Bar(BarLayout),
    Line { area: bool },
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BarOptions {
    pub layout: BarLayout,
    /// Slot fraction taken by a bar, or by a whole cluster.
    pub width: f64,
    /// Gap between clustered bars (slot units) or stacked segments (fraction of the largest stack).
    pub space: f64,
    /// Horizontal bars: categories on the vertical axis.
    pub switch_axis: bool,
    pub title: Option<String>,
}

impl Default for BarOptions {
    fn default() -> Self {
        Self { layout: BarLayout::Stacked, width: 0.8, space: 0.0, switch_axis: false, title: None }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LineOptions {
    /// Fill down to 0 under each line.
    pub area: bool,
    /// Plot cumulative sums down the categories.
    pub running_total: bool,
    pub title: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgba,
    pub series_type: SeriesType,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Legend {
    pub title: String,
    pub entries: Vec<LegendEntry>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub data: PreparedData,
    pub series: Vec<Series>,
    pub category_axis: CategoryAxis,
    pub value_axis: Axis,
    /// Present only when the data has a legend field.
    pub legend: Option<Legend>,
    pub title: Option<String>,
    pub theme: Theme,
    horizontal: bool,
}

impl Chart {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Switch theme and recolor series and legend from its palette.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        for (i, s) in self.series.iter_mut().enumerate() {
            s.color = theme.series_color(i);
        }
        if let Some(legend) = &mut self.legend {
            for (i, e) in legend.entries.iter_mut().enumerate() {
                e.color = theme.series_color(i);
            }
        }
        self.theme = theme;
        self
    }

    /// Categories run along the vertical axis.
    pub fn horizontal(&self) -> bool { self.horizontal }

    pub fn view(&self) -> ViewState {
        ViewState {
            cat_min: -0.5,
            cat_max: self.category_axis.len().max(1) as f64 - 0.5,
            val_min: self.value_axis.min,
            val_max: self.value_axis.max,
        }
    }

    /// Derived measures (year over year) over this chart's data.
    pub fn measures(&self) -> Measures<'_> { Measures::new(&self.data) }
}

/// Builds bar and line charts from a table.
pub struct ChartBuilder<'a> {
    table: &'a Table,
    theme: Theme,
}

impl<'a> ChartBuilder<'a> {
    pub fn new(table: &'a Table) -> Self { Self { table, theme: Theme::default() } }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn bar(&self, properties: &DataProperties, options: &BarOptions) -> Result<Chart> {
        let data = DataFactory::new(self.table).build(properties)?;
        let pivot = &data.pivot;

        let layout = if pivot.num_columns() <= 1 { BarLayout::Standard } else { options.layout };
        let columns = match layout {
            BarLayout::Standard => {
                if pivot.num_columns() > 1 {
                    return Err(Error::Layout(format!(
                        "standard layout needs a single series, got {}",
                        pivot.num_columns()
                    )));
                }
                (0..pivot.num_columns())
                    .map(|c| standard_bars(pivot, c, options.width))
                    .collect::<Result<Vec<_>>>()?
            }
            BarLayout::Stacked => stacked_bars(pivot, options.width, options.space)?,
            BarLayout::Clustered => clustered_bars(pivot, options.width, options.space)?,
        };

        let series: Vec<Series> = columns
            .into_iter()
            .enumerate()
            .map(|(i, bars)| Series::bars(pivot.columns[i].to_string(), self.theme.series_color(i), bars))
            .collect();

        debug!(%layout, series = series.len(), horizontal = options.switch_axis, "bar chart built");
        Ok(self.assemble(
            ChartKind::Bar(layout),
            data,
            series,
            true,
            options.switch_axis,
            options.title.clone(),
        ))
    }

    pub fn line(&self, properties: &DataProperties, options: &LineOptions) -> Result<Chart> {
        let mut data = DataFactory::new(self.table).build(properties)?;
        if options.running_total {
            data = data.into_running_total();
        }
        let pivot = &data.pivot;

        let series: Vec<Series> = (0..pivot.num_columns())
            .map(|c| {
                let name = pivot.columns[c].to_string();
                let color = self.theme.series_color(c);
                let points = line_points(pivot, c);
                if options.area {
                    Series::area(name, color, points)
                } else {
                    Series::line(name, color, points)
                }
            })
            .collect();

        debug!(series = series.len(), area = options.area, running_total = options.running_total, "line chart built");
        Ok(self.assemble(
            ChartKind::Line { area: options.area },
            data,
            series,
            options.area,
            false,
            options.title.clone(),
        ))
    }

    fn assemble(
        &self,
        kind: ChartKind,
        data: PreparedData,
        series: Vec<Series>,
        include_zero: bool,
        horizontal: bool,
        title: Option<String>,
    ) -> Chart {
        let props = &data.properties;
        let category_axis =
            CategoryAxis::new(props.x_axis.clone(), data.pivot.index.iter().map(|l| l.to_string()));
        let view = ViewState::from_series(data.pivot.num_rows(), &series, include_zero);
        let value_axis = Axis::new(props.y_axis.clone(), view.val_min, view.val_max);

        let legend = props.legend.as_ref().map(|field| Legend {
            title: field.clone(),
            entries: series
                .iter()
                .map(|s| LegendEntry { label: s.name.clone(), color: s.color, series_type: s.series_type })
                .collect(),
        });

        Chart {
            kind,
            data,
            series,
            category_axis,
            value_axis,
            legend,
            title,
            theme: self.theme,
            horizontal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;
    use pretty_assertions::assert_eq;

    fn table() -> Table {
        let rows = [("a", "x", 1.0), ("a", "y", 2.0), ("b", "x", 4.0), ("b", "y", -1.0)];
        Table::from_rows(
            ["cat", "grp", "v"],
            rows.into_iter().map(|(c, g, v)| [Cell::from(c), Cell::from(g), Cell::from(v)]),
        )
        .unwrap()
    }

    #[test]
    fn single_series_falls_back_to_standard() {
        let props = DataProperties::new("cat", "v");
        let opts = BarOptions { layout: BarLayout::Clustered, ..Default::default() };
        let chart = ChartBuilder::new(&table()).bar(&props, &opts).unwrap();
        assert_eq!(chart.kind, ChartKind::Bar(BarLayout::Standard));
        assert_eq!(chart.series.len(), 1);
        assert!(chart.legend.is_none());
        assert_eq!(chart.value_axis.min, 0.0);
    }

    #[test]
    fn standard_with_groups_is_an_error() {
        let props = DataProperties::new("cat", "v").with_legend("grp");
        let opts = BarOptions { layout: BarLayout::Standard, ..Default::default() };
        let err = ChartBuilder::new(&table()).bar(&props, &opts).unwrap_err();
        assert!(matches!(err, Error::Layout(_)));
    }

    #[test]
    fn stacked_chart_has_legend_and_axes() {
        let props = DataProperties::new("cat", "v").with_legend("grp");
        let chart = ChartBuilder::new(&table())
            .with_theme(Theme::dark())
            .bar(&props, &BarOptions::default())
            .unwrap()
            .with_title("Sales");
        let legend = chart.legend.as_ref().unwrap();
        assert_eq!(legend.title, "grp");
        let labels: Vec<&str> = legend.entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["x", "y"]);
        let ticks: Vec<&str> = chart.category_axis.ticks.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(ticks, ["a", "b"]);
        assert_eq!(chart.title.as_deref(), Some("Sales"));
        assert_eq!(chart.series[0].color, Theme::dark().series_color(0));
        // b stacks 4 then -1: top of the stack is 4, bottom is 0
        assert!(chart.value_axis.max >= 4.0);
    }

    #[test]
    fn recolors_on_theme_change() {
        let props = DataProperties::new("cat", "v").with_legend("grp");
        let chart = ChartBuilder::new(&table()).bar(&props, &BarOptions::default()).unwrap();
        let chart = chart.with_theme(Theme::solarized_dark());
        let legend = chart.legend.as_ref().unwrap();
        assert_eq!(legend.entries[1].color, Theme::solarized_dark().series_color(1));
        assert_eq!(chart.series[1].color, legend.entries[1].color);
    }

    #[test]
    fn running_total_line() {
        let props = DataProperties::new("cat", "v");
        let opts = LineOptions { running_total: true, ..Default::default() };
        let chart = ChartBuilder::new(&table()).line(&props, &opts).unwrap();
        assert_eq!(chart.series[0].points, vec![(0.0, 3.0), (1.0, 6.0)]);
        assert_eq!(chart.kind, ChartKind::Line { area: false });
        assert!(chart.value_axis.min > 0.0);
    }

    #[test]
    fn horizontal_flag_is_kept() {
        let props = DataProperties::new("cat", "v");
        let opts = BarOptions { switch_axis: true, ..Default::default() };
        let chart = ChartBuilder::new(&table()).bar(&props, &opts).unwrap();
        assert!(chart.horizontal());
        assert_eq!(chart.view().cat_max, 1.5);
    }
}
