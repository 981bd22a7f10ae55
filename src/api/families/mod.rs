//! Per-family visualize vocabularies.
//!
//! Each family owns the keys it adds to `metadata.visualize` and, for families
//! that bind data columns, the `metadata.axes` object. Families are closed: a
//! chart is always exactly one [`ChartFamily`] variant.

use serde_json::{Map, Value};

use crate::core::{GridLabelAlign, GridLabelPosition, WireObject};
use crate::error::ChartResult;

use super::registry::ChartType;
use super::sections::Transform;

/// Fills in the variant projections of [`FamilyModel`].
macro_rules! family_projection {
    ($variant:ident) => {
        fn project(family: &super::ChartFamily) -> Option<&Self> {
            match family {
                super::ChartFamily::$variant(model) => Some(model),
                _ => None,
            }
        }

        fn project_mut(family: &mut super::ChartFamily) -> Option<&mut Self> {
            match family {
                super::ChartFamily::$variant(model) => Some(model),
                _ => None,
            }
        }
    };
}

pub mod area;
pub mod arrow;
pub mod bar;
pub mod choropleth;
pub mod column;
pub mod line;
pub mod multiple_column;
pub mod scatter;
pub mod stacked_bar;

pub use area::AreaChart;
pub use arrow::ArrowChart;
pub use bar::{BarChart, BarOverlay};
pub use choropleth::{ChoroplethMap, MapTooltip};
pub use column::ColumnChart;
pub use line::{AreaFill, Line, LineChart, LineSymbol, LineValueLabels};
pub use multiple_column::{MultipleColumnChart, Panel, PanelSort};
pub use scatter::{ScatterAxis, ScatterPlot, ScatterTooltip, SizeLegend};
pub use stacked_bar::StackedBarChart;

/// Raw objects a family reads from an API response.
#[derive(Debug, Clone, Copy)]
pub struct FamilyWire<'a> {
    pub visualize: WireObject<'a>,
    pub axes: WireObject<'a>,
}

/// Behavior every chart family provides to the shared serializer.
pub trait FamilyModel: Sized + Clone + Default + Into<ChartFamily> {
    const CHART_TYPE: ChartType;

    /// Adds family keys on top of the base visualize object.
    fn write_visualize(&self, visualize: &mut Map<String, Value>);

    /// Column bindings for `metadata.axes`; `None` leaves the key out.
    fn axes(&self) -> Option<Map<String, Value>> {
        None
    }

    fn read_wire(wire: FamilyWire<'_>) -> ChartResult<Self>;

    fn validate(&self) -> ChartResult<()> {
        Ok(())
    }

    /// Pushes family settings that live in `metadata.data`.
    fn write_transform(&self, _transform: &mut Transform) {}

    /// Takes back what [`FamilyModel::write_transform`] pushed.
    fn adopt_transform(&mut self, _transform: &mut Transform) {}

    fn project(family: &ChartFamily) -> Option<&Self>;

    fn project_mut(family: &mut ChartFamily) -> Option<&mut Self>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartFamily {
    Line(LineChart),
    Bar(BarChart),
    Column(ColumnChart),
    Area(AreaChart),
    Arrow(ArrowChart),
    MultipleColumn(MultipleColumnChart),
    Scatter(ScatterPlot),
    StackedBar(StackedBarChart),
    Choropleth(ChoroplethMap),
}

macro_rules! with_family {
    ($family:expr, $model:ident => $body:expr) => {
        match $family {
            ChartFamily::Line($model) => $body,
            ChartFamily::Bar($model) => $body,
            ChartFamily::Column($model) => $body,
            ChartFamily::Area($model) => $body,
            ChartFamily::Arrow($model) => $body,
            ChartFamily::MultipleColumn($model) => $body,
            ChartFamily::Scatter($model) => $body,
            ChartFamily::StackedBar($model) => $body,
            ChartFamily::Choropleth($model) => $body,
        }
    };
}

impl ChartFamily {
    /// Family with every field at its default.
    #[must_use]
    pub fn default_for(chart_type: ChartType) -> Self {
        match chart_type {
            ChartType::Line => Self::Line(LineChart::default()),
            ChartType::Bar => Self::Bar(BarChart::default()),
            ChartType::Column => Self::Column(ColumnChart::default()),
            ChartType::Area => Self::Area(AreaChart::default()),
            ChartType::Arrow => Self::Arrow(ArrowChart::default()),
            ChartType::MultipleColumn => Self::MultipleColumn(MultipleColumnChart::default()),
            ChartType::Scatter => Self::Scatter(ScatterPlot::default()),
            ChartType::StackedBar => Self::StackedBar(StackedBarChart::default()),
            ChartType::Choropleth => Self::Choropleth(ChoroplethMap::default()),
        }
    }

    pub fn read_wire(chart_type: ChartType, wire: FamilyWire<'_>) -> ChartResult<Self> {
        Ok(match chart_type {
            ChartType::Line => Self::Line(LineChart::read_wire(wire)?),
            ChartType::Bar => Self::Bar(BarChart::read_wire(wire)?),
            ChartType::Column => Self::Column(ColumnChart::read_wire(wire)?),
            ChartType::Area => Self::Area(AreaChart::read_wire(wire)?),
            ChartType::Arrow => Self::Arrow(ArrowChart::read_wire(wire)?),
            ChartType::MultipleColumn => {
                Self::MultipleColumn(MultipleColumnChart::read_wire(wire)?)
            }
            ChartType::Scatter => Self::Scatter(ScatterPlot::read_wire(wire)?),
            ChartType::StackedBar => Self::StackedBar(StackedBarChart::read_wire(wire)?),
            ChartType::Choropleth => Self::Choropleth(ChoroplethMap::read_wire(wire)?),
        })
    }

    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        with_family!(self, model => model_chart_type(model))
    }

    pub fn write_visualize(&self, visualize: &mut Map<String, Value>) {
        with_family!(self, model => model.write_visualize(visualize));
    }

    #[must_use]
    pub fn axes(&self) -> Option<Map<String, Value>> {
        with_family!(self, model => model.axes())
    }

    pub fn validate(&self) -> ChartResult<()> {
        with_family!(self, model => model.validate())
    }

    pub fn write_transform(&self, transform: &mut Transform) {
        with_family!(self, model => model.write_transform(transform));
    }

    pub fn adopt_transform(&mut self, transform: &mut Transform) {
        with_family!(self, model => model.adopt_transform(transform));
    }
}

fn model_chart_type<F: FamilyModel>(_model: &F) -> ChartType {
    F::CHART_TYPE
}

macro_rules! family_from {
    ($($variant:ident($model:ty)),+ $(,)?) => {
        $(
            impl From<$model> for ChartFamily {
                fn from(model: $model) -> Self {
                    Self::$variant(model)
                }
            }
        )+
    };
}

family_from!(
    Line(LineChart),
    Bar(BarChart),
    Column(ColumnChart),
    Area(AreaChart),
    Arrow(ArrowChart),
    MultipleColumn(MultipleColumnChart),
    Scatter(ScatterPlot),
    StackedBar(StackedBarChart),
    Choropleth(ChoroplethMap),
);

/// `yAxisLabels: {enabled, alignment, placement}` with an `"off"` placement
/// folded into `enabled`.
pub(crate) fn write_y_axis_labels(
    visualize: &mut Map<String, Value>,
    position: &GridLabelPosition,
    align: &GridLabelAlign,
) {
    let enabled = *position != GridLabelPosition::Off;
    visualize.insert(
        "yAxisLabels".to_owned(),
        serde_json::json!({
            "enabled": enabled,
            "alignment": align.as_str(),
            "placement": if enabled { position.as_str() } else { "" },
        }),
    );
}

/// Returns `false` when the response has no `yAxisLabels` object.
pub(crate) fn read_y_axis_labels(
    visualize: WireObject<'_>,
    position: &mut GridLabelPosition,
    align: &mut GridLabelAlign,
) -> ChartResult<bool> {
    let labels = visualize.object("yAxisLabels");
    if !labels.is_object() {
        return Ok(false);
    }
    *position = if labels.read_or("enabled", true)? {
        match labels.read::<String>("placement")? {
            Some(placement) if !placement.is_empty() => GridLabelPosition::from(placement),
            _ => GridLabelPosition::Outside,
        }
    } else {
        GridLabelPosition::Off
    };
    labels.copy("alignment", align)?;
    Ok(true)
}

/// Non-empty column name under `key`.
pub(crate) fn read_column(object: WireObject<'_>, key: &str) -> ChartResult<Option<String>> {
    Ok(object
        .read::<String>(key)?
        .filter(|column| !column.is_empty()))
}

/// Inserts a column binding when set.
pub(crate) fn put_column(axes: &mut Map<String, Value>, key: &str, column: Option<&String>) {
    if let Some(column) = column.filter(|column| !column.is_empty()) {
        axes.insert(key.to_owned(), Value::String(column.clone()));
    }
}
