//! `d3-scatter-plot`: points placed on two numeric axes.

use serde_json::{Map, Value, json};

use crate::core::transcoders::{range_pair, tick_list};
use crate::core::wire::{WireObject, put};
use crate::core::{
    AnnotationsGroup, ColorCategory, PlotHeight, RangePair, RegressionMethod, Scalar,
    ScatterAxisPosition, ScatterGridLines, ScatterShape, ScatterShapeMode, ScatterSize,
    SizeLegendLabelPosition, SizeLegendPosition, SizeLegendTitlePosition,
    SizeLegendValuesSetting, WireValue, number_value,
};
use crate::error::ChartResult;

use super::super::registry::ChartType;
use super::super::validation::{validate_in_range, validate_non_negative};
use super::{FamilyModel, FamilyWire, put_column, read_column};

/// One plot axis: its column binding plus the `{x|y}-*` visualize keys.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterAxis {
    pub column: Option<String>,
    pub range: RangePair,
    pub ticks: Vec<Scalar>,
    pub log: bool,
    pub format: String,
    pub position: ScatterAxisPosition,
    pub grid_lines: ScatterGridLines,
}

impl Default for ScatterAxis {
    fn default() -> Self {
        Self {
            column: None,
            range: range_pair::auto(),
            ticks: Vec::new(),
            log: false,
            format: String::new(),
            position: ScatterAxisPosition::Bottom,
            grid_lines: ScatterGridLines::On,
        }
    }
}

impl ScatterAxis {
    #[must_use]
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: Some(column.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn logarithmic(mut self) -> Self {
        self.log = true;
        self
    }

    #[must_use]
    pub fn with_range(mut self, min: impl Into<Scalar>, max: impl Into<Scalar>) -> Self {
        self.range = [min.into(), max.into()];
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    fn write_wire(&self, prefix: &str, visualize: &mut Map<String, Value>) {
        visualize.insert(
            format!("{prefix}-axis"),
            json!({
                "log": self.log,
                "range": range_pair::serialize(&self.range),
                "ticks": self.ticks.to_wire(),
            }),
        );
        put(visualize, &format!("{prefix}-format"), &self.format);
        put(visualize, &format!("{prefix}-pos"), &self.position);
        put(visualize, &format!("{prefix}-grid-lines"), &self.grid_lines);
    }

    /// A non-object axis block resets log, range and ticks to their defaults.
    fn read_wire(
        prefix: &str,
        column: Option<String>,
        visualize: WireObject<'_>,
    ) -> ChartResult<Self> {
        let mut axis = Self {
            column,
            ..Self::default()
        };
        let block = visualize.object(&format!("{prefix}-axis"));
        axis.log = block.read_or("log", false)?;
        axis.range = range_pair::deserialize(block.get("range"))?;
        axis.ticks = tick_list::deserialize(block.get("ticks"))?;
        visualize.copy(&format!("{prefix}-format"), &mut axis.format)?;
        visualize.copy(&format!("{prefix}-pos"), &mut axis.position)?;
        visualize.copy(&format!("{prefix}-grid-lines"), &mut axis.grid_lines)?;
        Ok(axis)
    }
}

/// Size legend shown for dynamically sized points.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeLegend {
    pub show: bool,
    pub position: SizeLegendPosition,
    /// Offsets in percent of the plot area.
    pub offset_x: i64,
    pub offset_y: i64,
    pub values_setting: SizeLegendValuesSetting,
    pub values: Vec<f64>,
    pub label_position: SizeLegendLabelPosition,
    pub label_format: String,
    pub title_enabled: bool,
    pub title: String,
    pub title_position: SizeLegendTitlePosition,
    pub title_width: f64,
}

impl Default for SizeLegend {
    fn default() -> Self {
        Self {
            show: false,
            position: SizeLegendPosition::Above,
            offset_x: 0,
            offset_y: 0,
            values_setting: SizeLegendValuesSetting::Auto,
            values: Vec::new(),
            label_position: SizeLegendLabelPosition::Below,
            label_format: String::new(),
            title_enabled: false,
            title: String::new(),
            title_position: SizeLegendTitlePosition::Left,
            title_width: 200.0,
        }
    }
}

impl SizeLegend {
    fn write_wire(&self, visualize: &mut Map<String, Value>) {
        put(visualize, "show-size-legend", &self.show);
        put(visualize, "size-legend-position", &self.position);
        put(visualize, "legend-offset-x", &self.offset_x);
        put(visualize, "legend-offset-y", &self.offset_y);
        put(visualize, "size-legend-values-setting", &self.values_setting);
        visualize.insert(
            "size-legend-values".to_owned(),
            Value::Array(self.values.iter().copied().map(number_value).collect()),
        );
        put(visualize, "size-legend-label-position", &self.label_position);
        put(visualize, "size-legend-label-format", &self.label_format);
        put(visualize, "size-legend-title-enabled", &self.title_enabled);
        put(visualize, "size-legend-title", &self.title);
        put(visualize, "size-legend-title-position", &self.title_position);
        visualize.insert(
            "size-legend-title-width".to_owned(),
            number_value(self.title_width),
        );
    }

    fn read_wire(&mut self, visualize: WireObject<'_>) -> ChartResult<()> {
        visualize.copy("show-size-legend", &mut self.show)?;
        visualize.copy("size-legend-position", &mut self.position)?;
        visualize.copy("legend-offset-x", &mut self.offset_x)?;
        visualize.copy("legend-offset-y", &mut self.offset_y)?;
        visualize.copy("size-legend-values-setting", &mut self.values_setting)?;
        visualize.copy("size-legend-values", &mut self.values)?;
        visualize.copy("size-legend-label-position", &mut self.label_position)?;
        visualize.copy("size-legend-label-format", &mut self.label_format)?;
        visualize.copy("size-legend-title-enabled", &mut self.title_enabled)?;
        visualize.copy("size-legend-title", &mut self.title)?;
        visualize.copy("size-legend-title-position", &mut self.title_position)?;
        visualize.copy("size-legend-title-width", &mut self.title_width)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScatterTooltip {
    pub enabled: bool,
    pub title: String,
    pub body: String,
    pub sticky: bool,
}

impl Default for ScatterTooltip {
    fn default() -> Self {
        Self {
            enabled: true,
            title: String::new(),
            body: String::new(),
            sticky: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPlot {
    pub x: ScatterAxis,
    pub y: ScatterAxis,
    pub base_color: Scalar,
    pub opacity: f64,
    pub outlines: bool,
    pub color_outline: String,
    pub show_color_key: bool,
    pub color_column: Option<String>,
    pub color_category: ColorCategory,
    pub size: ScatterSize,
    pub fixed_size: f64,
    pub size_column: Option<String>,
    pub max_size: f64,
    pub responsive_symbol_size: bool,
    pub size_legend: SizeLegend,
    pub shape: ScatterShapeMode,
    pub fixed_shape: ScatterShape,
    pub shape_column: Option<String>,
    pub regression: bool,
    pub regression_method: RegressionMethod,
    pub plot_height: PlotHeight,
    pub annotations: AnnotationsGroup,
    /// Raw custom-line definitions, one per line.
    pub custom_lines: String,
    pub label_column: Option<String>,
    pub auto_labels: bool,
    pub add_labels: Vec<Scalar>,
    pub highlight_labeled: bool,
    pub tooltip: ScatterTooltip,
}

impl Default for ScatterPlot {
    fn default() -> Self {
        Self {
            x: ScatterAxis::default(),
            y: ScatterAxis::default(),
            base_color: Scalar::Int(0),
            opacity: 1.0,
            outlines: false,
            color_outline: "#000000".to_owned(),
            show_color_key: false,
            color_column: None,
            color_category: ColorCategory::default(),
            size: ScatterSize::Fixed,
            fixed_size: 5.0,
            size_column: None,
            max_size: 25.0,
            responsive_symbol_size: false,
            size_legend: SizeLegend::default(),
            shape: ScatterShapeMode::Fixed,
            fixed_shape: ScatterShape::Circle,
            shape_column: None,
            regression: false,
            regression_method: RegressionMethod::Linear,
            plot_height: PlotHeight::default(),
            annotations: AnnotationsGroup::default(),
            custom_lines: String::new(),
            label_column: None,
            auto_labels: true,
            add_labels: Vec::new(),
            highlight_labeled: true,
            tooltip: ScatterTooltip::default(),
        }
    }
}

impl ScatterPlot {
    #[must_use]
    pub fn new(x_column: impl Into<String>, y_column: impl Into<String>) -> Self {
        Self {
            x: ScatterAxis::new(x_column),
            y: ScatterAxis::new(y_column),
            ..Self::default()
        }
    }

    /// Sizes points by `column`, switching the size mode to dynamic.
    #[must_use]
    pub fn sized_by(mut self, column: impl Into<String>) -> Self {
        self.size = ScatterSize::Dynamic;
        self.size_column = Some(column.into());
        self
    }

    #[must_use]
    pub fn shaped_by(mut self, column: impl Into<String>) -> Self {
        self.shape = ScatterShapeMode::Variable;
        self.shape_column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_regression(mut self, method: RegressionMethod) -> Self {
        self.regression = true;
        self.regression_method = method;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, column: impl Into<String>) -> Self {
        self.label_column = Some(column.into());
        self
    }
}

impl FamilyModel for ScatterPlot {
    const CHART_TYPE: ChartType = ChartType::Scatter;

    fn write_visualize(&self, visualize: &mut Map<String, Value>) {
        self.x.write_wire("x", visualize);
        self.y.write_wire("y", visualize);

        put(visualize, "base-color", &self.base_color);
        visualize.insert("opacity".to_owned(), number_value(self.opacity));
        put(visualize, "outlines", &self.outlines);
        put(visualize, "color-outline", &self.color_outline);
        put(visualize, "show-color-key", &self.show_color_key);
        visualize.insert("color-category".to_owned(), self.color_category.serialize());
        put(visualize, "color-by-column", &!self.color_category.is_empty());

        put(visualize, "size", &self.size);
        visualize.insert("fixed-size".to_owned(), number_value(self.fixed_size));
        visualize.insert("max-size".to_owned(), number_value(self.max_size));
        put(visualize, "responsive-symbol-size", &self.responsive_symbol_size);
        self.size_legend.write_wire(visualize);

        put(visualize, "shape", &self.shape);
        put(visualize, "fixed-shape", &self.fixed_shape);
        put(visualize, "regression", &self.regression);
        put(visualize, "regression-method", &self.regression_method);

        self.plot_height.write(visualize);
        self.annotations.write_wire(visualize);
        put(visualize, "custom-lines", &self.custom_lines);

        put(visualize, "auto-labels", &self.auto_labels);
        put(visualize, "add-labels", &self.add_labels);
        put(visualize, "highlight-labeled", &self.highlight_labeled);
        visualize.insert(
            "tooltip".to_owned(),
            json!({
                "body": self.tooltip.body,
                "title": self.tooltip.title,
                "sticky": self.tooltip.sticky,
                "enabled": self.tooltip.enabled,
                "migrated": true,
            }),
        );
    }

    fn axes(&self) -> Option<Map<String, Value>> {
        let mut axes = Map::new();
        put_column(&mut axes, "x", self.x.column.as_ref());
        put_column(&mut axes, "y", self.y.column.as_ref());
        put_column(&mut axes, "size", self.size_column.as_ref());
        put_column(&mut axes, "shape", self.shape_column.as_ref());
        put_column(&mut axes, "labels", self.label_column.as_ref());
        put_column(&mut axes, "color", self.color_column.as_ref());
        (!axes.is_empty()).then_some(axes)
    }

    fn read_wire(wire: FamilyWire<'_>) -> ChartResult<Self> {
        let FamilyWire { visualize, axes } = wire;
        let mut chart = Self {
            x: ScatterAxis::read_wire("x", read_column(axes, "x")?, visualize)?,
            y: ScatterAxis::read_wire("y", read_column(axes, "y")?, visualize)?,
            size_column: read_column(axes, "size")?,
            shape_column: read_column(axes, "shape")?,
            label_column: read_column(axes, "labels")?,
            color_column: read_column(axes, "color")?,
            ..Self::default()
        };

        visualize.copy("base-color", &mut chart.base_color)?;
        visualize.copy("opacity", &mut chart.opacity)?;
        visualize.copy("outlines", &mut chart.outlines)?;
        visualize.copy("color-outline", &mut chart.color_outline)?;
        visualize.copy("show-color-key", &mut chart.show_color_key)?;
        chart.color_category = ColorCategory::deserialize(visualize.get("color-category"))?;

        visualize.copy("size", &mut chart.size)?;
        visualize.copy("fixed-size", &mut chart.fixed_size)?;
        visualize.copy("max-size", &mut chart.max_size)?;
        visualize.copy("responsive-symbol-size", &mut chart.responsive_symbol_size)?;
        chart.size_legend.read_wire(visualize)?;

        visualize.copy("shape", &mut chart.shape)?;
        visualize.copy("fixed-shape", &mut chart.fixed_shape)?;
        visualize.copy("regression", &mut chart.regression)?;
        visualize.copy("regression-method", &mut chart.regression_method)?;

        chart.plot_height.read(visualize)?;
        chart.annotations.read_wire(visualize)?;
        visualize.copy("custom-lines", &mut chart.custom_lines)?;

        visualize.copy("auto-labels", &mut chart.auto_labels)?;
        visualize.copy("add-labels", &mut chart.add_labels)?;
        visualize.copy("highlight-labeled", &mut chart.highlight_labeled)?;

        let tooltip = visualize.object("tooltip");
        chart.tooltip = ScatterTooltip {
            enabled: tooltip.read_or("enabled", true)?,
            title: tooltip.read_or("title", String::new())?,
            body: tooltip.read_or("body", String::new())?,
            sticky: tooltip.read_or("sticky", false)?,
        };
        Ok(chart)
    }

    fn validate(&self) -> ChartResult<()> {
        validate_in_range("opacity", self.opacity, 0.0, 1.0)?;
        validate_non_negative("fixed size", self.fixed_size)?;
        validate_non_negative("max size", self.max_size)?;
        validate_non_negative("plot height", self.plot_height.fixed)?;
        self.annotations.validate()
    }

    family_projection!(Scatter);
}
