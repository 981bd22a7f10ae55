//! `d3-lines`: line charts with per-line styling and area fills.

use std::collections::HashSet;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::core::wire::{WireObject, put, type_error};
use crate::core::{
    AnnotationsGroup, ColorCategory, CustomRangeGroup, CustomTicksGroup, GridDisplayGroup,
    GridFormatGroup, GridLabelAlign, GridLabelPosition, LineDash, LineInterpolation, LineWidth,
    PlotHeight, Scalar, SymbolDisplay, SymbolShape, SymbolStyle, YScale, number_value,
};
use crate::error::{ChartError, ChartResult};

use super::super::registry::ChartType;
use super::super::validation::{validate_column_name, validate_in_range, validate_non_negative};
use super::{FamilyModel, FamilyWire};

/// Markers drawn on a line. Present means enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSymbol {
    pub shape: SymbolShape,
    pub style: SymbolStyle,
    pub on: SymbolDisplay,
    pub size: f64,
    pub opacity: f64,
}

impl Default for LineSymbol {
    fn default() -> Self {
        Self {
            shape: SymbolShape::Circle,
            style: SymbolStyle::Fill,
            on: SymbolDisplay::Last,
            size: 6.0,
            opacity: 1.0,
        }
    }
}

impl LineSymbol {
    fn to_wire(&self) -> Value {
        let mut out = Map::new();
        put(&mut out, "enabled", &true);
        put(&mut out, "shape", &self.shape);
        put(&mut out, "style", &self.style);
        put(&mut out, "on", &self.on);
        out.insert("size".to_owned(), number_value(self.size));
        out.insert("opacity".to_owned(), number_value(self.opacity));
        Value::Object(out)
    }

    /// `None` when the stored object is disabled.
    fn from_wire(value: Option<&Value>) -> ChartResult<Option<Self>> {
        let object = WireObject::new(value);
        if !object.read_or("enabled", false)? {
            return Ok(None);
        }
        let mut symbol = Self::default();
        object.copy("shape", &mut symbol.shape)?;
        object.copy("style", &mut symbol.style)?;
        object.copy("on", &mut symbol.on)?;
        object.copy("size", &mut symbol.size)?;
        object.copy("opacity", &mut symbol.opacity)?;
        Ok(Some(symbol))
    }
}

/// Value labels on a single line. Present means enabled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineValueLabels {
    pub last: bool,
    pub first: bool,
    pub show_circles: bool,
    pub max_inner_labels: i64,
}

impl LineValueLabels {
    fn to_wire(&self) -> Value {
        let mut out = Map::new();
        put(&mut out, "enabled", &true);
        put(&mut out, "last", &self.last);
        put(&mut out, "first", &self.first);
        put(&mut out, "showCircles", &self.show_circles);
        put(&mut out, "maxInnerLabels", &self.max_inner_labels);
        Value::Object(out)
    }

    fn from_wire(value: Option<&Value>) -> ChartResult<Option<Self>> {
        let object = WireObject::new(value);
        if !object.read_or("enabled", false)? {
            return Ok(None);
        }
        let mut labels = Self::default();
        object.copy("last", &mut labels.last)?;
        object.copy("first", &mut labels.first)?;
        object.copy("showCircles", &mut labels.show_circles)?;
        object.copy("maxInnerLabels", &mut labels.max_inner_labels)?;
        Ok(Some(labels))
    }
}

/// Styling for the series in one data column.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub column: String,
    pub title: String,
    pub interpolation: LineInterpolation,
    pub width: LineWidth,
    pub dash: Option<LineDash>,
    pub color_key: bool,
    pub direct_label: bool,
    pub outline: bool,
    pub symbols: Option<LineSymbol>,
    pub value_labels: Option<LineValueLabels>,
    pub connect_missing_points: bool,
}

impl Line {
    pub fn new(column: impl Into<String>) -> ChartResult<Self> {
        let column = column.into();
        validate_column_name("line", &column)?;
        Ok(Self {
            column,
            title: String::new(),
            interpolation: LineInterpolation::Linear,
            width: LineWidth::Thin,
            dash: None,
            color_key: false,
            direct_label: false,
            outline: false,
            symbols: None,
            value_labels: None,
            connect_missing_points: false,
        })
    }

    #[must_use]
    pub fn with_width(mut self, width: LineWidth) -> Self {
        self.width = width;
        self
    }

    #[must_use]
    pub fn with_dash(mut self, dash: LineDash) -> Self {
        self.dash = Some(dash);
        self
    }

    #[must_use]
    pub fn with_symbols(mut self, symbols: LineSymbol) -> Self {
        self.symbols = Some(symbols);
        self
    }

    #[must_use]
    pub fn with_value_labels(mut self, value_labels: LineValueLabels) -> Self {
        self.value_labels = Some(value_labels);
        self
    }

    #[must_use]
    pub fn with_direct_label(mut self) -> Self {
        self.direct_label = true;
        self
    }

    fn validate(&self) -> ChartResult<()> {
        validate_column_name("line", &self.column)?;
        if let Some(symbols) = &self.symbols {
            validate_non_negative("line symbol size", symbols.size)?;
            validate_in_range("line symbol opacity", symbols.opacity, 0.0, 1.0)?;
        }
        Ok(())
    }

    fn to_wire(&self) -> Value {
        let mut out = Map::new();
        put(&mut out, "title", &self.title);
        put(&mut out, "interpolation", &self.interpolation);
        put(&mut out, "width", &self.width);
        put(&mut out, "colorKey", &self.color_key);
        put(&mut out, "directLabel", &self.direct_label);
        put(&mut out, "bgStroke", &self.outline);
        put(&mut out, "connectMissingPoints", &self.connect_missing_points);
        out.insert(
            "symbols".to_owned(),
            self.symbols
                .as_ref()
                .map_or_else(disabled, LineSymbol::to_wire),
        );
        out.insert(
            "valueLabels".to_owned(),
            self.value_labels
                .as_ref()
                .map_or_else(disabled, LineValueLabels::to_wire),
        );
        if let Some(dash) = &self.dash {
            put(&mut out, "dash", dash);
        }
        Value::Object(out)
    }

    fn from_wire(column: &str, value: &Value) -> ChartResult<Self> {
        let object = WireObject::new(Some(value));
        let mut line = Self::new(column)?;
        object.copy("title", &mut line.title)?;
        object.copy("interpolation", &mut line.interpolation)?;
        object.copy("width", &mut line.width)?;
        line.dash = object.read("dash")?;
        object.copy("colorKey", &mut line.color_key)?;
        object.copy("directLabel", &mut line.direct_label)?;
        object.copy("bgStroke", &mut line.outline)?;
        object.copy("connectMissingPoints", &mut line.connect_missing_points)?;
        line.symbols = LineSymbol::from_wire(object.get("symbols"))?;
        line.value_labels = LineValueLabels::from_wire(object.get("valueLabels"))?;
        Ok(line)
    }
}

fn disabled() -> Value {
    serde_json::json!({ "enabled": false })
}

/// Shaded band between two columns.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaFill {
    /// Key of the fill in the id-keyed wire object.
    pub id: String,
    pub from_column: String,
    pub to_column: String,
    pub color: String,
    pub opacity: f64,
    pub use_mixed_colors: bool,
    pub color_negative: String,
    pub interpolation: LineInterpolation,
}

impl AreaFill {
    /// Fill between two columns under a freshly generated id.
    pub fn new(from_column: impl Into<String>, to_column: impl Into<String>) -> ChartResult<Self> {
        let fill = Self {
            id: Uuid::new_v4().to_string(),
            from_column: from_column.into(),
            to_column: to_column.into(),
            color: "#cccccc".to_owned(),
            opacity: 0.3,
            use_mixed_colors: false,
            color_negative: "#E31A1C".to_owned(),
            interpolation: LineInterpolation::Linear,
        };
        fill.validate()?;
        Ok(fill)
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> ChartResult<Self> {
        self.opacity = opacity;
        self.validate()?;
        Ok(self)
    }

    #[must_use]
    pub fn with_mixed_colors(mut self, color_negative: impl Into<String>) -> Self {
        self.use_mixed_colors = true;
        self.color_negative = color_negative.into();
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_column_name("area fill `from`", &self.from_column)?;
        validate_column_name("area fill `to`", &self.to_column)?;
        validate_in_range("area fill opacity", self.opacity, 0.0, 1.0)
    }

    fn to_wire(&self) -> Value {
        let mut out = Map::new();
        put(&mut out, "from", &self.from_column);
        put(&mut out, "to", &self.to_column);
        put(&mut out, "color", &self.color);
        out.insert("opacity".to_owned(), number_value(self.opacity));
        put(&mut out, "useMixedColors", &self.use_mixed_colors);
        put(&mut out, "colorNegative", &self.color_negative);
        put(&mut out, "interpolation", &self.interpolation);
        Value::Object(out)
    }

    fn from_wire(id: Option<&str>, value: &Value) -> ChartResult<Self> {
        let object = WireObject::new(Some(value));
        let mut fill = Self::new(
            object.read_or("from", String::new())?,
            object.read_or("to", String::new())?,
        )?;
        if let Some(id) = id.map(str::to_owned).or(object.read("id")?) {
            fill.id = id;
        }
        object.copy("color", &mut fill.color)?;
        object.copy("opacity", &mut fill.opacity)?;
        object.copy("useMixedColors", &mut fill.use_mixed_colors)?;
        object.copy("colorNegative", &mut fill.color_negative)?;
        object.copy("interpolation", &mut fill.interpolation)?;
        fill.validate()?;
        Ok(fill)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub grid: GridDisplayGroup,
    pub grid_format: GridFormatGroup,
    pub custom_range: CustomRangeGroup,
    pub custom_ticks: CustomTicksGroup,
    pub y_grid_labels: GridLabelPosition,
    pub y_grid_label_align: GridLabelAlign,
    pub scale_y: YScale,
    pub y_grid_subdivide: bool,
    pub base_color: Scalar,
    pub interpolation: LineInterpolation,
    pub connector_lines: bool,
    pub color_category: ColorCategory,
    pub lines: Vec<Line>,
    pub area_fills: Vec<AreaFill>,
    pub stack_color_legend: bool,
    pub label_colors: bool,
    pub label_margin: i64,
    pub value_labels_format: String,
    pub value_label_colors: bool,
    pub show_tooltips: bool,
    pub tooltip_x_format: String,
    pub tooltip_number_format: String,
    pub plot_height: PlotHeight,
    pub annotations: AnnotationsGroup,
}

impl Default for LineChart {
    fn default() -> Self {
        Self {
            grid: GridDisplayGroup::default(),
            grid_format: GridFormatGroup {
                x: Some("auto".to_owned()),
                y: Some(String::new()),
            },
            custom_range: CustomRangeGroup::auto(),
            custom_ticks: CustomTicksGroup::empty(),
            y_grid_labels: GridLabelPosition::Auto,
            y_grid_label_align: GridLabelAlign::Left,
            scale_y: YScale::Linear,
            y_grid_subdivide: true,
            base_color: Scalar::Int(0),
            interpolation: LineInterpolation::Linear,
            connector_lines: false,
            color_category: ColorCategory::default(),
            lines: Vec::new(),
            area_fills: Vec::new(),
            stack_color_legend: false,
            label_colors: false,
            label_margin: 0,
            value_labels_format: String::new(),
            value_label_colors: false,
            show_tooltips: true,
            tooltip_x_format: String::new(),
            tooltip_number_format: String::new(),
            plot_height: PlotHeight::default(),
            annotations: AnnotationsGroup::default(),
        }
    }
}

impl LineChart {
    #[must_use]
    pub fn with_line(mut self, line: Line) -> Self {
        self.lines.push(line);
        self
    }

    #[must_use]
    pub fn with_area_fill(mut self, fill: AreaFill) -> Self {
        self.area_fills.push(fill);
        self
    }

    #[must_use]
    pub fn line(&self, column: &str) -> Option<&Line> {
        self.lines.iter().find(|line| line.column == column)
    }
}

impl FamilyModel for LineChart {
    const CHART_TYPE: ChartType = ChartType::Line;

    fn write_visualize(&self, visualize: &mut Map<String, Value>) {
        self.custom_range.write_wire(visualize);
        self.custom_ticks.write_wire(visualize);
        self.grid_format.write_wire(visualize);
        self.grid.write_wire(visualize);
        put(visualize, "y-grid-labels", &self.y_grid_labels);
        put(visualize, "y-grid-label-align", &self.y_grid_label_align);
        put(visualize, "scale-y", &self.scale_y);
        put(visualize, "y-grid-subdivide", &self.y_grid_subdivide);
        put(visualize, "base-color", &self.base_color);
        put(visualize, "interpolation", &self.interpolation);
        put(visualize, "connector-lines", &self.connector_lines);
        visualize.insert("color-category".to_owned(), self.color_category.serialize());
        put(visualize, "stack-color-legend", &self.stack_color_legend);
        put(visualize, "label-colors", &self.label_colors);
        put(visualize, "label-margin", &self.label_margin);
        put(visualize, "value-labels-format", &self.value_labels_format);
        put(visualize, "value-label-colors", &self.value_label_colors);
        put(visualize, "show-tooltips", &self.show_tooltips);
        put(visualize, "tooltip-x-format", &self.tooltip_x_format);
        put(visualize, "tooltip-number-format", &self.tooltip_number_format);
        self.plot_height.write(visualize);

        let lines: Map<String, Value> = self
            .lines
            .iter()
            .map(|line| (line.column.clone(), line.to_wire()))
            .collect();
        visualize.insert("lines".to_owned(), Value::Object(lines));
        let fills: Map<String, Value> = self
            .area_fills
            .iter()
            .map(|fill| (fill.id.clone(), fill.to_wire()))
            .collect();
        visualize.insert("custom-area-fills".to_owned(), Value::Object(fills));
        self.annotations.write_wire(visualize);
    }

    fn read_wire(wire: FamilyWire<'_>) -> ChartResult<Self> {
        let visualize = wire.visualize;
        let mut chart = Self::default();

        chart.custom_range.read_wire(visualize)?;
        chart.custom_ticks.read_wire(visualize)?;
        chart.grid_format.read_wire(visualize)?;
        chart.grid.read_wire(visualize)?;
        visualize.copy("y-grid-labels", &mut chart.y_grid_labels)?;
        visualize.copy("y-grid-label-align", &mut chart.y_grid_label_align)?;
        visualize.copy("scale-y", &mut chart.scale_y)?;
        visualize.copy("y-grid-subdivide", &mut chart.y_grid_subdivide)?;
        visualize.copy("base-color", &mut chart.base_color)?;
        visualize.copy("interpolation", &mut chart.interpolation)?;
        visualize.copy("connector-lines", &mut chart.connector_lines)?;
        chart.color_category = ColorCategory::deserialize(visualize.get("color-category"))?;
        visualize.copy("stack-color-legend", &mut chart.stack_color_legend)?;
        visualize.copy("label-colors", &mut chart.label_colors)?;
        visualize.copy("label-margin", &mut chart.label_margin)?;
        if let Some(format) = visualize.read("value-labels-format")? {
            chart.value_labels_format = format;
        } else {
            visualize.copy("value-label-format", &mut chart.value_labels_format)?;
        }
        visualize.copy("value-label-colors", &mut chart.value_label_colors)?;
        visualize.copy("show-tooltips", &mut chart.show_tooltips)?;
        visualize.copy("tooltip-x-format", &mut chart.tooltip_x_format)?;
        visualize.copy("tooltip-number-format", &mut chart.tooltip_number_format)?;
        chart.plot_height.read(visualize)?;

        chart.lines = visualize
            .object("lines")
            .entries()
            .into_iter()
            .filter(|(_, config)| config.is_object())
            .map(|(column, config)| Line::from_wire(column, config))
            .collect::<ChartResult<_>>()?;
        chart.area_fills = read_area_fills(visualize.get("custom-area-fills"))?;
        chart.annotations.read_wire(visualize)?;
        Ok(chart)
    }

    fn validate(&self) -> ChartResult<()> {
        let mut seen = HashSet::new();
        for line in &self.lines {
            line.validate()?;
            if !seen.insert(line.column.as_str()) {
                return Err(ChartError::Validation(format!(
                    "line `{}` is configured twice",
                    line.column
                )));
            }
        }
        for fill in &self.area_fills {
            fill.validate()?;
        }
        validate_non_negative("plot height", self.plot_height.fixed)?;
        self.annotations.validate()
    }

    family_projection!(Line);
}

/// Id-keyed object from the service, or a plain list.
fn read_area_fills(value: Option<&Value>) -> ChartResult<Vec<AreaFill>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(fills)) => fills
            .iter()
            .map(|(id, fill)| AreaFill::from_wire(Some(id), fill))
            .collect(),
        Some(Value::Array(fills)) => fills
            .iter()
            .map(|fill| AreaFill::from_wire(None, fill))
            .collect(),
        Some(other) => Err(type_error("an area fill object or list", other)),
    }
}
