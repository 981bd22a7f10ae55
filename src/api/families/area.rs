//! `d3-area`: stacked or overlapping area charts.

use serde_json::{Map, Value};

use crate::core::wire::{WireObject, put, type_error};
use crate::core::{
    AnnotationsGroup, ColorCategory, CustomRangeGroup, CustomTicksGroup, GridDisplayGroup,
    GridFormatGroup, GridLabelAlign, GridLabelPosition, LineInterpolation, PlotHeight, Scalar,
    SortAreas, number_value,
};
use crate::error::ChartResult;

use super::super::registry::ChartType;
use super::super::validation::{validate_in_range, validate_non_negative};
use super::{FamilyModel, FamilyWire};

const DEFAULT_AREA_OPACITY: f64 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct AreaChart {
    pub grid: GridDisplayGroup,
    pub grid_format: GridFormatGroup,
    pub custom_range: CustomRangeGroup,
    pub custom_ticks: CustomTicksGroup,
    pub y_grid_labels: GridLabelPosition,
    pub y_grid_label_align: GridLabelAlign,
    pub base_color: Scalar,
    pub area_opacity: f64,
    pub interpolation: LineInterpolation,
    pub sort_areas: SortAreas,
    pub stack_areas: bool,
    pub stack_to_100: bool,
    pub area_separator_lines: bool,
    pub area_separator_color: Scalar,
    pub color_category: ColorCategory,
    pub show_color_key: bool,
    pub show_tooltips: bool,
    pub tooltip_x_format: String,
    pub tooltip_number_format: String,
    pub plot_height: PlotHeight,
    pub annotations: AnnotationsGroup,
}

impl Default for AreaChart {
    fn default() -> Self {
        Self {
            grid: GridDisplayGroup::default(),
            grid_format: GridFormatGroup::default(),
            custom_range: CustomRangeGroup::default(),
            custom_ticks: CustomTicksGroup::default(),
            y_grid_labels: GridLabelPosition::Auto,
            y_grid_label_align: GridLabelAlign::Left,
            base_color: Scalar::Int(0),
            area_opacity: DEFAULT_AREA_OPACITY,
            interpolation: LineInterpolation::Linear,
            sort_areas: SortAreas::Keep,
            stack_areas: false,
            stack_to_100: false,
            area_separator_lines: false,
            area_separator_color: Scalar::from("#4682b4"),
            color_category: ColorCategory::default(),
            show_color_key: false,
            show_tooltips: true,
            tooltip_x_format: String::new(),
            tooltip_number_format: String::new(),
            plot_height: PlotHeight::default(),
            annotations: AnnotationsGroup::default(),
        }
    }
}

impl AreaChart {
    #[must_use]
    pub fn stacked(mut self) -> Self {
        self.stack_areas = true;
        self
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.area_opacity = opacity;
        self
    }
}

impl FamilyModel for AreaChart {
    const CHART_TYPE: ChartType = ChartType::Area;

    fn write_visualize(&self, visualize: &mut Map<String, Value>) {
        self.grid.write_wire(visualize);
        self.grid_format.write_wire(visualize);
        self.custom_range.write_wire(visualize);
        self.custom_ticks.write_wire(visualize);
        put(visualize, "y-grid-labels", &self.y_grid_labels);
        put(visualize, "y-grid-label-align", &self.y_grid_label_align);
        visualize.insert("area-opacity".to_owned(), number_value(self.area_opacity));
        put(visualize, "base-color", &self.base_color);
        put(visualize, "interpolation", &self.interpolation);
        put(visualize, "sort-areas", &self.sort_areas);
        put(visualize, "stack-areas", &self.stack_areas);
        put(visualize, "stack-to-100", &self.stack_to_100);
        put(visualize, "area-separator-lines", &self.area_separator_lines);
        put(visualize, "area-separator-color", &self.area_separator_color);
        visualize.insert("color-category".to_owned(), self.color_category.serialize());
        put(visualize, "show-color-key", &self.show_color_key);
        put(visualize, "show-tooltips", &self.show_tooltips);
        put(visualize, "tooltip-x-format", &self.tooltip_x_format);
        put(visualize, "tooltip-number-format", &self.tooltip_number_format);
        self.plot_height.write(visualize);
        self.annotations.write_wire(visualize);
    }

    fn read_wire(wire: FamilyWire<'_>) -> ChartResult<Self> {
        let visualize = wire.visualize;
        let mut chart = Self::default();

        chart.grid.read_wire(visualize)?;
        chart.grid_format.read_wire(visualize)?;
        chart.custom_range.read_wire(visualize)?;
        chart.custom_ticks.read_wire(visualize)?;
        visualize.copy("y-grid-labels", &mut chart.y_grid_labels)?;
        visualize.copy("y-grid-label-align", &mut chart.y_grid_label_align)?;
        if let Some(opacity) = read_opacity(visualize)? {
            chart.area_opacity = opacity;
        }
        visualize.copy("base-color", &mut chart.base_color)?;
        visualize.copy("interpolation", &mut chart.interpolation)?;
        visualize.copy("sort-areas", &mut chart.sort_areas)?;
        visualize.copy("stack-areas", &mut chart.stack_areas)?;
        visualize.copy("stack-to-100", &mut chart.stack_to_100)?;
        visualize.copy("area-separator-lines", &mut chart.area_separator_lines)?;
        visualize.copy("area-separator-color", &mut chart.area_separator_color)?;
        chart.color_category = ColorCategory::deserialize(visualize.get("color-category"))?;
        visualize.copy("show-color-key", &mut chart.show_color_key)?;
        visualize.copy("show-tooltips", &mut chart.show_tooltips)?;
        visualize.copy("tooltip-x-format", &mut chart.tooltip_x_format)?;
        visualize.copy("tooltip-number-format", &mut chart.tooltip_number_format)?;
        chart.plot_height.read(visualize)?;
        chart.annotations.read_wire(visualize)?;
        Ok(chart)
    }

    fn validate(&self) -> ChartResult<()> {
        validate_in_range("area opacity", self.area_opacity, 0.0, 1.0)?;
        validate_non_negative("plot height", self.plot_height.fixed)?;
        self.annotations.validate()
    }

    family_projection!(Area);
}

/// Opacity arrives as a number or a numeric string; an empty value means the default.
fn read_opacity(visualize: WireObject<'_>) -> ChartResult<Option<f64>> {
    match visualize.get("area-opacity") {
        None => Ok(None),
        Some(Value::Null) => Ok(Some(DEFAULT_AREA_OPACITY)),
        Some(Value::String(raw)) if raw.trim().is_empty() => Ok(Some(DEFAULT_AREA_OPACITY)),
        Some(Value::String(raw)) => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| type_error("a numeric area opacity", &Value::String(raw.clone()))),
        Some(value @ Value::Number(_)) => Ok(value.as_f64()),
        Some(other) => Err(type_error("a numeric area opacity", other)),
    }
}
