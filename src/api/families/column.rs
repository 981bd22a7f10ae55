//! `column-chart`: vertical columns.

use serde_json::{Map, Value};

use crate::core::transcoders::flag_value;
use crate::core::wire::{WireObject, put};
use crate::core::{
    AnnotationsGroup, ColorCategory, CustomRangeGroup, CustomTicksGroup, GridDisplay,
    GridDisplayGroup, GridFormatGroup, GridLabelAlign, GridLabelPosition, NestedValueLabels,
    PlotHeight, Scalar,
};
use crate::error::ChartResult;

use super::super::registry::ChartType;
use super::super::validation::validate_non_negative;
use super::{FamilyModel, FamilyWire, read_y_axis_labels, write_y_axis_labels};

/// Column charts drop the `-y` suffix on the value axis keys.
const AXIS_KEYS: [(&str, &str); 4] = [
    ("custom-range-x", "custom-range-x"),
    ("custom-range-y", "custom-range"),
    ("custom-ticks-x", "custom-ticks-x"),
    ("custom-ticks-y", "custom-ticks"),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnChart {
    pub grid: GridDisplayGroup,
    pub grid_format: GridFormatGroup,
    pub custom_range: CustomRangeGroup,
    pub custom_ticks: CustomTicksGroup,
    pub y_grid_labels: GridLabelPosition,
    pub y_grid_label_align: GridLabelAlign,
    pub base_color: Scalar,
    /// Color for negative values; `None` disables it.
    pub negative_color: Option<String>,
    pub color_category: ColorCategory,
    pub bar_padding: i64,
    pub plot_height: PlotHeight,
    pub show_color_key: bool,
    pub value_labels: NestedValueLabels,
    pub annotations: AnnotationsGroup,
}

impl Default for ColumnChart {
    fn default() -> Self {
        Self {
            grid: GridDisplayGroup::default(),
            grid_format: GridFormatGroup::default(),
            custom_range: CustomRangeGroup::default(),
            custom_ticks: CustomTicksGroup::default(),
            y_grid_labels: GridLabelPosition::Outside,
            y_grid_label_align: GridLabelAlign::Left,
            base_color: Scalar::Int(0),
            negative_color: None,
            color_category: ColorCategory::default(),
            bar_padding: 30,
            plot_height: PlotHeight::default(),
            show_color_key: false,
            value_labels: NestedValueLabels::default(),
            annotations: AnnotationsGroup::default(),
        }
    }
}

impl ColumnChart {
    #[must_use]
    pub fn with_negative_color(mut self, color: impl Into<String>) -> Self {
        self.negative_color = Some(color.into());
        self
    }

    #[must_use]
    pub fn with_value_labels(mut self, value_labels: NestedValueLabels) -> Self {
        self.value_labels = value_labels;
        self
    }
}

impl FamilyModel for ColumnChart {
    const CHART_TYPE: ChartType = ChartType::Column;

    fn write_visualize(&self, visualize: &mut Map<String, Value>) {
        self.grid.write_wire(visualize);
        if let Some(y) = &self.grid.y {
            put(visualize, "grid-lines", &(*y == GridDisplay::On));
        }
        self.grid_format.write_wire(visualize);

        let mut axis = Map::new();
        self.custom_range.write_wire(&mut axis);
        self.custom_ticks.write_wire(&mut axis);
        for (group_key, wire_key) in AXIS_KEYS {
            if let Some(value) = axis.remove(group_key) {
                visualize.insert(wire_key.to_owned(), value);
            }
        }

        write_y_axis_labels(visualize, &self.y_grid_labels, &self.y_grid_label_align);
        put(visualize, "base-color", &self.base_color);
        visualize.insert(
            "negativeColor".to_owned(),
            flag_value::serialize(self.negative_color.as_deref()),
        );
        put(visualize, "bar-padding", &self.bar_padding);
        visualize.insert("color-category".to_owned(), self.color_category.serialize());
        put(visualize, "color-by-column", &!self.color_category.is_empty());
        self.plot_height.write(visualize);
        put(visualize, "show-color-key", &self.show_color_key);
        self.value_labels.write(visualize);
        self.annotations.write_wire(visualize);
    }

    fn read_wire(wire: FamilyWire<'_>) -> ChartResult<Self> {
        let visualize = wire.visualize;
        let mut chart = Self::default();

        chart.grid.read_wire(visualize)?;
        // Legacy grid keys only matter when the mixin keys are missing.
        if !visualize.contains("x-grid") {
            let legacy = visualize.object("grid-lines-x");
            if legacy.is_object() {
                chart.grid.x = Some(if legacy.read_or("enabled", false)? {
                    GridDisplay::from(legacy.read_or("type", String::new())?)
                } else {
                    GridDisplay::Off
                });
            }
        }
        if !visualize.contains("y-grid") {
            if let Some(enabled) = visualize.read::<bool>("grid-lines")? {
                chart.grid.y = Some(GridDisplay::from(enabled));
            }
        }
        chart.grid_format.read_wire(visualize)?;

        let mut axis = Map::new();
        for (group_key, wire_key) in AXIS_KEYS {
            if let Some(value) = visualize.get(wire_key) {
                axis.insert(group_key.to_owned(), value.clone());
            }
        }
        chart.custom_range.read_wire(WireObject::from_map(&axis))?;
        chart.custom_ticks.read_wire(WireObject::from_map(&axis))?;

        read_y_axis_labels(
            visualize,
            &mut chart.y_grid_labels,
            &mut chart.y_grid_label_align,
        )?;
        visualize.copy("base-color", &mut chart.base_color)?;
        if visualize.contains("negativeColor") {
            chart.negative_color = flag_value::deserialize(visualize.get("negativeColor"))?;
        }
        visualize.copy("bar-padding", &mut chart.bar_padding)?;
        chart.color_category = ColorCategory::deserialize(visualize.get("color-category"))?;
        chart.plot_height.read(visualize)?;
        visualize.copy("show-color-key", &mut chart.show_color_key)?;
        chart.value_labels.read(visualize)?;
        chart.annotations.read_wire(visualize)?;
        Ok(chart)
    }

    fn validate(&self) -> ChartResult<()> {
        validate_non_negative("bar padding", self.bar_padding as f64)?;
        validate_non_negative("plot height", self.plot_height.fixed)?;
        self.annotations.validate()
    }

    family_projection!(Column);
}
