//! `d3-bars-stacked`: horizontal bars split into stacked segments.

use serde_json::{Map, Value};

use crate::core::transcoders::{flag_value, replace_flags, value_label_format};
use crate::core::wire::put;
use crate::core::{ColorCategory, ReplaceFlagsType, Scalar, ValueLabelMode};
use crate::error::ChartResult;

use super::super::registry::ChartType;
use super::{FamilyModel, FamilyWire, put_column, read_column};

#[derive(Debug, Clone, PartialEq)]
pub struct StackedBarChart {
    pub color_category: ColorCategory,
    pub replace_flags: ReplaceFlagsType,
    pub thick_bars: bool,
    pub reverse_order: bool,
    pub value_label_format: String,
    pub date_label_format: String,
    pub range_value_labels: String,
    pub color_by_column: bool,
    pub group_by_column: bool,
    pub show_color_key: bool,
    pub value_label_mode: ValueLabelMode,
    pub stack_percentages: bool,
    pub sort_bars: bool,
    /// Column or segment the bars are sorted by; empty sorts by total.
    pub sort_by: String,
    pub base_color: Scalar,
    pub block_labels: bool,
    pub negative_color: Option<String>,
    pub groups_column: Option<String>,
}

impl Default for StackedBarChart {
    fn default() -> Self {
        Self {
            color_category: ColorCategory::default(),
            replace_flags: ReplaceFlagsType::Off,
            thick_bars: false,
            reverse_order: false,
            value_label_format: String::new(),
            date_label_format: String::new(),
            range_value_labels: String::new(),
            color_by_column: false,
            group_by_column: false,
            show_color_key: false,
            value_label_mode: ValueLabelMode::Left,
            stack_percentages: false,
            sort_bars: false,
            sort_by: String::new(),
            base_color: Scalar::Int(0),
            block_labels: false,
            negative_color: None,
            groups_column: None,
        }
    }
}

impl StackedBarChart {
    #[must_use]
    pub fn as_percentages(mut self) -> Self {
        self.stack_percentages = true;
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_bars = true;
        self.sort_by = sort_by.into();
        self
    }
}

impl FamilyModel for StackedBarChart {
    const CHART_TYPE: ChartType = ChartType::StackedBar;

    fn write_visualize(&self, visualize: &mut Map<String, Value>) {
        put(visualize, "reverse-order", &self.reverse_order);
        visualize.insert("color-category".to_owned(), self.color_category.serialize());
        put(visualize, "range-value-labels", &self.range_value_labels);
        put(visualize, "show-color-key", &self.show_color_key);
        value_label_format::write(&self.value_label_format, visualize);
        put(visualize, "date-label-format", &self.date_label_format);
        put(visualize, "color-by-column", &self.color_by_column);
        put(visualize, "group-by-column", &self.group_by_column);
        put(visualize, "thick", &self.thick_bars);
        visualize.insert(
            "replace-flags".to_owned(),
            replace_flags::serialize(&self.replace_flags),
        );
        put(visualize, "value-label-mode", &self.value_label_mode);
        put(visualize, "stack-percentages", &self.stack_percentages);
        put(visualize, "sort-bars", &self.sort_bars);
        put(visualize, "sort-by", &self.sort_by);
        put(visualize, "base-color", &self.base_color);
        put(visualize, "block-labels", &self.block_labels);
        visualize.insert(
            "negativeColor".to_owned(),
            flag_value::serialize(self.negative_color.as_deref()),
        );
    }

    fn axes(&self) -> Option<Map<String, Value>> {
        let mut axes = Map::new();
        put_column(&mut axes, "groups", self.groups_column.as_ref());
        (!axes.is_empty()).then_some(axes)
    }

    fn read_wire(wire: FamilyWire<'_>) -> ChartResult<Self> {
        let FamilyWire { visualize, axes } = wire;
        let mut chart = Self::default();

        visualize.copy("reverse-order", &mut chart.reverse_order)?;
        chart.color_category = ColorCategory::deserialize(visualize.get("color-category"))?;
        visualize.copy("range-value-labels", &mut chart.range_value_labels)?;
        visualize.copy("show-color-key", &mut chart.show_color_key)?;
        chart.value_label_format = value_label_format::read(visualize)?;
        visualize.copy("date-label-format", &mut chart.date_label_format)?;
        visualize.copy("color-by-column", &mut chart.color_by_column)?;
        visualize.copy("group-by-column", &mut chart.group_by_column)?;
        visualize.copy("thick", &mut chart.thick_bars)?;
        if visualize.contains("replace-flags") {
            chart.replace_flags = replace_flags::deserialize(visualize.get("replace-flags"))?;
        }
        visualize.copy("value-label-mode", &mut chart.value_label_mode)?;
        visualize.copy("stack-percentages", &mut chart.stack_percentages)?;
        visualize.copy("sort-bars", &mut chart.sort_bars)?;
        visualize.copy("sort-by", &mut chart.sort_by)?;
        visualize.copy("base-color", &mut chart.base_color)?;
        visualize.copy("block-labels", &mut chart.block_labels)?;
        if visualize.contains("negativeColor") {
            chart.negative_color = flag_value::deserialize(visualize.get("negativeColor"))?;
        }
        chart.groups_column = read_column(axes, "groups")?;
        Ok(chart)
    }

    family_projection!(StackedBar);
}
