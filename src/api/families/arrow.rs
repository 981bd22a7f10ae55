//! `d3-arrow-plot`: arrows from a start value to an end value per row.

use serde_json::{Map, Value, json};

use crate::core::transcoders::{range_pair, replace_flags, value_label_format};
use crate::core::wire::put;
use crate::core::{
    ColorCategory, GridDisplay, RangeExtent, RangePair, ReplaceFlagsType, Scalar, SortRangeBy,
};
use crate::error::ChartResult;

use super::super::registry::ChartType;
use super::{FamilyModel, FamilyWire, put_column, read_column};

#[derive(Debug, Clone, PartialEq)]
pub struct ArrowChart {
    pub base_color: Scalar,
    pub color_category: ColorCategory,
    pub thick_arrows: bool,
    pub y_grid: GridDisplay,
    pub replace_flags: ReplaceFlagsType,
    pub sort_ranges: bool,
    pub sort_by: SortRangeBy,
    pub reverse_order: bool,
    pub value_label_format: String,
    pub range_value_labels: String,
    pub custom_range: RangePair,
    pub range_extent: RangeExtent,
    pub start_column: Option<String>,
    pub end_column: Option<String>,
    pub color_column: Option<String>,
    pub label_column: Option<String>,
    pub arrow_key: bool,
    pub group_by_column: bool,
}

impl Default for ArrowChart {
    fn default() -> Self {
        Self {
            base_color: Scalar::Int(0),
            color_category: ColorCategory::default(),
            thick_arrows: true,
            y_grid: GridDisplay::On,
            replace_flags: ReplaceFlagsType::Off,
            sort_ranges: false,
            sort_by: SortRangeBy::End,
            reverse_order: false,
            value_label_format: String::new(),
            range_value_labels: String::new(),
            custom_range: range_pair::auto(),
            range_extent: RangeExtent::Nice,
            start_column: None,
            end_column: None,
            color_column: None,
            label_column: None,
            arrow_key: false,
            group_by_column: false,
        }
    }
}

impl ArrowChart {
    #[must_use]
    pub fn new(start_column: impl Into<String>, end_column: impl Into<String>) -> Self {
        Self {
            start_column: Some(start_column.into()),
            end_column: Some(end_column.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sorted_by(mut self, by: SortRangeBy) -> Self {
        self.sort_ranges = true;
        self.sort_by = by;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, column: impl Into<String>) -> Self {
        self.label_column = Some(column.into());
        self
    }
}

impl FamilyModel for ArrowChart {
    const CHART_TYPE: ChartType = ChartType::Arrow;

    fn write_visualize(&self, visualize: &mut Map<String, Value>) {
        put(visualize, "y-grid", &self.y_grid);
        put(visualize, "reverse-order", &self.reverse_order);
        put(visualize, "thick-arrows", &self.thick_arrows);
        put(visualize, "base-color", &self.base_color);
        visualize.insert("color-category".to_owned(), self.color_category.serialize());
        put(visualize, "range-value-labels", &self.range_value_labels);
        visualize.insert(
            "sort-range".to_owned(),
            json!({ "by": self.sort_by.as_str(), "enabled": self.sort_ranges }),
        );
        visualize.insert(
            "custom-range".to_owned(),
            range_pair::serialize(&self.custom_range),
        );
        put(visualize, "range-extent", &self.range_extent);
        value_label_format::write(&self.value_label_format, visualize);
        put(visualize, "color-by-column", &!self.color_category.is_empty());
        put(visualize, "group-by-column", &self.group_by_column);
        visualize.insert(
            "replace-flags".to_owned(),
            replace_flags::serialize(&self.replace_flags),
        );
        put(visualize, "show-arrow-key", &self.arrow_key);
    }

    fn axes(&self) -> Option<Map<String, Value>> {
        let mut axes = Map::new();
        put_column(&mut axes, "start", self.start_column.as_ref());
        put_column(&mut axes, "end", self.end_column.as_ref());
        put_column(&mut axes, "colors", self.color_column.as_ref());
        put_column(&mut axes, "labels", self.label_column.as_ref());
        (!axes.is_empty()).then_some(axes)
    }

    fn read_wire(wire: FamilyWire<'_>) -> ChartResult<Self> {
        let FamilyWire { visualize, axes } = wire;
        let mut chart = Self::default();

        if let Some(Value::Bool(enabled)) = visualize.get("y-grid") {
            chart.y_grid = GridDisplay::from(*enabled);
        } else {
            visualize.copy("y-grid", &mut chart.y_grid)?;
        }
        visualize.copy("reverse-order", &mut chart.reverse_order)?;
        visualize.copy("thick-arrows", &mut chart.thick_arrows)?;
        visualize.copy("base-color", &mut chart.base_color)?;
        chart.color_category = ColorCategory::deserialize(visualize.get("color-category"))?;
        visualize.copy("range-value-labels", &mut chart.range_value_labels)?;
        chart.value_label_format = value_label_format::read(visualize)?;

        let sort = visualize.object("sort-range");
        chart.sort_by = sort.read_or("by", SortRangeBy::End)?;
        chart.sort_ranges = sort.read_or("enabled", false)?;

        if visualize.contains("replace-flags") {
            chart.replace_flags = replace_flags::deserialize(visualize.get("replace-flags"))?;
        }
        chart.custom_range = range_pair::deserialize(visualize.get("custom-range"))?;
        visualize.copy("range-extent", &mut chart.range_extent)?;

        chart.start_column = read_column(axes, "start")?;
        chart.end_column = read_column(axes, "end")?;
        chart.color_column = read_column(axes, "colors")?;
        chart.label_column = read_column(axes, "labels")?;

        visualize.copy("group-by-column", &mut chart.group_by_column)?;
        visualize.copy("show-arrow-key", &mut chart.arrow_key)?;
        Ok(chart)
    }

    family_projection!(Arrow);
}
