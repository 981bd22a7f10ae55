//! `d3-bars`: horizontal bar charts.

use serde_json::{Map, Value};

use crate::core::transcoders::{range_pair, replace_flags, tick_list};
use crate::core::wire::{WireObject, put, type_error};
use crate::core::{
    AnnotationsGroup, ColorCategory, FlatValueLabels, LabelAlignment, OverlayPattern, OverlayType,
    RangePair, ReplaceFlagsType, Scalar, TickPosition, number_value,
};
use crate::error::ChartResult;

use super::super::registry::ChartType;
use super::super::validation::{validate_column_name, validate_in_range};
use super::{FamilyModel, FamilyWire, read_column};

const ZERO_BASELINE: &str = "--zero-baseline--";

/// Extra marks drawn on top of the bars.
#[derive(Debug, Clone, PartialEq)]
pub struct BarOverlay {
    pub overlay_type: OverlayType,
    pub title: String,
    /// Column labelled, or the end of the range for range overlays.
    pub to_column: String,
    pub from_column: String,
    pub color: String,
    pub opacity: f64,
    pub pattern: OverlayPattern,
    pub show_in_color_key: bool,
    pub label_directly: bool,
}

impl BarOverlay {
    pub fn value(to_column: impl Into<String>) -> ChartResult<Self> {
        let overlay = Self {
            overlay_type: OverlayType::Value,
            title: String::new(),
            to_column: to_column.into(),
            from_column: ZERO_BASELINE.to_owned(),
            color: "#4682b4".to_owned(),
            opacity: 0.6,
            pattern: OverlayPattern::Solid,
            show_in_color_key: true,
            label_directly: true,
        };
        overlay.validate()?;
        Ok(overlay)
    }

    pub fn range(
        from_column: impl Into<String>,
        to_column: impl Into<String>,
    ) -> ChartResult<Self> {
        let mut overlay = Self::value(to_column)?;
        overlay.overlay_type = OverlayType::Range;
        overlay.from_column = from_column.into();
        Ok(overlay)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_pattern(mut self, pattern: OverlayPattern) -> Self {
        self.pattern = pattern;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        validate_column_name("bar overlay `to`", &self.to_column)?;
        validate_in_range("bar overlay opacity", self.opacity, 0.0, 1.0)
    }

    fn to_wire(&self) -> Value {
        let mut out = Map::new();
        put(&mut out, "type", &self.overlay_type);
        put(&mut out, "title", &self.title);
        put(&mut out, "to", &self.to_column);
        put(&mut out, "from", &self.from_column);
        put(&mut out, "color", &self.color);
        out.insert("opacity".to_owned(), number_value(self.opacity));
        put(&mut out, "pattern", &self.pattern);
        put(&mut out, "showInColorKey", &self.show_in_color_key);
        put(&mut out, "labelDirectly", &self.label_directly);
        Value::Object(out)
    }

    fn from_wire(value: &Value) -> ChartResult<Self> {
        let object = WireObject::new(Some(value));
        let to_column: String = object.read_or("to", String::new())?;
        let mut overlay = Self::value(to_column)?;
        object.copy("type", &mut overlay.overlay_type)?;
        object.copy("title", &mut overlay.title)?;
        object.copy("from", &mut overlay.from_column)?;
        object.copy("color", &mut overlay.color)?;
        object.copy("opacity", &mut overlay.opacity)?;
        object.copy("pattern", &mut overlay.pattern)?;
        object.copy("showInColorKey", &mut overlay.show_in_color_key)?;
        object.copy("labelDirectly", &mut overlay.label_directly)?;
        overlay.validate()?;
        Ok(overlay)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub label_column: String,
    pub label_alignment: LabelAlignment,
    pub block_labels: bool,
    pub value_labels: FlatValueLabels,
    pub swap_labels: bool,
    pub replace_flags: ReplaceFlagsType,
    pub show_color_key: bool,
    pub stack_color_legend: bool,
    pub bar_column: String,
    pub custom_range: RangePair,
    pub force_grid: bool,
    pub custom_grid_lines: Vec<Scalar>,
    pub tick_position: TickPosition,
    pub axis_label_format: String,
    pub base_color: Scalar,
    /// Falls back to the label column when empty.
    pub color_column: String,
    pub color_category: ColorCategory,
    pub rules: bool,
    pub thick: bool,
    pub background: bool,
    pub sort_bars: bool,
    pub reverse_order: bool,
    pub groups_column: Option<String>,
    pub show_group_labels: bool,
    pub show_category_labels: bool,
    pub overlays: Vec<BarOverlay>,
    pub highlighted_series: Vec<String>,
    pub annotations: AnnotationsGroup,
}

impl Default for BarChart {
    fn default() -> Self {
        Self {
            label_column: String::new(),
            label_alignment: LabelAlignment::Left,
            block_labels: false,
            value_labels: FlatValueLabels::default(),
            swap_labels: false,
            replace_flags: ReplaceFlagsType::Off,
            show_color_key: false,
            stack_color_legend: false,
            bar_column: String::new(),
            custom_range: range_pair::auto(),
            force_grid: false,
            custom_grid_lines: Vec::new(),
            tick_position: TickPosition::Top,
            axis_label_format: String::new(),
            base_color: Scalar::Int(0),
            color_column: String::new(),
            color_category: ColorCategory::default(),
            rules: false,
            thick: false,
            background: false,
            sort_bars: false,
            reverse_order: false,
            groups_column: None,
            show_group_labels: true,
            show_category_labels: true,
            overlays: Vec::new(),
            highlighted_series: Vec::new(),
            annotations: AnnotationsGroup::default(),
        }
    }
}

impl BarChart {
    #[must_use]
    pub fn new(label_column: impl Into<String>, bar_column: impl Into<String>) -> Self {
        Self {
            label_column: label_column.into(),
            bar_column: bar_column.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.sort_bars = true;
        self
    }

    #[must_use]
    pub fn with_custom_range(mut self, min: impl Into<Scalar>, max: impl Into<Scalar>) -> Self {
        self.custom_range = [min.into(), max.into()];
        self
    }

    #[must_use]
    pub fn with_groups(mut self, column: impl Into<String>) -> Self {
        self.groups_column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_overlay(mut self, overlay: BarOverlay) -> Self {
        self.overlays.push(overlay);
        self
    }

    fn groups(&self) -> Option<&String> {
        self.groups_column
            .as_ref()
            .filter(|column| !column.is_empty())
    }
}

impl FamilyModel for BarChart {
    const CHART_TYPE: ChartType = ChartType::Bar;

    fn write_visualize(&self, visualize: &mut Map<String, Value>) {
        put(visualize, "label-alignment", &self.label_alignment);
        put(visualize, "block-labels", &self.block_labels);
        self.value_labels.write(visualize);
        put(visualize, "swap-labels", &self.swap_labels);
        visualize.insert(
            "replace-flags".to_owned(),
            replace_flags::serialize(&self.replace_flags),
        );
        put(visualize, "show-color-key", &self.show_color_key);
        put(visualize, "stack-color-legend", &self.stack_color_legend);

        visualize.insert(
            "custom-range".to_owned(),
            range_pair::serialize(&self.custom_range),
        );
        put(visualize, "force-grid", &self.force_grid);
        visualize.insert(
            "custom-grid-lines".to_owned(),
            tick_list::serialize(&self.custom_grid_lines),
        );
        put(visualize, "tick-position", &self.tick_position);
        put(visualize, "axis-label-format", &self.axis_label_format);

        put(visualize, "base-color", &self.base_color);
        visualize.insert("color-category".to_owned(), self.color_category.serialize());
        put(visualize, "color-by-column", &!self.color_category.is_empty());
        put(visualize, "rules", &self.rules);
        put(visualize, "thick", &self.thick);
        put(visualize, "background", &self.background);

        put(visualize, "sort-bars", &self.sort_bars);
        put(visualize, "reverse-order", &self.reverse_order);
        put(visualize, "group-by-column", &self.groups().is_some());
        put(visualize, "show-group-labels", &self.show_group_labels);
        put(visualize, "show-category-labels", &self.show_category_labels);

        visualize.insert(
            "overlays".to_owned(),
            Value::Array(self.overlays.iter().map(BarOverlay::to_wire).collect()),
        );
        put(visualize, "highlighted-series", &self.highlighted_series);
        self.annotations.write_wire(visualize);
    }

    fn axes(&self) -> Option<Map<String, Value>> {
        let colors = if self.color_column.is_empty() {
            &self.label_column
        } else {
            &self.color_column
        };
        let mut axes = Map::new();
        put(&mut axes, "colors", colors);
        put(&mut axes, "bars", &self.bar_column);
        put(&mut axes, "labels", &self.label_column);
        if let Some(groups) = self.groups() {
            put(&mut axes, "groups", groups);
        }
        Some(axes)
    }

    fn read_wire(wire: FamilyWire<'_>) -> ChartResult<Self> {
        let FamilyWire { visualize, axes } = wire;
        let mut chart = Self::default();

        axes.copy("labels", &mut chart.label_column)?;
        visualize.copy("label-alignment", &mut chart.label_alignment)?;
        visualize.copy("block-labels", &mut chart.block_labels)?;
        chart.value_labels.read(visualize)?;
        visualize.copy("swap-labels", &mut chart.swap_labels)?;
        if visualize.contains("replace-flags") {
            chart.replace_flags = replace_flags::deserialize(visualize.get("replace-flags"))?;
        }
        visualize.copy("show-color-key", &mut chart.show_color_key)?;
        visualize.copy("stack-color-legend", &mut chart.stack_color_legend)?;

        axes.copy("bars", &mut chart.bar_column)?;
        chart.custom_range = range_pair::deserialize(visualize.get("custom-range"))?;
        visualize.copy("force-grid", &mut chart.force_grid)?;
        chart.custom_grid_lines = tick_list::deserialize(visualize.get("custom-grid-lines"))?;
        visualize.copy("tick-position", &mut chart.tick_position)?;
        visualize.copy("axis-label-format", &mut chart.axis_label_format)?;

        visualize.copy("base-color", &mut chart.base_color)?;
        // The label column stands in for an unset color column on the wire.
        if let Some(colors) = read_column(axes, "colors")? {
            if colors != chart.label_column {
                chart.color_column = colors;
            }
        }
        chart.color_category = ColorCategory::deserialize(visualize.get("color-category"))?;
        visualize.copy("rules", &mut chart.rules)?;
        visualize.copy("thick", &mut chart.thick)?;
        visualize.copy("background", &mut chart.background)?;

        visualize.copy("sort-bars", &mut chart.sort_bars)?;
        visualize.copy("reverse-order", &mut chart.reverse_order)?;
        chart.groups_column = read_column(axes, "groups")?;
        visualize.copy("show-group-labels", &mut chart.show_group_labels)?;
        visualize.copy("show-category-labels", &mut chart.show_category_labels)?;

        chart.overlays = match visualize.get("overlays") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(BarOverlay::from_wire)
                .collect::<ChartResult<_>>()?,
            Some(other) => return Err(type_error("an overlay list", other)),
        };
        visualize.copy("highlighted-series", &mut chart.highlighted_series)?;
        chart.annotations.read_wire(visualize)?;
        Ok(chart)
    }

    fn validate(&self) -> ChartResult<()> {
        for overlay in &self.overlays {
            overlay.validate()?;
        }
        self.annotations.validate()
    }

    family_projection!(Bar);
}
