//! `multiple-columns`: one small column chart per data column, laid out in a grid.

use std::collections::HashSet;

use serde_json::{Map, Value, json};

use crate::core::annotations::{
    deserialize_panel_range_annotations, deserialize_panel_text_annotations,
    serialize_panel_range_annotations, serialize_panel_text_annotations,
};
use crate::core::transcoders::flag_value;
use crate::core::wire::{WireObject, put, type_error};
use crate::core::{
    ColorCategory, CustomRangeGroup, CustomTicksGroup, GridDisplay, GridDisplayGroup,
    GridFormatGroup, GridLabelAlign, GridLabelPosition, GridLayout, NestedValueLabels,
    PanelAnnotation, PanelSortBy, PlotHeight, RangeAnnotation, Scalar, TextAnnotation,
    TextAxisLabels, ValueLabelDisplay,
};
use crate::error::{ChartError, ChartResult};

use super::super::registry::ChartType;
use super::super::validation::{validate_column_name, validate_non_negative};
use super::{FamilyModel, FamilyWire, read_y_axis_labels, write_y_axis_labels};

/// Per-panel settings, keyed by the data column the panel plots.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Panel {
    pub column: String,
    /// Panel options passed through as sent by the editor.
    pub settings: Map<String, Value>,
}

impl Panel {
    pub fn new(column: impl Into<String>) -> ChartResult<Self> {
        let column = column.into();
        validate_column_name("panel column", &column)?;
        Ok(Self {
            column,
            settings: Map::new(),
        })
    }

    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelSort {
    pub enabled: bool,
    pub reverse: bool,
    pub by: PanelSortBy,
}

impl Default for PanelSort {
    fn default() -> Self {
        Self {
            enabled: false,
            reverse: false,
            by: PanelSortBy::End,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultipleColumnChart {
    pub panels: Vec<Panel>,
    pub grid_layout: GridLayout,
    pub grid_column: i64,
    pub grid_column_mobile: i64,
    pub grid_column_width: i64,
    pub grid_row_height: i64,
    pub sort: PanelSort,
    /// `x` travels as `grid-lines-x`; the `x-grid` key belongs to [`Self::x_grid_all`].
    pub grid: GridDisplayGroup,
    pub grid_format: GridFormatGroup,
    pub custom_range: CustomRangeGroup,
    pub custom_ticks: CustomTicksGroup,
    pub x_grid_labels: TextAxisLabels,
    pub x_grid_all: GridDisplay,
    pub x_grid_label_all: bool,
    pub y_grid_labels: GridLabelPosition,
    pub y_grid_label_align: GridLabelAlign,
    pub base_color: Scalar,
    pub negative_color: Option<String>,
    pub color_category: ColorCategory,
    pub bar_padding: i64,
    pub plot_height: PlotHeight,
    pub show_tooltips: bool,
    pub sync_multiple_tooltips: bool,
    pub tooltip_number_format: String,
    pub label_colors: bool,
    pub show_color_key: bool,
    pub label_margin: i64,
    pub value_labels: NestedValueLabels,
    pub text_annotations: Vec<PanelAnnotation<TextAnnotation>>,
    pub range_annotations: Vec<PanelAnnotation<RangeAnnotation>>,
}

impl Default for MultipleColumnChart {
    fn default() -> Self {
        Self {
            panels: Vec::new(),
            grid_layout: GridLayout::FixedCount,
            grid_column: 2,
            grid_column_mobile: 2,
            grid_column_width: 200,
            grid_row_height: 140,
            sort: PanelSort::default(),
            grid: GridDisplayGroup::default(),
            grid_format: GridFormatGroup::default(),
            custom_range: CustomRangeGroup::default(),
            custom_ticks: CustomTicksGroup::default(),
            x_grid_labels: TextAxisLabels::On,
            x_grid_all: GridDisplay::Off,
            x_grid_label_all: false,
            y_grid_labels: GridLabelPosition::Outside,
            y_grid_label_align: GridLabelAlign::Left,
            base_color: Scalar::Int(0),
            negative_color: None,
            color_category: ColorCategory::default(),
            bar_padding: 30,
            plot_height: PlotHeight::default(),
            show_tooltips: true,
            sync_multiple_tooltips: false,
            tooltip_number_format: String::new(),
            label_colors: false,
            show_color_key: false,
            label_margin: 0,
            value_labels: NestedValueLabels {
                show: ValueLabelDisplay::Off,
                ..NestedValueLabels::default()
            },
            text_annotations: Vec::new(),
            range_annotations: Vec::new(),
        }
    }
}

impl MultipleColumnChart {
    #[must_use]
    pub fn with_panel(mut self, panel: Panel) -> Self {
        self.panels.push(panel);
        self
    }

    /// Minimum-width layout: panel count per row follows the available width.
    #[must_use]
    pub fn with_min_width(mut self, width: i64) -> Self {
        self.grid_layout = GridLayout::MinimumWidth;
        self.grid_column_width = width;
        self
    }

    #[must_use]
    pub fn with_columns(mut self, desktop: i64, mobile: i64) -> Self {
        self.grid_layout = GridLayout::FixedCount;
        self.grid_column = desktop;
        self.grid_column_mobile = mobile;
        self
    }

    #[must_use]
    pub fn sorted_by(mut self, by: PanelSortBy, reverse: bool) -> Self {
        self.sort = PanelSort {
            enabled: true,
            reverse,
            by,
        };
        self
    }

    #[must_use]
    pub fn with_text_annotation(mut self, annotation: PanelAnnotation<TextAnnotation>) -> Self {
        self.text_annotations.push(annotation);
        self
    }

    #[must_use]
    pub fn with_range_annotation(mut self, annotation: PanelAnnotation<RangeAnnotation>) -> Self {
        self.range_annotations.push(annotation);
        self
    }
}

impl FamilyModel for MultipleColumnChart {
    const CHART_TYPE: ChartType = ChartType::MultipleColumn;

    fn write_visualize(&self, visualize: &mut Map<String, Value>) {
        put(visualize, "gridLayout", &self.grid_layout);
        put(visualize, "gridColumnCount", &self.grid_column);
        put(visualize, "gridColumnCountMobile", &self.grid_column_mobile);
        put(visualize, "gridColumnMinWidth", &self.grid_column_width);
        put(visualize, "gridRowHeightFixed", &self.grid_row_height);
        visualize.insert(
            "sort".to_owned(),
            json!({
                "enabled": self.sort.enabled,
                "reverse": self.sort.reverse,
                "by": self.sort.by.as_str(),
            }),
        );

        self.grid.write_wire(visualize);
        self.grid_format.write_wire(visualize);
        self.custom_range.write_wire(visualize);
        self.custom_ticks.write_wire(visualize);

        put(visualize, "x-grid-labels", &self.x_grid_labels);
        put(visualize, "x-grid", &self.x_grid_all);
        if let Some(x) = &self.grid.x {
            let enabled = *x != GridDisplay::Off;
            visualize.insert(
                "grid-lines-x".to_owned(),
                json!({
                    "type": if enabled { x.as_str() } else { "" },
                    "enabled": enabled,
                }),
            );
        }
        if let Some(y) = &self.grid.y {
            put(visualize, "grid-lines", &(*y == GridDisplay::On));
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

        let panels: Map<String, Value> = self
            .panels
            .iter()
            .map(|panel| {
                let mut record = panel.settings.clone();
                record.insert("column".to_owned(), Value::String(panel.column.clone()));
                (panel.column.clone(), Value::Object(record))
            })
            .collect();
        visualize.insert("panels".to_owned(), Value::Object(panels));

        put(visualize, "show-tooltips", &self.show_tooltips);
        put(visualize, "syncMultipleTooltips", &self.sync_multiple_tooltips);
        put(visualize, "tooltip-number-format", &self.tooltip_number_format);
        put(visualize, "show-color-key", &self.show_color_key);
        put(visualize, "label-colors", &self.label_colors);
        put(visualize, "label-margin", &self.label_margin);
        self.value_labels.write(visualize);
        put(visualize, "xGridLabelAllColumns", &self.x_grid_label_all);

        if !self.text_annotations.is_empty() {
            visualize.insert(
                "text-annotations".to_owned(),
                serialize_panel_text_annotations(&self.text_annotations),
            );
        }
        if !self.range_annotations.is_empty() {
            visualize.insert(
                "range-annotations".to_owned(),
                serialize_panel_range_annotations(&self.range_annotations),
            );
        }
    }

    fn read_wire(wire: FamilyWire<'_>) -> ChartResult<Self> {
        let visualize = wire.visualize;
        let mut chart = Self::default();

        visualize.copy("gridLayout", &mut chart.grid_layout)?;
        visualize.copy("gridColumnCount", &mut chart.grid_column)?;
        visualize.copy("gridColumnCountMobile", &mut chart.grid_column_mobile)?;
        visualize.copy("gridColumnMinWidth", &mut chart.grid_column_width)?;
        visualize.copy("gridRowHeightFixed", &mut chart.grid_row_height)?;
        let sort = visualize.object("sort");
        chart.sort = PanelSort {
            enabled: sort.read_or("enabled", false)?,
            reverse: sort.read_or("reverse", false)?,
            by: sort.read_or("by", PanelSortBy::End)?,
        };

        chart.grid.read_wire(visualize)?;
        chart.grid_format.read_wire(visualize)?;
        chart.custom_range.read_wire(visualize)?;
        chart.custom_ticks.read_wire(visualize)?;

        visualize.copy("x-grid-labels", &mut chart.x_grid_labels)?;
        visualize.copy("x-grid", &mut chart.x_grid_all)?;
        chart.grid.x = Some(read_grid_lines_x(visualize)?);
        if !visualize.contains("y-grid") {
            if let Some(enabled) = read_grid_lines(visualize)? {
                chart.grid.y = Some(GridDisplay::from(enabled));
            }
        }
        if !read_y_axis_labels(
            visualize,
            &mut chart.y_grid_labels,
            &mut chart.y_grid_label_align,
        )? {
            visualize.copy("y-grid-labels", &mut chart.y_grid_labels)?;
            visualize.copy("y-grid-label-align", &mut chart.y_grid_label_align)?;
        }

        visualize.copy("base-color", &mut chart.base_color)?;
        if visualize.contains("negativeColor") {
            chart.negative_color = flag_value::deserialize(visualize.get("negativeColor"))?;
        }
        visualize.copy("bar-padding", &mut chart.bar_padding)?;
        chart.color_category = ColorCategory::deserialize(visualize.get("color-category"))?;
        chart.plot_height.read(visualize)?;
        chart.panels = read_panels(visualize.object("panels"))?;

        visualize.copy("show-tooltips", &mut chart.show_tooltips)?;
        visualize.copy("syncMultipleTooltips", &mut chart.sync_multiple_tooltips)?;
        visualize.copy("tooltip-number-format", &mut chart.tooltip_number_format)?;
        visualize.copy("label-colors", &mut chart.label_colors)?;
        visualize.copy("show-color-key", &mut chart.show_color_key)?;
        visualize.copy("label-margin", &mut chart.label_margin)?;
        visualize.copy("xGridLabelAllColumns", &mut chart.x_grid_label_all)?;
        chart.value_labels.read(visualize)?;

        chart.text_annotations =
            deserialize_panel_text_annotations(visualize.get("text-annotations"))?;
        chart.range_annotations =
            deserialize_panel_range_annotations(visualize.get("range-annotations"))?;
        Ok(chart)
    }

    fn validate(&self) -> ChartResult<()> {
        for (field, count) in [
            ("grid column count", self.grid_column),
            ("mobile grid column count", self.grid_column_mobile),
        ] {
            if count < 1 {
                return Err(ChartError::Validation(format!(
                    "{field} must be at least 1, got {count}"
                )));
            }
        }
        validate_non_negative("grid column width", self.grid_column_width as f64)?;
        validate_non_negative("grid row height", self.grid_row_height as f64)?;
        validate_non_negative("bar padding", self.bar_padding as f64)?;
        validate_non_negative("plot height", self.plot_height.fixed)?;

        let mut seen = HashSet::new();
        for panel in &self.panels {
            validate_column_name("panel column", &panel.column)?;
            if !seen.insert(panel.column.as_str()) {
                return Err(ChartError::Validation(format!(
                    "duplicate panel for column `{}`",
                    panel.column
                )));
            }
        }
        for panel in &self.text_annotations {
            panel.annotation.validate()?;
        }
        for panel in &self.range_annotations {
            panel.annotation.validate()?;
        }
        Ok(())
    }

    family_projection!(MultipleColumn);
}

/// `grid-lines-x: {enabled, type}`; anything else reads as off.
fn read_grid_lines_x(visualize: WireObject<'_>) -> ChartResult<GridDisplay> {
    let lines = visualize.object("grid-lines-x");
    if !lines.read_or("enabled", false)? {
        return Ok(GridDisplay::Off);
    }
    let kind: String = lines.read_or("type", String::new())?;
    Ok(if kind.is_empty() {
        GridDisplay::Ticks
    } else {
        GridDisplay::from(kind)
    })
}

/// `grid-lines` is a boolean on current charts and the string `"show"` on old ones.
fn read_grid_lines(visualize: WireObject<'_>) -> ChartResult<Option<bool>> {
    match visualize.get("grid-lines") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(enabled)) => Ok(Some(*enabled)),
        Some(Value::String(raw)) => Ok(Some(raw == "show")),
        Some(other) => Err(type_error("a boolean or \"show\"", other)),
    }
}

/// Panels arrive keyed by column; the key wins over any `column` inside the record.
fn read_panels(panels: WireObject<'_>) -> ChartResult<Vec<Panel>> {
    panels
        .entries()
        .into_iter()
        .map(|(column, record)| {
            let mut settings = record
                .as_object()
                .cloned()
                .ok_or_else(|| type_error("a panel object", record))?;
            settings.remove("column");
            Ok(Panel {
                column: column.clone(),
                settings,
            })
        })
        .collect()
}
