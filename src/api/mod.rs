mod chart;
mod data;
pub mod families;
mod json_contract;
mod registry;
mod sections;
mod validation;

pub use chart::{ChartConfig, DEFAULT_LANGUAGE, ServerInfo};
pub use data::DataTable;
pub use families::{
    AreaChart, AreaFill, ArrowChart, BarChart, BarOverlay, ChartFamily, ChoroplethMap,
    ColumnChart, FamilyModel, Line, LineChart, LineSymbol, LineValueLabels, MapTooltip,
    MultipleColumnChart, Panel, PanelSort, ScatterAxis, ScatterPlot, ScatterTooltip, SizeLegend,
    StackedBarChart,
};
pub use json_contract::{CHART_EXPORT_JSON_SCHEMA_V1, ChartExportJsonContractV1};
pub use registry::{ChartType, resolve_chart_type, supported_chart_types};
pub use sections::{
    Annotate, BaseVisualize, ColumnFormat, ColumnFormatList, Describe, Logo, Publish,
    PublishBlocks, Sharing, Transform,
};
