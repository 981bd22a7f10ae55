//! Catalog of raw API values.
//!
//! Open enums keep unknown strings in an `Other` variant so values introduced by
//! the service later still round-trip. Closed enums reject anything outside
//! their catalog with a validation error.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};

use super::wire::{WireValue, type_error};

macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (default $default:ident) {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
            /// Value outside the known catalog, passed through unchanged.
            Other(String),
        }

        // Equality follows the wire string, so `Other("auto")` equals `Auto`.
        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.as_str() == other.as_str()
            }
        }

        impl Eq for $name {}

        impl std::hash::Hash for $name {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                std::hash::Hash::hash(self.as_str(), state);
            }
        }

        impl $name {
            /// Every catalog value, in declaration order.
            pub const KNOWN: &'static [&'static str] = &[$($wire),+];

            #[must_use]
            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Other(raw) => raw.as_str(),
                }
            }

            #[must_use]
            pub fn is_known(&self) -> bool {
                !matches!(self, Self::Other(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl From<&str> for $name {
            fn from(raw: &str) -> Self {
                match raw {
                    $($wire => Self::$variant,)+
                    other => Self::Other(other.to_owned()),
                }
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::from(raw.as_str())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_owned()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                String::deserialize(deserializer).map(Self::from)
            }
        }

        impl WireValue for $name {
            fn to_wire(&self) -> Value {
                Value::String(self.as_str().to_owned())
            }

            fn from_wire(value: &Value) -> ChartResult<Self> {
                value
                    .as_str()
                    .map(Self::from)
                    .ok_or_else(|| type_error("a string", value))
            }
        }
    };
}

macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (default $default:ident) {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            pub const KNOWN: &'static [&'static str] = &[$($wire),+];

            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }

            pub fn parse(raw: &str) -> ChartResult<Self> {
                match raw {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(ChartError::Validation(format!(
                        "invalid {} `{other}`; expected one of {:?}",
                        stringify!($name),
                        Self::KNOWN
                    ))),
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ChartError;

            fn try_from(raw: &str) -> ChartResult<Self> {
                Self::parse(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).map_err(serde::de::Error::custom)
            }
        }

        impl WireValue for $name {
            fn to_wire(&self) -> Value {
                Value::String(self.as_str().to_owned())
            }

            fn from_wire(value: &Value) -> ChartResult<Self> {
                value
                    .as_str()
                    .ok_or_else(|| type_error("a string", value))
                    .and_then(Self::parse)
            }
        }
    };
}

open_enum! {
    /// Date display formats understood by the service.
    pub enum DateFormat (default Auto) {
        Auto => "auto",
        YearFull => "YYYY",
        YearTwoDigit => "YY",
        YearAbbreviated => "'YY",
        YearAbbreviatedFirst => "YYYY~~'YY",
        Quarter => "Q",
        YearQuarter => "YYYY [Q]Q",
        YearQuarterMultiline => "YYYY|[Q]Q",
        MonthFull => "MMMM",
        MonthAbbreviated => "MMM",
        MonthNumberPadded => "MM",
        MonthNumber => "M",
        MonthAbbreviatedWithYear => "MMM 'YY",
        YearMonthMultiline => "YYYY|MMM",
        WeekOfYearPadded => "ww",
        WeekOfYear => "w",
        WeekOfYearOrdinal => "wo",
        DayPadded => "DD",
        Day => "D",
        DayOrdinal => "Do",
        MonthDayMultiline => "MMM|DD",
        MonthDayYearFull => "MMMM D, YYYY",
        DayOfWeekFull => "dddd",
        DayOfWeekShort => "ddd",
        DayOfWeekMin => "dd",
        DayOfWeekNumber => "d",
        SportSeasonFull => "BB",
        SportSeasonAbbreviated => "B",
        Hour24Padded => "HH",
        Hour24 => "H",
        Hour12Padded => "hh",
        Hour12 => "h",
        Hour24AltPadded => "kk",
        Hour24Alt => "k",
        MinutePadded => "mm",
        Minute => "m",
        SecondPadded => "ss",
        Second => "s",
        Millisecond => "SSS",
        AmPmUpper => "A",
        AmPmLower => "a",
        TimezoneOffset => "Z",
        TimezoneOffsetNoColon => "ZZ",
        UnixSeconds => "X",
        UnixMilliseconds => "x",
        LocaleDateShort => "L",
        LocaleDateLong => "LL",
        LocaleDatetimeShort => "LLL",
        LocaleDatetimeLong => "LLLL",
        LocaleTime => "LT",
    }
}

open_enum! {
    /// Numeral.js-style number formats.
    pub enum NumberFormat (default Auto) {
        Auto => "auto",
        ThousandsWithOptionalDecimals => "0,0.[00]",
        Integer => "0",
        OneDecimal => "0.0",
        TwoDecimals => "0.00",
        ThreeDecimals => "0.000",
        UpToOneDecimal => "0.[0]",
        UpToTwoDecimals => "0.[00]",
        PercentInteger => "0%",
        PercentOneDecimal => "0.0%",
        PercentTwoDecimals => "0.00%",
        PercentUpToOneDecimal => "0.[0]%",
        PercentUpToTwoDecimals => "0.[00]%",
        ThousandsSeparator => "0,0",
        Ordinal => "0o",
        Abbreviated => "0a",
        AbbreviatedOneDecimal => "0.[0]a",
        AbbreviatedTwoDecimals => "0.[00]a",
        AbbreviatedThreeDecimals => "0.[000] a",
        PlusSign => "+0",
        PlusSignPercent => "+0%",
        CurrencyAbbreviatedWithPlus => "+$0.[00]a",
        CurrencyAbbreviated => "$0.[00]a",
        CurrencyOptionalDecimals => "$0.[00]",
        ZeroPadded => "0000",
        ParenthesesForNegatives => "(0,0.00)",
        LeadingDecimal => ".000",
        ScientificNotation => "0,0e+0",
        ScientificNotationDecimals => "0.[00]e+0",
        AbsoluteValue => "|0.0|",
    }
}

open_enum! {
    pub enum LineWidth (default Thin) {
        Thinnest => "style0",
        Thin => "style1",
        Medium => "style2",
        Thick => "style3",
        Invisible => "invisible",
    }
}

open_enum! {
    pub enum LineDash (default Solid) {
        Solid => "style0",
        ShortDash => "style1",
        MediumDash => "style2",
        LongDash => "style3",
    }
}

open_enum! {
    pub enum GridDisplay (default Off) {
        Off => "off",
        On => "on",
        Ticks => "ticks",
        Lines => "lines",
    }
}

open_enum! {
    pub enum GridLabelPosition (default Auto) {
        Auto => "auto",
        Inside => "inside",
        Outside => "outside",
        Off => "off",
        On => "on",
    }
}

open_enum! {
    pub enum GridLabelAlign (default Left) {
        Left => "left",
        Right => "right",
    }
}

open_enum! {
    pub enum LineInterpolation (default Linear) {
        Linear => "linear",
        Step => "step",
        StepAfter => "step-after",
        StepBefore => "step-before",
        Cardinal => "cardinal",
        MonotoneX => "monotone-x",
        Natural => "natural",
    }
}

open_enum! {
    pub enum ReplaceFlagsType (default Off) {
        Off => "off",
        FourByThree => "4x3",
        OneByOne => "1x1",
        Circle => "circle",
    }
}

open_enum! {
    pub enum ScatterShape (default Circle) {
        Circle => "symbolCircle",
        Square => "symbolSquare",
        Diamond => "symbolDiamond",
        Triangle => "symbolTriangle",
        TriangleDown => "symbolTriangleDown",
        Cross => "symbolCross",
        Star => "symbolStar",
        Wye => "symbolWye",
    }
}

open_enum! {
    pub enum ScatterSize (default Fixed) {
        Fixed => "fixed",
        Dynamic => "dynamic",
    }
}

open_enum! {
    /// Whether every point uses one shape or a shape column decides.
    pub enum ScatterShapeMode (default Fixed) {
        Fixed => "fixed",
        Variable => "variable",
    }
}

open_enum! {
    pub enum ScatterAxisPosition (default Bottom) {
        Bottom => "bottom",
        Top => "top",
        Left => "left",
        Right => "right",
        Zero => "zero",
        Off => "off",
    }
}

open_enum! {
    pub enum ScatterGridLines (default On) {
        On => "on",
        Off => "off",
        NoLabels => "no-labels",
        JustLabels => "just-labels",
    }
}

open_enum! {
    pub enum RegressionMethod (default Linear) {
        Linear => "linear",
        Quadratic => "quadratic",
        Cubic => "cubic",
        Exponential => "exponential",
        Logarithmic => "logarithmic",
        Power => "power",
    }
}

open_enum! {
    /// Line symbol shapes. The service also accepts d3 names such as `triangleUp`.
    pub enum SymbolShape (default Circle) {
        Circle => "circle",
        Square => "square",
        Diamond => "diamond",
        Triangle => "triangle",
        Cross => "cross",
    }
}

open_enum! {
    pub enum SymbolStyle (default Fill) {
        Hollow => "hollow",
        Fill => "fill",
    }
}

open_enum! {
    pub enum SymbolDisplay (default Last) {
        Every => "every",
        First => "first",
        Last => "last",
        Both => "both",
    }
}

open_enum! {
    /// Anchor of a text annotation relative to its position.
    pub enum TextAlign (default TopLeft) {
        TopLeft => "tl",
        TopCenter => "tc",
        TopRight => "tr",
        MiddleLeft => "ml",
        MiddleCenter => "mc",
        MiddleRight => "mr",
        BottomLeft => "bl",
        BottomCenter => "bc",
        BottomRight => "br",
    }
}

open_enum! {
    pub enum ValueLabelDisplay (default Hover) {
        Hover => "hover",
        Always => "always",
        Off => "off",
    }
}

open_enum! {
    pub enum ValueLabelPlacement (default Outside) {
        Inside => "inside",
        Outside => "outside",
        Below => "below",
    }
}

open_enum! {
    pub enum ValueLabelAlignment (default Left) {
        Left => "left",
        Right => "right",
    }
}

open_enum! {
    pub enum ValueLabelMode (default Left) {
        Left => "left",
        Diverging => "diverging",
    }
}

open_enum! {
    pub enum ConnectorLineType (default Straight) {
        Straight => "straight",
        CurveRight => "curveRight",
        CurveLeft => "curveLeft",
    }
}

open_enum! {
    pub enum StrokeType (default Solid) {
        Solid => "solid",
        Dashed => "dashed",
        Dotted => "dotted",
    }
}

open_enum! {
    pub enum BasemapProjection (default AzimuthalEqualArea) {
        AzimuthalEqualArea => "geoAzimuthalEqualArea",
        NaturalEqualArea => "geoNaturalEqualArea",
        ConicEquidistant => "geoConicEquidistant",
        ConicConformal => "geoConicConformal",
        AlbersUsa => "geoAlbersUsa",
    }
}

open_enum! {
    pub enum ColorMode (default Gradient) {
        Gradient => "gradient",
        Buckets => "buckets",
    }
}

open_enum! {
    pub enum ColorScale (default Linear) {
        Linear => "linear",
        Log => "log",
        Sqrt => "sqrt",
        Quantile => "quantile",
        Jenks => "jenks",
    }
}

impl From<bool> for GridDisplay {
    fn from(enabled: bool) -> Self {
        if enabled { Self::On } else { Self::Off }
    }
}

closed_enum! {
    pub enum PlotHeightMode (default Fixed) {
        Fixed => "fixed",
        Ratio => "ratio",
    }
}

closed_enum! {
    /// Declared type of a data column.
    pub enum ColumnType (default Auto) {
        Auto => "auto",
        Text => "text",
        Number => "number",
        Date => "date",
    }
}

closed_enum! {
    pub enum UploadMethod (default Copy) {
        Copy => "copy",
        Upload => "upload",
        GoogleSpreadsheet => "google-spreadsheet",
        ExternalData => "external-data",
    }
}

closed_enum! {
    /// Axis a range annotation is attached to.
    pub enum RangeAxis (default X) {
        X => "x",
        Y => "y",
    }
}

closed_enum! {
    pub enum RangeDisplay (default Range) {
        Line => "line",
        Range => "range",
    }
}

closed_enum! {
    pub enum TickPosition (default Top) {
        Top => "top",
        Bottom => "bottom",
    }
}

closed_enum! {
    pub enum LabelAlignment (default Left) {
        Left => "left",
        Right => "right",
    }
}

closed_enum! {
    pub enum SortAreas (default Keep) {
        Keep => "keep",
        Asc => "asc",
        Desc => "desc",
    }
}

closed_enum! {
    pub enum RangeExtent (default Nice) {
        Nice => "nice",
        Custom => "custom",
        Data => "data",
    }
}

closed_enum! {
    pub enum SortRangeBy (default End) {
        End => "end",
        Start => "start",
        Difference => "difference",
        Change => "change",
    }
}

closed_enum! {
    pub enum OverlayType (default Value) {
        Value => "value",
        Range => "range",
    }
}

closed_enum! {
    pub enum OverlayPattern (default Solid) {
        Solid => "solid",
        DiagonalUp => "diagonal-up",
        DiagonalDown => "diagonal-down",
    }
}

closed_enum! {
    pub enum GridLayout (default FixedCount) {
        FixedCount => "fixedCount",
        MinimumWidth => "minimumWidth",
    }
}

closed_enum! {
    pub enum PanelSortBy (default End) {
        Start => "start",
        End => "end",
        Range => "range",
        Diff => "diff",
        Change => "change",
        Title => "title",
    }
}

closed_enum! {
    pub enum SizeLegendPosition (default Above) {
        Above => "above",
        Below => "below",
        InsideLeftTop => "inside-left-top",
        InsideCenterTop => "inside-center-top",
        InsideRightTop => "inside-right-top",
        InsideLeftBottom => "inside-left-bottom",
        InsideCenterBottom => "inside-center-bottom",
        InsideRightBottom => "inside-right-bottom",
    }
}

closed_enum! {
    pub enum SizeLegendValuesSetting (default Auto) {
        Auto => "auto",
        Custom => "custom",
    }
}

closed_enum! {
    pub enum SizeLegendLabelPosition (default Below) {
        Below => "below",
        Right => "right",
    }
}

closed_enum! {
    pub enum SizeLegendTitlePosition (default Left) {
        Left => "left",
        Right => "right",
        Above => "above",
        Below => "below",
    }
}

closed_enum! {
    pub enum KeyColumnType (default Text) {
        Text => "text",
        Number => "number",
    }
}

closed_enum! {
    pub enum YScale (default Linear) {
        Linear => "linear",
        Log => "log",
    }
}

closed_enum! {
    /// Literal `"on"` / `"off"` toggles.
    pub enum TextAxisLabels (default On) {
        On => "on",
        Off => "off",
    }
}

/// Scaling applied to column values (`3` divides by a thousand, `-2` multiplies by a hundred).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumberDivisor {
    #[default]
    NoChange,
    Auto,
    Thousand,
    Million,
    Billion,
    TimesHundred,
    TimesThousand,
    TimesMillion,
    TimesBillion,
    TimesTrillion,
}

impl NumberDivisor {
    /// Exponent sent on the wire; `None` for `auto`.
    #[must_use]
    pub fn exponent(self) -> Option<i64> {
        match self {
            Self::NoChange => Some(0),
            Self::Auto => None,
            Self::Thousand => Some(3),
            Self::Million => Some(6),
            Self::Billion => Some(9),
            Self::TimesHundred => Some(-2),
            Self::TimesThousand => Some(-3),
            Self::TimesMillion => Some(-6),
            Self::TimesBillion => Some(-9),
            Self::TimesTrillion => Some(-12),
        }
    }

    pub fn from_exponent(exponent: i64) -> ChartResult<Self> {
        Ok(match exponent {
            0 => Self::NoChange,
            3 => Self::Thousand,
            6 => Self::Million,
            9 => Self::Billion,
            -2 => Self::TimesHundred,
            -3 => Self::TimesThousand,
            -6 => Self::TimesMillion,
            -9 => Self::TimesBillion,
            -12 => Self::TimesTrillion,
            other => {
                return Err(ChartError::Validation(format!(
                    "invalid number divisor `{other}`; expected 0, 'auto', 3, 6, 9, -2, -3, -6, -9 or -12"
                )));
            }
        })
    }

    pub fn parse(raw: &str) -> ChartResult<Self> {
        if raw == "auto" {
            return Ok(Self::Auto);
        }
        raw.trim()
            .parse::<i64>()
            .map_err(|_| {
                ChartError::Validation(format!("invalid number divisor `{raw}`"))
            })
            .and_then(Self::from_exponent)
    }
}

impl WireValue for NumberDivisor {
    fn to_wire(&self) -> Value {
        self.exponent()
            .map_or_else(|| Value::String("auto".to_owned()), Value::from)
    }

    fn from_wire(value: &Value) -> ChartResult<Self> {
        match value {
            Value::String(raw) => Self::parse(raw),
            _ => i64::from_wire(value).and_then(Self::from_exponent),
        }
    }
}

impl Serialize for NumberDivisor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NumberDivisor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Self::from_wire(&raw).map_err(serde::de::Error::custom)
    }
}

/// Annotation stroke width in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StrokeWidth {
    #[default]
    Thin = 1,
    Medium = 2,
    Thick = 3,
}

impl StrokeWidth {
    pub fn from_px(px: i64) -> ChartResult<Self> {
        match px {
            1 => Ok(Self::Thin),
            2 => Ok(Self::Medium),
            3 => Ok(Self::Thick),
            other => Err(ChartError::Validation(format!(
                "invalid stroke width `{other}`; expected 1, 2 or 3"
            ))),
        }
    }

    #[must_use]
    pub fn px(self) -> i64 {
        self as i64
    }
}

impl WireValue for StrokeWidth {
    fn to_wire(&self) -> Value {
        Value::from(self.px())
    }

    fn from_wire(value: &Value) -> ChartResult<Self> {
        i64::from_wire(value).and_then(Self::from_px)
    }
}

/// Connector line arrow head; the service encodes "no head" as a JSON `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArrowHead {
    #[default]
    Lines,
    Triangle,
    None,
}

impl WireValue for ArrowHead {
    fn to_wire(&self) -> Value {
        match self {
            Self::Lines => Value::String("lines".to_owned()),
            Self::Triangle => Value::String("triangle".to_owned()),
            Self::None => Value::Bool(false),
        }
    }

    fn from_wire(value: &Value) -> ChartResult<Self> {
        match value {
            Value::Bool(false) => Ok(Self::None),
            Value::String(raw) if raw == "lines" => Ok(Self::Lines),
            Value::String(raw) if raw == "triangle" => Ok(Self::Triangle),
            other => Err(ChartError::Validation(format!(
                "invalid arrow head `{other}`; expected \"lines\", \"triangle\" or false"
            ))),
        }
    }
}
