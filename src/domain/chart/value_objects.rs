use serde::Serialize;

/// Value Object - pixel size of the chart container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerSize {
    pub width: u32,
    pub height: u32,
}

impl ContainerSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Layout has not happened yet while either side is zero
    pub fn is_laid_out(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Crosshair behaviour, encoded the way the widget numbers it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrosshairMode {
    Normal = 0,
}

impl Serialize for CrosshairMode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutOptions {
    pub background_color: String,
    pub text_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineColor {
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridOptions {
    pub vert_lines: LineColor,
    pub horz_lines: LineColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrosshairOptions {
    pub mode: CrosshairMode,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeScaleOptions {
    pub border_color: String,
    pub time_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceScaleOptions {
    pub border_color: String,
    pub scale_type: String,
}

/// Chart-level options passed to `createChart` (width/height added at creation)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub layout: LayoutOptions,
    pub grid: GridOptions,
    pub crosshair: CrosshairOptions,
    pub time_scale: TimeScaleOptions,
    pub right_price_scale: PriceScaleOptions,
}

/// Options passed to `addCandlestickSeries`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandlestickStyle {
    pub up_color: String,
    pub down_color: String,
    pub border_visible: bool,
    pub wick_up_color: String,
    pub wick_down_color: String,
}

/// Value Object - fixed visual theme of the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartTheme {
    pub chart: ChartOptions,
    pub candles: CandlestickStyle,
}

const GRID_LINE: &str = "rgba(255, 255, 255, 0.1)";
const SCALE_BORDER: &str = "rgba(255, 255, 255, 0.2)";
const UP: &str = "#26a69a";
const DOWN: &str = "#ef5350";

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            chart: ChartOptions {
                layout: LayoutOptions {
                    background_color: "#16213e".to_string(),
                    text_color: "#d1d4dc".to_string(),
                },
                grid: GridOptions {
                    vert_lines: LineColor { color: GRID_LINE.to_string() },
                    horz_lines: LineColor { color: GRID_LINE.to_string() },
                },
                crosshair: CrosshairOptions { mode: CrosshairMode::Normal },
                time_scale: TimeScaleOptions {
                    border_color: SCALE_BORDER.to_string(),
                    time_visible: true,
                },
                right_price_scale: PriceScaleOptions {
                    border_color: SCALE_BORDER.to_string(),
                    scale_type: "log".to_string(),
                },
            },
            candles: CandlestickStyle {
                up_color: UP.to_string(),
                down_color: DOWN.to_string(),
                border_visible: false,
                wick_up_color: UP.to_string(),
                wick_down_color: DOWN.to_string(),
            },
        }
    }
}
