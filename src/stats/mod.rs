pub mod export_csv;
pub mod histogram;
pub mod summary;
pub mod survival;

pub use export_csv::{export_series, write_series, ExportError};
pub use histogram::{histogram, HistogramBin, BIN_SIZE_HOURS};
pub use summary::{estimate_rows, estimate_view, EstimateRow, EstimateView};
pub use survival::{chart_series, series_name, survival_curve, ChartSeries, CurvePoint};
