/// The three descriptive analyses of the merged wine table.
///
/// Each one is split the same way: a pure `summarize` step returning plain
/// numbers, a `figure` step turning them into charts, and `run`, which logs
/// the numbers and blocks on the figure window.
pub mod correlation;
pub mod european;
pub mod sweetness;

/// Column names of the source tables used by the analyses.
pub mod columns {
    pub const ALCOHOL: &str = "alcohol";
    pub const RESIDUAL_SUGAR: &str = "residual sugar";
    pub const VOLATILE_ACIDITY: &str = "volatile acidity";
    pub const PH: &str = "pH";
    pub const QUALITY: &str = "quality";
}
