//! Compiled-in settings: data sources, category boundaries, quality rule.

pub const WHITE_WINE_URL: &str =
    "https://raw.githubusercontent.com/mnogoruk/visualization/main/winequality-white.csv";
pub const RED_WINE_URL: &str =
    "https://raw.githubusercontent.com/mnogoruk/visualization/main/winequality-red.csv";

/// Field separator of both source tables.
pub const SOURCE_DELIMITER: u8 = b';';

/// Upper residual-sugar bounds (g/dm³, inclusive) of dry, semi-dry and
/// semi-sweet wines. Anything above the last is sweet.
pub const DRY_MAX_SUGAR: f64 = 3.0;
pub const SEMI_DRY_MAX_SUGAR: f64 = 7.0;
pub const SEMI_SWEET_MAX_SUGAR: f64 = 12.0;

/// Four thresholds a wine must strictly pass to count as meeting a quality bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityRule {
    pub min_alcohol: f64,
    pub max_volatile_acidity: f64,
    pub min_ph: f64,
    pub max_ph: f64,
}

pub const EUROPEAN_QUALITY: QualityRule = QualityRule {
    min_alcohol: 8.5,
    max_volatile_acidity: 1.2,
    min_ph: 2.8,
    max_ph: 3.6,
};

/// Initial and minimum size of each figure window.
pub const WINDOW_SIZE: [f32; 2] = [1200.0, 640.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [600.0, 400.0];
