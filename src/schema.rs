//! Feature schema for the tumor classifier.
//!
//! The order of [`FEATURE_NAMES`] is the column order the forest was trained
//! on. Vector position, not name, binds a value to the trained model.

/// Number of features the model consumes.
pub const FEATURE_COUNT: usize = 30;

/// All features in training order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    // Mean values (10)
    "radius_mean",
    "texture_mean",
    "perimeter_mean",
    "area_mean",
    "smoothness_mean",
    "compactness_mean",
    "concavity_mean",
    "concave points_mean",
    "symmetry_mean",
    "fractal_dimension_mean",
    // Standard errors (10)
    "radius_se",
    "texture_se",
    "perimeter_se",
    "area_se",
    "smoothness_se",
    "compactness_se",
    "concavity_se",
    "concave points_se",
    "symmetry_se",
    "fractal_dimension_se",
    // Worst values (10)
    "radius_worst",
    "texture_worst",
    "perimeter_worst",
    "area_worst",
    "smoothness_worst",
    "compactness_worst",
    "concavity_worst",
    "concave points_worst",
    "symmetry_worst",
    "fractal_dimension_worst",
];

/// Features collected from the user, in display order.
pub const VISIBLE_FEATURES: [&str; 10] = [
    "radius_mean",
    "perimeter_mean",
    "area_mean",
    "concave points_mean",
    "concavity_mean",
    "compactness_mean",
    "radius_worst",
    "perimeter_worst",
    "area_worst",
    "concave points_worst",
];

/// Value the presentation layer submits for every hidden feature.
pub const HIDDEN_DEFAULT: &str = "0";

/// Inclusive upper bounds, visible features only.
const MAX_VALUES: [(&str, f64); 10] = [
    ("radius_mean", 30.0),
    ("perimeter_mean", 190.0),
    ("area_mean", 2500.0),
    ("concave points_mean", 0.2),
    ("concavity_mean", 0.6),
    ("compactness_mean", 0.35),
    ("radius_worst", 40.0),
    ("perimeter_worst", 270.0),
    ("area_worst", 4000.0),
    ("concave points_worst", 0.35),
];

/// Upper bound for `name`, if one is enforced.
pub fn max_value(name: &str) -> Option<f64> {
    MAX_VALUES
        .iter()
        .find(|(feature, _)| *feature == name)
        .map(|(_, max)| *max)
}

/// Position of `name` in the training order.
pub fn position(name: &str) -> Option<usize> {
    FEATURE_NAMES.iter().position(|feature| *feature == name)
}

pub fn is_visible(name: &str) -> bool {
    VISIBLE_FEATURES.contains(&name)
}

/// Features the presentation layer pre-fills with [`HIDDEN_DEFAULT`].
pub fn hidden_features() -> impl Iterator<Item = &'static str> {
    FEATURE_NAMES.iter().copied().filter(|name| !is_visible(name))
}

/// Human-readable label: underscores become spaces and only the first letter
/// is upper-cased ("concave points_mean" -> "Concave points mean").
pub fn display_name(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
