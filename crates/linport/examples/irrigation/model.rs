// @generated by linport 0.1.0. Do not edit.
//
// IrrigationModel: linear regression over 9 features.

use linport::{LinearModel, LinearModelPredict};

/// Number of input features.
pub const N_FEATURES: usize = 9;

/// Trained coefficients and intercept.
pub static IRRIGATION_MODEL: LinearModel<N_FEATURES> = LinearModel::new(
    [
        0.38659298, // 0: temperatura
        -0.847659, // 1: humidade
        -0.0, // 2: ano
        0.02806151, // 3: dia_sin
        0.9462794, // 4: dia_cos
        0.0, // 5: mes_sin
        0.0, // 6: mes_cos
        0.02944015, // 7: hora_sin
        0.21587318, // 8: hora_cos
    ],
    2.7285223,
);

/// Predict from a feature vector of exactly `N_FEATURES` values.
#[inline]
pub fn predict(features: &[f32; N_FEATURES]) -> f32 {
    IRRIGATION_MODEL.predict(features)
}
