// src/utils/qr.rs

use qrcode::{QrCode, render::svg};

use crate::error::AppError;

/// Renders `data` as an inline SVG QR code.
///
/// SVG keeps the response self-contained: no image endpoint, no raster
/// scaling issues when the code is projected for a whole classroom.
pub fn svg_qr(data: &str) -> Result<String, AppError> {
    let code = QrCode::new(data.as_bytes())
        .map_err(|e| AppError::Internal(format!("QR encoding failed: {e}")))?;

    Ok(code
        .render::<svg::Color>()
        .min_dimensions(200, 200)
        .build())
}
