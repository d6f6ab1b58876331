//! Green contribution certificate
//!
//! Fixed A4 layout with the recipient, cumulative totals and an issue
//! date. Built-in Helvetica only; totals are formatted by the caller's
//! locale-free conventions (plain numbers).

use crate::error::{RecircleError, Result};
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;

pub struct CertificateData<'a> {
    pub username: &'a str,
    pub total_points: u64,
    pub total_co2_kg: f64,
    /// e.g. "2026-08-07"
    pub issue_date: &'a str,
}

pub fn generate_certificate(data: &CertificateData, output_path: &Path) -> Result<()> {
    let (doc, page1, layer1) = PdfDocument::new(
        "Green Contribution Certificate",
        Mm(A4_WIDTH_MM),
        Mm(A4_HEIGHT_MM),
        "Layer 1",
    );

    let layer = doc.get_page(page1).get_layer(layer1);

    let title_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RecircleError::PdfGeneration(format!("font: {:?}", e)))?;
    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RecircleError::PdfGeneration(format!("font: {:?}", e)))?;

    let center = |width_factor: f32| Mm(A4_WIDTH_MM * width_factor);

    layer.use_text(
        "GREEN CONTRIBUTION CERTIFICATE",
        20.0,
        center(0.13),
        Mm(A4_HEIGHT_MM - 70.0),
        &title_font,
    );
    layer.use_text(
        "This certifies that",
        12.0,
        center(0.38),
        Mm(A4_HEIGHT_MM - 100.0),
        &body_font,
    );
    layer.use_text(
        data.username,
        18.0,
        center(0.40),
        Mm(A4_HEIGHT_MM - 115.0),
        &title_font,
    );
    layer.use_text(
        format!("has earned {} green points", data.total_points),
        12.0,
        center(0.34),
        Mm(A4_HEIGHT_MM - 135.0),
        &body_font,
    );
    layer.use_text(
        format!(
            "and saved an estimated {:.2} kg of CO2 from disposal",
            data.total_co2_kg
        ),
        12.0,
        center(0.26),
        Mm(A4_HEIGHT_MM - 147.0),
        &body_font,
    );
    layer.use_text(
        format!("Issued on {}", data.issue_date),
        10.0,
        center(0.40),
        Mm(50.0),
        &body_font,
    );
    layer.use_text(
        "recircle - circular economy rewards",
        8.0,
        center(0.36),
        Mm(40.0),
        &body_font,
    );

    let file = File::create(output_path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| RecircleError::PdfGeneration(format!("save failed: {:?}", e)))?;

    Ok(())
}
