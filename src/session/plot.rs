use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::session::error::SessionError;
use crate::session::synth::{self, Band};
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub palette: Vec<RGBColor>,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: RGBColor(255, 255, 255),
            palette: vec![BLACK, RGBColor(90, 90, 90), RGBColor(160, 160, 160)],
        }
    }
}
/// Render the live session frame as a PNG.
pub fn render_frame_png(frame: &[f64], style: &PlotStyle) -> Result<Vec<u8>, SessionError> {
    if frame.is_empty() {
        return Err(SessionError::EmptyFrame);
    }
    let series: Vec<(&str, Vec<f64>)> = vec![("session", frame.to_vec())];
    render_series_png("Session Waveform", &series, style)
}
/// Render the three-band overlay at a given time as a PNG.
pub fn render_band_png(
    sample_count: usize,
    time_secs: f64,
    style: &PlotStyle,
) -> Result<Vec<u8>, SessionError> {
    let mut series = Vec::with_capacity(Band::ALL.len());
    for band in Band::ALL {
        series.push((band.label(), synth::band_wave(band, sample_count, time_secs)?));
    }
    render_series_png("Band Overlay", &series, style)
}
fn render_series_png(
    caption: &str,
    series: &[(&str, Vec<f64>)],
    style: &PlotStyle,
) -> Result<Vec<u8>, SessionError> {
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let y_min = series
            .iter()
            .flat_map(|(_, s)| s.iter().copied())
            .fold(0.0f64, |acc, v| acc.min(v));
        let y_max = series
            .iter()
            .flat_map(|(_, s)| s.iter().copied())
            .fold(0.0f64, |acc, v| acc.max(v));
        let y_bounds = if (y_max - y_min).abs() < f64::EPSILON {
            (-50.0, 50.0)
        } else {
            (y_min, y_max)
        };
        let x_max = series.iter().map(|(_, s)| s.len()).max().unwrap_or(0) as f64;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(caption, ("sans-serif", 20).into_font().color(&BLACK))
            .set_label_area_size(LabelAreaPosition::Left, 45)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(0f64..x_max, y_bounds.0..y_bounds.1)?;
        chart
            .configure_mesh()
            .light_line_style(&BLACK.mix(0.1))
            .draw()?;
        for (idx, (label, samples)) in series.iter().enumerate() {
            let color = style.palette[idx % style.palette.len()];
            let points = samples.iter().enumerate().map(|(i, v)| (i as f64, *v));
            chart
                .draw_series(LineSeries::new(points, &color))?
                .label(label.to_string())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
        }
        chart
            .configure_series_labels()
            .border_style(&BLACK.mix(0.2))
            .background_style(&style.background)
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, SessionError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| SessionError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn frame_render_returns_png() {
        let frame = synth::wave(64, 1.0).unwrap();
        let png = render_frame_png(&frame, &PlotStyle::default()).unwrap();
        assert!(!png.is_empty());
    }
    #[test]
    fn band_render_returns_png() {
        let png = render_band_png(64, 1.0, &PlotStyle::default()).unwrap();
        assert!(!png.is_empty());
    }
    #[test]
    fn empty_frame_is_rejected() {
        assert!(render_frame_png(&[], &PlotStyle::default()).is_err());
    }
}
