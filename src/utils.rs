use plotters::prelude::*;

/// Index of the largest value, ties resolved to the lowest index.
pub fn argmax<T: PartialOrd>(values: &[T]) -> usize {
    let mut result: usize = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if v > &values[result] {
            result = i;
        }
    }
    result
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

pub fn moving_average(window: usize, vector: &[f64]) -> Vec<f64> {
    let window: usize = window.max(1);
    let mut aux: usize = 0;
    let mut result: Vec<f64> = vec![];
    while aux < vector.len() {
        let end: usize = (aux + window).min(vector.len());
        let slice: &[f64] = &vector[aux..end];
        let r: f64 = slice.iter().sum();
        result.push(r / slice.len() as f64);
        aux = end;
    }
    result
}

pub fn plot_moving_average(
    values: &[Vec<f64>],
    colors: &[&RGBColor],
    legends: &[&str],
    title: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let path: String = format!("{}.png", title.to_lowercase().replace(' ', "_"));
    let longest: usize = values.iter().map(|v| v.len()).max().unwrap_or(0).max(1);
    let mut low: f64 = values.iter().flatten().copied().fold(f64::INFINITY, f64::min);
    let mut high: f64 = values.iter().flatten().copied().fold(f64::NEG_INFINITY, f64::max);
    if !low.is_finite() || !high.is_finite() {
        low = 0.0;
        high = 1.0;
    }
    if low == high {
        high = low + 1.0;
    }

    let root = BitMapBackend::new(&path, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0..longest, low..high)?;
    chart.configure_mesh().draw()?;

    for ((series, color), legend) in values.iter().zip(colors).zip(legends) {
        let color: RGBColor = **color;
        chart
            .draw_series(LineSeries::new(
                series.iter().copied().enumerate(),
                &color,
            ))?
            .label(*legend)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}
