//! Text rendering of sampled functions.

use super::Plot;

/// Appearance of rendered charts.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotStyle {
    /// Chart width in columns.
    pub width: usize,
    /// Chart height in rows.
    pub height: usize,
    pub marker: char,
    pub horizontal_axis: char,
    pub vertical_axis: char,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 72,
            height: 20,
            marker: '*',
            horizontal_axis: '-',
            vertical_axis: '|',
        }
    }
}

/// Draws plots as character grids.
#[derive(Debug, Clone)]
pub struct Renderer {
    style: PlotStyle,
}

impl Renderer {
    pub fn new(style: PlotStyle) -> Self {
        // A 1x1 grid cannot show an axis and a point apart.
        let style = PlotStyle {
            width: style.width.max(2),
            height: style.height.max(2),
            ..style
        };
        Self { style }
    }

    /// Render a chart with a title line and a range footer.
    pub fn render(&self, plot: &Plot) -> String {
        let mut out = format!("f(x) = {}\n", plot.expression);

        let Some((y_min, y_max)) = y_bounds(plot) else {
            out.push_str("(function is undefined over the whole range)\n");
            return out;
        };

        let PlotStyle { width, height, .. } = self.style;
        let (x_lo, x_hi) = if plot.start <= plot.end {
            (plot.start, plot.end)
        } else {
            (plot.end, plot.start)
        };

        let column = |x: f64| scale(x, x_lo, x_hi, width);
        // Row 0 is the top of the chart.
        let row = |y: f64| height - 1 - scale(y, y_min, y_max, height);

        let mut grid = vec![vec![' '; width]; height];

        if y_min <= 0.0 && 0.0 <= y_max {
            let r = row(0.0);
            for cell in grid[r].iter_mut() {
                *cell = self.style.horizontal_axis;
            }
        }
        if x_lo <= 0.0 && 0.0 <= x_hi {
            let c = column(0.0);
            for line in grid.iter_mut() {
                line[c] = self.style.vertical_axis;
            }
        }
        for (x, y) in plot.points() {
            grid[row(y)][column(x)] = self.style.marker;
        }

        for line in grid {
            out.extend(line);
            out.push('\n');
        }
        out.push_str(&format!(
            "x: [{}, {}]  y: [{}, {}]",
            x_lo, x_hi, y_min, y_max
        ));
        let gaps = plot.gaps();
        if gaps > 0 {
            out.push_str(&format!("  ({} undefined)", gaps));
        }
        out.push('\n');
        out
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(PlotStyle::default())
    }
}

/// Smallest and largest defined `y`, widened when the function is flat.
fn y_bounds(plot: &Plot) -> Option<(f64, f64)> {
    let (min, max) = plot
        .points()
        .fold(None, |acc: Option<(f64, f64)>, (_, y)| match acc {
            None => Some((y, y)),
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
        })?;
    if min == max {
        Some((min - 1.0, max + 1.0))
    } else {
        Some((min, max))
    }
}

/// Map `v` from `[lo, hi]` onto a cell index in `0..cells`.
fn scale(v: f64, lo: f64, hi: f64, cells: usize) -> usize {
    let t = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
    ((t * (cells - 1) as f64).round() as usize).min(cells - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::sample;

    fn small() -> Renderer {
        Renderer::new(PlotStyle {
            width: 11,
            height: 5,
            ..PlotStyle::default()
        })
    }

    #[test]
    fn test_render_dimensions() {
        let plot = sample("x", -1.0, 1.0, 11).unwrap();
        let chart = small().render(&plot);
        let lines: Vec<&str> = chart.lines().collect();
        // title + 5 rows + footer
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "f(x) = x");
        assert!(lines[1..6].iter().all(|l| l.chars().count() == 11));
        assert_eq!(lines[6], "x: [-1, 1]  y: [-1, 1]");
    }

    #[test]
    fn test_render_line_hits_corners() {
        let plot = sample("x", -1.0, 1.0, 11).unwrap();
        let chart = small().render(&plot);
        let lines: Vec<&str> = chart.lines().collect();
        assert!(lines[1].ends_with('*'));
        assert!(lines[5].starts_with('*'));
    }

    #[test]
    fn test_render_draws_axes() {
        let plot = sample("x**2 - 1", -1.0, 1.0, 3).unwrap();
        let chart = small().render(&plot);
        assert!(chart.contains('|'));
        assert!(chart.contains("----"));
    }

    #[test]
    fn test_render_reports_gaps() {
        let plot = sample("1 / x", -1.0, 1.0, 3).unwrap();
        assert!(small().render(&plot).contains("(1 undefined)"));
    }

    #[test]
    fn test_render_undefined_everywhere() {
        let plot = sample("sqrt(x)", -2.0, -1.0, 4).unwrap();
        assert!(small().render(&plot).contains("undefined over the whole range"));
    }

    #[test]
    fn test_custom_marker() {
        let renderer = Renderer::new(PlotStyle {
            marker: 'o',
            ..PlotStyle::default()
        });
        let plot = sample("x + 5", 0.0, 1.0, 10).unwrap();
        assert!(renderer.render(&plot).contains('o'));
    }
}
