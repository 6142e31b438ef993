use gnuplot::{AutoOption, AxesCommon, Figure};
use ndarray::{ArrayBase, Data, Ix1, Ix2};

// Keeps zero-valued bins plottable on a log scale.
const EPSILON: f64 = 1e-8;


/// Renders a per-frame sequence (e.g. the pitch track) as a line plot.
pub fn track<D>(xs: &ArrayBase<D, Ix1>)
where
    D: Data<Elem = f64>,
{
    let n = xs.len();

    let mut fig = Figure::new();
    let ax = fig.axes2d();
    ax.set_x_range(AutoOption::Fix(0.0), AutoOption::Fix(n as f64));
    ax.lines((0..n).map(|i| i as f64), xs.iter(), &[]);
    fig.show();
}

/// Renders a frames x bins matrix as an image, frames on the x axis and
/// bins on the y axis. With `log` set, values are displayed on a natural
/// log scale.
pub fn matrix<D>(m: &ArrayBase<D, Ix2>, log: bool)
where
    D: Data<Elem = f64>,
{
    let (frames, bins) = m.dim();
    let visual = if log {
        m.mapv(|v| (v + EPSILON).ln())
    } else {
        m.mapv(|v| v + EPSILON)
    };

    let mut fig = Figure::new();
    let ax = fig.axes2d();
    ax.set_palette(gnuplot::HELIX);
    ax.set_x_range(AutoOption::Fix(0.0), AutoOption::Fix(frames as f64));
    ax.set_y_range(AutoOption::Fix(0.0), AutoOption::Fix(bins as f64));
    ax.image(
        visual.t().iter(),
        bins,
        frames,
        Some((0.0, 0.0, frames as f64, bins as f64)),
        &[],
    );
    fig.show();
}
