use crate::svg::{self, opts, Params, Tag};

/// The basic plotting primitive. Can be converted into a Vec of `svg::Tag`.
trait Element {
    /// Convert `Element` into a Vec of `svg::Tag`.
    ///
    /// All elements are placed relative to an axis which itself is sized and
    /// placed relative to a figure. For correct placement, the axis and figure
    /// thus have to be passed into the function.
    fn to_tags(&self, ax: &Axis, fig: &Figure) -> Vec<Box<dyn svg::RenderTag>>;
}

// ----------------------------------------------------------------------------
//
//
// Figure
//
//
// ----------------------------------------------------------------------------

/// The Figure defines the overall size of a plot and holds the axes and an
/// optional title.
pub struct Figure {
    width: u64,
    height: u64,
    title: String,
    axes: Vec<Axis>,
}

impl Figure {
    pub fn empty(width: u64, height: u64) -> Self {
        Self {
            width,
            height,
            title: String::new(),
            axes: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        title.clone_into(&mut self.title);
        self
    }

    pub fn add_axis(&mut self, ax: Axis) {
        self.axes.push(ax);
    }

    /// Render this `Figure` to raw SVG markup.
    pub fn render(&self) -> String {
        let mut root = Tag::<svg::Svg>::new(self.width, self.height, None);
        root.add_child(Tag::<svg::Rect>::new(
            0.0,
            0.0,
            self.width as f64,
            self.height as f64,
            opts(&[("fill", "white")]),
        ));
        if !self.title.is_empty() {
            root.add_child(Tag::<svg::Text>::new(
                self.width as f64 / 2.0,
                self.height as f64 * 0.06,
                0.0,
                &self.title,
                opts(&[("text-anchor", "middle"), ("font-size", "14pt")]),
            ));
        }
        for ax in self.axes.iter() {
            root.add_children(ax.to_tags(self));
        }
        svg::render(&root)
    }
}

impl Default for Figure {
    fn default() -> Self {
        Self::empty(800, 600)
    }
}

// ----------------------------------------------------------------------------
//
//
// Axis
//
//
// ----------------------------------------------------------------------------

/// The container for plots and their labels.
pub struct Axis {
    draw_legend: bool,
    xlabel: String,
    ylabel: String,
    limits: [f64; 4],
    plots: Vec<LinePlot>,
    pub ticks: Ticks,
    /// u coordinate for placement in Figure, normalized to [0, 1]
    u: f64,
    /// v coordinate for placement in Figure, normalized to [0, 1]
    v: f64,
    width: f64,
    height: f64,
}

impl Axis {
    pub fn new(u: f64, v: f64, width: f64, height: f64) -> Self {
        let mut ax = Axis {
            u,
            v,
            width,
            height,
            limits: [0.0, 1.0, 0.0, 1.0],
            ticks: Ticks::default(),
            draw_legend: false,
            plots: Vec::new(),
            xlabel: String::new(),
            ylabel: String::new(),
        };
        ax.autoticks();
        ax
    }

    pub fn xlim(&mut self, xmin: f64, xmax: f64) {
        self.limits[0] = xmin;
        self.limits[1] = xmax;
        self.autoticks();
    }

    pub fn ylim(&mut self, ymin: f64, ymax: f64) {
        self.limits[2] = ymin;
        self.limits[3] = ymax;
        self.autoticks();
    }

    pub fn add_line(&mut self, line: LinePlot) {
        self.plots.push(line);
    }

    pub fn with_xlim(mut self, xmin: f64, xmax: f64) -> Self {
        self.xlim(xmin, xmax);
        self
    }

    pub fn with_ylim(mut self, ymin: f64, ymax: f64) -> Self {
        self.ylim(ymin, ymax);
        self
    }

    pub fn with_xlabel(mut self, text: &str) -> Self {
        text.clone_into(&mut self.xlabel);
        self
    }

    pub fn with_ylabel(mut self, text: &str) -> Self {
        text.clone_into(&mut self.ylabel);
        self
    }

    pub fn with_legend(mut self, flag: bool) -> Self {
        self.draw_legend = flag;
        self
    }

    pub fn insert_into(self, fig: &mut Figure) {
        fig.add_axis(self);
    }

    pub fn limits(&self) -> [f64; 4] {
        self.limits
    }

    fn autoticks(&mut self) {
        let [xmin, xmax, ymin, ymax] = self.limits_ordered();
        self.ticks.xpos = tick_positions(xmin, xmax);
        self.ticks.ypos = tick_positions(ymin, ymax);
    }

    fn transformations(
        &self,
        fig: &Figure,
    ) -> (
        impl Fn(f64) -> f64,
        impl Fn(f64) -> f64,
        impl Fn(f64) -> f64,
        impl Fn(f64) -> f64,
    ) {
        let (fw, fh) = (fig.width as f64, fig.height as f64);
        let (au, av, aw, ah) = (self.u, self.v, self.width, self.height);
        let [xmin, xmax, ymin, ymax] = self.limits;

        let x = move |u| fw * (au + u * aw);
        let y = move |v| fh * (av + v * ah);
        let u = move |x| (x - xmin) / (xmax - xmin);
        let v = move |y| 1.0 - (y - ymin) / (ymax - ymin);

        (x, y, u, v)
    }

    /// Convert `Axis` into a Vec of `svg::Tag`.
    ///
    /// Since we only need the figure for placing `Axis`, `Axis` is not an
    /// `Element` and implements this function without using the trait.
    fn to_tags(&self, fig: &Figure) -> Vec<Box<dyn svg::RenderTag>> {
        let (w, h) = (fig.width as f64, fig.height as f64);
        let mut children: Vec<Box<dyn svg::RenderTag>> = vec![Box::new(Tag::<svg::Rect>::new(
            w * self.u,
            h * self.v,
            w * self.width,
            h * self.height,
            opts(&[("fill", "none"), ("stroke", "black")]),
        ))];

        children.extend(self.ticks.to_tags(self, fig));
        for plot in self.plots.iter() {
            children.extend(plot.to_tags(self, fig));
        }

        if !self.xlabel.is_empty() {
            let xlabel = Label {
                text: self.xlabel.to_owned(),
                u: 0.5,
                v: -0.1,
                angle: 0.0,
                style: element_opts(&[("text-anchor", "middle")]),
            };
            children.extend(xlabel.to_tags(self, fig));
        }
        if !self.ylabel.is_empty() {
            let width = self.ticks.y_tick_label_character_width();
            let ylabel = Label {
                text: self.ylabel.to_owned(),
                u: -0.06 - 0.01 * width as f64,
                v: 0.5,
                angle: 270.0,
                style: element_opts(&[("text-anchor", "middle")]),
            };
            children.extend(ylabel.to_tags(self, fig));
        }
        if self.draw_legend {
            children.extend(self.legend_tags(fig));
        }

        let mut group = Tag::<svg::Group>::new(None);
        group.add_children(children);
        vec![Box::new(group)]
    }

    fn legend_tags(&self, fig: &Figure) -> Vec<Box<dyn svg::RenderTag>> {
        let (x, y, _, _) = self.transformations(fig);
        let mut tags: Vec<Box<dyn svg::RenderTag>> = Vec::new();
        for (i, plot) in self.plots.iter().filter(|p| !p.name.is_empty()).enumerate() {
            let color = plot.color();
            let v = 0.06 + i as f64 * 0.06;
            tags.push(Box::new(Tag::<svg::Line>::new(
                x(0.80),
                x(0.85),
                y(v),
                y(v),
                opts(&[("stroke", color), ("stroke-width", "2")]),
            )));
            tags.push(Box::new(Tag::<svg::Text>::new(
                x(0.86),
                y(v + 0.012),
                0.0,
                &plot.name,
                opts(&[("fill", color), ("font-size", "10pt")]),
            )));
        }
        tags
    }

    fn limits_ordered(&self) -> [f64; 4] {
        let [xmin, xmax, ymin, ymax] = self.limits;
        [xmin.min(xmax), xmin.max(xmax), ymin.min(ymax), ymin.max(ymax)]
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        let [xmin, xmax, ymin, ymax] = self.limits_ordered();
        xmin <= x && x <= xmax && ymin <= y && y <= ymax
    }

    /// Split the data of `line` into runs of points that can be drawn.
    ///
    /// A run ends at every point that is NaN, infinite or outside of the axis
    /// limits; such points are left out, leaving a gap in the line.
    fn segment_lineplot_data(&self, line: &LinePlot) -> Vec<Vec<(f64, f64)>> {
        let mut segments = vec![Vec::new()];
        for (&x, &y) in line.xs.iter().zip(line.ys.iter()) {
            if x.is_finite() && y.is_finite() && self.contains(x, y) {
                if let Some(current) = segments.last_mut() {
                    current.push((x, y));
                }
            } else if segments.last().is_some_and(|s| !s.is_empty()) {
                segments.push(Vec::new());
            }
        }
        segments.retain(|s| !s.is_empty());
        segments
    }
}

impl Default for Axis {
    fn default() -> Self {
        Axis::new(0.125, 0.12, 0.8, 0.74)
    }
}

// ----------------------------------------------------------------------------
//
//
// Label
//
//
// ----------------------------------------------------------------------------

/// Text placed relative to the axis (used for the axes labels).
struct Label {
    text: String,
    u: f64,
    v: f64,
    angle: f64,
    style: Params,
}

impl Element for Label {
    fn to_tags(&self, ax: &Axis, fig: &Figure) -> Vec<Box<dyn svg::RenderTag>> {
        let (x, y, _, _) = ax.transformations(fig);
        vec![Box::new(Tag::<svg::Text>::new(
            x(self.u),
            y(1.0 - self.v),
            self.angle,
            &self.text,
            Some(self.style.clone()),
        ))]
    }
}

// ----------------------------------------------------------------------------
//
//
// Ticks
//
//
// ----------------------------------------------------------------------------

/// The ticks of the axes. Includes ticks and tick labels.
pub struct Ticks {
    pub xpos: Vec<f64>,
    pub ypos: Vec<f64>,
    color: String,
    linewidth: f64,
}

impl Default for Ticks {
    fn default() -> Self {
        Self {
            xpos: Vec::new(),
            ypos: Vec::new(),
            color: "black".to_string(),
            linewidth: 1.0,
        }
    }
}

impl Element for Ticks {
    fn to_tags(&self, ax: &Axis, fig: &Figure) -> Vec<Box<dyn svg::RenderTag>> {
        let (x, y, u, v) = ax.transformations(fig);
        let linewidth = format!("{}", self.linewidth);
        let style = [("stroke", &self.color[..]), ("stroke-width", &linewidth[..])];
        let grid_style = [("stroke", "lightgray"), ("stroke-width", &linewidth[..])];

        let mut tags: Vec<Box<dyn svg::RenderTag>> = Vec::new();
        for (xi, label) in self.xpos.iter().zip(format_ticks(&self.xpos)) {
            let xt = x(u(*xi));
            tags.push(Box::new(Tag::<svg::Line>::new(xt, xt, y(0.0), y(1.0), opts(&grid_style))));
            tags.push(Box::new(Tag::<svg::Line>::new(xt, xt, y(0.99), y(1.01), opts(&style))));
            tags.push(Box::new(Tag::<svg::Text>::new(
                xt,
                y(1.05),
                0.0,
                &label,
                opts(&[("text-anchor", "middle")]),
            )));
        }
        for (yi, label) in self.ypos.iter().zip(format_ticks(&self.ypos)) {
            let yt = y(v(*yi));
            tags.push(Box::new(Tag::<svg::Line>::new(x(0.0), x(1.0), yt, yt, opts(&grid_style))));
            tags.push(Box::new(Tag::<svg::Line>::new(x(-0.005), x(0.005), yt, yt, opts(&style))));
            tags.push(Box::new(Tag::<svg::Text>::new(
                x(-0.015),
                yt + 4.0,
                0.0,
                &label,
                opts(&[("text-anchor", "end")]),
            )));
        }
        tags
    }
}

impl Ticks {
    fn y_tick_label_character_width(&self) -> usize {
        format_ticks(&self.ypos)
            .iter()
            .map(|lab| lab.len())
            .max()
            .unwrap_or(0)
    }
}

// ----------------------------------------------------------------------------
//
//
// LinePlot
//
//
// ----------------------------------------------------------------------------

#[derive(Clone)]
pub struct LinePlot {
    xs: Vec<f64>,
    ys: Vec<f64>,
    style: Params,
    name: String,
    marker_radius: Option<f64>,
}

impl LinePlot {
    pub fn new(xs: &[f64], ys: &[f64]) -> Self {
        Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            style: element_opts(&[("stroke", "black")]),
            name: String::new(),
            marker_radius: None,
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.style.insert("stroke".to_string(), color.to_string());
        self
    }

    pub fn with_linewidth(mut self, linewidth: f64) -> Self {
        self.style
            .insert("stroke-width".to_string(), format!("{linewidth}"));
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        name.clone_into(&mut self.name);
        self
    }

    /// Draw a circle of `radius` at every data point.
    pub fn with_markers(mut self, radius: f64) -> Self {
        self.marker_radius = Some(radius);
        self
    }

    pub fn insert_into(self, ax: &mut Axis) {
        ax.add_line(self);
    }

    fn color(&self) -> &str {
        self.style.get("stroke").map(|c| &c[..]).unwrap_or("black")
    }
}

impl Element for LinePlot {
    fn to_tags(&self, ax: &Axis, fig: &Figure) -> Vec<Box<dyn svg::RenderTag>> {
        let (x, y, u, v) = ax.transformations(fig);
        let mut svg_tags: Vec<Box<dyn svg::RenderTag>> = Vec::new();
        for segment in ax.segment_lineplot_data(self) {
            if segment.len() > 1 {
                svg_tags.push(Box::new(Tag::<svg::Polyline>::new(
                    segment.iter().map(|(xi, _)| x(u(*xi))),
                    segment.iter().map(|(_, yi)| y(v(*yi))),
                    Some(self.style.clone()),
                )));
            }
            if let Some(radius) = self.marker_radius {
                for (xi, yi) in segment.iter() {
                    svg_tags.push(Box::new(Tag::<svg::Circle>::new(
                        x(u(*xi)),
                        y(v(*yi)),
                        radius,
                        opts(&[("fill", self.color())]),
                    )));
                }
            }
        }
        svg_tags
    }
}

// ----------------------------------------------------------------------------
//
//
// Helpers
//
//
// ----------------------------------------------------------------------------

/// Generate svg::Params from a slice of pairs.
pub fn element_opts(items: &[(&str, &str)]) -> Params {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Tick positions at a "nice" step (1, 2 or 5 times a power of ten) that
/// splits `[min, max]` into at most five intervals.
fn tick_positions(min: f64, max: f64) -> Vec<f64> {
    let span = max - min;
    if !(span.is_finite() && span > 0.0) {
        return Vec::new();
    }
    let magnitude = 10f64.powf((span / 5.0).log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| span / step <= 5.0 + 1e-9)
        .unwrap_or(10.0 * magnitude);

    let first = (min / step).ceil() as i64;
    let last = (max / step + 1e-9).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Format tick labels with as many decimals as the tick step needs.
fn format_ticks(tick_positions: &[f64]) -> Vec<String> {
    let step = tick_positions
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    let decimals = if step.is_finite() && step < 1.0 {
        (-step.log10().floor()) as usize
    } else {
        0
    };
    tick_positions
        .iter()
        .map(|z| format!("{z:.decimals$}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_positions_false_alarm_range() {
        assert_eq!(
            tick_positions(0.0, 50.0),
            vec![0.0, 10.0, 20.0, 30.0, 40.0, 50.0]
        );
    }

    #[test]
    fn test_tick_positions_probability_range() {
        let ticks = tick_positions(0.0, 1.0);
        assert_eq!(ticks.len(), 6);
        assert!((ticks[1] - 0.2).abs() < 1e-12);
        assert!((ticks[5] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_tick_positions_degenerate() {
        assert!(tick_positions(1.0, 1.0).is_empty());
        assert!(tick_positions(0.0, f64::NAN).is_empty());
    }

    #[test]
    fn test_format_ticks() {
        assert_eq!(format_ticks(&[0.0, 10.0, 20.0]), vec!["0", "10", "20"]);
        assert_eq!(format_ticks(&[0.0, 0.2, 0.4]), vec!["0.0", "0.2", "0.4"]);
        assert_eq!(format_ticks(&[0.0, 0.05]), vec!["0.00", "0.05"]);
    }

    #[test]
    fn test_segments_break_at_nan_and_outside_points() {
        let ax = Axis::default().with_xlim(0.0, 10.0).with_ylim(0.0, 1.0);
        let line = LinePlot::new(
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            &[0.1, 0.2, f64::NAN, 0.4, 2.0, 0.6],
        );
        let segments = ax.segment_lineplot_data(&line);
        assert_eq!(
            segments,
            vec![vec![(1.0, 0.1), (2.0, 0.2)], vec![(4.0, 0.4)], vec![(6.0, 0.6)]]
        );
    }

    #[test]
    fn test_render_lines_with_markers() {
        let mut fig = Figure::default().with_title("Probability");
        let mut ax = Axis::default()
            .with_xlim(0.0, 50.0)
            .with_ylim(0.0, 1.0)
            .with_xlabel("False Alarm Count")
            .with_legend(true);
        LinePlot::new(&[5.0, 20.0], &[0.1, 0.9])
            .with_color("#1f77b4")
            .with_name("Fire(1)")
            .with_markers(3.0)
            .insert_into(&mut ax);
        ax.insert_into(&mut fig);

        let raw = fig.render();
        assert_eq!(raw.matches("<polyline").count(), 1);
        assert_eq!(raw.matches("<circle").count(), 2);
        assert!(raw.contains(">Probability</text>"));
        assert!(raw.contains(">False Alarm Count</text>"));
        assert!(raw.contains(">Fire(1)</text>"));
    }

    #[test]
    fn test_render_single_point_has_marker_only() {
        let mut fig = Figure::default();
        let mut ax = Axis::default().with_xlim(0.0, 50.0);
        LinePlot::new(&[10.0], &[0.75])
            .with_markers(3.0)
            .insert_into(&mut ax);
        ax.insert_into(&mut fig);

        let raw = fig.render();
        assert_eq!(raw.matches("<polyline").count(), 0);
        assert_eq!(raw.matches("<circle").count(), 1);
    }
}
