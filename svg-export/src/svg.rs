// This code is a thin Rust wrapper to handle SVG tags
// and render the results to *.svg files.

use std::collections::BTreeMap;

// ----------------------------------------------------------------------------
//
//
// Rust representation and rendering of SVG tags.
//
//
// ----------------------------------------------------------------------------

/// Attributes (or style properties) of a tag. Ordered, so that rendering the
/// same figure twice gives the same markup.
pub type Params = BTreeMap<String, String>;

pub trait RenderTag: std::fmt::Debug {
    fn render(&self, buf: &mut String);
}

impl<T> RenderTag for Tag<T>
where
    T: Identifier + std::fmt::Debug,
{
    fn render(&self, buf: &mut String) {
        let name = self.kind.identifier();
        buf.push('<');
        buf.push_str(name);
        for (k, v) in self.parameters.iter() {
            buf.push_str(&format!(" {k}=\"{}\"", escape(v)));
        }
        if !self.style.is_empty() {
            let style: Vec<_> = self.style.iter().map(|(k, v)| format!("{k}:{v}")).collect();
            buf.push_str(&format!(" style=\"{}\"", escape(&style.join(";"))));
        }
        if self.children.is_empty() {
            buf.push_str(" />");
            return;
        }
        buf.push('>');
        for c in self.children.iter() {
            c.render(buf);
        }
        buf.push_str(&format!("</{name}>"));
    }
}

/// Text content of a tag.
#[derive(Debug)]
pub struct Content(pub String);

impl RenderTag for Content {
    fn render(&self, buf: &mut String) {
        buf.push_str(&escape(&self.0));
    }
}

pub fn render(svg_tag: &Tag<Svg>) -> String {
    let mut raw_svg = String::new();
    svg_tag.render(&mut raw_svg);
    raw_svg.push('\n');
    raw_svg
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for chr in raw.chars() {
        match chr {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[derive(Debug)]
pub struct Tag<T>
where
    T: std::fmt::Debug,
{
    parameters: Params,
    style: Params,
    children: Vec<Box<dyn RenderTag>>,
    kind: T,
}

impl<T> Tag<T>
where
    T: std::fmt::Debug,
{
    fn with_parameters(kind: T, parameters: Vec<(&str, String)>, style: Option<Params>) -> Self {
        Self {
            parameters: parameters
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            style: style.unwrap_or_default(),
            children: Vec::new(),
            kind,
        }
    }

    pub fn add_child(&mut self, child: impl RenderTag + 'static) {
        self.children.push(Box::new(child));
    }

    pub fn add_children(&mut self, children: Vec<Box<dyn RenderTag>>) {
        self.children.extend(children);
    }
}

// ----------------------------------------------------------------------------
//
//
// Creation of `new` tags.
//
//
// ----------------------------------------------------------------------------

impl Tag<Svg> {
    pub fn new(width: u64, height: u64, style: Option<Params>) -> Self {
        Self::with_parameters(
            Svg,
            vec![
                ("width", format!("{width}")),
                ("height", format!("{height}")),
                ("viewBox", format!("0 0 {width} {height}")),
                ("xmlns", "http://www.w3.org/2000/svg".to_string()),
            ],
            style,
        )
    }
}

impl Tag<Group> {
    pub fn new(style: Option<Params>) -> Self {
        Self::with_parameters(Group, Vec::new(), style)
    }
}

impl Tag<Circle> {
    pub fn new(cx: f64, cy: f64, r: f64, style: Option<Params>) -> Self {
        Self::with_parameters(
            Circle,
            vec![
                ("cx", format!("{cx}")),
                ("cy", format!("{cy}")),
                ("r", format!("{r}")),
            ],
            style,
        )
    }
}

impl Tag<Rect> {
    pub fn new(x: f64, y: f64, width: f64, height: f64, style: Option<Params>) -> Self {
        Self::with_parameters(
            Rect,
            vec![
                ("x", format!("{x}")),
                ("y", format!("{y}")),
                ("width", format!("{width}")),
                ("height", format!("{height}")),
            ],
            style,
        )
    }
}

impl Tag<Text> {
    pub fn new(x: f64, y: f64, angle: f64, text: &str, style: Option<Params>) -> Self {
        let mut res = Self::with_parameters(
            Text,
            vec![("transform", format!("translate({x},{y}) rotate({angle})"))],
            style,
        );
        res.add_child(Content(text.to_string()));
        res
    }
}

impl Tag<Line> {
    pub fn new(x1: f64, x2: f64, y1: f64, y2: f64, style: Option<Params>) -> Self {
        Self::with_parameters(
            Line,
            vec![
                ("x1", format!("{x1}")),
                ("x2", format!("{x2}")),
                ("y1", format!("{y1}")),
                ("y2", format!("{y2}")),
                ("stroke", "black".to_string()),
            ],
            style,
        )
    }
}

impl Tag<Polyline> {
    pub fn new(
        xs: impl IntoIterator<Item = f64>,
        ys: impl IntoIterator<Item = f64>,
        style: Option<Params>,
    ) -> Self {
        let points: Vec<_> = xs
            .into_iter()
            .zip(ys)
            .map(|(x, y)| format!("{x},{y}"))
            .collect();
        Self::with_parameters(
            Polyline,
            vec![("points", points.join(" ")), ("fill", "none".to_string())],
            style,
        )
    }
}

// ----------------------------------------------------------------------------
//
//
// SVG tag kinds and their str representation (`identifier`)
//
//
// ----------------------------------------------------------------------------

#[derive(Debug)]
pub struct Svg;
#[derive(Debug)]
pub struct Group;
#[derive(Debug)]
pub struct Circle;
#[derive(Debug)]
pub struct Rect;
#[derive(Debug)]
pub struct Text;
#[derive(Debug)]
pub struct Line;
#[derive(Debug)]
pub struct Polyline;

pub trait Identifier {
    fn identifier(&self) -> &'static str;
}

macro_rules! identifier {
    ($kind:ty, $name:literal) => {
        impl Identifier for $kind {
            fn identifier(&self) -> &'static str {
                $name
            }
        }
    };
}

identifier!(Svg, "svg");
identifier!(Group, "g");
identifier!(Circle, "circle");
identifier!(Rect, "rect");
identifier!(Text, "text");
identifier!(Line, "line");
identifier!(Polyline, "polyline");

pub fn opts(items: &[(&str, &str)]) -> Option<Params> {
    Some(
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested_tags() {
        let mut svg = Tag::<Svg>::new(400, 300, None);
        let rect = Tag::<Rect>::new(0.0, 0.0, 400.0, 300.0, opts(&[("fill", "red")]));
        let text = Tag::<Text>::new(200.0, 150.0, 0.0, "This is a Test.", None);
        svg.add_child(rect);
        svg.add_child(text);

        let raw = render(&svg);
        assert!(raw.starts_with("<svg height=\"300\""));
        assert!(raw.contains("<rect height=\"300\" width=\"400\" x=\"0\" y=\"0\" style=\"fill:red\" />"));
        assert!(raw.contains(">This is a Test.</text>"));
        assert!(raw.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_render_escapes_text() {
        let text = Tag::<Text>::new(0.0, 0.0, 0.0, "P(F) < 1 & \"x\"", None);
        let mut buf = String::new();
        text.render(&mut buf);
        assert!(buf.contains("P(F) &lt; 1 &amp; &quot;x&quot;"));
    }

    #[test]
    fn test_polyline_points() {
        let line = Tag::<Polyline>::new([1.0, 2.0], [3.0, 4.5], None);
        let mut buf = String::new();
        line.render(&mut buf);
        assert_eq!(buf, "<polyline fill=\"none\" points=\"1,3 2,4.5\" />");
    }
}
