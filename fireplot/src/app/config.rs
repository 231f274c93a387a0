use app_core::string_error::ErrorStringExt;
use std::{io::Read, path::PathBuf, str::FromStr};

pub const CONFIG_FILE_NAME: &str = ".fireplot";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Table to load on startup.
    pub table_path: Option<PathBuf>,
    pub svg_width: u64,
    pub svg_height: u64,
    pub plot_linewidth: f64,
    pub marker_radius: f64,
    /// Initial content of the request fields.
    pub true_alarm: String,
    pub dismissed_alarm: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_path: None,
            svg_width: 800,
            svg_height: 600,
            plot_linewidth: 2.0,
            marker_radius: 3.0,
            true_alarm: String::new(),
            dismissed_alarm: String::new(),
        }
    }
}

impl Config {
    pub fn from_config_file() -> Result<Self, String> {
        #[allow(deprecated)]
        let Some(home) = std::env::home_dir() else {
            return Err("could not determine home directory to load config file".into());
        };
        let config_raw = {
            let path = home.join(CONFIG_FILE_NAME);
            let mut file = std::fs::File::open(path).err_to_string("could not open config file")?;
            let mut buf = String::new();
            file.read_to_string(&mut buf)
                .err_to_string("could not load config file")?;
            buf
        };
        Ok(Self::parse(&config_raw))
    }

    /// Read `key=value` lines. Unknown keys and values that do not parse are
    /// skipped with a warning, keeping the default.
    pub fn parse(config_raw: &str) -> Self {
        let mut config = Self::default();
        for line in config_raw.lines() {
            let line = line.trim();
            // Lines starting with "#" are considered comments.
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                log::warn!("ignoring config line without '=': {:?}", line);
                continue;
            };
            let val = val.trim();
            match key.trim() {
                "table_path" => config.table_path = Some(PathBuf::from(val)),
                "svg_width" => set_parsed(&mut config.svg_width, "svg_width", val),
                "svg_height" => set_parsed(&mut config.svg_height, "svg_height", val),
                "plot_linewidth" => set_parsed(&mut config.plot_linewidth, "plot_linewidth", val),
                "marker_radius" => set_parsed(&mut config.marker_radius, "marker_radius", val),
                "true_alarm" => val.clone_into(&mut config.true_alarm),
                "dismissed_alarm" => val.clone_into(&mut config.dismissed_alarm),
                other => log::warn!("unknown config key '{}'", other),
            }
        }
        config
    }

    pub fn render(&mut self, _ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.heading("Preferences");
        ui.separator();
        egui::Grid::new("preferences_grid")
            .num_columns(2)
            .show(ui, |ui| {
                ui.label("SVG width");
                ui.add(egui::DragValue::new(&mut self.svg_width).range(100..=10_000));
                ui.end_row();
                ui.label("SVG height");
                ui.add(egui::DragValue::new(&mut self.svg_height).range(100..=10_000));
                ui.end_row();
                ui.label("Line width");
                ui.add(
                    egui::DragValue::new(&mut self.plot_linewidth)
                        .range(0.0..=20.0)
                        .speed(0.1),
                );
                ui.end_row();
                ui.label("Marker radius");
                ui.add(
                    egui::DragValue::new(&mut self.marker_radius)
                        .range(0.0..=20.0)
                        .speed(0.1),
                );
                ui.end_row();
            });
    }
}

fn set_parsed<T: FromStr>(target: &mut T, key: &str, raw: &str) {
    if let Ok(val) = raw.parse::<T>() {
        *target = val;
    } else {
        log::warn!("could not parse '{}' from {:?}", key, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_parse_all_keys() {
        init();
        let config = Config::parse(
            "# fireplot settings\n\
             table_path=/data/sim_out.txt\n\
             svg_width = 1024\n\
             svg_height=768\n\
             plot_linewidth=1.5\n\
             marker_radius=4\n\
             true_alarm=2\n\
             dismissed_alarm= 3\n",
        );
        assert_eq!(config.table_path, Some(PathBuf::from("/data/sim_out.txt")));
        assert_eq!((config.svg_width, config.svg_height), (1024, 768));
        assert_eq!(config.plot_linewidth, 1.5);
        assert_eq!(config.marker_radius, 4.0);
        assert_eq!(config.true_alarm, "2");
        assert_eq!(config.dismissed_alarm, "3");
    }

    #[test]
    fn test_parse_bad_values_keep_defaults() {
        init();
        let config = Config::parse("svg_width=wide\nmarker_radius=\nno equals sign\ncolor=red\n");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse(""), Config::default());
    }
}
