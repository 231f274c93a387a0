#![warn(clippy::all, rust_2018_idioms)]

use std::path::PathBuf;

use alarm_sim::SweepRanges;
use alarm_table::Table;
use app_core::string_error::ErrorStringExt;
use clap::Parser;
use fireplot::{chart, PlotRequest, SvgRenderer};

#[derive(Parser)]
#[command(author, version, about = "Plot fire probabilities without opening a window")]
struct Args {
    /// Table of combinations to read (object literals, or JSON for *.json)
    #[arg(long, required_unless_present = "generate", conflicts_with = "generate")]
    table: Option<PathBuf>,
    /// Compute the table instead of reading it
    #[arg(long, default_value_t = false)]
    generate: bool,
    #[arg(long, allow_negative_numbers = true)]
    true_alarm: i64,
    #[arg(long, allow_negative_numbers = true)]
    dismissed_alarm: i64,
    #[arg(long, short, default_value = "plot.svg")]
    output: PathBuf,
    /// Also write the table that was used
    #[arg(long)]
    write_table: Option<PathBuf>,
    /// Print the series to stdout
    #[arg(long, default_value_t = false)]
    print: bool,
    #[arg(long, default_value_t = 800)]
    width: u64,
    #[arg(long, default_value_t = 600)]
    height: u64,
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = Args::parse();

    let table = match &args.table {
        Some(path) => Table::from_path(path).err_to_string("unable to read table")?,
        None => Table::new(alarm_sim::generate(&SweepRanges::default())),
    };
    if let Some(path) = &args.write_table {
        table
            .write_path(path)
            .err_to_string("unable to write table")?;
    }

    let series = PlotRequest::new(args.true_alarm, args.dismissed_alarm).build_series(table.records());
    if series.is_empty() {
        log::warn!(
            "no combinations for true alarm = {}, dismissed alarm = {}",
            args.true_alarm,
            args.dismissed_alarm
        );
    }
    if args.print {
        println!("false_alarm\tfire\tno_fire");
        for ((x, y1), y2) in series
            .x_values()
            .iter()
            .zip(series.y_values1())
            .zip(series.y_values2())
        {
            println!("{x}\t{y1}\t{y2}");
        }
    }

    let mut renderer = SvgRenderer::new(&args.output).with_size(args.width, args.height);
    chart::render(&series, &mut renderer)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_table_or_generate() {
        let args = Args::try_parse_from([
            "fireplot-export",
            "--table",
            "sim_out.txt",
            "--true-alarm",
            "2",
            "--dismissed-alarm",
            "3",
        ])
        .unwrap();
        assert_eq!(args.table, Some(PathBuf::from("sim_out.txt")));
        assert_eq!(args.output, PathBuf::from("plot.svg"));

        let both = Args::try_parse_from([
            "fireplot-export",
            "--table",
            "t.txt",
            "--generate",
            "--true-alarm",
            "2",
            "--dismissed-alarm",
            "3",
        ]);
        assert!(both.is_err());

        let neither =
            Args::try_parse_from(["fireplot-export", "--true-alarm", "2", "--dismissed-alarm", "3"]);
        assert!(neither.is_err());
    }
}
