mod cli;

use cli::Cli;
use exitfailure::ExitFailure;
use failure::Error;
use indie_stats::chart::{bar_lines, BarSeries};
use indie_stats::core;
use std::io::Write;
use structopt::StructOpt;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const BAR_WIDTH: usize = 40;

fn main() -> Result<(), ExitFailure> {
    env_logger::init();
    let cli = Cli::from_args();
    match cli {
        Cli::New { } => create_structure()?,
        Cli::Fetch { } => fetch_games()?,
        Cli::Clean { } => clean_games()?,
        Cli::Analyze { } => make_report()?,
        Cli::Chart { } => make_charts()?
    }
    Ok(())
}

fn create_structure() -> Result<(), Error> {
    core::create_structure()?;
    println!("Created {}.", core::CONFIG_FILE_NAME);
    Ok(())
}

fn fetch_games() -> Result<(), Error> {
    let config = core::config()?;
    println!("Starting download.");
    let total = core::fetch_games(&config, |n| {
        println!("Collected games so far: {}", n);
    })?;
    println!("Saved {} games to: {}", total, config.raw_path.display());
    Ok(())
}

fn clean_games() -> Result<(), Error> {
    let config = core::config()?;
    let total = core::clean_games(&config)?;
    println!("Clean data ({} games) saved to: {}", total, config.clean_path.display());
    Ok(())
}

fn make_report() -> Result<(), Error> {
    let config = core::config()?;
    let report = core::make_report(&config)?;
    print!("{}", report);
    Ok(())
}

fn print_bars(stdout: &mut StandardStream, series: &BarSeries) -> Result<(), Error> {
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    writeln!(stdout, "{}", series.title)?;
    stdout.reset()?;
    for line in bar_lines(series, BAR_WIDTH) {
        writeln!(stdout, "{}", line)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn make_charts() -> Result<(), Error> {
    let config = core::config()?;
    let charts = core::make_charts(&config)?;
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    print_bars(&mut stdout, &charts.frequency)?;
    print_bars(&mut stdout, &charts.average_added)?;
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
    writeln!(stdout, "{}", charts.popularity_vs_rating.title)?;
    stdout.reset()?;
    for p in &charts.popularity_vs_rating.points {
        writeln!(stdout, "{}\trating {:.2}\tadded {:.2}", p.label, p.x, p.y)?;
    }
    println!();
    println!("Chart data saved to: {}", config.charts_path.display());
    Ok(())
}
