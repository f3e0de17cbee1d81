use structopt::StructOpt;

#[derive(Debug, StructOpt)]
/// Indie game statistics from the RAWG
/// catalog.
pub enum Cli {
    #[structopt(name = "new")]
    /// Creates a default app.config file.
    New { },
    #[structopt(name = "fetch")]
    /// Downloads games from RAWG. Needs
    /// RAWG_API_KEY in the environment.
    Fetch { },
    #[structopt(name = "clean")]
    /// Flattens the raw download into a CSV file.
    Clean { },
    #[structopt(name = "analyze")]
    /// Prints genre, tag and correlation
    /// statistics for indie games.
    Analyze { },
    #[structopt(name = "chart")]
    /// Writes genre chart series as JSON and
    /// prints them as text bars.
    Chart { }
}
