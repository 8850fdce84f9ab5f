use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;
use crate::config::Config;
use crate::fields::WeekStart;

/// Local task list with projects and dated views.
/// Storage defaults to ~/.todo/todoAppData.json or a directory passed via --dir.
#[derive(Parser)]
#[command(name = "todo", version, about = "Task list with projects and inbox/today/week views")]
pub struct Cli {
    /// Directory holding the data file (defaults to $TODO_DIR or ~/.todo).
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Storage key; the document is written to <dir>/<key>.json.
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// First day of the week for the this-week view.
    #[arg(long, value_enum, global = true, default_value_t = WeekStart::Monday)]
    pub week_start: WeekStart,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config::resolve(self.dir.clone(), self.key.clone(), self.week_start)
    }
}
