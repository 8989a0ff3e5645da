use clap::{ArgGroup, Parser, Subcommand};

/// Command-line interface definition for rollbook
/// CLI application to register production rolls and line events
#[derive(Parser)]
#[command(
    name = "rollbook",
    version = env!("CARGO_PKG_VERSION"),
    about = "Production-floor ledger: register material rolls (bobinas) and line events, mirrored to a spreadsheet",
    long_about = None
)]
pub struct Cli {
    /// Override the data directory (useful for tests or a shared drive)
    #[arg(global = true, long = "data-dir")]
    pub data_dir: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the configuration file and the data directory
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Open a new roll on a machine
    Start {
        #[arg(long, help = "Production date (YYYY-MM-DD), default: today")]
        date: Option<String>,

        #[arg(long, help = "Shift: 1/manana, 2/tarde or 3/noche")]
        shift: String,

        #[arg(long, help = "Machine number (1 or higher)")]
        machine: u32,

        #[arg(long = "raw-lot", help = "Raw-material lot")]
        raw_lot: String,

        #[arg(long = "order-lot", help = "Fabrication-order (OF) lot")]
        order_lot: String,

        #[arg(long, help = "Operator starting the roll")]
        operator: String,

        #[arg(long, help = "Start time (HH:MM), default: now")]
        time: Option<String>,

        #[arg(long, help = "Start remarks (optional)")]
        remarks: Option<String>,
    },

    /// Close an open roll
    #[command(group(
        ArgGroup::new("selection")
            .required(true)
            .args(["roll", "pick"]),
    ))]
    Finish {
        #[arg(long, help = "Open-roll identifier (full id or unique prefix)")]
        roll: Option<String>,

        #[arg(long, help = "Row number from `rollbook list` (1-based)")]
        pick: Option<usize>,

        #[arg(long, help = "End time (HH:MM), default: now")]
        time: Option<String>,

        #[arg(long, help = "Operator closing the roll")]
        operator: String,

        #[arg(long, value_parser = parse_weight, help = "Roll weight in kg (0 to 20)")]
        weight: f64,

        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=20), help = "Number of tares (0 to 20)")]
        tares: u32,

        #[arg(long, help = "Closing remarks (optional)")]
        remarks: Option<String>,
    },

    /// Record a line event (stoppage, breakage, cleaning, ...)
    Event {
        #[arg(long, help = "Event kind: incident or task")]
        kind: String,

        #[arg(long, help = "Event date (YYYY-MM-DD), default: today")]
        date: Option<String>,

        #[arg(long, help = "Machine number (1 or higher)")]
        machine: u32,

        #[arg(long, help = "Start time (HH:MM), default: now")]
        start: Option<String>,

        #[arg(long, help = "End time (HH:MM), default: now")]
        end: Option<String>,

        #[arg(long, help = "Operator reporting the event")]
        operator: String,

        #[arg(long, help = "Description / reason")]
        description: String,

        #[arg(
            long = "stop-meter",
            help = "Meter at which the line stopped (optional)"
        )]
        stop_meter: Option<String>,
    },

    /// List open rolls (default), closed rolls or events
    List {
        #[arg(long, help = "List recorded events instead of open rolls", conflicts_with = "closed")]
        events: bool,

        #[arg(long, help = "List locally kept closed rolls")]
        closed: bool,

        #[arg(long, help = "Filter by machine number")]
        machine: Option<u32>,
    },

    /// Print the operation journal
    Log {
        #[arg(long = "print", help = "Print the operation journal")]
        print: bool,
    },

    /// Create a backup copy of the ledger files
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "Pack the backup into a single .zip archive")]
        compress: bool,
    },
}

// Weight bounds come from the close form, which never accepted more
// than 20 kg.
fn parse_weight(s: &str) -> Result<f64, String> {
    let w: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if !(0.0..=20.0).contains(&w) {
        return Err(format!("weight must be between 0 and 20 kg (got {w})"));
    }
    Ok(w)
}
