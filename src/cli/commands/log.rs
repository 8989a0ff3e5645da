use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::journal::Journal;
use ansi_term::Colour;

fn strip_ansi(s: &str) -> String {
    let re = regex::Regex::new(r"\x1B\[[0-9;]*[mK]").unwrap();
    re.replace_all(s, "").into_owned()
}

/// ANSI color per journal operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "start" => Colour::Green,
        "finish" => Colour::Blue,
        "event" => Colour::Yellow,
        "backup" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

/// Print the operation journal.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if matches!(cmd, Commands::Log { print: true }) {
        let journal = Journal::new(cfg.journal_path());
        let entries = journal.entries()?;

        if entries.is_empty() {
            println!("The operation journal is empty.");
            return Ok(());
        }

        // One op+target column, width capped at 60
        let rows: Vec<(String, String, String, String)> = entries
            .into_iter()
            .map(|e| {
                let op_target = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };
                (e.timestamp, e.operation, op_target, e.message)
            })
            .collect();

        let raw_max = rows
            .iter()
            .map(|(_, _, op_target, _)| op_target.len())
            .max()
            .unwrap_or(10);
        let op_w = raw_max.min(60);

        let ts_w = rows
            .iter()
            .map(|(ts, _, _, _)| ts.len())
            .max()
            .unwrap_or(0);

        println!("📜 Operation journal:\n");

        for (i, (ts, operation, op_target, message)) in rows.iter().enumerate() {
            let color = color_for_operation(operation);

            // Colored operation word, plain target
            let colored = if let Some((op_word, rest)) = op_target.split_once(' ') {
                format!("{} {}", color.paint(op_word), rest)
            } else {
                color.paint(op_target.as_str()).to_string()
            };

            // Truncate at 60 visible characters, then recolor the
            // leading word (padding is computed without ANSI codes).
            let visible = strip_ansi(&colored);
            let truncated = if visible.len() > 60 {
                let mut s = visible.chars().take(57).collect::<String>();
                s.push_str("...");
                s
            } else {
                visible
            };

            let recolored = if let Some((op_word, rest)) = truncated.split_once(' ') {
                format!("{} {}", color.paint(op_word), rest)
            } else {
                color.paint(truncated.as_str()).to_string()
            };

            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&recolored).len()));

            println!(
                "{:>3}: {:<ts_w$} | {}{} => {}",
                i + 1,
                ts,
                recolored,
                padding,
                message,
                ts_w = ts_w
            );
        }
    }

    Ok(())
}
