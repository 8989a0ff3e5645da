use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::ledger::Ledger;
use crate::utils::date::fmt_date;
use crate::utils::table::Table;
use crate::utils::time::fmt_time;

/// List open rolls (default), closed rolls or recorded events.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        events,
        closed,
        machine,
    } = cmd
    {
        let ledger = Ledger::from_config(cfg);

        if *events {
            print_events(&ledger, *machine)?;
        } else if *closed {
            print_closed(&ledger, *machine)?;
        } else {
            print_open(&ledger, *machine)?;
        }
    }

    Ok(())
}

// Short git-style identifier column; `finish --roll` accepts prefixes.
fn short_id(id: &str) -> &str {
    &id[..id.len().min(8)]
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut out: String = s.chars().take(max.saturating_sub(3)).collect();
        out.push_str("...");
        out
    } else {
        s.to_string()
    }
}

fn print_open(ledger: &Ledger, machine: Option<u32>) -> AppResult<()> {
    let rolls = ledger.open_rolls()?;

    let mut table = Table::new(&[
        "#", "id", "date", "shift", "machine", "OF lot", "start", "operator",
    ]);

    // Row numbers always follow the full open set, so `finish --pick N`
    // works no matter which filter produced the listing.
    for (i, roll) in rolls.iter().enumerate() {
        if let Some(m) = machine
            && roll.machine != m
        {
            continue;
        }

        table.add_row(vec![
            (i + 1).to_string(),
            short_id(&roll.id).to_string(),
            fmt_date(roll.date),
            roll.shift.label().to_string(),
            roll.machine.to_string(),
            roll.order_lot.clone(),
            fmt_time(roll.start_time),
            roll.start_operator.clone(),
        ]);
    }

    if table.is_empty() {
        println!("No open rolls.");
    } else {
        println!("📋 Open rolls:\n");
        print!("{}", table.render());
    }

    Ok(())
}

fn print_closed(ledger: &Ledger, machine: Option<u32>) -> AppResult<()> {
    let rolls = ledger.closed_rolls()?;

    let mut table = Table::new(&[
        "id", "date", "machine", "OF lot", "end", "weight", "tares", "operator",
    ]);

    for roll in &rolls {
        if let Some(m) = machine
            && roll.machine != m
        {
            continue;
        }

        table.add_row(vec![
            short_id(&roll.id).to_string(),
            fmt_date(roll.date),
            roll.machine.to_string(),
            roll.order_lot.clone(),
            fmt_time(roll.end_time),
            roll.weight.to_string(),
            roll.tares.to_string(),
            roll.end_operator.clone(),
        ]);
    }

    if table.is_empty() {
        println!("No closed rolls kept locally.");
    } else {
        println!("📋 Closed rolls:\n");
        print!("{}", table.render());
    }

    Ok(())
}

fn print_events(ledger: &Ledger, machine: Option<u32>) -> AppResult<()> {
    let events = ledger.events()?;

    let mut table = Table::new(&[
        "date",
        "kind",
        "machine",
        "OF lot",
        "start",
        "end",
        "min",
        "operator",
        "description",
    ]);

    for event in &events {
        if let Some(m) = machine
            && event.machine != m
        {
            continue;
        }

        table.add_row(vec![
            fmt_date(event.date),
            event.kind.label().to_string(),
            event.machine.to_string(),
            event.order_lot.clone(),
            fmt_time(event.start_time),
            fmt_time(event.end_time),
            event.minutes.to_string(),
            event.operator.clone(),
            truncate(&event.description, 40),
        ]);
    }

    if table.is_empty() {
        println!("No events recorded.");
    } else {
        println!("📋 Events:\n");
        print!("{}", table.render());
    }

    Ok(())
}
