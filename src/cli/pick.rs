//! Pick command handler
//!
//! A line-oriented host for the location picker. Every plain line is an
//! input event carrying the full new text; lines starting with `:` are
//! keys and clicks. Committed selections are printed.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::get_formatter;
use crate::geo::get_geocoder;
use crate::picker::{Key, LocationPicker, Page, PickerView, PointerTarget};
use clap::Args;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Pick command arguments
#[derive(Args)]
pub struct PickArgs {
    /// Output format for selections
    #[arg(long, short = 'f', default_value = "json")]
    pub format: String,

    /// Exit after the first selection
    #[arg(long)]
    pub once: bool,
}

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Text(String),
    Key(Key),
    /// 0-based candidate index
    Click(usize),
    Outside,
    Help,
    Quit,
    Unknown(String),
}

fn parse_action(line: &str) -> Action {
    let Some(command) = line.trim().strip_prefix(':') else {
        return Action::Text(line.to_string());
    };

    match command.trim() {
        "down" | "d" => Action::Key(Key::ArrowDown),
        "up" | "u" => Action::Key(Key::ArrowUp),
        "enter" | "e" => Action::Key(Key::Enter),
        "esc" | "escape" => Action::Key(Key::Escape),
        "outside" | "o" => Action::Outside,
        "help" | "h" | "?" => Action::Help,
        "quit" | "q" => Action::Quit,
        other => match other.parse::<usize>() {
            Ok(n) if n >= 1 => Action::Click(n - 1),
            _ => Action::Unknown(other.to_string()),
        },
    }
}

fn print_help() {
    eprintln!("Type a place name or \"lat, lon\" and press return.");
    eprintln!("  :down :up     move the highlight");
    eprintln!("  :enter        commit highlight (or typed coordinates)");
    eprintln!("  :N            click suggestion N");
    eprintln!("  :esc          hide suggestions");
    eprintln!("  :outside      click outside the picker");
    eprintln!("  :quit         exit");
}

/// Parts of the view worth redrawing for
fn drawn(view: &PickerView) -> (Vec<String>, Option<usize>, bool, Option<&'static str>) {
    (
        view.shown().iter().map(|c| c.display_name.clone()).collect(),
        view.active,
        view.visible,
        view.notice.map(|n| n.message()),
    )
}

fn draw(view: &PickerView) {
    if let Some(notice) = view.notice {
        eprintln!("  {}", notice.message());
        return;
    }

    for (i, candidate) in view.shown().iter().enumerate() {
        let marker = if view.active == Some(i) { '>' } else { ' ' };
        eprintln!("{} {:>2}. {}", marker, i + 1, candidate.display_name);
    }
}

/// Run the pick command
pub async fn run(args: PickArgs) -> Result<()> {
    let config = Config::load()?;

    let formatter = get_formatter(&args.format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", args.format)))?;

    let geocoder = Arc::new(get_geocoder(&config.geocoder)?);
    let page = Page::new().with_container(config.picker.container());
    let mut picker = LocationPicker::mount(&page, config.picker.clone(), geocoder);

    let mut selections = picker.selections();
    let mut view = picker.watch();
    let mut last = drawn(&view.borrow_and_update());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!("{}", config.picker.placeholder);
    print_help();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_action(&line) {
                    Action::Text(text) => picker.on_text_changed(text),
                    Action::Key(key) => picker.key_down(key),
                    Action::Click(index) => picker.click_candidate(index),
                    Action::Outside => picker.pointer_down(PointerTarget::Outside),
                    Action::Help => print_help(),
                    Action::Quit => break,
                    Action::Unknown(command) => eprintln!("Unknown command: :{}", command),
                }
            }
            Ok(()) = view.changed() => {
                let current = view.borrow_and_update().clone();
                let next = drawn(&current);
                if next != last {
                    draw(&current);
                    last = next;
                }
            }
            Some(selection) = selections.recv() => {
                println!("{}", formatter.format_selection(&selection)?.trim_end());
                if args.once {
                    break;
                }
            }
        }
    }

    picker.dispose();
    Ok(())
}
