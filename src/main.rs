// SPDX-License-Identifier: MIT
//
// hueloop — interactive color-combination explorer.
//
// This is the binary that wires the crates together:
//
//   hue-color → the Color value type and WCAG contrast engine
//   hue-core  → palette, generator, history, likes, session
//
// The interaction model is a line-command REPL over a Session. A
// background thread reads stdin lines into a channel; the main loop
// blocks on the channel with a timeout so auto-cycling ticks keep firing
// while the prompt sits idle:
//
//   stdin → reader thread → channel → dispatch → session mutation
//   timeout → session.tick → fresh combination printed

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use hue_color::Color;
use hue_color::contrast::{Threshold, classify, contrast_ratio};
use hue_core::filter::Filter;
use hue_core::generate::BackgroundMode;
use hue_core::{Combination, Role, Session};

mod store;

use store::FileStore;

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() {
    env_logger::init();

    let path = likes_path();
    let mut session = Session::new(FileStore::new(path.clone()));
    if let Err(err) = session.load_likes() {
        log::warn!("could not load likes from {}: {err}", path.display());
    }

    // A shared combination on the command line restores it; otherwise the
    // session opens with a fresh draw.
    let restored = std::env::args().nth(1).is_some_and(|query| {
        session
            .restore(&query)
            .inspect_err(|err| eprintln!("ignoring shared combination: {err}"))
            .is_ok()
    });
    if !restored && session.shuffle().is_err() {
        eprintln!("error: empty palette");
        process::exit(1);
    }

    print_current(&session);
    println!("type `help` for commands");

    run(&mut session);
}

/// The stdin-channel loop. Returns when stdin closes or on `quit`.
fn run(session: &mut Session<FileStore>) {
    let rx = spawn_stdin_reader();

    loop {
        let now = Instant::now();
        let timeout = session
            .time_until_tick(now)
            .unwrap_or(Duration::from_millis(250));

        match rx.recv_timeout(timeout) {
            Ok(line) => {
                if !dispatch(session, line.trim()) {
                    return;
                }
            }
            Err(RecvTimeoutError::Timeout) => match session.tick(Instant::now()) {
                Ok(Some(_)) => print_current(session),
                Ok(None) => {}
                Err(err) => eprintln!("error: {err}"),
            },
            Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}

/// Read stdin lines on a background thread so the main loop can keep
/// ticking while idle.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn likes_path() -> PathBuf {
    std::env::var_os("HUELOOP_LIKES")
        .map_or_else(|| PathBuf::from("hueloop-likes.json"), PathBuf::from)
}

// ─── Command dispatch ───────────────────────────────────────────────────────

/// Handle one command line. Returns `false` to exit the loop.
fn dispatch(session: &mut Session<FileStore>, line: &str) -> bool {
    let (cmd, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    match cmd {
        "" => {}
        "quit" | "q" | "exit" => return false,
        "help" | "h" => print_help(),

        "next" | "n" => report(session.next(), session),
        "prev" | "p" => {
            if session.previous() {
                print_current(session);
            } else {
                println!("nothing to go back to");
            }
        }
        "shuffle" | "s" => report(session.shuffle().map(|_| ()), session),
        "play" => {
            session.toggle_auto_cycle(Instant::now());
            println!(
                "auto-cycling {}",
                if session.is_auto_cycling() { "on" } else { "off" }
            );
        }

        "pin" => match parse_role(rest) {
            Some(role) => {
                session.toggle_pin(role);
                print_pins(session);
            }
            None => println!("usage: pin parentBg|bg|color|borderColor"),
        },
        "set" => {
            let mut parts = rest.splitn(2, ' ');
            match (parts.next().and_then(parse_role), parts.next()) {
                (Some(role), Some(value)) => match session.edit_role(role, value) {
                    Ok(()) => print_current(session),
                    Err(err) => println!("error: {err}"),
                },
                _ => println!("usage: set <role> <#hex>"),
            }
        }

        "like" => match session.like() {
            Ok(()) => println!("saved ({} total)", session.likes().len()),
            Err(err) => println!("saved in memory, but: {err}"),
        },
        "unlike" => match rest.parse::<usize>() {
            Ok(index) => match session.unlike(index) {
                Ok(()) => println!("removed ({} left)", session.likes().len()),
                Err(err) => println!("removed in memory, but: {err}"),
            },
            Err(_) => println!("usage: unlike <index>"),
        },
        "likes" => print_likes(session),
        "view" => match rest.parse::<usize>() {
            Ok(index) if session.view_like(index) => print_current(session),
            _ => println!("no saved combination at that index"),
        },

        "add" => match session.add_color(rest) {
            Ok(()) => print_palette(session),
            Err(err) => println!("error: {err}"),
        },
        "rm" => match rest.parse::<usize>() {
            Ok(index) if session.remove_color(index) => print_palette(session),
            _ => println!("cannot remove that color (last one, or bad index)"),
        },
        "replace" => {
            let mut parts = rest.splitn(2, ' ');
            match (parts.next().and_then(|s| s.parse::<usize>().ok()), parts.next()) {
                (Some(index), Some(value)) => match session.replace_color(index, value) {
                    Ok(()) => print_palette(session),
                    Err(err) => println!("error: {err}"),
                },
                _ => println!("usage: replace <index> <#hex>"),
            }
        }
        "palette" => print_palette(session),
        "clear" => report(session.clear_palette(), session),
        "import" => match parse_color_list(rest) {
            Ok(colors) => report(session.import_palette(colors), session),
            Err(err) => println!("error: {err}"),
        },

        "bg" => match rest {
            "palette" => set_bg(session, BackgroundMode::Palette),
            "white" => set_bg(session, BackgroundMode::White),
            "black" => set_bg(session, BackgroundMode::Black),
            _ => println!("usage: bg palette|white|black"),
        },
        "filter" => match rest.parse::<Filter>() {
            Ok(filter) => {
                session.set_filter(filter);
                println!("filter: {}", session.filter().as_str());
            }
            Err(()) => print_filters(),
        },
        "threshold" => match rest {
            "3" => set_threshold(session, Threshold::AaLarge),
            "4.5" => set_threshold(session, Threshold::Aa),
            "7" => set_threshold(session, Threshold::Aaa),
            _ => println!("usage: threshold 3|4.5|7"),
        },

        "share" => match session.share() {
            Some(encoded) => println!("?{encoded}"),
            None => println!("nothing to share yet"),
        },
        "restore" => match session.restore(rest) {
            Ok(()) => print_current(session),
            Err(err) => println!("error: {err}"),
        },

        "show" => print_current(session),
        _ => println!("unknown command {cmd:?} — try `help`"),
    }

    let _ = io::stdout().flush();
    true
}

fn report<E: std::fmt::Display>(result: Result<(), E>, session: &Session<FileStore>) {
    match result {
        Ok(()) => print_current(session),
        Err(err) => println!("error: {err}"),
    }
}

fn set_bg(session: &mut Session<FileStore>, mode: BackgroundMode) {
    session.set_background_mode(mode);
    print_current(session);
}

fn set_threshold(session: &mut Session<FileStore>, threshold: Threshold) {
    session.set_threshold(threshold);
    println!("threshold: {}:1", threshold.ratio());
}

fn parse_role(s: &str) -> Option<Role> {
    Role::from_key(s)
}

fn parse_color_list(s: &str) -> Result<Vec<Color>, hue_color::ParseColorError> {
    s.split_whitespace().map(Color::parse).collect()
}

// ─── Output ─────────────────────────────────────────────────────────────────

fn print_combination(combination: &Combination) {
    let ratio = contrast_ratio(combination.color, combination.bg);
    println!(
        "parentBg {}  bg {}  color {}  border {}  │ contrast {ratio:.2} ({})",
        combination.parent_bg,
        combination.bg,
        combination.color,
        combination.border_color,
        classify(ratio).label(),
    );
}

fn print_current(session: &Session<FileStore>) {
    match session.current() {
        Some(combination) => print_combination(&combination),
        None => println!("no combination yet — try `shuffle`"),
    }
}

fn print_pins(session: &Session<FileStore>) {
    let pins = session.pins();
    let marks: Vec<&str> = Role::ALL
        .iter()
        .filter(|&&role| pins.is_pinned(role))
        .map(|role| role.key())
        .collect();
    if marks.is_empty() {
        println!("no roles pinned");
    } else {
        println!("pinned: {}", marks.join(", "));
    }
}

fn print_palette(session: &Session<FileStore>) {
    let colors: Vec<String> = session
        .palette()
        .colors()
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{i}:{c}"))
        .collect();
    println!("palette: {}", colors.join("  "));
}

fn print_likes(session: &Session<FileStore>) {
    if session.likes().is_empty() {
        println!("no saved combinations");
        return;
    }
    for (i, combination) in session.likes().iter().enumerate() {
        print!("{i}: ");
        print_combination(combination);
    }
}

fn print_filters() {
    println!("filters (by population affected):");
    for filter in Filter::ALL {
        println!("  {:<14} {}", filter.as_str(), filter.population());
    }
}

fn print_help() {
    println!(
        "\
combination   next (n) · prev (p) · shuffle (s) · play · show · share · restore <query>
roles         pin <role> · set <role> <#hex>        roles: parentBg bg color borderColor
palette       palette · add <#hex> · rm <i> · replace <i> <#hex> · clear · import <#hex ...>
likes         like · unlike <i> · likes · view <i>
display       bg palette|white|black · filter [name] · threshold 3|4.5|7
other         help · quit"
    );
}
