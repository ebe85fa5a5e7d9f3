//! Terminal snake runner (default binary).
//!
//! Parses options, plays one game in the alternate screen, then records
//! and prints the top scores on the normal screen.
//! Input comes from crossterm; drawing goes through the framebuffer
//! renderer in `term_snake::term`.

mod cli;
mod clock;
mod logging;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::{info, warn};

use term_snake::core::{GameOutcome, GameRng, GameSession, GameSnapshot, SessionState, TickEvent};
use term_snake::input::{map_key, should_quit};
use term_snake::scores::{self, validate_player_name, ScoreBoard, ScoreMark};
use term_snake::term::game_view::HEADER_ROWS;
use term_snake::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use term_snake::types::PlayerId;

use cli::Cli;
use clock::TickDeadline;

fn main() {
    if let Err(err) = run() {
        eprintln!("snake: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.as_deref())?;

    let view = GameView::new(!cli.disable_keys_help);
    let screen = TerminalRenderer::viewport()?;
    let (height, width) = field_size(&cli, &view, screen)?;

    let seed = cli.seed.unwrap_or_else(|| GameRng::from_entropy().seed());
    let mut game = GameSession::new(cli.game_config(height, width), seed)
        .context("cannot start game")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let result = play(&mut term, &view, &mut game);
    // Always try to restore terminal state.
    let _ = term.exit();
    result?;

    report(&cli, &game)
}

/// Field size from the options, checked against the terminal.
fn field_size(cli: &Cli, view: &GameView, screen: Viewport) -> Result<(u16, u16)> {
    if cli.use_terminal_dimensions {
        let chrome = view.required_viewport(0, 0);
        return Ok((
            screen.height.saturating_sub(chrome.height),
            screen.width.saturating_sub(chrome.width),
        ));
    }

    let need = view.required_viewport(cli.height, cli.width);
    if need.width > screen.width || need.height > screen.height {
        bail!(
            "terminal is {}x{} but a {}x{} field needs {}x{} (try -t or -k)",
            screen.width,
            screen.height,
            cli.width,
            cli.height,
            need.width,
            need.height
        );
    }
    Ok((cli.height, cli.width))
}

fn play(term: &mut TerminalRenderer, view: &GameView, game: &mut GameSession) -> Result<()> {
    let started = Instant::now();
    let two_players = game.config().two_players;
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut deadline = TickDeadline::new(Instant::now(), game.delay());

    loop {
        game.snapshot_into(&mut snap);
        draw(term, view, &snap, &mut fb)?;

        match game.state() {
            SessionState::Ended => return Ok(()),
            SessionState::Paused => {
                let key = next_key()?;
                if should_quit(key) {
                    game.quit();
                } else {
                    game.resume(started.elapsed());
                }
                deadline.restart(Instant::now(), game.delay());
                continue;
            }
            SessionState::Running => {}
        }

        if !event::poll(deadline.remaining(Instant::now()))? {
            game.tick(TickEvent::Timeout, started.elapsed());
            deadline.restart(Instant::now(), game.delay());
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    game.quit();
                    continue;
                }
                let tick = match map_key(key, two_players) {
                    Some(command) => TickEvent::Command(command),
                    None => TickEvent::Unbound,
                };
                game.tick(tick, started.elapsed());
                deadline.restart(Instant::now(), game.delay());
            }
            Event::Resize(..) => term.invalidate(),
            _ => {}
        }
    }
}

fn draw(
    term: &mut TerminalRenderer,
    view: &GameView,
    snap: &GameSnapshot,
    fb: &mut FrameBuffer,
) -> Result<()> {
    let viewport = TerminalRenderer::viewport().unwrap_or(Viewport::new(
        snap.width,
        snap.height + HEADER_ROWS,
    ));
    view.render_into(snap, viewport, fb);
    term.draw_swap(fb)
}

/// Block until a key is pressed.
fn next_key() -> Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}

/// After the game: who crashed, score prompts, the table.
fn report(cli: &Cli, game: &GameSession) -> Result<()> {
    let two_players = game.config().two_players;
    match game.outcome() {
        Some(GameOutcome::Died { player, cause }) => {
            info!(player = player.number(), ?cause, scores = ?game.scores(), "game over");
            if two_players {
                println!("Player {} died first", player.number());
            }
        }
        Some(GameOutcome::Quit) | None => info!(scores = ?game.scores(), "game quit"),
    }

    if cli.disable_top_scores {
        for &player in game.config().players() {
            println!("Player {} score: {}", player.number(), game.score(player));
        }
        return Ok(());
    }

    let Some(path) = score_path(cli) else {
        warn!("no home directory, top scores disabled");
        println!("Score: {}", game.score(PlayerId::One));
        return Ok(());
    };

    let mut board = ScoreBoard::load(&path)?;
    let date = scores::unix_now();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    for &player in game.config().players() {
        let score = game.score(player);
        if !board.qualifies(score, cli.max_stored_scores) {
            println!("Player {} score: {}", player.number(), score);
            continue;
        }
        let name = ask_name(&mut input, player, score)?;
        board.insert(ScoreMark::new(score, name, date), cli.max_stored_scores);
        board.save(&path)?;
    }

    if let Some(table) = board.render_table() {
        println!();
        print!("{table}");
    }
    Ok(())
}

fn score_path(cli: &Cli) -> Option<PathBuf> {
    cli.scorefile_path.clone().or_else(scores::default_path)
}

fn login_name() -> String {
    ["USER", "LOGNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "player".to_string())
}

/// Prompt until a usable name is typed; an empty line takes the login name.
fn ask_name(input: &mut impl BufRead, player: PlayerId, score: u32) -> Result<String> {
    let default = login_name();
    loop {
        print!(
            "Player {}: New high score ({} points)\nYour name [{}]: ",
            player.number(),
            score,
            default
        );
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line).context("read player name")? == 0 {
            return Ok(default.replace(scores::SEPARATOR, "_"));
        }
        let typed = line.trim_end_matches(['\r', '\n']);
        let name = if typed.is_empty() { default.as_str() } else { typed };

        match validate_player_name(name) {
            Ok(()) => return Ok(name.to_string()),
            Err(err) => println!("{err}"),
        }
    }
}
