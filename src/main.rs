use crossterm::event::{self, Event, KeyCode};
use crossterm::{execute, terminal};
use othello_ai::core::{Board, Side};
use othello_ai::display::{render_board, DisplayState};
use othello_ai::game::{Game, ReplayViewer};
use othello_ai::logic::Winner;
use othello_ai::player::ai::AIConfig;
use othello_ai::player::{GreedyAI, MinimaxAI, PlayerController, RandomAI, TuiController};
use othello_ai::selfplay::{run_selfplay, SelfPlayConfig, StrategySpec};
use simple_logger::SimpleLogger;
use std::io;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    // 画面を壊さないよう既定は Warn。RUST_LOG で上書きできる
    SimpleLogger::new()
        .with_level(log::LevelFilter::Warn)
        .env()
        .init()?;

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run();

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

/// Blocks until one of `keys` (or `q`) is pressed. `None` means quit.
fn wait_for_choice(keys: &[char]) -> anyhow::Result<Option<char>> {
    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') => return Ok(None),
                    KeyCode::Char(c) if keys.contains(&c) => return Ok(Some(c)),
                    _ => {}
                }
            }
        }
    }
}

fn run() -> anyhow::Result<()> {
    print!("=== Othello ===\r\n");
    print!("\r\nSelect mode:\r\n");
    print!("1. Local Play\r\n");
    print!("2. Self-Play Series (Minimax vs Random, 10 games)\r\n");
    print!("[q] Quit\r\n");

    match wait_for_choice(&['1', '2'])? {
        Some('1') => run_local(),
        Some('2') => run_series(),
        _ => Ok(()),
    }
}

fn run_local() -> anyhow::Result<()> {
    let depth = AIConfig::get().search.default_depth;

    print!("\r\nSelect players (Black vs White):\r\n");
    print!("1. Human vs Human\r\n");
    print!("2. Human vs Minimax AI (depth {})\r\n", depth);
    print!("3. Minimax AI vs Human\r\n");
    print!("4. Minimax AI vs Greedy AI\r\n");
    print!("5. Greedy AI vs Random AI\r\n");

    let (black, white): (Box<dyn PlayerController>, Box<dyn PlayerController>) =
        match wait_for_choice(&['1', '2', '3', '4', '5'])? {
            Some('1') => (
                Box::new(TuiController::new("Black")),
                Box::new(TuiController::new("White")),
            ),
            Some('2') => (
                Box::new(TuiController::new("Human")),
                Box::new(MinimaxAI::new("Minimax AI", depth)),
            ),
            Some('3') => (
                Box::new(MinimaxAI::new("Minimax AI", depth)),
                Box::new(TuiController::new("Human")),
            ),
            Some('4') => (
                Box::new(MinimaxAI::new("Minimax AI", depth)),
                Box::new(GreedyAI::new("Greedy AI")),
            ),
            Some('5') => (
                Box::new(GreedyAI::new("Greedy AI")),
                Box::new(RandomAI::new("Random AI")),
            ),
            _ => return Ok(()),
        };

    let mut game = Game::new(Board::new());

    while !game.is_over() {
        let side = game.current_side;
        let controller = match side {
            Side::Black => black.as_ref(),
            Side::White => white.as_ref(),
        };

        if !controller.is_human() {
            let state = DisplayState {
                last_move: game.last_move(),
                status_msg: Some(format!("{} ({}) is thinking...", controller.name(), side)),
                ..DisplayState::default()
            };
            render_board(&game.board, &state)?;

            // 思考ウェイト中に終了判定
            if event::poll(Duration::from_millis(400))? {
                if let Event::Key(key) = event::read()? {
                    if key.code == KeyCode::Char('q') {
                        return Ok(());
                    }
                }
            }
        }

        let had_moves = game.board.has_valid_move(side);
        let turn = game.step(black.as_ref(), white.as_ref())?;
        if turn.mv.is_none() && had_moves {
            // 打てる手があるのに None なら人間が q で抜けた
            return Ok(());
        }
        if turn.mv.is_none() && !game.is_over() {
            let state = DisplayState {
                status_msg: Some(format!("{} ({}) passes", controller.name(), side)),
                ..DisplayState::default()
            };
            render_board(&game.board, &state)?;
            std::thread::sleep(Duration::from_millis(800));
        }
    }

    let outcome = game.outcome();
    let state = DisplayState {
        last_move: game.last_move(),
        status_msg: Some(match outcome.winner {
            Winner::Black => format!("Black wins! {} - {}", outcome.black, outcome.white),
            Winner::White => format!("White wins! {} - {}", outcome.white, outcome.black),
            Winner::Tie => format!("It's a tie! {} - {}", outcome.black, outcome.white),
        }),
        ..DisplayState::default()
    };
    render_board(&game.board, &state)?;
    print!("\r\n[r] Replay | [q] Quit\r\n");

    if wait_for_choice(&['r'])?.is_some() {
        let mut viewer = ReplayViewer::new(Board::new(), game.history.clone())?;
        viewer.run()?;
    }
    Ok(())
}

fn run_series() -> anyhow::Result<()> {
    print!("\r\nRunning self-play...\r\n");
    let config = SelfPlayConfig {
        num_games: 10,
        black: StrategySpec::Minimax {
            depth: AIConfig::get().search.default_depth,
        },
        white: StrategySpec::Random { seed: None },
        parallel: true,
        ..SelfPlayConfig::default()
    };
    let stats = run_selfplay(config)?;

    print!("\r\n=== Self-Play Results ===\r\n");
    for line in stats.summary().lines() {
        print!("{}\r\n", line);
    }
    print!("\r\n[q] Quit\r\n");
    wait_for_choice(&[])?;
    Ok(())
}
