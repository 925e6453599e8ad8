use std::str::FromStr;

use structopt::clap::Shell;
use structopt::StructOpt;
use structopt_flags::QuietVerbose;

use twenty_forty_eight::{Direction, DEFAULT_SIZE, MIN_SIZE};

/// A scripted move list, e.g. `lurd` or `left, up, right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moves(pub Vec<Direction>);

impl FromStr for Moves {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut moves = Vec::new();

        for token in s.split(|c: char| c.is_whitespace() || c == ',') {
            if token.is_empty() {
                continue;
            }

            match token.parse::<Direction>() {
                Ok(direction) => moves.push(direction),
                Err(_) => {
                    for c in token.chars() {
                        moves.push(c.to_string().parse()?);
                    }
                }
            }
        }

        if moves.is_empty() {
            Err(format!("no moves in: {:?}", s))?
        }

        Ok(Moves(moves))
    }
}

#[derive(Debug)]
pub enum Mode {
    Replay(Vec<Direction>),
    Autoplay { games: usize },
}

#[derive(Debug)]
pub struct AppConfig {
    pub size: usize,
    pub seed: Option<u64>,
    pub mode: Mode,
    #[cfg(feature = "serde")]
    pub json: bool,
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "2048",
    about = "Play 2048 headless: replay a move script or autoplay random games"
)]
pub struct Opt {
    #[structopt(flatten)]
    pub verbose: QuietVerbose,

    #[structopt(short, long, help = "Grid side length [default: 4]")]
    size: Option<usize>,

    #[structopt(long, help = "Random seed")]
    seed: Option<u64>,

    #[structopt(
        parse(try_from_str),
        short,
        long,
        help = "Moves to replay, e.g. \"lurd\" or \"up,left\""
    )]
    moves: Option<Moves>,

    #[structopt(short, long, help = "Number of random games to autoplay [default: 1]")]
    games: Option<usize>,

    #[cfg(feature = "serde")]
    #[structopt(long, help = "Print final states as JSON")]
    json: bool,

    #[structopt(long, possible_values= &Shell::variants(), case_insensitive = true, help = "Generate shell completions and exit")]
    pub completions: Option<Shell>,
}

impl Opt {
    pub fn to_app_config(self) -> Result<AppConfig, &'static str> {
        let size = self.size.unwrap_or(DEFAULT_SIZE);

        if size < MIN_SIZE {
            Err("Size must be at least 2")?
        }

        let mode = match (self.moves, self.games) {
            (Some(_), Some(_)) => Err("Moves and games can't be combined")?,
            (Some(Moves(moves)), None) => Mode::Replay(moves),
            (None, Some(0)) => Err("Games must be at least 1")?,
            (None, games) => Mode::Autoplay {
                games: games.unwrap_or(1),
            },
        };

        Ok(AppConfig {
            size,
            seed: self.seed,
            mode,
            #[cfg(feature = "serde")]
            json: self.json,
        })
    }
}
