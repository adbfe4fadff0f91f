use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use time::{OffsetDateTime, format_description};

use crate::infra::Direction;
use crate::state::{MoveOutcome, WorldState};

/// Plain-text match log: header with the starting grid, then one line per turn.
pub struct ReplayFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl ReplayFile {
    pub fn new(replays_folder: &str, seed: Option<u64>, world: &WorldState) -> io::Result<Self> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let format = format_description::parse("[year][month][day]-[hour][minute][second]")
            .map_err(io::Error::other)?;
        let date_time_str = now.format(&format).map_err(io::Error::other)?;

        let seed_str = seed.map(|s| s.to_string()).unwrap_or_else(|| "file".to_string());
        let path = Path::new(replays_folder).join(format!("{} - {}.replay", date_time_str, seed_str));

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&path)?;
        let mut replay_file = ReplayFile {
            path,
            writer: BufWriter::new(file),
        };
        replay_file.write_header(seed, world)?;
        Ok(replay_file)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_header(&mut self, seed: Option<u64>, world: &WorldState) -> io::Result<()> {
        if let Some(seed) = seed {
            writeln!(self.writer, "seed {}", seed)?;
        }
        writeln!(
            self.writer,
            "size {} {} turns {}",
            world.grid.width, world.grid.height, world.remaining_turns
        )?;
        write_grid(&mut self.writer, world)?;
        self.writer.flush()
    }

    pub fn append(
        &mut self,
        moves: &[(Direction, MoveOutcome); 2],
        world: &WorldState,
    ) -> io::Result<()> {
        write!(self.writer, "turn {} remaining {}", world.turn, world.remaining_turns)?;
        for ((direction, outcome), player) in moves.iter().zip(&world.players) {
            let outcome = match outcome {
                MoveOutcome::Stayed => "stay".to_string(),
                MoveOutcome::Moved { reward } => format!("+{}", reward),
                MoveOutcome::Blocked => "blocked".to_string(),
            };
            write!(
                self.writer,
                " | {} {} {} score {}",
                player.position,
                direction.as_str_name(),
                outcome,
                player.score
            )?;
        }
        writeln!(self.writer)?;
        self.writer.flush()
    }

    pub fn finish(mut self, world: &WorldState) -> io::Result<()> {
        writeln!(self.writer, "final")?;
        write_grid(&mut self.writer, world)?;
        self.writer.flush()
    }
}

fn write_grid<W: Write>(writer: &mut W, world: &WorldState) -> io::Result<()> {
    let grid = &world.grid;
    for row in 0..grid.height {
        let line: Vec<String> = (0..grid.width)
            .map(|col| (col + grid.width * row) as usize)
            .map(|index| grid.value(index).to_string())
            .collect();
        writeln!(writer, "{}", line.join(" "))?;
    }
    Ok(())
}
