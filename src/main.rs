use docopt::Docopt;
use itertools::Itertools;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_derive::Deserialize;
use std::fs;
use tilemaze::{
    cells::GridCoordinate,
    generators,
    grid::Grid,
    pathing,
    tiles,
    units::{ColumnsCount, RowsCount, TileIndex},
};

const USAGE: &str = "Tilemaze

Usage:
    tilemaze_driver -h | --help
    tilemaze_driver [(--grid-size=<n>|[--grid-width=<w> --grid-height=<h>])] [--seed=<s>] [--start-row=<r> --start-col=<c>] [--text-out=<path>] [--tiles-out=<path>] [--save-passages=<path>] [--longest-path]

Options:
    -h --help               Show this screen.
    --grid-size=<n>         The grid size is n * n.
    --grid-width=<w>        The grid width in a w*h grid [default: 10].
    --grid-height=<h>       The grid height in a w*h grid [default: 10].
    --seed=<s>              Seed for the random generator, making the maze reproducible.
    --start-row=<r>         Row of the cell the carving starts from, picked at random if not given.
    --start-col=<c>         Column of the cell the carving starts from, picked at random if not given.
    --text-out=<path>       Output file path for a textual rendering of the maze, stdout if not given.
    --tiles-out=<path>      Output file path for the tile sheet indices, one line of numbers per grid row.
    --save-passages=<path>  Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
    --longest-path          Report the length of the longest path through the maze.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_seed: Option<u64>,
    flag_start_row: Option<u32>,
    flag_start_col: Option<u32>,
    flag_text_out: String,
    flag_tiles_out: String,
    flag_save_passages: String,
    flag_longest_path: bool,
}

// `error_chain!` creates the Error, ErrorKind, ResultExt and Result types.
// Result is a typedef of std `Result` with the error type our own `Error`,
// and the From conversions let `?` lift the foreign errors into it.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
            Grid(::tilemaze::grid::GridError);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_width, args.flag_grid_height)
    };

    let mut maze_grid = Grid::new(RowsCount(height), ColumnsCount(width))?;

    let mut rng = if let Some(seed) = args.flag_seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_entropy()
    };

    let start = match (args.flag_start_row, args.flag_start_col) {
        (Some(start_row), Some(start_col)) => GridCoordinate::new(start_row, start_col),
        _ => maze_grid.random_cell(&mut rng),
    };
    generators::recursive_backtracker(&mut maze_grid, start, &mut rng)?;

    if args.flag_text_out.is_empty() {
        println!("{}", maze_grid);
    } else {
        fs::write(&args.flag_text_out, format!("{}", maze_grid))
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_tiles_out.is_empty() {

        save_tile_indices(&maze_grid, &args.flag_tiles_out)?;
    }

    if !args.flag_save_passages.is_empty() {

        save_maze_passages(&maze_grid, &args.flag_save_passages)?;
    }

    if args.flag_longest_path {
        let path = pathing::longest_path::<u32>(&maze_grid)
            .ok_or("The maze has no longest path to measure.")?;
        println!("longest path: {} cells", path.len());
    }

    Ok(())
}

/// One line of space separated tile sheet frame numbers per grid row.
fn save_tile_indices(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let ColumnsCount(columns) = maze_grid.columns();
    let indices = tiles::tile_indices(maze_grid);

    let mut sheet_data = String::new();
    for row in indices.chunks(columns) {
        let line = row.iter().map(|TileIndex(index)| index.to_string()).join(" ");
        sheet_data.push_str(&line);
        sheet_data.push('\n');
    }

    fs::write(file_path, sheet_data)
        .chain_err(|| format!("Failed to write tile indices to text file {}", file_path))?;

    Ok(())
}

fn save_maze_passages(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let vertices_count = maze_grid.size();
    let passages_count = maze_grid.passages_count();
    graph_data.push_str(vertices_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(passages_count.to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in maze_grid.passages() {
        let index_a = maze_grid
            .grid_coordinate_to_index(src)
            .expect("Passages iter should give valid coordinate");
        let index_b = maze_grid
            .grid_coordinate_to_index(dst)
            .expect("Passages iter should give valid coordinate");
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    fs::write(file_path, graph_data)
        .chain_err(|| format!("Failed to write maze passages to text file {}", file_path))?;

    Ok(())
}
