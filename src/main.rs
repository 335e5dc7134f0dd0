use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::info;

use maze_rs::grids::Layout;
use maze_rs::renderer::{NoRender, RenderPort, TraceRenderer, VertexRenderer};
use maze_rs::{Maze, MazeConfig};

/// Generate a perfect maze and solve it
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of cell rows
    #[arg(long, default_value_t = 10)]
    rows: usize,

    /// Number of cell columns
    #[arg(long, default_value_t = 12)]
    cols: usize,

    /// Random seed, fresh entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 50.0)]
    origin_x: f32,

    #[arg(long, default_value_t = 50.0)]
    origin_y: f32,

    #[arg(long, default_value_t = 30.0)]
    cell_width: f32,

    #[arg(long, default_value_t = 30.0)]
    cell_height: f32,

    /// Pause between rendered frames, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Record line geometry and report its size
    #[arg(long)]
    vertices: bool,

    /// Log every render notification at trace level
    #[arg(long)]
    trace: bool,
}

impl From<&Args> for MazeConfig {
    fn from(args: &Args) -> Self {
        MazeConfig {
            layout: Layout {
                origin_x: args.origin_x,
                origin_y: args.origin_y,
                rows: args.rows,
                columns: args.cols,
                cell_width: args.cell_width,
                cell_height: args.cell_height,
            },
            seed: args.seed,
            frame_delay: args.delay_ms.map(Duration::from_millis),
        }
    }
}

fn run<R: RenderPort>(config: &MazeConfig, renderer: R) -> anyhow::Result<Maze<R>> {
    let mut maze = Maze::with_renderer(config, renderer).context("failed to generate maze")?;
    let solved = maze.solve().context("failed to solve maze")?;

    println!("{}", maze.grid().to_ascii(maze.path()));
    if solved {
        println!("solved in {} steps", maze.path().len().saturating_sub(1));
    } else {
        println!("no path from entrance to exit");
    }

    Ok(maze)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = MazeConfig::from(&args);
    info!("{:?}", config);

    if args.trace {
        let maze = run(&config, TraceRenderer::new())?;
        info!("{} render events", maze.renderer().events().len());
    } else if args.vertices || config.frame_delay.is_some() {
        let maze = run(&config, VertexRenderer::with_delay(config.frame_delay))?;
        let vr = maze.renderer();
        println!(
            "{} vertices ({} bytes) over {} frames",
            vr.vertices().len(),
            vr.as_bytes().len(),
            vr.frames()
        );
    } else {
        run(&config, NoRender)?;
    }

    Ok(())
}
