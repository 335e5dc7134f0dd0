use std::collections::BTreeMap;
use std::time::Duration;

use log::trace;

use crate::grids::{Cell, Coord};

/// Observer notified by the grid, generator and solver as they mutate state.
/// Every method defaults to a no-op, and implementations must never be able to
/// change the outcome of generation or solving.
pub trait RenderPort {
    /// Redraw the walls of `cell` at its bounds. Missing walls are not drawn.
    fn draw_cell(&mut self, _cell: &Cell) {}

    /// Draw a path segment between the centers of two adjacent cells. `undo`
    /// marks a segment being backtracked over.
    fn draw_move(&mut self, _from: &Cell, _to: &Cell, _undo: bool) {}

    /// Pacing hook, may block for a bounded delay.
    fn tick(&mut self) {}
}

/// Renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRender;

impl RenderPort for NoRender {}

impl<R: RenderPort + ?Sized> RenderPort for &mut R {
    fn draw_cell(&mut self, cell: &Cell) {
        (**self).draw_cell(cell)
    }

    fn draw_move(&mut self, from: &Cell, to: &Cell, undo: bool) {
        (**self).draw_move(from, to, undo)
    }

    fn tick(&mut self) {
        (**self).tick()
    }
}

impl<R: RenderPort + ?Sized> RenderPort for Box<R> {
    fn draw_cell(&mut self, cell: &Cell) {
        (**self).draw_cell(cell)
    }

    fn draw_move(&mut self, from: &Cell, to: &Cell, undo: bool) {
        (**self).draw_move(from, to, undo)
    }

    fn tick(&mut self) {
        (**self).tick()
    }
}

/// An absent renderer behaves like [`NoRender`].
impl<R: RenderPort> RenderPort for Option<R> {
    fn draw_cell(&mut self, cell: &Cell) {
        if let Some(renderer) = self {
            renderer.draw_cell(cell)
        }
    }

    fn draw_move(&mut self, from: &Cell, to: &Cell, undo: bool) {
        if let Some(renderer) = self {
            renderer.draw_move(from, to, undo)
        }
    }

    fn tick(&mut self) {
        if let Some(renderer) = self {
            renderer.tick()
        }
    }
}

unsafe impl bytemuck::Pod for Vertex {}
unsafe impl bytemuck::Zeroable for Vertex {}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Stroke {
    Wall,
    Path,
    Retrace,
}

impl From<Stroke> for [f32; 4] {
    fn from(stroke: Stroke) -> Self {
        match stroke {
            Stroke::Wall => [0.0, 0.0, 0.0, 1.0],
            Stroke::Path => [0.8, 0.1, 0.1, 1.0],
            Stroke::Retrace => [0.5, 0.5, 0.5, 1.0],
        }
    }
}

/// Collects line-list geometry (two vertices per segment) in pixel space for a
/// host to upload and draw. Cells keep only their latest wall geometry; path
/// segments accumulate in the order they were drawn.
#[derive(Debug, Default)]
pub struct VertexRenderer {
    cells: BTreeMap<Coord, Vec<Vertex>>,
    moves: Vec<Vertex>,
    frames: usize,
    delay: Option<Duration>,
}

impl VertexRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleeps for `delay` on every tick, which animates a live host.
    pub fn with_delay(delay: Option<Duration>) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn wall_vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.cells.values().flatten()
    }

    pub fn move_vertices(&self) -> &[Vertex] {
        &self.moves
    }

    /// Walls first, then path segments.
    pub fn vertices(&self) -> Vec<Vertex> {
        self.wall_vertices()
            .chain(self.moves.iter())
            .copied()
            .collect()
    }

    pub fn as_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice::<Vertex, u8>(&self.vertices()).to_vec()
    }
}

fn segment(from: (f32, f32), to: (f32, f32), stroke: Stroke) -> [Vertex; 2] {
    let color: [f32; 4] = stroke.into();
    [
        Vertex {
            position: [from.0, from.1],
            color,
        },
        Vertex {
            position: [to.0, to.1],
            color,
        },
    ]
}

impl RenderPort for VertexRenderer {
    fn draw_cell(&mut self, cell: &Cell) {
        let b = cell.bounds;
        let sides = [
            (cell.has_top_wall, (b.x1, b.y1), (b.x2, b.y1)),
            (cell.has_bottom_wall, (b.x1, b.y2), (b.x2, b.y2)),
            (cell.has_left_wall, (b.x1, b.y1), (b.x1, b.y2)),
            (cell.has_right_wall, (b.x2, b.y1), (b.x2, b.y2)),
        ];

        let verts = self.cells.entry(cell.coord()).or_insert_with(Vec::new);
        verts.clear();
        for &(standing, from, to) in sides.iter() {
            if standing {
                verts.extend_from_slice(&segment(from, to, Stroke::Wall));
            }
        }
    }

    fn draw_move(&mut self, from: &Cell, to: &Cell, undo: bool) {
        let stroke = if undo { Stroke::Retrace } else { Stroke::Path };
        self.moves
            .extend_from_slice(&segment(from.bounds.center(), to.bounds.center(), stroke));
    }

    fn tick(&mut self) {
        self.frames += 1;
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub enum RenderEvent {
    Cell(Coord),
    Move { from: Coord, to: Coord, undo: bool },
    Tick,
}

/// Logs every notification at trace level and keeps them in order.
#[derive(Debug, Default)]
pub struct TraceRenderer {
    events: Vec<RenderEvent>,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    pub fn count(&self, pred: impl Fn(&RenderEvent) -> bool) -> usize {
        self.events.iter().filter(|event| pred(event)).count()
    }
}

impl RenderPort for TraceRenderer {
    fn draw_cell(&mut self, cell: &Cell) {
        trace!(
            "cell ({}, {}) walls t:{} b:{} l:{} r:{}",
            cell.col,
            cell.row,
            cell.has_top_wall,
            cell.has_bottom_wall,
            cell.has_left_wall,
            cell.has_right_wall
        );
        self.events.push(RenderEvent::Cell(cell.coord()));
    }

    fn draw_move(&mut self, from: &Cell, to: &Cell, undo: bool) {
        trace!(
            "{} ({}, {}) -> ({}, {})",
            if undo { "undo" } else { "move" },
            from.col,
            from.row,
            to.col,
            to.row
        );
        self.events.push(RenderEvent::Move {
            from: from.coord(),
            to: to.coord(),
            undo,
        });
    }

    fn tick(&mut self) {
        self.events.push(RenderEvent::Tick);
    }
}

#[cfg(test)]
mod test_renderer {
    use super::*;
    use crate::grids::{Direction, Grid, Layout};

    fn layout() -> Layout {
        Layout {
            origin_x: 10.0,
            origin_y: 10.0,
            rows: 2,
            columns: 2,
            cell_width: 20.0,
            cell_height: 20.0,
        }
    }

    #[test]
    fn walls_become_line_segments() {
        let mut vr = VertexRenderer::new();
        let mut grid = Grid::new(layout(), Some(&mut vr)).unwrap();

        // 4 cells x 4 walls x 2 vertices
        assert_eq!(vr.wall_vertices().count(), 32);
        assert_eq!(vr.frames(), 4);

        grid.clear_wall((0, 0), Direction::Right);
        grid.draw_cell((0, 0), &mut vr);
        grid.draw_cell((1, 0), &mut vr);
        assert_eq!(vr.wall_vertices().count(), 28);

        let walls: Vec<Vertex> = vr.wall_vertices().copied().collect();
        let shared_side = walls
            .chunks(2)
            .filter(|seg| seg[0].position == [30.0, 10.0] && seg[1].position == [30.0, 30.0])
            .count();
        assert_eq!(shared_side, 0);
    }

    #[test]
    fn moves_connect_centers() {
        let grid = Grid::new(layout(), None).unwrap();
        let mut vr = VertexRenderer::new();

        vr.draw_move(&grid.cell((0, 0)), &grid.cell((1, 0)), false);
        vr.draw_move(&grid.cell((0, 0)), &grid.cell((1, 0)), true);

        let moves = vr.move_vertices();
        assert_eq!(moves.len(), 4);
        assert_eq!(moves[0].position, [20.0, 20.0]);
        assert_eq!(moves[1].position, [40.0, 20.0]);
        assert_eq!(moves[0].color, <[f32; 4]>::from(Stroke::Path));
        assert_eq!(moves[2].color, <[f32; 4]>::from(Stroke::Retrace));
    }

    #[test]
    fn bytes_match_vertex_layout() {
        let mut vr = VertexRenderer::new();
        Grid::new(layout(), Some(&mut vr)).unwrap();

        let bytes = vr.as_bytes();
        assert_eq!(bytes.len(), vr.vertices().len() * std::mem::size_of::<Vertex>());
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
    }

    #[test]
    fn optional_renderer_forwards_or_ignores() {
        let grid = Grid::with_dims(1, 1).unwrap();
        let cell = grid.cell((0, 0));

        let mut absent: Option<TraceRenderer> = None;
        absent.draw_cell(&cell);
        absent.tick();
        assert!(absent.is_none());

        let mut present = Some(TraceRenderer::new());
        present.draw_cell(&cell);
        present.tick();
        let events = present.as_ref().map(|t| t.events().to_vec()).unwrap();
        assert_eq!(events, vec![RenderEvent::Cell((0, 0)), RenderEvent::Tick]);
    }
}
