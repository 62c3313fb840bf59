use crate::chart::Tile;
use crate::ui::tooltip::Tooltip;

/// Pointer state tracking, in chart coordinates.
#[derive(Debug, Default)]
pub struct MouseState {
    pub x: f64,
    pub y: f64,
    /// Index of the tile under the pointer
    pub hover: Option<usize>,
}

/// Hit-test: find which tile contains the given point.
/// Later tiles win when cells touch.
pub fn hit_test(tiles: &[Tile], x: f64, y: f64) -> Option<usize> {
    tiles.iter().rposition(|tile| tile.contains(x, y))
}

/// Pointer action produced from raw window events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer moved to a new position
    Move { x: f64, y: f64 },
    /// Pointer left the chart surface
    Leave,
}

/// Apply a pointer event to the hover state and the tooltip.
///
/// Moving over a tile shows its tooltip at the pointer; moving off every tile
/// or leaving the surface hides it. Returns `true` when a redraw is needed.
pub fn process_pointer(
    event: PointerEvent,
    tiles: &[Tile],
    mouse: &mut MouseState,
    tooltip: &mut Tooltip,
) -> bool {
    match event {
        PointerEvent::Move { x, y } => {
            mouse.x = x;
            mouse.y = y;
            let hover = hit_test(tiles, x, y);
            let changed = hover != mouse.hover;
            mouse.hover = hover;
            match hover {
                Some(index) => {
                    tooltip.pointer_move(tiles[index].tooltip_content(), x, y);
                    true
                }
                None => {
                    let was_visible = tooltip.is_visible();
                    tooltip.pointer_leave();
                    changed || was_visible
                }
            }
        }
        PointerEvent::Leave => {
            let was_visible = tooltip.is_visible();
            mouse.hover = None;
            tooltip.pointer_leave();
            was_visible
        }
    }
}
