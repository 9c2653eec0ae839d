use log::debug;
use thiserror::Error;

use retro_blocks_core::{RandomSource, Session};

/// Target placement for the active piece: clockwise turns from its current orientation,
/// then the anchor column to shift to before hard dropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub rotations: u8,
    pub x: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("could not rotate to target rotation")]
    RotationBlocked,
    #[error("target x would place piece out of bounds")]
    XOutOfBounds,
    #[error("could not move to target x due to collision")]
    XBlocked,
    #[error("game is not playable")]
    NotPlayable,
    #[error("no active piece")]
    NoActive,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::RotationBlocked
            | PlaceError::XOutOfBounds
            | PlaceError::XBlocked
            | PlaceError::NoActive => "invalid_place",
        }
    }
}

/// Rotate, shift and hard drop the active piece through the normal session operations
///
/// On error the session is left exactly as it was. On success returns the hard drop
/// distance; the session may now be clearing, over, or falling with the next piece.
pub fn apply_place<R: RandomSource + Clone>(
    session: &mut Session<R>,
    placement: Placement,
) -> Result<u32, PlaceError> {
    if !session.is_playable() {
        return Err(PlaceError::NotPlayable);
    }
    if session.active().is_none() {
        return Err(PlaceError::NoActive);
    }

    let backup = session.clone();
    let result = place_unchecked(session, placement);
    if result.is_err() {
        *session = backup;
    }
    result
}

fn place_unchecked<R: RandomSource>(
    session: &mut Session<R>,
    placement: Placement,
) -> Result<u32, PlaceError> {
    for _ in 0..placement.rotations % 4 {
        if !session.rotate() {
            return Err(PlaceError::RotationBlocked);
        }
    }

    let Some(active) = session.active() else {
        return Err(PlaceError::NoActive);
    };

    // Bounds are judged on occupied cells, not the shape's bounding box
    let cells = active.shape.cells();
    let min_dx = cells.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
    let max_dx = cells.iter().map(|&(dx, _)| dx).max().unwrap_or(0);
    let width = session.grid().width() as i16;
    let (x, lo, hi) = (placement.x as i16, min_dx as i16, max_dx as i16);
    if x + lo < 0 || x + hi >= width {
        return Err(PlaceError::XOutOfBounds);
    }

    let dx = placement.x - active.x;
    for _ in 0..dx.unsigned_abs() {
        let moved = if dx > 0 {
            session.move_right()
        } else {
            session.move_left()
        };
        if !moved {
            return Err(PlaceError::XBlocked);
        }
    }

    let distance = session.hard_drop().ok_or(PlaceError::NotPlayable)?;
    debug!(
        "placed {} with {} turns at x={} (dropped {})",
        active.kind.as_str(),
        placement.rotations % 4,
        placement.x,
        distance
    );
    Ok(distance)
}
