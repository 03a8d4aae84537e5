//! Pure movement, collision and progression rules.
//!
//! Nothing in here touches session state; the engine composes these into a
//! tick.

use rand::seq::IteratorRandom;
use rand::Rng;

use super::types::{Direction, Position};

pub const DEFAULT_GRID_SIZE: i32 = 20;
/// Starting tick interval (ms)
pub const DEFAULT_SPEED: u32 = 150;
/// Fastest tick interval (ms)
pub const DEFAULT_MIN_SPEED: u32 = 80;
/// How much faster each food makes the game (ms)
pub const SPEED_STEP: u32 = 2;
pub const FOOD_POINTS: u32 = 10;

/// Random draws before falling back to enumerating free cells.
const PLACE_FOOD_ATTEMPTS: usize = 64;

/// One cell in `direction`. No wraparound.
pub fn advance_head(head: Position, direction: Direction) -> Position {
    let (dx, dy) = direction.delta();
    Position::new(head.x + dx, head.y + dy)
}

pub fn is_wall_collision(pos: Position, grid_size: i32) -> bool {
    pos.x < 0 || pos.x >= grid_size || pos.y < 0 || pos.y >= grid_size
}

/// `body` is the snake before `new_head` is prepended.
pub fn is_self_collision(new_head: Position, body: &[Position]) -> bool {
    body.contains(&new_head)
}

pub fn is_food_collision(head: Position, food: Position) -> bool {
    head == food
}

/// Only an exact reversal of the applied direction is refused.
pub fn is_valid_direction_change(candidate: Direction, current: Direction) -> bool {
    candidate != current.opposite()
}

/// Returns the snake after one move. The tail is dropped unless `ate_food`.
pub fn grow_or_move(snake: &[Position], new_head: Position, ate_food: bool) -> Vec<Position> {
    let keep = if ate_food {
        snake.len()
    } else {
        snake.len().saturating_sub(1)
    };

    let mut next = Vec::with_capacity(keep + 1);
    next.push(new_head);
    next.extend_from_slice(&snake[..keep]);
    next
}

/// Picks a free cell uniformly at random, or `None` if the snake covers the
/// whole board.
///
/// Rejection sampling is tried first since the board is normally mostly
/// empty. Past a fixed number of misses the free cells are enumerated and
/// one is drawn from them, so placement stays uniform and always terminates
/// even when the snake is close to filling the grid.
pub fn place_food<R: Rng + ?Sized>(
    snake: &[Position],
    grid_size: i32,
    rng: &mut R,
) -> Option<Position> {
    if grid_size <= 0 {
        return None;
    }

    for _ in 0..PLACE_FOOD_ATTEMPTS {
        let candidate = Position::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        if !snake.contains(&candidate) {
            return Some(candidate);
        }
    }

    log::debug!(
        "food placement fell back to free-cell scan ({} segments on {}x{})",
        snake.len(),
        grid_size,
        grid_size
    );

    (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Position::new(x, y)))
        .filter(|cell| !snake.contains(cell))
        .choose(rng)
}

/// Tick interval after eating. Shrinks by [`SPEED_STEP`] while above
/// `min_speed`; never grows and never reaches zero.
pub fn next_speed(current_speed: u32, min_speed: u32) -> u32 {
    if current_speed > min_speed {
        current_speed.saturating_sub(SPEED_STEP).max(1)
    } else {
        current_speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_advance_head() {
        let head = p(5, 5);
        assert_eq!(advance_head(head, Direction::Up), p(5, 4));
        assert_eq!(advance_head(head, Direction::Down), p(5, 6));
        assert_eq!(advance_head(head, Direction::Left), p(4, 5));
        assert_eq!(advance_head(head, Direction::Right), p(6, 5));
    }

    #[test]
    fn test_advance_head_does_not_wrap() {
        assert_eq!(advance_head(p(0, 0), Direction::Left), p(-1, 0));
        assert_eq!(advance_head(p(0, 0), Direction::Up), p(0, -1));
    }

    #[test]
    fn test_wall_collision() {
        assert!(is_wall_collision(p(-1, 5), 20));
        assert!(is_wall_collision(p(20, 5), 20));
        assert!(is_wall_collision(p(5, -1), 20));
        assert!(is_wall_collision(p(5, 20), 20));
        assert!(!is_wall_collision(p(5, 5), 20));
        assert!(!is_wall_collision(p(0, 0), 20));
        assert!(!is_wall_collision(p(19, 19), 20));
    }

    #[test]
    fn test_self_collision() {
        let snake = [p(4, 5), p(3, 5), p(2, 5)];
        assert!(is_self_collision(p(3, 5), &snake));
        assert!(!is_self_collision(p(5, 5), &snake));
        assert!(!is_self_collision(p(5, 5), &[]));
    }

    #[test]
    fn test_food_collision() {
        assert!(is_food_collision(p(5, 5), p(5, 5)));
        assert!(!is_food_collision(p(5, 5), p(10, 10)));
    }

    #[test]
    fn test_direction_changes() {
        assert!(!is_valid_direction_change(Direction::Left, Direction::Right));
        assert!(!is_valid_direction_change(Direction::Down, Direction::Up));
        assert!(is_valid_direction_change(Direction::Up, Direction::Right));
        assert!(is_valid_direction_change(Direction::Down, Direction::Right));
        assert!(is_valid_direction_change(Direction::Up, Direction::Up));
    }

    #[test]
    fn test_move_keeps_length() {
        let snake = vec![p(5, 5), p(4, 5), p(3, 5)];
        let moved = grow_or_move(&snake, p(6, 5), false);
        assert_eq!(moved, vec![p(6, 5), p(5, 5), p(4, 5)]);
        assert_eq!(snake, vec![p(5, 5), p(4, 5), p(3, 5)]);
    }

    #[test]
    fn test_grow_keeps_tail() {
        let snake = vec![p(5, 5), p(4, 5), p(3, 5)];
        let grown = grow_or_move(&snake, p(6, 5), true);
        assert_eq!(grown.len(), 4);
        assert_eq!(grown[0], p(6, 5));
        assert_eq!(grown[3], p(3, 5));
    }

    #[test]
    fn test_single_segment_move() {
        let snake = vec![p(5, 5)];
        assert_eq!(grow_or_move(&snake, p(6, 5), false), vec![p(6, 5)]);
        assert_eq!(snake, vec![p(5, 5)]);
    }

    #[test]
    fn test_place_food_avoids_snake() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = [p(5, 10), p(4, 10), p(3, 10)];
        for _ in 0..100 {
            let food = place_food(&snake, 20, &mut rng).unwrap();
            assert!(!snake.contains(&food));
            assert!(!is_wall_collision(food, 20));
        }
    }

    #[test]
    fn test_place_food_finds_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(1);
        // Every cell of a 4x4 board except (2, 3).
        let snake: Vec<Position> = (0..4)
            .flat_map(|y| (0..4).map(move |x| p(x, y)))
            .filter(|&c| c != p(2, 3))
            .collect();
        for _ in 0..20 {
            assert_eq!(place_food(&snake, 4, &mut rng), Some(p(2, 3)));
        }
    }

    #[test]
    fn test_place_food_on_full_board() {
        let mut rng = StdRng::seed_from_u64(1);
        let snake = [p(0, 0), p(1, 0), p(1, 1), p(0, 1)];
        assert_eq!(place_food(&snake, 2, &mut rng), None);
    }

    #[test]
    fn test_next_speed() {
        assert_eq!(next_speed(150, 80), 148);
        assert_eq!(next_speed(80, 80), 80);
        assert_eq!(next_speed(79, 80), 79);
        assert_eq!(next_speed(100, 100), 100);
        assert_eq!(next_speed(100, 50), 98);
    }

    #[test]
    fn test_next_speed_stays_positive() {
        assert_eq!(next_speed(2, 1), 1);
    }
}
