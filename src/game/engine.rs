use rand::Rng;

use super::rules::{self, FOOD_POINTS};
use super::session::GameSession;
use super::types::Status;

/// What ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfCollision,
}

/// What a tick did, for the collaborators around the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Session was not Running; nothing changed.
    Idle,
    /// Snake moved one cell without eating.
    Moved,
    /// Snake ate and grew. `speed_changed` tells the scheduler to pick up the
    /// new interval.
    AteFood {
        score: u32,
        speed: u32,
        speed_changed: bool,
    },
    /// Collision; the session is now Over with its pre-move snake.
    GameOver { cause: Collision, score: u32 },
    /// Snake grew to cover every cell, leaving nowhere to put food.
    BoardFilled { score: u32 },
}

impl TickEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TickEvent::GameOver { .. } | TickEvent::BoardFilled { .. })
    }
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub session: GameSession,
    pub event: TickEvent,
}

/// Advances `session` by one time step.
///
/// The input is left untouched so it can still be read (by a renderer, say)
/// while the caller swaps in the returned session.
pub fn tick<R: Rng + ?Sized>(session: &GameSession, rng: &mut R) -> Step {
    if session.status != Status::Running {
        return Step {
            session: session.clone(),
            event: TickEvent::Idle,
        };
    }

    let mut next = session.clone();
    next.direction = next.pending_direction;

    let new_head = rules::advance_head(next.head(), next.direction);

    let collision = if rules::is_wall_collision(new_head, next.grid_size) {
        Some(Collision::Wall)
    } else if rules::is_self_collision(new_head, &next.snake) {
        Some(Collision::SelfCollision)
    } else {
        None
    };

    if let Some(cause) = collision {
        log::debug!(
            "game over: {:?} at ({}, {}) with score {}",
            cause,
            new_head.x,
            new_head.y,
            next.score
        );
        next.status = Status::Over;
        return Step {
            event: TickEvent::GameOver {
                cause,
                score: next.score,
            },
            session: next,
        };
    }

    let ate_food = rules::is_food_collision(new_head, next.food);
    next.snake = rules::grow_or_move(&next.snake, new_head, ate_food);

    if !ate_food {
        return Step {
            session: next,
            event: TickEvent::Moved,
        };
    }

    next.score += FOOD_POINTS;
    let previous_speed = next.speed;
    next.speed = rules::next_speed(next.speed, next.min_speed);

    match rules::place_food(&next.snake, next.grid_size, rng) {
        Some(food) => {
            next.food = food;
            Step {
                event: TickEvent::AteFood {
                    score: next.score,
                    speed: next.speed,
                    speed_changed: next.speed != previous_speed,
                },
                session: next,
            }
        }
        None => {
            log::debug!("board filled with score {}", next.score);
            next.status = Status::Over;
            Step {
                event: TickEvent::BoardFilled { score: next.score },
                session: next,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, Position};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn running(config: &GameConfig, food: Position) -> GameSession {
        let mut session = GameSession::with_food(config, food).unwrap();
        session.start();
        session
    }

    #[test]
    fn test_ready_session_does_not_move() {
        let mut rng = StdRng::seed_from_u64(0);
        let session = GameSession::with_food(&GameConfig::default(), Position::new(15, 10)).unwrap();
        let step = tick(&session, &mut rng);
        assert_eq!(step.event, TickEvent::Idle);
        assert_eq!(step.session, session);
    }

    #[test]
    fn test_paused_session_does_not_move() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut session = running(&GameConfig::default(), Position::new(15, 10));
        session.pause();
        let step = tick(&session, &mut rng);
        assert_eq!(step.event, TickEvent::Idle);
        assert_eq!(step.session, session);
    }

    #[test]
    fn test_plain_move() {
        let mut rng = StdRng::seed_from_u64(0);
        let session = running(&GameConfig::default(), Position::new(15, 10));
        let step = tick(&session, &mut rng);

        assert_eq!(step.event, TickEvent::Moved);
        assert_eq!(
            step.session.snake(),
            &[Position::new(6, 10), Position::new(5, 10), Position::new(4, 10)]
        );
        assert_eq!(step.session.food(), Position::new(15, 10));
        assert_eq!(step.session.score(), 0);
        assert_eq!(step.session.speed(), 150);
        // Input session is untouched.
        assert_eq!(session.head(), Position::new(5, 10));
    }

    #[test]
    fn test_eating_grows_scores_and_speeds_up() {
        let mut rng = StdRng::seed_from_u64(0);
        let session = running(&GameConfig::default(), Position::new(6, 10));
        let step = tick(&session, &mut rng);

        assert_eq!(
            step.event,
            TickEvent::AteFood {
                score: 10,
                speed: 148,
                speed_changed: true
            }
        );
        assert_eq!(step.session.snake().len(), 4);
        assert_eq!(step.session.head(), Position::new(6, 10));
        assert!(!step.session.snake().contains(&step.session.food()));
    }

    #[test]
    fn test_speed_at_floor_reports_no_change() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = GameConfig {
            initial_speed: 80,
            ..GameConfig::default()
        };
        let step = tick(&running(&config, Position::new(6, 10)), &mut rng);
        assert_eq!(
            step.event,
            TickEvent::AteFood {
                score: 10,
                speed: 80,
                speed_changed: false
            }
        );
    }

    #[test]
    fn test_pending_direction_committed_on_tick() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut session = running(&GameConfig::default(), Position::new(15, 10));
        session.request_direction(Direction::Up);
        let step = tick(&session, &mut rng);
        assert_eq!(step.session.direction(), Direction::Up);
        assert_eq!(step.session.head(), Position::new(5, 9));
    }

    #[test]
    fn test_wall_collision_freezes_state() {
        let mut rng = StdRng::seed_from_u64(0);
        let config = GameConfig {
            initial_snake: vec![
                Position::new(19, 10),
                Position::new(18, 10),
                Position::new(17, 10),
            ],
            ..GameConfig::default()
        };
        let session = running(&config, Position::new(0, 0));
        let step = tick(&session, &mut rng);

        assert_eq!(
            step.event,
            TickEvent::GameOver {
                cause: Collision::Wall,
                score: 0
            }
        );
        assert!(step.session.is_over());
        assert_eq!(step.session.snake(), session.snake());
        assert_eq!(step.session.food(), session.food());
    }

    #[test]
    fn test_board_filled_ends_game() {
        let mut rng = StdRng::seed_from_u64(0);
        // 2x2 board: snake on three cells heading for the last one.
        let config = GameConfig {
            grid_size: 2,
            initial_snake: vec![Position::new(0, 1), Position::new(0, 0), Position::new(1, 0)],
            initial_direction: Direction::Right,
            ..GameConfig::default()
        };
        let session = running(&config, Position::new(1, 1));
        let step = tick(&session, &mut rng);

        assert_eq!(step.event, TickEvent::BoardFilled { score: 10 });
        assert!(step.event.is_terminal());
        assert!(step.session.is_over());
        assert_eq!(step.session.snake().len(), 4);
    }

    #[test]
    fn test_over_session_is_idle() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut session = running(&GameConfig::default(), Position::new(15, 10));
        session.status = Status::Over;
        assert_eq!(tick(&session, &mut rng).event, TickEvent::Idle);
    }
}
