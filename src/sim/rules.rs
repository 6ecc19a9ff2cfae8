//! Collision responses keyed by category pair
//!
//! The table is built once and is immutable afterwards. Lookup is symmetric:
//! (A, B) and (B, A) resolve to the same responses. Pairs with no entry get
//! plain physical resolution and nothing else.

use std::collections::BTreeMap;

use rand::Rng;

use super::body::Category;
use super::character::{Character, Direction};
use super::court::Boundary;
use super::state::{GameEvent, Side, SimulationContext};
use super::world::ContactPair;
use crate::consts::HIT_VARIANTS;
use crate::error::SimError;

/// When a response fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Only on the first step a pair touches
    Begin,
    /// Every step the pair is touching
    Touching,
}

/// Gameplay reaction to a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    /// Bird standing on its own floor
    Ground(Side),
    /// Ball reached the opponent's floor; `Side` is the scorer
    AwardPoint(Side),
    /// Serve the ball again above the scorer's half
    RespawnBall(Side),
    /// Cancel a movement intent pushing into static geometry
    BlockIntent(Side, Direction),
    /// Bird touched the ball
    HitCue(Side),
}

impl Response {
    pub fn apply(self, ctx: &mut SimulationContext, pair: &ContactPair) -> Result<(), SimError> {
        match self {
            Response::Ground(side) => {
                ctx.character_mut(side).grounded = true;
            }
            Response::AwardPoint(scorer) => {
                ctx.score.increment(scorer);
                ctx.events.push(GameEvent::Goal { scorer });
                let (left, right) = ctx.score.render_state();
                log::info!("{:?} scores ({} - {})", scorer, left, right);
            }
            Response::RespawnBall(side) => {
                ctx.ball.reset(&mut ctx.world, side)?;
            }
            Response::BlockIntent(side, direction) => {
                ctx.character_mut(side).set_intent(direction, false);
            }
            Response::HitCue(side) => {
                let variant = ctx.rng.random_range(0..HIT_VARIANTS);
                ctx.events.push(GameEvent::Hit { side, variant });
                log::trace!("{:?} hit at {:?}", side, pair.contact.point);
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub phase: Phase,
    pub response: Response,
}

/// Unordered category pair
fn key(a: Category, b: Category) -> (Category, Category) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Accumulates rules before freezing them into a table
#[derive(Debug, Default)]
pub struct RulesBuilder {
    table: BTreeMap<(Category, Category), Vec<Rule>>,
}

impl RulesBuilder {
    pub fn on(mut self, a: Category, b: Category, phase: Phase, response: Response) -> Self {
        self.table
            .entry(key(a, b))
            .or_default()
            .push(Rule { phase, response });
        self
    }

    pub fn build(self) -> CollisionRules {
        CollisionRules { table: self.table }
    }
}

/// Immutable category-pair to response table
#[derive(Debug, Clone)]
pub struct CollisionRules {
    table: BTreeMap<(Category, Category), Vec<Rule>>,
}

impl CollisionRules {
    pub fn builder() -> RulesBuilder {
        RulesBuilder::default()
    }

    /// The court's rules, registered for both sides
    pub fn standard() -> Self {
        Side::ALL
            .iter()
            .fold(Self::builder(), |rules, &side| {
                let bird = Character::category(side);
                let goal_line = Boundary::floor_category(side.opponent());
                rules
                    .on(bird, Boundary::floor_category(side), Phase::Touching, Response::Ground(side))
                    .on(Category::Ball, goal_line, Phase::Begin, Response::AwardPoint(side))
                    .on(Category::Ball, goal_line, Phase::Touching, Response::RespawnBall(side))
                    .on(
                        bird,
                        Category::Divider,
                        Phase::Touching,
                        Response::BlockIntent(side, side.toward_divider()),
                    )
                    .on(
                        bird,
                        Boundary::wall_category(side),
                        Phase::Touching,
                        Response::BlockIntent(side, side.outward()),
                    )
                    .on(bird, Category::Ball, Phase::Begin, Response::HitCue(side))
            })
            .build()
    }

    /// Rules registered for a pair, in registration order
    pub fn lookup(&self, a: Category, b: Category) -> &[Rule] {
        self.table.get(&key(a, b)).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Run the matching responses for every contact, in contact order
    pub fn dispatch(&self, ctx: &mut SimulationContext, contacts: &[ContactPair]) -> Result<(), SimError> {
        for pair in contacts {
            for rule in self.lookup(pair.category_a, pair.category_b) {
                if rule.phase == Phase::Begin && !pair.began {
                    continue;
                }
                rule.response.apply(ctx, pair)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ball::Ball;
    use crate::sim::collision::CollisionResult;
    use crate::sim::world::PhysicsConfig;
    use glam::Vec2;

    fn ctx() -> SimulationContext {
        SimulationContext::new(9, PhysicsConfig::default()).unwrap()
    }

    fn contact(ctx: &SimulationContext, a: Category, b: Category, began: bool) -> ContactPair {
        let handle = |category: Category| {
            ctx.world
                .bodies()
                .iter()
                .position(|body| body.category == category)
                .map(crate::sim::body::BodyHandle)
                .unwrap()
        };
        ContactPair {
            a: handle(a),
            b: handle(b),
            category_a: a,
            category_b: b,
            began,
            contact: CollisionResult {
                point: Vec2::ZERO,
                normal: Vec2::Y,
                penetration: 0.5,
            },
        }
    }

    #[test]
    fn test_lookup_is_symmetric() {
        let rules = CollisionRules::standard();
        let forward = rules.lookup(Category::Ball, Category::RightFloor);
        let backward = rules.lookup(Category::RightFloor, Category::Ball);
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), 2);
        assert!(rules.lookup(Category::Ball, Category::Divider).is_empty());
    }

    #[test]
    fn test_ground_sets_flag() {
        let rules = CollisionRules::standard();
        let mut ctx = ctx();
        ctx.character_mut(Side::Right).grounded = false;
        let pair = contact(&ctx, Category::RightCharacter, Category::RightFloor, false);
        rules.dispatch(&mut ctx, &[pair]).unwrap();
        assert!(ctx.character(Side::Right).grounded);
    }

    #[test]
    fn test_goal_scores_once_and_respawns_every_step() {
        let rules = CollisionRules::standard();
        let mut ctx = ctx();
        for step in 0..10 {
            ctx.world.body_mut(ctx.ball.body).unwrap().position = Vec2::new(600.0, 520.0);
            let pair = contact(&ctx, Category::Ball, Category::RightFloor, step == 0);
            rules.dispatch(&mut ctx, &[pair]).unwrap();
            assert_eq!(
                ctx.world.body(ctx.ball.body).unwrap().position,
                Ball::spawn_point(Side::Left)
            );
        }
        assert_eq!(ctx.score.render_state(), (1, 0));
        assert_eq!(ctx.events, vec![GameEvent::Goal { scorer: Side::Left }]);
    }

    #[test]
    fn test_goal_on_left_floor_scores_for_right() {
        let rules = CollisionRules::standard();
        let mut ctx = ctx();
        let pair = contact(&ctx, Category::LeftFloor, Category::Ball, true);
        rules.dispatch(&mut ctx, &[pair]).unwrap();
        assert_eq!(ctx.score.render_state(), (0, 1));
        assert_eq!(
            ctx.world.body(ctx.ball.body).unwrap().position,
            Ball::spawn_point(Side::Right)
        );
    }

    #[test]
    fn test_block_intent_at_divider_and_walls() {
        let rules = CollisionRules::standard();
        let mut ctx = ctx();
        for side in Side::ALL {
            let bird = ctx.character_mut(side);
            bird.moving_left = true;
            bird.moving_right = true;
        }
        let pairs = [
            contact(&ctx, Category::LeftCharacter, Category::Divider, true),
            contact(&ctx, Category::RightCharacter, Category::RightWall, true),
        ];
        rules.dispatch(&mut ctx, &pairs).unwrap();

        let left = ctx.character(Side::Left);
        assert!(left.moving_left && !left.moving_right);
        let right = ctx.character(Side::Right);
        assert!(!right.moving_right && right.moving_left);
    }

    #[test]
    fn test_hit_cue_fires_on_begin_only() {
        let rules = CollisionRules::standard();
        let mut ctx = ctx();
        let first = contact(&ctx, Category::LeftCharacter, Category::Ball, true);
        let held = ContactPair { began: false, ..first };
        rules.dispatch(&mut ctx, &[first, held, held]).unwrap();
        assert_eq!(ctx.events.len(), 1);
        match ctx.events[0] {
            GameEvent::Hit { side, variant } => {
                assert_eq!(side, Side::Left);
                assert!(variant < HIT_VARIANTS);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn test_unregistered_pair_is_physics_only() {
        let rules = CollisionRules::builder().build();
        let mut ctx = ctx();
        ctx.character_mut(Side::Left).grounded = false;
        let pair = contact(&ctx, Category::LeftCharacter, Category::LeftFloor, true);
        rules.dispatch(&mut ctx, &[pair]).unwrap();
        assert!(!ctx.character(Side::Left).grounded);
        assert!(ctx.events.is_empty());
    }
}
