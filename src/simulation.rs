use std::sync::Arc;

use rand::Rng;
use tracing::trace;

use crate::agent::{Agent, Role, SimulationError, Step};
use crate::direction::Direction;
use crate::maze::{Maze, Pos};
use crate::steering::RandomWalk;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AgentView {
    pub pos: Pos,
    pub dir: Direction,
}

impl From<&Agent> for AgentView {
    fn from(agent: &Agent) -> Self {
        Self {
            pos: agent.position(),
            dir: agent.direction(),
        }
    }
}

/// Committed state after a whole tick. Never reflects a half-applied tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Snapshot {
    pub tick: u64,
    pub player: AgentView,
    pub wanderer: AgentView,
}

pub struct Simulation<R> {
    maze: Arc<Maze>,
    player: Agent,
    wanderer: Agent,
    walk: RandomWalk<R>,
    tick: u64,
}

impl<R: Rng> Simulation<R> {
    pub fn new(
        maze: Arc<Maze>,
        player_start: Pos,
        wanderer_start: Pos,
        rng: R,
    ) -> Result<Self, SimulationError> {
        let player = Agent::new(Role::Player, player_start, &maze)?;
        let wanderer = Agent::new(Role::Wanderer, wanderer_start, &maze)?;
        Ok(Self {
            maze,
            player,
            wanderer,
            walk: RandomWalk::new(rng),
            tick: 0,
        })
    }

    pub fn maze(&self) -> &Arc<Maze> {
        &self.maze
    }

    pub fn player(&self) -> &Agent {
        &self.player
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.tick,
            player: AgentView::from(&self.player),
            wanderer: AgentView::from(&self.wanderer),
        }
    }

    /// Resolves both direction requests, then commits both steps.
    /// An idle `intent` leaves the player's direction alone.
    pub fn tick(&mut self, intent: Direction) -> Snapshot {
        let maze = &*self.maze;

        if !intent.is_idle() && intent != self.player.direction() {
            let accepted = self.player.request_direction(intent, maze);
            trace!(%intent, accepted, "player turn");
        }
        let drawn = self.walk.next_direction();
        let accepted = self.wanderer.request_direction(drawn, maze);
        trace!(%drawn, accepted, "wanderer turn");

        for agent in [&mut self.player, &mut self.wanderer] {
            if agent.step_once(maze) == Step::Stalled {
                trace!(role = %agent.role(), dir = %agent.direction(), "stalled");
            }
        }

        self.tick += 1;
        self.snapshot()
    }
}
