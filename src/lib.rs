//! Grid maze movement engine: a player and a random-walking wanderer step
//! through a static maze on a fixed tick.

pub mod agent;
pub mod config;
pub mod direction;
pub mod input;
pub mod layouts;
pub mod maze;
pub mod render;
pub mod runner;
pub mod simulation;
pub mod steering;

pub use agent::{Agent, Role, SimulationError, Step};
pub use direction::{Direction, InvalidDirection, CARDINALS};
pub use layouts::Layout;
pub use maze::{Cell, Maze, MazeError, Pos};
pub use runner::{Runner, RunnerError};
pub use simulation::{AgentView, Simulation, Snapshot};
pub use steering::{Intent, RandomWalk};
